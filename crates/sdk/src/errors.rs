use alloy::primitives::Selector;
use thiserror::Error;

/// Typed error hierarchy for the SDK.
///
/// Composition has a single structural precondition (a non-empty operation
/// list); everything else surfaces from ABI resolution or decoding.
#[derive(Error, Debug)]
pub enum SdkError {
    // -- Composition --------------------------------------------------------
    #[error("no operations to execute")]
    NoOperations,

    // -- Decoding -----------------------------------------------------------
    #[error("calldata too short: {0} bytes")]
    CalldataTooShort(usize),

    #[error("unknown function selector {0}")]
    UnknownFunctionSelector(Selector),

    #[error("unknown error selector {0}")]
    UnknownErrorSelector(Selector),

    // -- Registry construction ----------------------------------------------
    #[error("ABI registry: {0}")]
    Registry(String),

    // -- Forwarded errors ---------------------------------------------------
    #[error(transparent)]
    AbiDecode(#[from] alloy::dyn_abi::Error),
}

/// Crate-wide result alias.
pub type Result<T, E = SdkError> = core::result::Result<T, E>;
