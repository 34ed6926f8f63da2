//! Transaction SDK for a multi-version on-chain lending protocol.
//!
//! The crate turns a list of high-level [`Operation`]s into the minimal set
//! of signable transactions for a given protocol version, delegating and
//! authorizing through the factory where the version supports it, and
//! decodes the other direction: raw calldata and revert data back into
//! readable strings.
//!
//! [`Sdk`] is the version-dispatching facade; the per-version builders and
//! the decoders are also usable directly.

pub mod abi;
pub mod authorization;
pub mod builder;
pub mod constants;
pub mod decoder;
pub mod errors;
pub mod operation;

pub use authorization::{
    actions_bitmap, actions_from_bitmap, is_action_set, null_actions_bitmap, Action,
};
pub use builder::{Compose, TxBuilderV1, TxBuilderV2};
pub use decoder::{CalldataDecoder, ErrorDecoder, DEFAULT_MAX_DECODE_DEPTH, UNKNOWN_CALLDATA};
pub use errors::{Result, SdkError};
pub use operation::{
    FactoryCall, FactoryOperation, MarketCall, MarketOperation, Operation, TokenApproval, TxArgs,
};

use alloy::primitives::Address;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Deployed protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    V1,
    V2,
}

/// Static configuration for one deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct SdkConfig {
    pub version: ProtocolVersion,
    /// The factory contract for this deployment. V1 uses it only as a call
    /// target for factory operations; V2 additionally routes delegated
    /// market calls through it.
    pub factory: Address,
    /// Extra display labels for the calldata decoder, canonical value to
    /// replacement. Matched case-insensitively.
    #[serde(default)]
    pub labels: HashMap<String, String>,
    /// Bound on speculative nested-decode recursion.
    #[serde(default = "default_max_decode_depth")]
    pub max_decode_depth: usize,
}

fn default_max_decode_depth() -> usize {
    DEFAULT_MAX_DECODE_DEPTH
}

enum Builder {
    V1(TxBuilderV1),
    V2(TxBuilderV2),
}

/// Version-dispatching facade over composition and decoding.
pub struct Sdk {
    builder: Builder,
    calldata: CalldataDecoder,
    error: ErrorDecoder,
}

impl Sdk {
    pub fn new(config: &SdkConfig) -> Result<Self> {
        let builder = match config.version {
            ProtocolVersion::V1 => Builder::V1(TxBuilderV1::new(config.factory)),
            ProtocolVersion::V2 => Builder::V2(TxBuilderV2::new(config.factory)),
        };
        let calldata = CalldataDecoder::new(&config.labels, config.max_decode_depth)?;
        let error = ErrorDecoder::new()?;
        debug!(version = ?config.version, factory = %config.factory, "sdk ready");
        Ok(Self { builder, calldata, error })
    }

    /// Compose `operations` into signable transactions on behalf of
    /// `on_behalf_of`. See [`Compose`].
    pub fn build(
        &self,
        on_behalf_of: Address,
        operations: &[Operation],
        recipient: Option<Address>,
    ) -> Result<Vec<TxArgs>> {
        match &self.builder {
            Builder::V1(builder) => builder.compose(on_behalf_of, operations, recipient),
            Builder::V2(builder) => builder.compose(on_behalf_of, operations, recipient),
        }
    }

    /// Render calldata as a readable call tree. Total: unknown or malformed
    /// input yields [`UNKNOWN_CALLDATA`].
    pub fn decode_calldata(&self, data: &[u8]) -> String {
        self.calldata.decode(data)
    }

    /// Decode revert data. Unknown selectors are an error.
    pub fn decode_error(&self, data: &[u8]) -> Result<String> {
        self.error.decode(data)
    }
}
