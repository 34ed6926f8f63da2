//! Revert-data decoding.
//!
//! The two Solidity built-ins, `Error(string)` and `Panic(uint256)`, are
//! matched on fixed selectors before the registry is consulted. Unlike
//! calldata decoding this is not total: an unknown selector is reported as
//! an error rather than papered over, so callers can tell "the protocol
//! reverted with X" apart from "we could not read the revert".

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::Selector;
use tracing::debug;

use super::registry::ErrorRegistry;
use super::value_to_string;
use crate::abi::sigs;
use crate::errors::{Result, SdkError};

/// `Error(string)`, the `revert("...")` built-in.
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
/// `Panic(uint256)`, arithmetic and assertion failures.
const PANIC_UINT256_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

/// Registry-backed revert decoder over all known protocol and token errors.
pub struct ErrorDecoder {
    registry: ErrorRegistry,
}

impl ErrorDecoder {
    pub fn new() -> Result<Self> {
        let registry = ErrorRegistry::from_signatures(&[
            sigs::PROTOCOL_ERRORS_V2,
            sigs::PROTOCOL_ERRORS_V1,
            sigs::ERC20_ERRORS,
        ])?;
        Ok(Self { registry })
    }

    /// Decode revert data into a readable string, e.g.
    /// `USER_IS_UNDERWATER(0x..., 1200000000000000000)`.
    pub fn decode(&self, data: &[u8]) -> Result<String> {
        if data.len() < 4 {
            return Err(SdkError::CalldataTooShort(data.len()));
        }
        let selector = Selector::from_slice(&data[..4]);
        let tail = &data[4..];

        if selector == ERROR_STRING_SELECTOR {
            let decoded =
                DynSolType::Tuple(vec![DynSolType::String]).abi_decode_params(tail)?;
            if let DynSolValue::Tuple(values) = decoded {
                if let Some(DynSolValue::String(reason)) = values.into_iter().next() {
                    return Ok(reason);
                }
            }
        }
        if selector == PANIC_UINT256_SELECTOR {
            let decoded =
                DynSolType::Tuple(vec![DynSolType::Uint(256)]).abi_decode_params(tail)?;
            if let DynSolValue::Tuple(values) = decoded {
                if let Some(DynSolValue::Uint(code, _)) = values.into_iter().next() {
                    return Ok(format!("Panic({code})"));
                }
            }
        }

        let entry = self
            .registry
            .lookup(selector)
            .ok_or(SdkError::UnknownErrorSelector(selector))?;
        let decoded = DynSolType::Tuple(entry.input_types.clone()).abi_decode_params(tail)?;
        let values = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };
        let args: Vec<String> = values.iter().map(value_to_string).collect();
        debug!(name = %entry.error.name, "decoded revert");
        Ok(format!("{}({})", entry.error.name, args.join(",")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, U256};
    use alloy::sol;
    use alloy::sol_types::SolError;

    sol! {
        error Error(string reason);
        error Panic(uint256 code);
        error USER_IS_UNDERWATER(address account, uint256 collateralRatio);
    }

    fn decoder() -> ErrorDecoder {
        ErrorDecoder::new().unwrap()
    }

    #[test]
    fn test_builtin_selectors_match_sol() {
        assert_eq!(Error::SELECTOR, ERROR_STRING_SELECTOR);
        assert_eq!(Panic::SELECTOR, PANIC_UINT256_SELECTOR);
    }

    #[test]
    fn test_error_string_returns_reason() {
        let data = Error { reason: "insufficient balance".into() }.abi_encode();
        assert_eq!(decoder().decode(&data).unwrap(), "insufficient balance");
    }

    #[test]
    fn test_panic_returns_code() {
        let data = Panic { code: U256::from(0x11) }.abi_encode();
        assert_eq!(decoder().decode(&data).unwrap(), "Panic(17)");
    }

    #[test]
    fn test_protocol_error_renders_name_and_args() {
        let account = address!("00000000000000000000000000000000000aaaaa");
        let data = USER_IS_UNDERWATER {
            account,
            collateralRatio: U256::from(1_200_000_000_000_000_000u64),
        }
        .abi_encode();
        let rendered = decoder().decode(&data).unwrap();
        assert!(rendered.starts_with("USER_IS_UNDERWATER("));
        assert!(rendered.contains("1200000000000000000"));
    }

    #[test]
    fn test_unknown_selector_is_an_error() {
        let err = decoder().decode(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert!(matches!(err, SdkError::UnknownErrorSelector(_)));
    }

    #[test]
    fn test_short_data_is_an_error() {
        let err = decoder().decode(&[0x08]).unwrap_err();
        assert!(matches!(err, SdkError::CalldataTooShort(1)));
    }
}
