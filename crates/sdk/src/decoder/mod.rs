//! Decoding of raw calldata and revert data back into readable form.
//!
//! Both decoders resolve a leading 4-byte selector against a registry built
//! once at construction from the signature tables in [`crate::abi::sigs`].
//! They differ in failure policy: calldata decoding is total and falls back
//! to a fixed string, error decoding propagates unknown selectors.

mod registry;

pub mod calldata;
pub mod error;

pub use calldata::{
    CalldataDecoder, DecodedCall, DecodedValue, DEFAULT_MAX_DECODE_DEPTH, UNKNOWN_CALLDATA,
};
pub use error::ErrorDecoder;

use alloy::dyn_abi::DynSolValue;
use alloy::hex;

/// Default string form of a decoded value, flat: arrays comma-joined,
/// tuples parenthesized. Label lookup happens on top of this.
pub(crate) fn value_to_string(value: &DynSolValue) -> String {
    match value {
        DynSolValue::Address(addr) => addr.to_string(),
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(uint, _) => uint.to_string(),
        DynSolValue::Int(int, _) => int.to_string(),
        DynSolValue::Bytes(bytes) => hex::encode_prefixed(bytes),
        DynSolValue::FixedBytes(word, size) => hex::encode_prefixed(&word[..*size]),
        DynSolValue::String(s) => s.clone(),
        DynSolValue::Function(f) => f.to_string(),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join(","),
        DynSolValue::Tuple(items) => format!(
            "({})",
            items.iter().map(value_to_string).collect::<Vec<_>>().join(",")
        ),
        _ => String::new(),
    }
}
