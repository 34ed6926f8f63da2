//! Recursive calldata decoding and pretty-printing.
//!
//! `decode` is total: anything that fails to resolve (unknown selector,
//! malformed tail, short input) comes back as [`UNKNOWN_CALLDATA`] instead
//! of an error. `bytes` arguments are speculatively re-decoded as nested
//! calls against the same registry (per element for `bytes[]`), falling back
//! to the raw hex string; nesting is bounded by a configurable depth guard.

use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::hex;
use alloy::json_abi::Param;
use alloy::primitives::Selector;
use std::collections::HashMap;
use tracing::trace;

use super::registry::FunctionRegistry;
use super::value_to_string;
use crate::abi::sigs;
use crate::authorization::{actions_from_bitmap, Action};
use crate::constants::default_labels;
use crate::errors::{Result, SdkError};

/// Fallback returned for anything that does not resolve as a known call.
pub const UNKNOWN_CALLDATA: &str = "Unknown function call or invalid calldata";

/// Default bound on speculative nested-decode recursion.
pub const DEFAULT_MAX_DECODE_DEPTH: usize = 8;

/// A decoded call: function name and formatted arguments, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedCall {
    pub name: String,
    pub args: Vec<DecodedValue>,
}

/// One decoded argument.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Scalar in canonical string form, label-substituted.
    Scalar(String),
    /// An authorization bitmap, decoded to action names.
    Actions(Vec<Action>),
    /// Inline list (scalar arrays).
    List(Vec<DecodedValue>),
    /// Block list, one element per line (`bytes[]`, arrays of tuples).
    Blocks(Vec<DecodedValue>),
    /// Named-field tuple.
    Fields(Vec<(String, DecodedValue)>),
    /// A `bytes` argument that itself decoded as a call.
    Call(Box<DecodedCall>),
    /// A `bytes` argument that did not decode: raw hex.
    Raw(String),
}

/// Registry-backed calldata decoder. Cheap to share: all state is built at
/// construction and read-only afterwards.
pub struct CalldataDecoder {
    registry: FunctionRegistry,
    labels: HashMap<String, String>,
    max_depth: usize,
}

impl CalldataDecoder {
    /// Build the decoder over the union of all known function tables.
    ///
    /// `labels` is layered over the built-in sentinel labels; keys are
    /// matched case-insensitively against canonical scalar strings.
    pub fn new(labels: &HashMap<String, String>, max_depth: usize) -> Result<Self> {
        let registry = FunctionRegistry::from_signatures(&[
            sigs::MARKET_FUNCTIONS_V2,
            sigs::MARKET_FUNCTIONS_V1,
            sigs::FACTORY_FUNCTIONS,
            sigs::ERC20_FUNCTIONS,
        ])?;

        let mut merged = default_labels();
        merged.extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
        let labels = merged
            .into_iter()
            .map(|(key, value)| (key.to_lowercase(), value))
            .collect();

        Ok(Self { registry, labels, max_depth })
    }

    /// Decode raw calldata into its rendered string form. Never fails.
    pub fn decode(&self, data: &[u8]) -> String {
        match self.decode_call(data, 0) {
            Ok(call) => render_call(&call, 0),
            Err(error) => {
                trace!(%error, "calldata did not resolve");
                UNKNOWN_CALLDATA.to_string()
            }
        }
    }

    /// Decode raw calldata into the argument tree.
    pub fn decode_tree(&self, data: &[u8]) -> Result<DecodedCall> {
        self.decode_call(data, 0)
    }

    fn decode_call(&self, data: &[u8], depth: usize) -> Result<DecodedCall> {
        if data.len() < 4 {
            return Err(SdkError::CalldataTooShort(data.len()));
        }
        let selector = Selector::from_slice(&data[..4]);
        let entry = self
            .registry
            .lookup(selector)
            .ok_or(SdkError::UnknownFunctionSelector(selector))?;

        let decoded = DynSolType::Tuple(entry.input_types.clone()).abi_decode_params(&data[4..])?;
        let values = match decoded {
            DynSolValue::Tuple(values) => values,
            other => vec![other],
        };

        let name = entry.function.name.clone();
        let args = entry
            .function
            .inputs
            .iter()
            .zip(values)
            .map(|(param, value)| self.format_arg(&name, param, value, depth))
            .collect();
        Ok(DecodedCall { name, args })
    }

    /// Format one top-level argument.
    fn format_arg(
        &self,
        function: &str,
        param: &Param,
        value: DynSolValue,
        depth: usize,
    ) -> DecodedValue {
        // The setAuthorization bitmap reads better as action names.
        if function == "setAuthorization" && param.ty == "uint256" {
            if let DynSolValue::Uint(bitmap, _) = value {
                return DecodedValue::Actions(actions_from_bitmap(bitmap));
            }
        }

        match (param.ty.as_str(), value) {
            ("bytes", DynSolValue::Bytes(data)) => self.speculative(&data, depth),
            ("bytes[]", DynSolValue::Array(items)) => DecodedValue::Blocks(
                items
                    .into_iter()
                    .map(|item| match item {
                        DynSolValue::Bytes(data) => self.speculative(&data, depth),
                        other => self.scalar(&other),
                    })
                    .collect(),
            ),
            (_, value) => self.format_component(param, value),
        }
    }

    /// Format a value below the top level: tuples, arrays and scalars.
    /// No speculative decoding down here.
    fn format_component(&self, param: &Param, value: DynSolValue) -> DecodedValue {
        if param.ty == "tuple" {
            if let DynSolValue::Tuple(values) = value {
                let fields = param
                    .components
                    .iter()
                    .zip(values)
                    .map(|(component, value)| {
                        (component.name.clone(), self.format_component(component, value))
                    })
                    .collect();
                return DecodedValue::Fields(fields);
            }
            return self.scalar(&value);
        }

        if param.ty.starts_with("tuple") {
            // tuple[] / tuple[N]: one block per element, components shared.
            let element = Param { ty: "tuple".into(), ..param.clone() };
            if let DynSolValue::Array(items) | DynSolValue::FixedArray(items) = value {
                return DecodedValue::Blocks(
                    items
                        .into_iter()
                        .map(|item| self.format_component(&element, item))
                        .collect(),
                );
            }
            return self.scalar(&value);
        }

        match value {
            DynSolValue::Array(items) | DynSolValue::FixedArray(items) => DecodedValue::List(
                items.iter().map(|item| self.scalar(item)).collect(),
            ),
            other => self.scalar(&other),
        }
    }

    fn scalar(&self, value: &DynSolValue) -> DecodedValue {
        DecodedValue::Scalar(self.label(value_to_string(value)))
    }

    fn label(&self, canonical: String) -> String {
        self.labels.get(&canonical.to_lowercase()).cloned().unwrap_or(canonical)
    }

    /// Try to decode a `bytes` payload as a nested call; keep the raw hex on
    /// any failure or once the depth guard is hit.
    fn speculative(&self, data: &[u8], depth: usize) -> DecodedValue {
        if depth < self.max_depth {
            if let Ok(call) = self.decode_call(data, depth + 1) {
                return DecodedValue::Call(Box::new(call));
            }
        }
        DecodedValue::Raw(hex::encode_prefixed(data))
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn render_call(call: &DecodedCall, level: usize) -> String {
    if call.args.is_empty() {
        return format!("{}()", call.name);
    }
    let sep = format!(",\n{}", indent(level + 1));
    let args = call
        .args
        .iter()
        .map(|arg| render_value(arg, level + 1))
        .collect::<Vec<_>>()
        .join(&sep);
    format!("{}(\n{}{}\n{})", call.name, indent(level + 1), args, indent(level))
}

fn render_value(value: &DecodedValue, level: usize) -> String {
    match value {
        DecodedValue::Scalar(s) | DecodedValue::Raw(s) => s.clone(),
        DecodedValue::Actions(actions) => format!(
            "[{}]",
            actions.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
        ),
        DecodedValue::List(items) => format!(
            "[{}]",
            items.iter().map(|item| render_value(item, level)).collect::<Vec<_>>().join(", ")
        ),
        DecodedValue::Blocks(items) => {
            let sep = format!(",\n{}", indent(level + 1));
            let inner = items
                .iter()
                .map(|item| render_value(item, level + 1))
                .collect::<Vec<_>>()
                .join(&sep);
            format!("[\n{}{}\n{}]", indent(level + 1), inner, indent(level))
        }
        DecodedValue::Fields(fields) => {
            let sep = format!(",\n{}", indent(level + 1));
            let inner = fields
                .iter()
                .map(|(name, value)| format!("{name}: {}", render_value(value, level + 1)))
                .collect::<Vec<_>>()
                .join(&sep);
            format!("{{\n{}{}\n{}}}", indent(level + 1), inner, indent(level))
        }
        DecodedValue::Call(call) => render_call(call, level),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
