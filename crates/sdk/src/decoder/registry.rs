//! Selector-indexed ABI registries with canonical-signature deduplication.
//!
//! Protocol versions redeclare the same functions and errors with renamed
//! struct fields. The dedup key is the canonical signature, name plus base
//! types with tuples expanded recursively to their component types, so renamed
//! fields never split or collide entries. The first entry seen for a
//! canonical signature supplies the field names used for rendering.

use alloy::dyn_abi::{DynSolType, Specifier};
use alloy::json_abi::{Error as ErrorAbi, Function, Param};
use alloy::primitives::Selector;
use std::collections::{HashMap, HashSet};

use crate::errors::{Result, SdkError};

/// Canonical signature of a fragment: `name(type,type,...)` with tuple types
/// expanded to their component lists. Pure over the type shape; field names
/// and registry order never influence it.
pub(crate) fn canonical_signature(name: &str, inputs: &[Param]) -> String {
    let types: Vec<String> = inputs.iter().map(|param| param.selector_type().into_owned()).collect();
    format!("{name}({})", types.join(","))
}

pub(crate) struct FunctionEntry {
    pub function: Function,
    /// Resolved input types, in declaration order.
    pub input_types: Vec<DynSolType>,
}

/// Executable-function registry.
pub(crate) struct FunctionRegistry {
    by_selector: HashMap<Selector, FunctionEntry>,
}

impl FunctionRegistry {
    /// Union the given signature tables, deduplicating by canonical
    /// signature.
    pub(crate) fn from_signatures(tables: &[&[&str]]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut by_selector = HashMap::new();

        for sig in tables.iter().flat_map(|table| table.iter()) {
            let function = Function::parse(sig)
                .map_err(|e| SdkError::Registry(format!("bad function signature {sig:?}: {e}")))?;
            if !seen.insert(canonical_signature(&function.name, &function.inputs)) {
                continue;
            }
            let input_types = function
                .inputs
                .iter()
                .map(Specifier::resolve)
                .collect::<core::result::Result<Vec<_>, _>>()?;
            by_selector.insert(function.selector(), FunctionEntry { function, input_types });
        }

        Ok(Self { by_selector })
    }

    pub(crate) fn lookup(&self, selector: Selector) -> Option<&FunctionEntry> {
        self.by_selector.get(&selector)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.by_selector.len()
    }
}

pub(crate) struct ErrorEntry {
    pub error: ErrorAbi,
    pub input_types: Vec<DynSolType>,
}

/// Error-fragment registry, built analogously.
pub(crate) struct ErrorRegistry {
    by_selector: HashMap<Selector, ErrorEntry>,
}

impl ErrorRegistry {
    pub(crate) fn from_signatures(tables: &[&[&str]]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut by_selector = HashMap::new();

        for sig in tables.iter().flat_map(|table| table.iter()) {
            let error = ErrorAbi::parse(sig)
                .map_err(|e| SdkError::Registry(format!("bad error signature {sig:?}: {e}")))?;
            if !seen.insert(canonical_signature(&error.name, &error.inputs)) {
                continue;
            }
            let input_types = error
                .inputs
                .iter()
                .map(Specifier::resolve)
                .collect::<core::result::Result<Vec<_>, _>>()?;
            by_selector.insert(error.selector(), ErrorEntry { error, input_types });
        }

        Ok(Self { by_selector })
    }

    pub(crate) fn lookup(&self, selector: Selector) -> Option<&ErrorEntry> {
        self.by_selector.get(&selector)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
