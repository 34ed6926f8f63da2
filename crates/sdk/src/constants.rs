use alloy::primitives::{Address, I256, U256};
use std::collections::HashMap;

use crate::abi::CopyLimitOrderConfig;

// ---------------------------------------------------------------------------
// Copy-config presets
// ---------------------------------------------------------------------------

/// Copy the followed account's limit orders verbatim, over any tenor/APR.
pub const FULL_COPY: CopyLimitOrderConfig = CopyLimitOrderConfig {
    minTenor: U256::ZERO,
    maxTenor: U256::MAX,
    minAPR: U256::ZERO,
    maxAPR: U256::MAX,
    offsetAPR: I256::ZERO,
};

/// Empty tenor/APR range: copying disabled for this side.
pub const NO_COPY: CopyLimitOrderConfig = CopyLimitOrderConfig {
    minTenor: U256::MAX,
    maxTenor: U256::ZERO,
    minAPR: U256::MAX,
    maxAPR: U256::ZERO,
    offsetAPR: I256::ZERO,
};

/// All-zero config, used to clear a previously set copy config.
pub const NULL_COPY: CopyLimitOrderConfig = CopyLimitOrderConfig {
    minTenor: U256::ZERO,
    maxTenor: U256::ZERO,
    minAPR: U256::ZERO,
    maxAPR: U256::ZERO,
    offsetAPR: I256::ZERO,
};

// ---------------------------------------------------------------------------
// Decoder labels
// ---------------------------------------------------------------------------

/// Built-in label table for the calldata decoder: canonical scalar string →
/// human-readable name. Caller-supplied labels are layered on top.
pub fn default_labels() -> HashMap<String, String> {
    HashMap::from([
        (U256::MAX.to_string(), "type(uint256).max".to_string()),
        (I256::MAX.to_string(), "type(int256).max".to_string()),
        (I256::MIN.to_string(), "type(int256).min".to_string()),
        (Address::ZERO.to_string(), "address(0)".to_string()),
    ])
}
