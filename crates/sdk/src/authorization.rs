//! Authorization actions and bitmap codec.
//!
//! The factory gates delegated ("on behalf of") market calls behind a
//! per-operator permission bitmap: bit `i` set ⇔ `Action` with index `i`
//! granted. A bitmap of zero means no permissions and doubles as the
//! explicit revoke-all value.

use alloy::primitives::U256;
use std::fmt;

/// Permission kinds gated by the factory's authorization bitmap.
///
/// Indices are part of the on-chain encoding and are never reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Action {
    Deposit = 0,
    Withdraw = 1,
    SellCreditLimit = 2,
    SellCreditMarket = 3,
    BuyCreditLimit = 4,
    BuyCreditMarket = 5,
    SelfLiquidate = 6,
    SetUserConfiguration = 7,
    SetCopyLimitOrderConfigs = 8,
    SetVault = 9,
}

impl Action {
    /// Number of actions in the enumeration.
    pub const COUNT: usize = 10;

    /// All actions in canonical index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Deposit,
        Self::Withdraw,
        Self::SellCreditLimit,
        Self::SellCreditMarket,
        Self::BuyCreditLimit,
        Self::BuyCreditMarket,
        Self::SelfLiquidate,
        Self::SetUserConfiguration,
        Self::SetCopyLimitOrderConfigs,
        Self::SetVault,
    ];

    /// Stable bit index of this action.
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::SellCreditLimit => "SELL_CREDIT_LIMIT",
            Self::SellCreditMarket => "SELL_CREDIT_MARKET",
            Self::BuyCreditLimit => "BUY_CREDIT_LIMIT",
            Self::BuyCreditMarket => "BUY_CREDIT_MARKET",
            Self::SelfLiquidate => "SELF_LIQUIDATE",
            Self::SetUserConfiguration => "SET_USER_CONFIGURATION",
            Self::SetCopyLimitOrderConfigs => "SET_COPY_LIMIT_ORDER_CONFIGS",
            Self::SetVault => "SET_VAULT",
        };
        f.write_str(name)
    }
}

/// Encode a set of actions into a permission bitmap.
///
/// Order-independent; duplicates are harmless; the empty set encodes to zero.
pub fn actions_bitmap(actions: &[Action]) -> U256 {
    actions
        .iter()
        .fold(U256::ZERO, |acc, action| acc | (U256::ONE << action.index() as usize))
}

/// Decode a permission bitmap into actions in canonical index order.
pub fn actions_from_bitmap(bitmap: U256) -> Vec<Action> {
    Action::ALL
        .into_iter()
        .filter(|action| is_action_set(bitmap, *action))
        .collect()
}

/// Check whether a single action's bit is set.
pub fn is_action_set(bitmap: U256, action: Action) -> bool {
    bitmap.bit(action.index() as usize)
}

/// The revoke-all bitmap (no permissions).
pub const fn null_actions_bitmap() -> U256 {
    U256::ZERO
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
