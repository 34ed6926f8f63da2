//! The operation model: what a caller intends to execute, before any
//! grouping, wrapping or authorization bracketing is applied.
//!
//! Operations are immutable descriptions; a builder consumes an ordered list
//! of them and produces [`TxArgs`]. Every consumption site matches the
//! closed enums exhaustively, so adding an operation kind is a compile-time
//! checked change.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::abi::{self, IERC20, IMarket, IMarketFactory};

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// An intended on-chain call.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A call against a specific lending market.
    Market(MarketOperation),
    /// A call against the market factory.
    Factory(FactoryOperation),
    /// An ERC-20 approval preceding a market interaction.
    Approval(TokenApproval),
}

/// A market call plus its target and optional native value.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketOperation {
    pub market: Address,
    pub call: MarketCall,
    /// Native value forwarded with the call (e.g. ETH deposits).
    pub value: Option<U256>,
}

impl MarketOperation {
    pub fn new(market: Address, call: MarketCall) -> Self {
        Self { market, call, value: None }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = Some(value);
        self
    }
}

/// A call against the factory.
#[derive(Debug, Clone, PartialEq)]
pub struct FactoryOperation {
    pub call: FactoryCall,
}

/// `approve(spender, amount)` on an ERC-20 token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenApproval {
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

// ---------------------------------------------------------------------------
// Market calls
// ---------------------------------------------------------------------------

/// Every state-changing market entry point, with its typed params struct.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketCall {
    Deposit(abi::DepositParams),
    Withdraw(abi::WithdrawParams),
    BuyCreditLimit(abi::BuyCreditLimitParams),
    BuyCreditMarket(abi::BuyCreditMarketParams),
    SellCreditLimit(abi::SellCreditLimitParams),
    SellCreditMarket(abi::SellCreditMarketParams),
    Repay(abi::RepayParams),
    Liquidate(abi::LiquidateParams),
    SelfLiquidate(abi::SelfLiquidateParams),
    SetUserConfiguration(abi::SetUserConfigurationParams),
    SetCopyLimitOrderConfigs(abi::SetCopyLimitOrderConfigsParams),
    SetVault(abi::SetVaultParams),
}

impl MarketCall {
    /// ABI-encode the direct (non-delegated) call, selector included.
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            Self::Deposit(params) => IMarket::depositCall { params: params.clone() }.abi_encode(),
            Self::Withdraw(params) => IMarket::withdrawCall { params: params.clone() }.abi_encode(),
            Self::BuyCreditLimit(params) => {
                IMarket::buyCreditLimitCall { params: params.clone() }.abi_encode()
            }
            Self::BuyCreditMarket(params) => {
                IMarket::buyCreditMarketCall { params: params.clone() }.abi_encode()
            }
            Self::SellCreditLimit(params) => {
                IMarket::sellCreditLimitCall { params: params.clone() }.abi_encode()
            }
            Self::SellCreditMarket(params) => {
                IMarket::sellCreditMarketCall { params: params.clone() }.abi_encode()
            }
            Self::Repay(params) => IMarket::repayCall { params: params.clone() }.abi_encode(),
            Self::Liquidate(params) => {
                IMarket::liquidateCall { params: params.clone() }.abi_encode()
            }
            Self::SelfLiquidate(params) => {
                IMarket::selfLiquidateCall { params: params.clone() }.abi_encode()
            }
            Self::SetUserConfiguration(params) => {
                IMarket::setUserConfigurationCall { params: params.clone() }.abi_encode()
            }
            Self::SetCopyLimitOrderConfigs(params) => {
                IMarket::setCopyLimitOrderConfigsCall { params: params.clone() }.abi_encode()
            }
            Self::SetVault(params) => {
                IMarket::setVaultCall { params: params.clone() }.abi_encode()
            }
        }
    }

    /// Solidity-level function name of the direct call.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Deposit(_) => "deposit",
            Self::Withdraw(_) => "withdraw",
            Self::BuyCreditLimit(_) => "buyCreditLimit",
            Self::BuyCreditMarket(_) => "buyCreditMarket",
            Self::SellCreditLimit(_) => "sellCreditLimit",
            Self::SellCreditMarket(_) => "sellCreditMarket",
            Self::Repay(_) => "repay",
            Self::Liquidate(_) => "liquidate",
            Self::SelfLiquidate(_) => "selfLiquidate",
            Self::SetUserConfiguration(_) => "setUserConfiguration",
            Self::SetCopyLimitOrderConfigs(_) => "setCopyLimitOrderConfigs",
            Self::SetVault(_) => "setVault",
        }
    }
}

// ---------------------------------------------------------------------------
// Factory calls
// ---------------------------------------------------------------------------

/// Factory entry points the SDK composes directly.
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryCall {
    SubscribeToCollections { collection_ids: Vec<U256> },
    UnsubscribeFromCollections { collection_ids: Vec<U256> },
    SetAuthorization { operator: Address, actions_bitmap: U256 },
    RevokeAllAuthorizations,
    SetUserCollectionCopyLimitOrderConfigs {
        collection_id: U256,
        copy_loan_offer: abi::CopyLimitOrderConfig,
        copy_borrow_offer: abi::CopyLimitOrderConfig,
    },
}

impl FactoryCall {
    /// ABI-encode the factory call, selector included.
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            Self::SubscribeToCollections { collection_ids } => {
                IMarketFactory::subscribeToCollectionsCall {
                    collectionIds: collection_ids.clone(),
                }
                .abi_encode()
            }
            Self::UnsubscribeFromCollections { collection_ids } => {
                IMarketFactory::unsubscribeFromCollectionsCall {
                    collectionIds: collection_ids.clone(),
                }
                .abi_encode()
            }
            Self::SetAuthorization { operator, actions_bitmap } => {
                IMarketFactory::setAuthorizationCall {
                    operator: *operator,
                    actionsBitmap: *actions_bitmap,
                }
                .abi_encode()
            }
            Self::RevokeAllAuthorizations => {
                IMarketFactory::revokeAllAuthorizationsCall {}.abi_encode()
            }
            Self::SetUserCollectionCopyLimitOrderConfigs {
                collection_id,
                copy_loan_offer,
                copy_borrow_offer,
            } => IMarketFactory::setUserCollectionCopyLimitOrderConfigsCall {
                collectionId: *collection_id,
                copyLoanOffer: copy_loan_offer.clone(),
                copyBorrowOffer: copy_borrow_offer.clone(),
            }
            .abi_encode(),
        }
    }
}

impl TokenApproval {
    /// ABI-encode `approve(spender, amount)`.
    pub fn abi_encode(&self) -> Vec<u8> {
        IERC20::approveCall { spender: self.spender, amount: self.amount }.abi_encode()
    }
}

// ---------------------------------------------------------------------------
// Output unit
// ---------------------------------------------------------------------------

/// One composed on-chain call: the only externally observed artifact of
/// composition.
#[derive(Debug, Clone, PartialEq)]
pub struct TxArgs {
    pub target: Address,
    pub data: Bytes,
    pub value: Option<U256>,
}

impl From<MarketOperation> for Operation {
    fn from(op: MarketOperation) -> Self {
        Self::Market(op)
    }
}

impl From<FactoryOperation> for Operation {
    fn from(op: FactoryOperation) -> Self {
        Self::Factory(op)
    }
}

impl From<TokenApproval> for Operation {
    fn from(op: TokenApproval) -> Self {
        Self::Approval(op)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_market_call_encoding_starts_with_selector() {
        let call = MarketCall::Deposit(abi::DepositParams {
            token: address!("4200000000000000000000000000000000000006"),
            amount: U256::from(100),
            to: Address::ZERO,
        });
        let encoded = call.abi_encode();
        assert_eq!(encoded[..4], IMarket::depositCall::SELECTOR);
        // One static tuple of (address, uint256, address).
        assert_eq!(encoded.len(), 4 + 3 * 32);
    }

    #[test]
    fn test_factory_call_encoding() {
        let call = FactoryCall::SetAuthorization {
            operator: address!("0000000000000000000000000000000000022222"),
            actions_bitmap: U256::from(1),
        };
        let encoded = call.abi_encode();
        assert_eq!(encoded[..4], IMarketFactory::setAuthorizationCall::SELECTOR);
        assert_eq!(encoded.len(), 4 + 2 * 32);
    }

    #[test]
    fn test_approval_encoding() {
        let approval = TokenApproval {
            token: address!("0000000000000000000000000000000000008888"),
            spender: address!("0000000000000000000000000000000000000123"),
            amount: U256::from(100),
        };
        let encoded = approval.abi_encode();
        assert_eq!(encoded[..4], IERC20::approveCall::SELECTOR);
    }

    #[test]
    fn test_call_names() {
        let call = MarketCall::SelfLiquidate(abi::SelfLiquidateParams {
            creditPositionId: U256::ZERO,
        });
        assert_eq!(call.name(), "selfLiquidate");
    }
}
