//! Protocol v1 composition: single-market grouping, no delegation.
//!
//! A linear pass coalesces consecutive operations on the same market into
//! one group; approval and factory operations always stand alone. Groups of
//! one encode directly; larger groups wrap their members in the market's
//! `multicall`, summing any native values.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use tracing::debug;

use super::Compose;
use crate::abi::IMarket;
use crate::errors::{Result, SdkError};
use crate::operation::{FactoryOperation, MarketOperation, Operation, TokenApproval, TxArgs};

/// Composer for the v1 protocol.
#[derive(Debug, Clone)]
pub struct TxBuilderV1 {
    factory: Address,
}

enum Group<'a> {
    Market { market: Address, ops: Vec<&'a MarketOperation> },
    Factory(&'a FactoryOperation),
    Approval(&'a TokenApproval),
}

impl TxBuilderV1 {
    pub const fn new(factory: Address) -> Self {
        Self { factory }
    }

    fn render_group(&self, group: Group<'_>) -> TxArgs {
        match group {
            Group::Approval(approval) => TxArgs {
                target: approval.token,
                data: approval.abi_encode().into(),
                value: None,
            },
            Group::Factory(factory_op) => TxArgs {
                target: self.factory,
                data: factory_op.call.abi_encode().into(),
                value: None,
            },
            Group::Market { market, ops } => {
                if let [only] = ops.as_slice() {
                    return TxArgs {
                        target: market,
                        data: only.call.abi_encode().into(),
                        value: only.value,
                    };
                }

                let datas = ops.iter().map(|op| op.call.abi_encode().into()).collect();
                let total_value = ops
                    .iter()
                    .filter_map(|op| op.value)
                    .fold(U256::ZERO, |acc, value| acc + value);
                TxArgs {
                    target: market,
                    data: IMarket::multicallCall { datas }.abi_encode().into(),
                    value: (!total_value.is_zero()).then_some(total_value),
                }
            }
        }
    }
}

/// Coalesce consecutive same-market operations, preserving order.
fn group_operations(operations: &[Operation]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    for operation in operations {
        match operation {
            Operation::Market(market_op) => match groups.last_mut() {
                Some(Group::Market { market, ops }) if *market == market_op.market => {
                    ops.push(market_op);
                }
                _ => groups.push(Group::Market {
                    market: market_op.market,
                    ops: vec![market_op],
                }),
            },
            Operation::Factory(factory_op) => groups.push(Group::Factory(factory_op)),
            Operation::Approval(approval) => groups.push(Group::Approval(approval)),
        }
    }
    groups
}

impl Compose for TxBuilderV1 {
    fn compose(
        &self,
        _on_behalf_of: Address,
        operations: &[Operation],
        _recipient: Option<Address>,
    ) -> Result<Vec<TxArgs>> {
        if operations.is_empty() {
            return Err(SdkError::NoOperations);
        }

        let groups = group_operations(operations);
        debug!(operations = operations.len(), groups = groups.len(), "composing v1 batch");

        Ok(groups.into_iter().map(|group| self.render_group(group)).collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{self, IMarketFactory};
    use crate::authorization::{actions_bitmap, Action};
    use crate::operation::{FactoryCall, MarketCall};
    use alloy::hex;
    use alloy::primitives::{address, Bytes};

    const FACTORY: Address = address!("000000000000000000000000000000000000ffff");
    const MARKET_1: Address = address!("0000000000000000000000000000000000000123");
    const MARKET_2: Address = address!("0000000000000000000000000000000000000456");
    const ALICE: Address = address!("0000000000000000000000000000000000011111");
    const BOB: Address = address!("0000000000000000000000000000000000022222");
    const USDC: Address = address!("0000000000000000000000000000000000008888");
    const WETH: Address = address!("4200000000000000000000000000000000000006");

    fn contains_selector(data: &Bytes, selector: [u8; 4]) -> bool {
        hex::encode(data).contains(&hex::encode(selector))
    }

    fn deposit(market: Address, amount: u64) -> Operation {
        MarketOperation::new(
            market,
            MarketCall::Deposit(abi::DepositParams {
                token: WETH,
                amount: U256::from(amount),
                to: ALICE,
            }),
        )
        .into()
    }

    fn sell_credit_market(market: Address) -> Operation {
        MarketOperation::new(
            market,
            MarketCall::SellCreditMarket(abi::SellCreditMarketParams {
                lender: BOB,
                creditPositionId: U256::MAX,
                amount: U256::from(100),
                tenor: U256::from(31_536_000u64),
                deadline: U256::from(1_893_456_000u64),
                maxAPR: U256::MAX,
                exactAmountIn: false,
                collectionId: U256::ZERO,
                rateProvider: Address::ZERO,
            }),
        )
        .into()
    }

    fn set_user_configuration(market: Address) -> Operation {
        MarketOperation::new(
            market,
            MarketCall::SetUserConfiguration(abi::SetUserConfigurationParams {
                openingLimitBorrowCR: U256::ZERO,
                allCreditPositionsForSaleDisabled: false,
                creditPositionIdsForSale: false,
                creditPositionIds: vec![],
            }),
        )
        .into()
    }

    #[test]
    fn test_single_operation_encodes_directly() {
        let builder = TxBuilderV1::new(FACTORY);
        let txs = builder.compose(ALICE, &[deposit(MARKET_1, 100)], None).unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].target, MARKET_1);
        assert_eq!(txs[0].data[..4], abi::IMarket::depositCall::SELECTOR);
        assert!(!contains_selector(&txs[0].data, abi::IMarket::multicallCall::SELECTOR));
        assert_eq!(txs[0].value, None);
    }

    #[test]
    fn test_consecutive_same_market_operations_merge() {
        // [config@M2, deposit@M1, setCopyLimitOrderConfigs@M1] → two calls.
        let builder = TxBuilderV1::new(FACTORY);
        let copy_orders = MarketOperation::new(
            MARKET_1,
            MarketCall::SetCopyLimitOrderConfigs(abi::SetCopyLimitOrderConfigsParams {
                copyAddress: BOB,
                copyLoanOffer: crate::constants::FULL_COPY,
                copyBorrowOffer: crate::constants::FULL_COPY,
            }),
        );
        let txs = builder
            .compose(
                ALICE,
                &[set_user_configuration(MARKET_2), deposit(MARKET_1, 100), copy_orders.into()],
                None,
            )
            .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].target, MARKET_2);
        assert_eq!(txs[1].target, MARKET_1);
        assert!(contains_selector(&txs[1].data, abi::IMarket::multicallCall::SELECTOR));
        assert!(contains_selector(&txs[1].data, abi::IMarket::depositCall::SELECTOR));
        assert!(contains_selector(
            &txs[1].data,
            abi::IMarket::setCopyLimitOrderConfigsCall::SELECTOR
        ));
    }

    #[test]
    fn test_operations_on_different_markets_never_merge() {
        let builder = TxBuilderV1::new(FACTORY);
        let txs = builder
            .compose(
                ALICE,
                &[
                    deposit(MARKET_1, 300),
                    sell_credit_market(MARKET_1),
                    deposit(MARKET_2, 400),
                    sell_credit_market(MARKET_2),
                    deposit(MARKET_1, 1),
                ],
                None,
            )
            .unwrap();

        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].target, MARKET_1);
        assert_eq!(txs[1].target, MARKET_2);
        assert_eq!(txs[2].target, MARKET_1);
        for tx in &txs {
            assert!(!contains_selector(&tx.data, IMarketFactory::callMarketCall::SELECTOR));
            assert!(!contains_selector(&tx.data, IMarketFactory::setAuthorizationCall::SELECTOR));
            assert!(!contains_selector(&tx.data, abi::IMarket::depositOnBehalfOfCall::SELECTOR));
        }
    }

    #[test]
    fn test_approval_and_factory_operations_stand_alone() {
        // approve + deposit@M1 + sellCreditMarket@M1 + setAuthorization@factory
        // → three calls.
        let builder = TxBuilderV1::new(FACTORY);
        let approve = TokenApproval { token: USDC, spender: MARKET_1, amount: U256::from(100) };
        let set_auth = FactoryOperation {
            call: FactoryCall::SetAuthorization {
                operator: BOB,
                actions_bitmap: actions_bitmap(&[Action::Deposit]),
            },
        };
        let txs = builder
            .compose(
                ALICE,
                &[
                    approve.into(),
                    deposit(MARKET_1, 100),
                    sell_credit_market(MARKET_1),
                    set_auth.into(),
                ],
                None,
            )
            .unwrap();

        assert_eq!(txs.len(), 3);
        assert_eq!(txs[0].target, USDC);
        assert_eq!(txs[0].data[..4], abi::IERC20::approveCall::SELECTOR);
        assert_eq!(txs[1].target, MARKET_1);
        assert!(contains_selector(&txs[1].data, abi::IMarket::multicallCall::SELECTOR));
        assert!(contains_selector(&txs[1].data, abi::IMarket::depositCall::SELECTOR));
        assert!(contains_selector(&txs[1].data, abi::IMarket::sellCreditMarketCall::SELECTOR));
        assert_eq!(txs[2].target, FACTORY);
        assert_eq!(txs[2].data[..4], IMarketFactory::setAuthorizationCall::SELECTOR);
    }

    #[test]
    fn test_merged_group_sums_values() {
        let builder = TxBuilderV1::new(FACTORY);
        let value = U256::from(100_000_000_000_000_000u64);
        let funded = MarketOperation::new(
            MARKET_1,
            MarketCall::Deposit(abi::DepositParams { token: WETH, amount: value, to: ALICE }),
        )
        .with_value(value);
        let txs = builder
            .compose(ALICE, &[funded.into(), sell_credit_market(MARKET_1)], None)
            .unwrap();

        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].target, MARKET_1);
        assert_eq!(txs[0].value, Some(value));
    }

    #[test]
    fn test_zero_value_sum_is_omitted() {
        let builder = TxBuilderV1::new(FACTORY);
        let txs = builder
            .compose(ALICE, &[deposit(MARKET_1, 1), sell_credit_market(MARKET_1)], None)
            .unwrap();
        assert_eq!(txs[0].value, None);
    }

    #[test]
    fn test_empty_operations_fail() {
        let builder = TxBuilderV1::new(FACTORY);
        let err = builder.compose(ALICE, &[], None).unwrap_err();
        assert!(matches!(err, SdkError::NoOperations));
        assert_eq!(err.to_string(), "no operations to execute");
    }
}
