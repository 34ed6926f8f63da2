//! Protocol v2 composition: delegation-aware, factory-routed.
//!
//! Market calls are re-encoded as their `*OnBehalfOf` counterparts and
//! relayed through the factory's `callMarket`, so a single factory
//! `multicall` can act for the principal across several markets. The batch
//! is bracketed with a `setAuthorization` grant for exactly the union of
//! required actions and a trailing revoke-all.
//!
//! `callMarket` does not forward native value: value-bearing operations
//! should not be combined with delegation wrapping. This is a wire-protocol
//! limitation, documented rather than validated here; only the
//! single-operation fast path carries a value through.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use tracing::debug;

use super::Compose;
use crate::abi::{self, IMarket, IMarketFactory};
use crate::authorization::{actions_bitmap, null_actions_bitmap, Action};
use crate::errors::{Result, SdkError};
use crate::operation::{MarketCall, Operation, TxArgs};

/// Composer for the v2 protocol.
#[derive(Debug, Clone)]
pub struct TxBuilderV2 {
    factory: Address,
}

/// Per-operation intermediate: primary payload plus, where supported, the
/// delegated variant and the permission it requires.
struct Subcall {
    target: Address,
    calldata: Vec<u8>,
    value: Option<U256>,
    is_approval: bool,
    delegated_calldata: Option<Vec<u8>>,
    required_action: Option<Action>,
}

impl Subcall {
    fn delegated_or_primary(&self) -> Vec<u8> {
        self.delegated_calldata.clone().unwrap_or_else(|| self.calldata.clone())
    }
}

/// Capability table: the delegated re-encoding of a market call, plus the
/// action its authorization grant must cover.
///
/// Repay and liquidations deliberately have no entry: the protocol exposes
/// no on-behalf-of counterpart for them, so they always execute as the
/// caller.
fn delegated_market_call(
    call: &MarketCall,
    on_behalf_of: Address,
    recipient: Option<Address>,
) -> Option<(Vec<u8>, Action)> {
    let recipient = recipient.unwrap_or(on_behalf_of);
    match call {
        MarketCall::Deposit(params) => Some((
            IMarket::depositOnBehalfOfCall {
                externalParams: abi::DepositOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::Deposit,
        )),
        MarketCall::Withdraw(params) => Some((
            IMarket::withdrawOnBehalfOfCall {
                externalParams: abi::WithdrawOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::Withdraw,
        )),
        MarketCall::BuyCreditLimit(params) => Some((
            IMarket::buyCreditLimitOnBehalfOfCall {
                externalParams: abi::BuyCreditLimitOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::BuyCreditLimit,
        )),
        MarketCall::BuyCreditMarket(params) => Some((
            IMarket::buyCreditMarketOnBehalfOfCall {
                externalParams: abi::BuyCreditMarketOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                    recipient,
                },
            }
            .abi_encode(),
            Action::BuyCreditMarket,
        )),
        MarketCall::SellCreditLimit(params) => Some((
            IMarket::sellCreditLimitOnBehalfOfCall {
                externalParams: abi::SellCreditLimitOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::SellCreditLimit,
        )),
        MarketCall::SellCreditMarket(params) => Some((
            IMarket::sellCreditMarketOnBehalfOfCall {
                externalParams: abi::SellCreditMarketOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                    recipient,
                },
            }
            .abi_encode(),
            Action::SellCreditMarket,
        )),
        MarketCall::SelfLiquidate(params) => Some((
            IMarket::selfLiquidateOnBehalfOfCall {
                externalParams: abi::SelfLiquidateOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                    recipient,
                },
            }
            .abi_encode(),
            Action::SelfLiquidate,
        )),
        MarketCall::SetUserConfiguration(params) => Some((
            IMarket::setUserConfigurationOnBehalfOfCall {
                externalParams: abi::SetUserConfigurationOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::SetUserConfiguration,
        )),
        MarketCall::SetCopyLimitOrderConfigs(params) => Some((
            IMarket::setCopyLimitOrderConfigsOnBehalfOfCall {
                externalParams: abi::SetCopyLimitOrderConfigsOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::SetCopyLimitOrderConfigs,
        )),
        MarketCall::SetVault(params) => Some((
            IMarket::setVaultOnBehalfOfCall {
                externalParams: abi::SetVaultOnBehalfOfParams {
                    params: params.clone(),
                    onBehalfOf: on_behalf_of,
                },
            }
            .abi_encode(),
            Action::SetVault,
        )),
        MarketCall::Repay(_) | MarketCall::Liquidate(_) => None,
    }
}

fn requires_authorization(subcalls: &[Subcall]) -> bool {
    subcalls.iter().any(|subcall| subcall.required_action.is_some())
}

fn actions_bitmap_for(subcalls: &[Subcall]) -> U256 {
    let actions: Vec<Action> =
        subcalls.iter().filter_map(|subcall| subcall.required_action).collect();
    actions_bitmap(&actions)
}

impl TxBuilderV2 {
    pub const fn new(factory: Address) -> Self {
        Self { factory }
    }

    fn plan_subcalls(
        &self,
        operations: &[Operation],
        on_behalf_of: Address,
        recipient: Option<Address>,
    ) -> Vec<Subcall> {
        operations
            .iter()
            .map(|operation| match operation {
                Operation::Market(market_op) => {
                    let delegated =
                        delegated_market_call(&market_op.call, on_behalf_of, recipient);
                    let (delegated_calldata, required_action) = match delegated {
                        Some((calldata, action)) => (Some(calldata), Some(action)),
                        None => (None, None),
                    };
                    Subcall {
                        target: market_op.market,
                        calldata: market_op.call.abi_encode(),
                        value: market_op.value,
                        is_approval: false,
                        delegated_calldata,
                        required_action,
                    }
                }
                Operation::Factory(factory_op) => Subcall {
                    target: self.factory,
                    calldata: factory_op.call.abi_encode(),
                    value: None,
                    is_approval: false,
                    delegated_calldata: None,
                    required_action: None,
                },
                Operation::Approval(approval) => Subcall {
                    target: approval.token,
                    calldata: approval.abi_encode(),
                    value: None,
                    is_approval: true,
                    delegated_calldata: None,
                    required_action: None,
                },
            })
            .collect()
    }

    /// Render the non-approval subcalls into factory-level payloads:
    /// consecutive same-market entries multicalled then wrapped in
    /// `callMarket`, factory-targeted entries passed through unmerged.
    fn factory_group_datas(&self, subcalls: &[Subcall]) -> Vec<Vec<u8>> {
        struct TargetGroup<'a> {
            target: Address,
            subs: Vec<&'a Subcall>,
        }

        let mut groups: Vec<TargetGroup<'_>> = Vec::new();
        for subcall in subcalls.iter().filter(|subcall| !subcall.is_approval) {
            if subcall.target == self.factory {
                groups.push(TargetGroup { target: subcall.target, subs: vec![subcall] });
                continue;
            }
            match groups.last_mut() {
                Some(group) if group.target == subcall.target && group.target != self.factory => {
                    group.subs.push(subcall);
                }
                _ => groups.push(TargetGroup { target: subcall.target, subs: vec![subcall] }),
            }
        }

        groups
            .into_iter()
            .map(|group| {
                if group.target == self.factory {
                    return group.subs[0].calldata.clone();
                }
                if let [only] = group.subs.as_slice() {
                    return IMarketFactory::callMarketCall {
                        market: group.target,
                        data: only.delegated_or_primary().into(),
                    }
                    .abi_encode();
                }
                let datas =
                    group.subs.iter().map(|subcall| subcall.delegated_or_primary().into()).collect();
                let inner = IMarket::multicallCall { datas }.abi_encode();
                IMarketFactory::callMarketCall { market: group.target, data: inner.into() }
                    .abi_encode()
            })
            .collect()
    }

    /// The grant/revoke bracket, present only as a pair.
    fn authorization_datas(&self, subcalls: &[Subcall]) -> Option<(Vec<u8>, Vec<u8>)> {
        if !requires_authorization(subcalls) {
            return None;
        }
        let grant = IMarketFactory::setAuthorizationCall {
            operator: self.factory,
            actionsBitmap: actions_bitmap_for(subcalls),
        }
        .abi_encode();
        let revoke = IMarketFactory::setAuthorizationCall {
            operator: self.factory,
            actionsBitmap: null_actions_bitmap(),
        }
        .abi_encode();
        Some((grant, revoke))
    }
}

impl Compose for TxBuilderV2 {
    fn compose(
        &self,
        on_behalf_of: Address,
        operations: &[Operation],
        recipient: Option<Address>,
    ) -> Result<Vec<TxArgs>> {
        let subcalls = self.plan_subcalls(operations, on_behalf_of, recipient);

        if subcalls.is_empty() {
            return Err(SdkError::NoOperations);
        }

        // Single-operation fast path: the caller executes it directly, no
        // delegation and therefore no authorization.
        if let [only] = subcalls.as_slice() {
            return Ok(vec![TxArgs {
                target: only.target,
                data: only.calldata.clone().into(),
                value: only.value,
            }]);
        }

        let approvals: Vec<TxArgs> = subcalls
            .iter()
            .filter(|subcall| subcall.is_approval)
            .map(|subcall| TxArgs {
                target: subcall.target,
                data: subcall.calldata.clone().into(),
                value: None,
            })
            .collect();

        let group_datas = self.factory_group_datas(&subcalls);
        let bracket = self.authorization_datas(&subcalls);
        debug!(
            operations = operations.len(),
            approvals = approvals.len(),
            groups = group_datas.len(),
            authorized = bracket.is_some(),
            "composing v2 batch"
        );

        let (grant, revoke) = match bracket {
            Some((grant, revoke)) => (Some(grant), Some(revoke)),
            None => (None, None),
        };
        let datas = grant
            .into_iter()
            .chain(group_datas)
            .chain(revoke)
            .map(Into::into)
            .collect();

        let multicall = IMarketFactory::multicallCall { datas }.abi_encode();
        let mut txs = approvals;
        txs.push(TxArgs { target: self.factory, data: multicall.into(), value: None });
        Ok(txs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
