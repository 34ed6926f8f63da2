//! Compile-time ABI definitions for the protocol contracts via Alloy `sol!`.
//!
//! Encoding goes through these static types; the decoder registries are fed
//! from the human-readable signature tables in [`sigs`], which must stay in
//! lockstep with the definitions here (selector equality is asserted in
//! tests).

#![allow(missing_docs)]

pub mod sigs;

use alloy::sol;

sol! {
    #![sol(all_derives)]

    // -- Market parameter structs -------------------------------------------

    struct DepositParams {
        address token;
        uint256 amount;
        address to;
    }

    struct WithdrawParams {
        address token;
        uint256 amount;
        address to;
    }

    struct YieldCurve {
        uint256[] tenors;
        int256[] aprs;
        uint256[] marketRateMultipliers;
    }

    struct BuyCreditLimitParams {
        uint256 maxDueDate;
        YieldCurve curveRelativeTime;
    }

    struct SellCreditLimitParams {
        uint256 maxDueDate;
        YieldCurve curveRelativeTime;
    }

    struct BuyCreditMarketParams {
        address borrower;
        uint256 creditPositionId;
        uint256 amount;
        uint256 tenor;
        uint256 deadline;
        uint256 minAPR;
        bool exactAmountIn;
        uint256 collectionId;
        address rateProvider;
    }

    struct SellCreditMarketParams {
        address lender;
        uint256 creditPositionId;
        uint256 amount;
        uint256 tenor;
        uint256 deadline;
        uint256 maxAPR;
        bool exactAmountIn;
        uint256 collectionId;
        address rateProvider;
    }

    struct RepayParams {
        uint256 creditPositionId;
        address borrower;
    }

    struct LiquidateParams {
        uint256 debtPositionId;
        uint256 minimumCollateralProfit;
        uint256 deadline;
    }

    struct SelfLiquidateParams {
        uint256 creditPositionId;
    }

    struct SetUserConfigurationParams {
        uint256 openingLimitBorrowCR;
        bool allCreditPositionsForSaleDisabled;
        bool creditPositionIdsForSale;
        uint256[] creditPositionIds;
    }

    struct CopyLimitOrderConfig {
        uint256 minTenor;
        uint256 maxTenor;
        uint256 minAPR;
        uint256 maxAPR;
        int256 offsetAPR;
    }

    struct SetCopyLimitOrderConfigsParams {
        address copyAddress;
        CopyLimitOrderConfig copyLoanOffer;
        CopyLimitOrderConfig copyBorrowOffer;
    }

    struct SetVaultParams {
        address vault;
        bool forfeitOldShares;
    }

    // -- On-behalf-of wrappers ----------------------------------------------

    struct DepositOnBehalfOfParams {
        DepositParams params;
        address onBehalfOf;
    }

    struct WithdrawOnBehalfOfParams {
        WithdrawParams params;
        address onBehalfOf;
    }

    struct BuyCreditLimitOnBehalfOfParams {
        BuyCreditLimitParams params;
        address onBehalfOf;
    }

    struct SellCreditLimitOnBehalfOfParams {
        SellCreditLimitParams params;
        address onBehalfOf;
    }

    struct BuyCreditMarketOnBehalfOfParams {
        BuyCreditMarketParams params;
        address onBehalfOf;
        address recipient;
    }

    struct SellCreditMarketOnBehalfOfParams {
        SellCreditMarketParams params;
        address onBehalfOf;
        address recipient;
    }

    struct SelfLiquidateOnBehalfOfParams {
        SelfLiquidateParams params;
        address onBehalfOf;
        address recipient;
    }

    struct SetUserConfigurationOnBehalfOfParams {
        SetUserConfigurationParams params;
        address onBehalfOf;
    }

    struct SetCopyLimitOrderConfigsOnBehalfOfParams {
        SetCopyLimitOrderConfigsParams params;
        address onBehalfOf;
    }

    struct SetVaultOnBehalfOfParams {
        SetVaultParams params;
        address onBehalfOf;
    }

    // -- Market -------------------------------------------------------------

    /// A single lending market. Every state-changing entry point takes one
    /// params struct; `multicall` batches encoded calls atomically.
    interface IMarket {
        function deposit(DepositParams params) external payable;
        function withdraw(WithdrawParams params) external;
        function buyCreditLimit(BuyCreditLimitParams params) external;
        function buyCreditMarket(BuyCreditMarketParams params) external;
        function sellCreditLimit(SellCreditLimitParams params) external;
        function sellCreditMarket(SellCreditMarketParams params) external;
        function repay(RepayParams params) external;
        function liquidate(LiquidateParams params) external returns (uint256 liquidatorProfitCollateralToken);
        function selfLiquidate(SelfLiquidateParams params) external;
        function setUserConfiguration(SetUserConfigurationParams params) external;
        function setCopyLimitOrderConfigs(SetCopyLimitOrderConfigsParams params) external;
        function setVault(SetVaultParams params) external;

        function depositOnBehalfOf(DepositOnBehalfOfParams externalParams) external payable;
        function withdrawOnBehalfOf(WithdrawOnBehalfOfParams externalParams) external;
        function buyCreditLimitOnBehalfOf(BuyCreditLimitOnBehalfOfParams externalParams) external;
        function buyCreditMarketOnBehalfOf(BuyCreditMarketOnBehalfOfParams externalParams) external;
        function sellCreditLimitOnBehalfOf(SellCreditLimitOnBehalfOfParams externalParams) external;
        function sellCreditMarketOnBehalfOf(SellCreditMarketOnBehalfOfParams externalParams) external;
        function selfLiquidateOnBehalfOf(SelfLiquidateOnBehalfOfParams externalParams) external;
        function setUserConfigurationOnBehalfOf(SetUserConfigurationOnBehalfOfParams externalParams) external;
        function setCopyLimitOrderConfigsOnBehalfOf(SetCopyLimitOrderConfigsOnBehalfOfParams externalParams) external;
        function setVaultOnBehalfOf(SetVaultOnBehalfOfParams externalParams) external;

        function multicall(bytes[] datas) external payable returns (bytes[] results);
    }

    // -- Market factory -----------------------------------------------------

    /// Hub contract: deploys markets, relays delegated calls into them and
    /// holds the per-operator authorization bitmaps.
    interface IMarketFactory {
        function callMarket(address market, bytes data) external payable returns (bytes result);
        function multicall(bytes[] datas) external payable returns (bytes[] results);
        function setAuthorization(address operator, uint256 actionsBitmap) external;
        function revokeAllAuthorizations() external;
        function subscribeToCollections(uint256[] collectionIds) external;
        function unsubscribeFromCollections(uint256[] collectionIds) external;
        function setUserCollectionCopyLimitOrderConfigs(
            uint256 collectionId,
            CopyLimitOrderConfig copyLoanOffer,
            CopyLimitOrderConfig copyBorrowOffer
        ) external;
    }

    // -- ERC-20 -------------------------------------------------------------

    interface IERC20 {
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_market_selectors_are_distinct() {
        let selectors = [
            IMarket::depositCall::SELECTOR,
            IMarket::withdrawCall::SELECTOR,
            IMarket::depositOnBehalfOfCall::SELECTOR,
            IMarket::multicallCall::SELECTOR,
            IMarketFactory::callMarketCall::SELECTOR,
            IMarketFactory::setAuthorizationCall::SELECTOR,
            IERC20::approveCall::SELECTOR,
        ];
        for (i, a) in selectors.iter().enumerate() {
            for b in selectors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_market_and_factory_multicall_share_signature() {
        // Both surfaces expose multicall(bytes[]); the selector is identical.
        assert_eq!(
            IMarket::multicallCall::SELECTOR,
            IMarketFactory::multicallCall::SELECTOR
        );
    }
}
