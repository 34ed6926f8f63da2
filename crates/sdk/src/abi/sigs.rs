//! Human-readable ABI fragment tables feeding the decoder registries.
//!
//! One table per protocol version and surface. The registries union these,
//! deduplicate by canonical signature and index by selector, so overlapping
//! entries across versions (including entries that differ only in field
//! names) are cheap. Field names matter for rendering only: the first entry
//! seen for a canonical signature wins.

/// Market functions, protocol v1. No delegation surface and no vaults; some
/// field names differ from v2 (older struct definitions).
pub const MARKET_FUNCTIONS_V1: &[&str] = &[
    "deposit((address token, uint256 value, address recipient) params)",
    "withdraw((address token, uint256 value, address recipient) params)",
    "buyCreditLimit((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params)",
    "sellCreditLimit((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params)",
    "buyCreditMarket((address borrower, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 minAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params)",
    "sellCreditMarket((address lender, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 maxAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params)",
    "repay((uint256 creditPositionId, address borrower) params)",
    "liquidate((uint256 debtPositionId, uint256 minimumCollateralProfit, uint256 deadline) params)",
    "selfLiquidate((uint256 creditPositionId) params)",
    "setUserConfiguration((uint256 openingLimitBorrowCR, bool allCreditPositionsForSaleDisabled, bool creditPositionIdsForSale, uint256[] creditPositionIds) params)",
    "setCopyLimitOrderConfigs((address copyAddress, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyLoanOffer, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyBorrowOffer) params)",
    "multicall(bytes[] datas)",
];

/// Market functions, protocol v2: v1 shapes plus the vault surface and the
/// full on-behalf-of wrapper set.
pub const MARKET_FUNCTIONS_V2: &[&str] = &[
    "deposit((address token, uint256 amount, address to) params)",
    "withdraw((address token, uint256 amount, address to) params)",
    "buyCreditLimit((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params)",
    "sellCreditLimit((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params)",
    "buyCreditMarket((address borrower, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 minAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params)",
    "sellCreditMarket((address lender, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 maxAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params)",
    "repay((uint256 creditPositionId, address borrower) params)",
    "liquidate((uint256 debtPositionId, uint256 minimumCollateralProfit, uint256 deadline) params)",
    "selfLiquidate((uint256 creditPositionId) params)",
    "setUserConfiguration((uint256 openingLimitBorrowCR, bool allCreditPositionsForSaleDisabled, bool creditPositionIdsForSale, uint256[] creditPositionIds) params)",
    "setCopyLimitOrderConfigs((address copyAddress, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyLoanOffer, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyBorrowOffer) params)",
    "setVault((address vault, bool forfeitOldShares) params)",
    "depositOnBehalfOf(((address token, uint256 amount, address to) params, address onBehalfOf) externalParams)",
    "withdrawOnBehalfOf(((address token, uint256 amount, address to) params, address onBehalfOf) externalParams)",
    "buyCreditLimitOnBehalfOf(((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params, address onBehalfOf) externalParams)",
    "sellCreditLimitOnBehalfOf(((uint256 maxDueDate, (uint256[] tenors, int256[] aprs, uint256[] marketRateMultipliers) curveRelativeTime) params, address onBehalfOf) externalParams)",
    "buyCreditMarketOnBehalfOf(((address borrower, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 minAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params, address onBehalfOf, address recipient) externalParams)",
    "sellCreditMarketOnBehalfOf(((address lender, uint256 creditPositionId, uint256 amount, uint256 tenor, uint256 deadline, uint256 maxAPR, bool exactAmountIn, uint256 collectionId, address rateProvider) params, address onBehalfOf, address recipient) externalParams)",
    "selfLiquidateOnBehalfOf(((uint256 creditPositionId) params, address onBehalfOf, address recipient) externalParams)",
    "setUserConfigurationOnBehalfOf(((uint256 openingLimitBorrowCR, bool allCreditPositionsForSaleDisabled, bool creditPositionIdsForSale, uint256[] creditPositionIds) params, address onBehalfOf) externalParams)",
    "setCopyLimitOrderConfigsOnBehalfOf(((address copyAddress, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyLoanOffer, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyBorrowOffer) params, address onBehalfOf) externalParams)",
    "setVaultOnBehalfOf(((address vault, bool forfeitOldShares) params, address onBehalfOf) externalParams)",
    "multicall(bytes[] datas)",
];

/// Market factory functions (shared ABI across versions).
pub const FACTORY_FUNCTIONS: &[&str] = &[
    "callMarket(address market, bytes data)",
    "multicall(bytes[] datas)",
    "setAuthorization(address operator, uint256 actionsBitmap)",
    "revokeAllAuthorizations()",
    "subscribeToCollections(uint256[] collectionIds)",
    "unsubscribeFromCollections(uint256[] collectionIds)",
    "setUserCollectionCopyLimitOrderConfigs(uint256 collectionId, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyLoanOffer, (uint256 minTenor, uint256 maxTenor, uint256 minAPR, uint256 maxAPR, int256 offsetAPR) copyBorrowOffer)",
];

/// ERC-20 functions the decoder should recognize.
pub const ERC20_FUNCTIONS: &[&str] = &[
    "approve(address spender, uint256 amount)",
    "transfer(address to, uint256 amount)",
    "transferFrom(address from, address to, uint256 amount)",
];

/// Protocol errors, v1. Arg names predate the v2 rename; shapes overlap v2
/// and collapse in the registry.
pub const PROTOCOL_ERRORS_V1: &[&str] = &[
    "USER_IS_UNDERWATER(address user, uint256 cr)",
    "INVALID_TOKEN(address token)",
    "NULL_ADDRESS()",
    "NULL_AMOUNT()",
    "PAST_DEADLINE(uint256 deadline)",
    "TENOR_OUT_OF_RANGE(uint256 tenor, uint256 minTenor, uint256 maxTenor)",
    "APR_LOWER_THAN_MIN_APR(uint256 apr, uint256 minAPR)",
    "APR_GREATER_THAN_MAX_APR(uint256 apr, uint256 maxAPR)",
];

/// Protocol errors, v2.
pub const PROTOCOL_ERRORS_V2: &[&str] = &[
    "USER_IS_UNDERWATER(address account, uint256 collateralRatio)",
    "INVALID_TOKEN(address token)",
    "INVALID_MARKET(address market)",
    "NULL_ADDRESS()",
    "NULL_AMOUNT()",
    "UNAUTHORIZED_ACTION(address operator, uint8 action)",
    "PAST_DEADLINE(uint256 deadline)",
    "TENOR_OUT_OF_RANGE(uint256 tenor, uint256 minTenor, uint256 maxTenor)",
    "APR_LOWER_THAN_MIN_APR(uint256 apr, uint256 minAPR)",
    "APR_GREATER_THAN_MAX_APR(uint256 apr, uint256 maxAPR)",
    "NOT_ENOUGH_CREDIT(uint256 credit, uint256 required)",
    "INVALID_COLLECTION_ID(uint256 collectionId)",
    "INVALID_VAULT(address vault)",
];

/// OpenZeppelin ERC-20 errors.
pub const ERC20_ERRORS: &[&str] = &[
    "ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed)",
    "ERC20InvalidSender(address sender)",
    "ERC20InvalidReceiver(address receiver)",
    "ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed)",
    "ERC20InvalidApprover(address approver)",
    "ERC20InvalidSpender(address spender)",
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{IMarket, IMarketFactory, IERC20};
    use alloy::json_abi::Function;
    use alloy::sol_types::SolCall;

    fn parsed_selector(sig: &str) -> [u8; 4] {
        Function::parse(sig).expect("valid signature").selector().0
    }

    #[test]
    fn test_v2_tables_match_sol_selectors() {
        assert_eq!(parsed_selector(MARKET_FUNCTIONS_V2[0]), IMarket::depositCall::SELECTOR);
        assert_eq!(parsed_selector(MARKET_FUNCTIONS_V2[1]), IMarket::withdrawCall::SELECTOR);
        assert_eq!(
            parsed_selector(MARKET_FUNCTIONS_V2[5]),
            IMarket::sellCreditMarketCall::SELECTOR
        );
        assert_eq!(
            parsed_selector(MARKET_FUNCTIONS_V2[12]),
            IMarket::depositOnBehalfOfCall::SELECTOR
        );
        assert_eq!(
            parsed_selector(MARKET_FUNCTIONS_V2[17]),
            IMarket::sellCreditMarketOnBehalfOfCall::SELECTOR
        );
        assert_eq!(
            parsed_selector(MARKET_FUNCTIONS_V2[22]),
            IMarket::multicallCall::SELECTOR
        );
    }

    #[test]
    fn test_factory_table_matches_sol_selectors() {
        assert_eq!(parsed_selector(FACTORY_FUNCTIONS[0]), IMarketFactory::callMarketCall::SELECTOR);
        assert_eq!(parsed_selector(FACTORY_FUNCTIONS[1]), IMarketFactory::multicallCall::SELECTOR);
        assert_eq!(
            parsed_selector(FACTORY_FUNCTIONS[2]),
            IMarketFactory::setAuthorizationCall::SELECTOR
        );
    }

    #[test]
    fn test_erc20_table_matches_sol_selectors() {
        assert_eq!(parsed_selector(ERC20_FUNCTIONS[0]), IERC20::approveCall::SELECTOR);
    }

    #[test]
    fn test_v1_field_renames_keep_selectors() {
        // v1 deposit names the fields differently; the selector is unchanged.
        assert_eq!(parsed_selector(MARKET_FUNCTIONS_V1[0]), IMarket::depositCall::SELECTOR);
        assert_eq!(parsed_selector(MARKET_FUNCTIONS_V1[1]), IMarket::withdrawCall::SELECTOR);
    }
}
