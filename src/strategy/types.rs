use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::decimal::{approx_eq, format_fixed, MONEY_DP, ROI_DP};
use crate::common::types::{Asset, Prices};

/// Validated parameters of one projection
///
/// Values are owned and `Copy`; the orchestrator derives new inputs
/// (rebalanced holdings, resolved APRs) instead of editing this one.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyInput {
    pub egld_held: Decimal,
    pub mex_held: Decimal,
    /// Projected EGLD USD price at the end of the horizon
    pub egld_target_price: Decimal,
    /// Projected MEX USD price at the end of the horizon
    pub mex_target_price: Decimal,
    /// Annual rates in percent (13.4 means 13.4%)
    pub egld_apr: Decimal,
    pub mex_apr_locked: Decimal,
    pub mex_apr_unlocked: Decimal,
    /// Target USD-value split; both set or both unset after validation
    pub percent_portfolio_in_egld: Option<Decimal>,
    pub percent_portfolio_in_mex: Option<Decimal>,
    /// Selects the locked MEX APR when true
    pub rewards_locked: bool,
    pub investment_duration_days: u32,
    pub redelegation_interval_days: u32,
    pub staking_provider_identity: String,
}

impl StrategyInput {
    /// Held amount of `asset`
    pub fn balance(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Egld => self.egld_held,
            Asset::Mex => self.mex_held,
        }
    }

    /// APR applying to `asset`, honouring the locked rewards flag for MEX
    pub fn apr(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Egld => self.egld_apr,
            Asset::Mex if self.rewards_locked => self.mex_apr_locked,
            Asset::Mex => self.mex_apr_unlocked,
        }
    }

    pub fn target_price(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Egld => self.egld_target_price,
            Asset::Mex => self.mex_target_price,
        }
    }
}

/// Outcome of one strategy for one asset
///
/// Only the profit/balance pair of the evaluated asset is set; the other
/// asset's pair stays zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub profit_in_egld: Decimal,
    pub profit_in_mex: Decimal,
    /// Earned tokens valued at the initial price
    pub profit_in_usd: Decimal,
    pub total_balance_in_egld: Decimal,
    pub total_balance_in_mex: Decimal,
    /// Final balance valued at the target price
    pub total_balance_in_usd: Decimal,
    pub roi_percent: Decimal,
}

impl StrategyResult {
    /// Result for `asset` with the asset-specific fields placed in the matching slots
    pub fn for_asset(
        asset: Asset,
        profit: Decimal,
        total_balance: Decimal,
        profit_in_usd: Decimal,
        total_balance_in_usd: Decimal,
        roi_percent: Decimal,
    ) -> Self {
        let mut result = Self {
            profit_in_usd,
            total_balance_in_usd,
            roi_percent,
            ..Self::default()
        };
        match asset {
            Asset::Egld => {
                result.profit_in_egld = profit;
                result.total_balance_in_egld = total_balance;
            }
            Asset::Mex => {
                result.profit_in_mex = profit;
                result.total_balance_in_mex = total_balance;
            }
        }
        result
    }

    /// Field-wise equality within the decimal tolerance
    pub fn approx_eq(&self, other: &Self) -> bool {
        approx_eq(self.profit_in_egld, other.profit_in_egld)
            && approx_eq(self.profit_in_mex, other.profit_in_mex)
            && approx_eq(self.profit_in_usd, other.profit_in_usd)
            && approx_eq(self.total_balance_in_egld, other.total_balance_in_egld)
            && approx_eq(self.total_balance_in_mex, other.total_balance_in_mex)
            && approx_eq(self.total_balance_in_usd, other.total_balance_in_usd)
            && approx_eq(self.roi_percent, other.roi_percent)
    }

    /// Fixed-precision string form for API responses
    pub fn format(&self) -> FormattedStrategyResult {
        FormattedStrategyResult {
            profit_in_egld: format_fixed(self.profit_in_egld, MONEY_DP),
            profit_in_mex: format_fixed(self.profit_in_mex, MONEY_DP),
            profit_in_usd: format_fixed(self.profit_in_usd, MONEY_DP),
            total_balance_in_egld: format_fixed(self.total_balance_in_egld, MONEY_DP),
            total_balance_in_mex: format_fixed(self.total_balance_in_mex, MONEY_DP),
            total_balance_in_usd: format_fixed(self.total_balance_in_usd, MONEY_DP),
            roi_percent: format_fixed(self.roi_percent, ROI_DP),
        }
    }
}

/// [`StrategyResult`] rendered with 10 fractional digits (6 for ROI)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedStrategyResult {
    pub profit_in_egld: String,
    pub profit_in_mex: String,
    pub profit_in_usd: String,
    pub total_balance_in_egld: String,
    pub total_balance_in_mex: String,
    pub total_balance_in_usd: String,
    pub roi_percent: String,
}

/// Named strategy results plus the live prices they were computed with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Keyed by `{asset}_{strategy}`, e.g. `egld_redelegate`
    pub results: BTreeMap<String, FormattedStrategyResult>,
    pub prices: Prices,
}
