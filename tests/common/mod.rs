//! Common test utilities and fixtures

use rust_decimal_macros::dec;
use staking_projection::common::types::{Economics, MexEconomics, StakingProvider};
use staking_projection::strategy::CalculateRequest;

/// Create a sample provider list; the second provider had no identity upstream
pub fn sample_providers() -> Vec<StakingProvider> {
    vec![
        StakingProvider::new("istari", dec!(0.08), dec!(13.4)),
        StakingProvider::new("unknown_0", dec!(0.1), dec!(9.1)),
        StakingProvider::new("trust-staking", dec!(0.12), dec!(10.92)),
    ]
}

/// Create a sample economics snapshot
pub fn sample_economics() -> Economics {
    Economics::new(
        dec!(240.50),
        MexEconomics {
            price: dec!(0.00194567),
            locked_rewards_apr: dec!(1254.43),
            unlocked_rewards_apr: dec!(50),
        },
    )
}

/// Create a request holding both assets for one year with weekly redelegation
pub fn sample_request() -> CalculateRequest {
    CalculateRequest {
        egld_tokens_invested: "0.45".to_string(),
        mex_tokens_invested: "94869182.3086".to_string(),
        egld_percent: String::new(),
        mex_percent: String::new(),
        mex_rewards_locked: true,
        egld_price_target: "285.433".to_string(),
        mex_price_target: "0.000777909073989448632753".to_string(),
        investment_duration_days: 365,
        redelegation_interval_days: 7,
        staking_provider: "istari".to_string(),
    }
}

/// Sample request bodies as posted by API clients
pub mod requests {
    /// EGLD-only request rebalanced to an even split
    pub const EVEN_SPLIT: &str = r#"{
        "egld-tokens-invested": "10",
        "mex-tokens-invested": "0",
        "egld-pct": "50",
        "mex-rewards-locked": false,
        "egld-price-target": "300",
        "mex-price-target": "0.002",
        "target-date-days": 30,
        "redelegation-interval": 7,
        "egld-staking-provider": "istari"
    }"#;

    /// Request with several invalid fields
    pub const INVALID: &str = r#"{
        "egld-tokens-invested": "-1",
        "egld-pct": "70",
        "mex-pct": "20",
        "egld-price-target": "abc",
        "mex-price-target": "0",
        "target-date-days": 0,
        "redelegation-interval": 7,
        "egld-staking-provider": ""
    }"#;
}

/// Sample API responses for testing
pub mod api_responses {
    /// CoinGecko simple price response
    pub const SIMPLE_PRICE: &str = r#"{"elrond-erd-2": {"usd": 240.5}}"#;

    /// Maiar farms response containing the staking farm
    pub const FARMS: &str = r#"{
        "data": {
            "farms": [
                {
                    "lockedRewardsAPR": "310.12",
                    "unlockedRewardsAPR": "21.7",
                    "farmingToken": {"identifier": "EGLDMEX-0be9e5", "name": "EGLDMEXLP"},
                    "farmToken": {"name": "EGLDMEXLPStaked"},
                    "farmedTokenPriceUSD": "0.00194567",
                    "farmedToken": {"identifier": "MEX-455c57", "name": "MEX"}
                },
                {
                    "lockedRewardsAPR": "1254.43",
                    "unlockedRewardsAPR": "50",
                    "farmingToken": {"identifier": "MEX-455c57", "name": "MEX"},
                    "farmToken": {"name": "MEXStaked"},
                    "farmedTokenPriceUSD": "0.00194567",
                    "farmedToken": {"identifier": "MEX-455c57", "name": "MEX"}
                }
            ]
        }
    }"#;

    /// Maiar farms response without any farm
    pub const NO_FARMS: &str = r#"{"data": {"farms": []}}"#;

    /// Network API staking providers; two have no identity
    pub const PROVIDERS: &str = r#"[
        {"identity": "istari", "serviceFee": 0.08, "apr": 13.4, "numNodes": 20},
        {"serviceFee": 0.1, "apr": 9.1},
        {"identity": "trust-staking", "serviceFee": 0.12, "apr": 10.92},
        {"identity": "", "serviceFee": 0.15, "apr": 8.5}
    ]"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_request_is_valid() {
        let input = sample_request().into_input().unwrap();
        assert_eq!(input.egld_held, dec!(0.45));
        assert_eq!(input.investment_duration_days, 365);
    }

    #[test]
    fn test_sample_economics() {
        let economics = sample_economics();
        assert_eq!(economics.mex_apr_locked, dec!(1254.43));
        assert_eq!(economics.prices().egld, "240.5");
    }
}
