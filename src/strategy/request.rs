//! Calculation request payload and its validation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::decimal::{approx_eq, ONE_HUNDRED};
use crate::common::errors::ValidationError;
use crate::strategy::types::StrategyInput;

/// Longest accepted investment horizon, one hundred years
pub const MAX_INVESTMENT_DAYS: u32 = 36_500;

/// Raw calculation request as posted by API clients
///
/// Numeric amounts arrive as decimal strings so no precision is lost
/// before they reach the decimal arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    #[serde(rename = "egld-tokens-invested", default)]
    pub egld_tokens_invested: String,
    #[serde(rename = "mex-tokens-invested", default)]
    pub mex_tokens_invested: String,
    #[serde(rename = "egld-pct", default)]
    pub egld_percent: String,
    #[serde(rename = "mex-pct", default)]
    pub mex_percent: String,
    /// Rewards are paid in locked MEX
    #[serde(rename = "mex-rewards-locked", default)]
    pub mex_rewards_locked: bool,
    #[serde(rename = "egld-price-target", default)]
    pub egld_price_target: String,
    /// May be "0" when only EGLD is invested
    #[serde(rename = "mex-price-target", default)]
    pub mex_price_target: String,
    #[serde(rename = "target-date-days", default)]
    pub investment_duration_days: i64,
    #[serde(rename = "redelegation-interval", default)]
    pub redelegation_interval_days: i64,
    #[serde(rename = "egld-staking-provider", default)]
    pub staking_provider: String,
}

/// Collects field errors while parsing a request
#[derive(Debug, Default)]
struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    fn decimal(&mut self, field: &'static str, raw: &str) -> Option<Decimal> {
        match Decimal::from_str(raw.trim()) {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors
                    .push(ValidationError::new(field, format!("cannot parse '{}': {}", raw, e)));
                None
            }
        }
    }

    /// Required value that must not be negative
    fn non_negative(&mut self, field: &'static str, raw: &str) -> Option<Decimal> {
        let value = self.decimal(field, raw)?;
        if value.is_sign_negative() && !value.is_zero() {
            self.errors
                .push(ValidationError::new(field, format!("'{}' must not be negative", raw)));
            return None;
        }
        Some(value)
    }

    /// Optional amount, zero when absent
    fn optional_amount(&mut self, field: &'static str, raw: &str) -> Decimal {
        if raw.trim().is_empty() {
            return Decimal::ZERO;
        }
        self.non_negative(field, raw).unwrap_or_default()
    }

    /// Optional percentage in [0, 100]
    fn optional_percent(&mut self, field: &'static str, raw: &str) -> Option<Decimal> {
        if raw.trim().is_empty() {
            return None;
        }
        let value = self.non_negative(field, raw)?;
        if value > ONE_HUNDRED {
            self.errors
                .push(ValidationError::new(field, format!("'{}' is above 100", raw)));
            return None;
        }
        Some(value)
    }

    /// Whole number of days in `1..=max`
    fn days(&mut self, field: &'static str, value: i64, max: u32) -> u32 {
        match u32::try_from(value) {
            Ok(days) if days > max => {
                self.errors.push(ValidationError::new(
                    field,
                    format!("{} days is above the {} day limit", value, max),
                ));
                0
            }
            Ok(days) if days >= 1 => days,
            _ => {
                self.errors.push(ValidationError::new(
                    field,
                    format!("{} is not a positive number of days", value),
                ));
                0
            }
        }
    }
}

impl CalculateRequest {
    /// Parse and validate every field, reporting all problems at once
    ///
    /// When only one percentage is given the other becomes its complement.
    /// APRs of the returned input are zero; they are resolved from the
    /// provider list and the economics snapshot at calculation time.
    pub fn into_input(self) -> Result<StrategyInput, Vec<ValidationError>> {
        let mut v = Validator::default();

        let egld_held = v.optional_amount("egld-tokens-invested", &self.egld_tokens_invested);
        let mex_held = v.optional_amount("mex-tokens-invested", &self.mex_tokens_invested);

        let egld_given = !self.egld_percent.trim().is_empty();
        let mex_given = !self.mex_percent.trim().is_empty();
        let egld_percent = v.optional_percent("egld-pct", &self.egld_percent);
        let mex_percent = v.optional_percent("mex-pct", &self.mex_percent);

        let split = match (egld_percent, mex_percent) {
            (Some(egld), Some(mex)) => {
                if approx_eq(egld + mex, ONE_HUNDRED) {
                    Some((egld, mex))
                } else {
                    v.errors.push(ValidationError::new(
                        "egld-pct",
                        format!("percentages add up to {}, not 100", egld + mex),
                    ));
                    None
                }
            }
            (Some(egld), None) if !mex_given => Some((egld, ONE_HUNDRED - egld)),
            (None, Some(mex)) if !egld_given => Some((ONE_HUNDRED - mex, mex)),
            _ => None,
        };

        let egld_target_price = v.non_negative("egld-price-target", &self.egld_price_target);
        let mex_target_price = v.non_negative("mex-price-target", &self.mex_price_target);

        let investment_duration_days = v.days(
            "target-date-days",
            self.investment_duration_days,
            MAX_INVESTMENT_DAYS,
        );
        let redelegation_interval_days = v.days(
            "redelegation-interval",
            self.redelegation_interval_days,
            u32::MAX,
        );

        if self.staking_provider.trim().is_empty() {
            v.errors
                .push(ValidationError::new("egld-staking-provider", "must not be empty"));
        }

        if !v.errors.is_empty() {
            return Err(v.errors);
        }

        Ok(StrategyInput {
            egld_held,
            mex_held,
            egld_target_price: egld_target_price.unwrap_or_default(),
            mex_target_price: mex_target_price.unwrap_or_default(),
            egld_apr: Decimal::ZERO,
            mex_apr_locked: Decimal::ZERO,
            mex_apr_unlocked: Decimal::ZERO,
            percent_portfolio_in_egld: split.map(|(egld, _)| egld),
            percent_portfolio_in_mex: split.map(|(_, mex)| mex),
            rewards_locked: self.mex_rewards_locked,
            investment_duration_days,
            redelegation_interval_days,
            staking_provider_identity: self.staking_provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn request() -> CalculateRequest {
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

    fn fields(errors: &[ValidationError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_request() {
        let input = request().into_input().unwrap();

        assert_eq!(input.egld_held, dec!(0.45));
        assert_eq!(input.mex_held, dec!(94869182.3086));
        assert_eq!(input.mex_target_price, dec!(0.000777909073989448632753));
        assert_eq!(input.percent_portfolio_in_egld, None);
        assert_eq!(input.percent_portfolio_in_mex, None);
        assert!(input.rewards_locked);
        assert_eq!(input.investment_duration_days, 365);
        assert_eq!(input.redelegation_interval_days, 7);
        assert_eq!(input.staking_provider_identity, "istari");
    }

    #[test]
    fn test_deserialize_wire_names() {
        let json = r#"{
            "egld-tokens-invested": "4.8",
            "egld-pct": "60",
            "mex-pct": "40",
            "mex-rewards-locked": false,
            "egld-price-target": "380.54",
            "mex-price-target": "0",
            "target-date-days": 30,
            "redelegation-interval": 45,
            "egld-staking-provider": "unknown_3"
        }"#;

        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        let input = request.into_input().unwrap();

        assert_eq!(input.egld_held, dec!(4.8));
        assert_eq!(input.mex_held, Decimal::ZERO);
        assert_eq!(input.percent_portfolio_in_egld, Some(dec!(60)));
        assert_eq!(input.percent_portfolio_in_mex, Some(dec!(40)));
        assert_eq!(input.redelegation_interval_days, 45);
    }

    #[test]
    fn test_single_percentage_gets_complement() {
        let mut request = request();
        request.mex_percent = "30".to_string();

        let input = request.into_input().unwrap();

        assert_eq!(input.percent_portfolio_in_egld, Some(dec!(70)));
        assert_eq!(input.percent_portfolio_in_mex, Some(dec!(30)));
    }

    #[test]
    fn test_percentages_must_sum_to_100() {
        let mut request = request();
        request.egld_percent = "60".to_string();
        request.mex_percent = "30".to_string();

        let errors = request.into_input().unwrap_err();

        assert_eq!(fields(&errors), vec!["egld-pct"]);
    }

    #[test]
    fn test_all_errors_are_collected() {
        let request = CalculateRequest {
            egld_tokens_invested: "-1".to_string(),
            mex_tokens_invested: "lots".to_string(),
            egld_percent: "120".to_string(),
            mex_percent: String::new(),
            mex_rewards_locked: false,
            egld_price_target: String::new(),
            mex_price_target: "-0.5".to_string(),
            investment_duration_days: 0,
            redelegation_interval_days: -7,
            staking_provider: " ".to_string(),
        };

        let errors = request.into_input().unwrap_err();

        assert_eq!(
            fields(&errors),
            vec![
                "egld-tokens-invested",
                "mex-tokens-invested",
                "egld-pct",
                "egld-price-target",
                "mex-price-target",
                "target-date-days",
                "redelegation-interval",
                "egld-staking-provider",
            ]
        );
    }

    #[test]
    fn test_interval_may_exceed_duration() {
        let mut request = request();
        request.investment_duration_days = 20;
        request.redelegation_interval_days = 30;

        let input = request.into_input().unwrap();

        assert_eq!(input.redelegation_interval_days, 30);
    }

    #[test]
    fn test_duration_is_bounded() {
        let mut too_long = request();
        too_long.investment_duration_days = i64::from(MAX_INVESTMENT_DAYS) + 1;
        let mut longest = request();
        longest.investment_duration_days = i64::from(MAX_INVESTMENT_DAYS);

        let errors = too_long.into_input().unwrap_err();

        assert_eq!(fields(&errors), vec!["target-date-days"]);
        assert!(longest.into_input().is_ok());
    }

    #[test]
    fn test_duration_above_u32_is_rejected() {
        let mut request = request();
        request.investment_duration_days = i64::from(u32::MAX) + 1;

        let errors = request.into_input().unwrap_err();

        assert_eq!(fields(&errors), vec!["target-date-days"]);
    }
}
