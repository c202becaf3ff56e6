use rust_decimal::Decimal;
use tracing::debug;

use crate::common::decimal::{percent_of, try_add, try_div, try_mul, year_fraction, ONE_HUNDRED};
use crate::common::errors::StrategyError;
use crate::common::types::Asset;
use crate::strategy::traits::Strategy;
use crate::strategy::types::{StrategyInput, StrategyResult};

/// Simple interest earned by `balance` at `apr` percent over `days`
fn accrue(balance: Decimal, apr: Decimal, days: u32) -> Result<Decimal, StrategyError> {
    let scaled = try_mul(balance, apr, "interest")?;
    let scaled = try_mul(scaled, year_fraction(days), "interest")?;
    try_div(scaled, ONE_HUNDRED, "interest")
}

/// Keep the tokens without staking them
pub fn hold(asset: Asset, input: &StrategyInput) -> Result<StrategyResult, StrategyError> {
    let balance = input.balance(asset);
    let total_balance_in_usd = try_mul(balance, input.target_price(asset), "balance in USD")?;

    Ok(StrategyResult::for_asset(
        asset,
        Decimal::ZERO,
        balance,
        Decimal::ZERO,
        total_balance_in_usd,
        Decimal::ZERO,
    ))
}

/// Stake for the whole horizon without reinvesting rewards
pub fn stake(
    asset: Asset,
    input: &StrategyInput,
    initial_price: Decimal,
) -> Result<StrategyResult, StrategyError> {
    let balance = input.balance(asset);
    let apr = input.apr(asset);

    let earned = accrue(balance, apr, input.investment_duration_days)?;
    let total_balance = try_add(balance, earned, "staked balance")?;

    debug!(
        %asset,
        %apr,
        %earned,
        days = input.investment_duration_days,
        "Computed stake rewards"
    );

    Ok(StrategyResult::for_asset(
        asset,
        earned,
        total_balance,
        try_mul(earned, initial_price, "profit in USD")?,
        try_mul(total_balance, input.target_price(asset), "balance in USD")?,
        percent_of(earned, balance)?,
    ))
}

/// Stake and reinvest the rewards every `redelegation_interval_days`
///
/// Each full interval that fits in the horizon compounds once; the days left
/// after the last full interval accrue simple interest on the compounded
/// balance. An interval longer than the horizon therefore matches [`stake`].
///
/// Fails with [`StrategyError::Overflow`] once the compounded balance leaves
/// the decimal range.
pub fn redelegate(
    asset: Asset,
    input: &StrategyInput,
    initial_price: Decimal,
) -> Result<StrategyResult, StrategyError> {
    let initial_balance = input.balance(asset);
    let apr = input.apr(asset);
    let duration = input.investment_duration_days;
    let interval = input.redelegation_interval_days;

    let rate_per_cycle = accrue(Decimal::ONE, apr, interval)?;

    let mut balance = initial_balance;
    let mut last_boundary = 0u32;
    if interval > 0 {
        while let Some(boundary) = last_boundary.checked_add(interval).filter(|b| *b <= duration) {
            let interest = try_mul(balance, rate_per_cycle, "redelegated rewards")?;
            balance = try_add(balance, interest, "redelegated balance")?;
            last_boundary = boundary;
            debug!(%asset, day = boundary, %interest, "Redelegated rewards");
        }
    }

    let remaining_days = duration - last_boundary;
    let tail = accrue(balance, apr, remaining_days)?;
    balance = try_add(balance, tail, "redelegated balance")?;

    let earned = balance - initial_balance;
    let cycles = if interval > 0 { last_boundary / interval } else { 0 };

    debug!(
        %asset,
        %apr,
        %earned,
        cycles,
        remaining_days,
        "Computed redelegation rewards"
    );

    Ok(StrategyResult::for_asset(
        asset,
        earned,
        balance,
        try_mul(earned, initial_price, "profit in USD")?,
        try_mul(balance, input.target_price(asset), "balance in USD")?,
        percent_of(earned, initial_balance)?,
    ))
}

/// Hold strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct Hold;

/// Single-period staking strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct Stake;

/// Staking with periodic reinvestment
#[derive(Debug, Clone, Copy, Default)]
pub struct Redelegate;

impl Strategy for Hold {
    fn name(&self) -> &'static str {
        "hold"
    }

    fn evaluate(
        &self,
        asset: Asset,
        input: &StrategyInput,
        _initial_price: Decimal,
    ) -> Result<StrategyResult, StrategyError> {
        hold(asset, input)
    }
}

impl Strategy for Stake {
    fn name(&self) -> &'static str {
        "stake"
    }

    fn evaluate(
        &self,
        asset: Asset,
        input: &StrategyInput,
        initial_price: Decimal,
    ) -> Result<StrategyResult, StrategyError> {
        stake(asset, input, initial_price)
    }
}

impl Strategy for Redelegate {
    fn name(&self) -> &'static str {
        "redelegate"
    }

    fn evaluate(
        &self,
        asset: Asset,
        input: &StrategyInput,
        initial_price: Decimal,
    ) -> Result<StrategyResult, StrategyError> {
        redelegate(asset, input, initial_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::decimal::approx_eq;
    use rust_decimal_macros::dec;

    fn input(duration: u32, interval: u32) -> StrategyInput {
        StrategyInput {
            egld_held: dec!(4.8),
            mex_held: dec!(498345.7098),
            egld_target_price: dec!(380.54),
            mex_target_price: dec!(0.00057854),
            egld_apr: dec!(13.4),
            mex_apr_locked: dec!(1254.43),
            mex_apr_unlocked: dec!(50.0),
            percent_portfolio_in_egld: None,
            percent_portfolio_in_mex: None,
            rewards_locked: false,
            investment_duration_days: duration,
            redelegation_interval_days: interval,
            staking_provider_identity: "istari".to_string(),
        }
    }

    #[test]
    fn test_hold_has_no_profit() {
        let input = input(365, 7);
        for asset in [Asset::Egld, Asset::Mex] {
            let result = hold(asset, &input).unwrap();
            assert_eq!(result.profit_in_egld, Decimal::ZERO);
            assert_eq!(result.profit_in_mex, Decimal::ZERO);
            assert_eq!(result.profit_in_usd, Decimal::ZERO);
            assert_eq!(result.roi_percent, Decimal::ZERO);
            assert_eq!(
                result.total_balance_in_usd,
                input.balance(asset) * input.target_price(asset)
            );
        }
    }

    #[test]
    fn test_stake_one_year() {
        let result = stake(Asset::Egld, &input(365, 7), dec!(240.50)).unwrap();

        // 13.4% of 4.8 EGLD
        assert_eq!(result.profit_in_egld, dec!(0.6432));
        assert_eq!(result.total_balance_in_egld, dec!(5.4432));
        assert_eq!(result.profit_in_usd, dec!(0.6432) * dec!(240.50));
        assert_eq!(result.total_balance_in_usd, dec!(5.4432) * dec!(380.54));
        assert!(approx_eq(result.roi_percent, dec!(13.4)));
        assert_eq!(result.total_balance_in_mex, Decimal::ZERO);
    }

    #[test]
    fn test_stake_mex_uses_rewards_flag() {
        let mut locked = input(365, 7);
        locked.rewards_locked = true;
        let unlocked = input(365, 7);

        let locked_result = stake(Asset::Mex, &locked, dec!(0.0019)).unwrap();
        let unlocked_result = stake(Asset::Mex, &unlocked, dec!(0.0019)).unwrap();

        assert!(approx_eq(locked_result.roi_percent, dec!(1254.43)));
        assert!(approx_eq(unlocked_result.roi_percent, dec!(50)));
        assert_eq!(unlocked_result.profit_in_egld, Decimal::ZERO);
        assert!(approx_eq(unlocked_result.profit_in_mex, dec!(249172.8549)));
    }

    #[test]
    fn test_redelegate_weekly_for_one_year() {
        // 52 weekly compounds plus one remaining day: APY ~= 14.3197%
        let result = redelegate(Asset::Egld, &input(365, 7), dec!(240.50)).unwrap();

        let expected_earned = dec!(0.687344468120679);
        assert!((result.profit_in_egld - expected_earned).abs() < dec!(0.00001));
        assert!((result.roi_percent - dec!(14.319654)).abs() < dec!(0.0001));
        assert!(approx_eq(result.total_balance_in_egld, dec!(4.8) + result.profit_in_egld));
        assert_eq!(result.profit_in_usd, result.profit_in_egld * dec!(240.50));
        assert_eq!(result.profit_in_mex, Decimal::ZERO);
    }

    #[test]
    fn test_redelegate_interval_longer_than_horizon_equals_stake() {
        let input = input(20, 30);
        for (asset, price) in [(Asset::Egld, dec!(280)), (Asset::Mex, dec!(0.004))] {
            let staked = stake(asset, &input, price).unwrap();
            let redelegated = redelegate(asset, &input, price).unwrap();
            assert!(staked.approx_eq(&redelegated), "{asset}: {staked:?} vs {redelegated:?}");
        }
    }

    #[test]
    fn test_redelegate_interval_equal_to_horizon_equals_stake() {
        let input = input(30, 30);
        let staked = stake(Asset::Egld, &input, dec!(280)).unwrap();
        let redelegated = redelegate(Asset::Egld, &input, dec!(280)).unwrap();
        assert!(staked.approx_eq(&redelegated));
    }

    #[test]
    fn test_redelegate_beats_stake_when_compounding() {
        let input = input(365, 1);
        let staked = stake(Asset::Egld, &input, dec!(280)).unwrap();
        let redelegated = redelegate(Asset::Egld, &input, dec!(280)).unwrap();
        assert!(redelegated.total_balance_in_egld > staked.total_balance_in_egld);
    }

    #[test]
    fn test_zero_balance_has_zero_roi() {
        let mut input = input(365, 7);
        input.egld_held = Decimal::ZERO;
        assert_eq!(stake(Asset::Egld, &input, dec!(280)).unwrap().roi_percent, Decimal::ZERO);
        assert_eq!(redelegate(Asset::Egld, &input, dec!(280)).unwrap().roi_percent, Decimal::ZERO);
    }

    #[test]
    fn test_strategy_keys() {
        assert_eq!(Hold.key(Asset::Egld), "egld_hold");
        assert_eq!(Stake.key(Asset::Mex), "mex_stake");
        assert_eq!(Redelegate.key(Asset::Egld), "egld_redelegate");
    }

    #[test]
    fn test_redelegate_overflow_is_an_error() {
        // locked MEX redelegated daily for five years outgrows the decimal range
        let mut input = input(1825, 1);
        input.mex_held = dec!(94869182.3086);
        input.rewards_locked = true;

        let result = redelegate(Asset::Mex, &input, dec!(0.00194567));

        assert!(matches!(result, Err(StrategyError::Overflow(_))), "{result:?}");
        assert!(Redelegate.evaluate(Asset::Mex, &input, dec!(0.00194567)).is_err());
    }

    #[test]
    fn test_large_holding_formats_in_full() {
        let mut input = input(365, 7);
        input.mex_held = dec!(10000000000000000000000);
        input.rewards_locked = true;

        let staked = stake(Asset::Mex, &input, dec!(0.00194567)).unwrap().format();
        let redelegated = redelegate(Asset::Mex, &input, dec!(0.00194567)).unwrap().format();

        assert_eq!(staked.profit_in_mex, "125443000000000000000000.0000000000");
        assert_eq!(staked.roi_percent, "1254.430000");
        assert!(redelegated.total_balance_in_mex.ends_with(|c: char| c.is_ascii_digit()));
        assert_eq!(redelegated.total_balance_in_mex.split('.').nth(1).map(str::len), Some(10));
    }
}
