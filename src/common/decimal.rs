//! Decimal constants and helpers shared by the projection code
//!
//! All values are `rust_decimal::Decimal`, which is a `Copy` value type:
//! every operation yields a new value and no operand is ever updated in place.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::errors::StrategyError;

/// Days used to turn an annual rate into a per-day rate
pub const DAYS_IN_YEAR: Decimal = dec!(365);

/// Percent base
pub const ONE_HUNDRED: Decimal = dec!(100);

/// Largest absolute difference at which two values are still considered equal
pub const EPSILON: Decimal = dec!(0.0000000001);

/// Fractional digits emitted for balances and profits
pub const MONEY_DP: u32 = 10;

/// Fractional digits emitted for ROI percentages
pub const ROI_DP: u32 = 6;

/// Equality within [`EPSILON`]
pub fn approx_eq(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() <= EPSILON
}

/// True when `value` is above the near-zero threshold
pub fn is_positive(value: Decimal) -> bool {
    value > EPSILON
}

/// `a * b`, or [`StrategyError::Overflow`] naming `what`
pub fn try_mul(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, StrategyError> {
    a.checked_mul(b)
        .ok_or_else(|| StrategyError::Overflow(what.to_string()))
}

/// `a / b`, or [`StrategyError::Overflow`] naming `what`
///
/// A zero divisor is reported the same way.
pub fn try_div(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, StrategyError> {
    a.checked_div(b)
        .ok_or_else(|| StrategyError::Overflow(what.to_string()))
}

/// `a + b`, or [`StrategyError::Overflow`] naming `what`
pub fn try_add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, StrategyError> {
    a.checked_add(b)
        .ok_or_else(|| StrategyError::Overflow(what.to_string()))
}

/// `part` as a percentage of `whole`, zero for an empty `whole`
pub fn percent_of(part: Decimal, whole: Decimal) -> Result<Decimal, StrategyError> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    try_mul(try_div(part, whole, "percentage")?, ONE_HUNDRED, "percentage")
}

/// Fraction of a year covered by `days`
pub fn year_fraction(days: u32) -> Decimal {
    Decimal::from(days) / DAYS_IN_YEAR
}

/// Render `value` with exactly `dp` fractional digits, rounding half to even
///
/// Works across the whole `Decimal` range; the integer part is never
/// truncated.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    // no "-0.000" output
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };

    let text = rounded.normalize().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if dp == 0 {
        return whole.to_string();
    }
    format!("{}.{:0<width$}", whole, fraction, width = dp as usize)
}
