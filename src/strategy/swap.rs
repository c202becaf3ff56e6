use rust_decimal::Decimal;
use tracing::debug;

use crate::common::decimal::{try_add, try_div, try_mul, ONE_HUNDRED};
use crate::common::errors::StrategyError;

/// Convert `amount` of a token priced `source_usd_price` into a token priced `dest_usd_price`
///
/// No rounding is applied. A zero `dest_usd_price` or a result outside the
/// decimal range is an [`StrategyError::Overflow`].
pub fn swap(
    amount: Decimal,
    source_usd_price: Decimal,
    dest_usd_price: Decimal,
) -> Result<Decimal, StrategyError> {
    let ratio = try_div(source_usd_price, dest_usd_price, "swap price ratio")?;
    try_mul(amount, ratio, "swapped amount")
}

/// Holdings after swapping between EGLD and MEX to reach `egld_percent` of the USD value in EGLD
///
/// Returns `(egld_target, mex_target)`. The EGLD-equivalent value of both
/// targets adds up to the EGLD-equivalent value of the original holdings.
pub fn rebalance(
    egld_held: Decimal,
    mex_held: Decimal,
    egld_percent: Decimal,
    egld_price: Decimal,
    mex_price: Decimal,
) -> Result<(Decimal, Decimal), StrategyError> {
    let mex_in_egld = swap(mex_held, mex_price, egld_price)?;
    let total_egld = try_add(mex_in_egld, egld_held, "portfolio value")?;

    let egld_target = try_mul(total_egld, egld_percent, "EGLD target")? / ONE_HUNDRED;
    let mex_target_in_egld = total_egld - egld_target;
    let mex_target = swap(mex_target_in_egld, egld_price, mex_price)?;

    debug!(
        %total_egld,
        %egld_target,
        %mex_target,
        "Rebalanced holdings to {}% EGLD",
        egld_percent
    );

    Ok((egld_target, mex_target))
}
