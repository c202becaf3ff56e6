use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use crate::common::decimal::is_positive;
use crate::common::errors::StrategyError;
use crate::common::types::{Asset, Economics, StakingProvider};
use crate::strategy::computer::{Hold, Redelegate, Stake};
use crate::strategy::swap::rebalance;
use crate::strategy::traits::BoxedStrategy;
use crate::strategy::types::{CalculationResponse, StrategyInput};

/// Strategies evaluated for an asset, in result order
fn strategies_for(asset: Asset) -> Vec<BoxedStrategy> {
    match asset {
        Asset::Egld => vec![Box::new(Hold), Box::new(Stake), Box::new(Redelegate)],
        // MEX is only projected as a staked position
        Asset::Mex => vec![Box::new(Stake), Box::new(Redelegate)],
    }
}

/// Find the APR of the staking provider named `identity`
pub fn resolve_provider_apr(
    identity: &str,
    providers: &[StakingProvider],
) -> Result<Decimal, StrategyError> {
    providers
        .iter()
        .find(|provider| provider.identity == identity)
        .map(|provider| provider.apr)
        .ok_or_else(|| StrategyError::ProviderNotFound(identity.to_string()))
}

/// Derive the input actually projected: resolved APRs and, when a split is requested, rebalanced holdings
pub fn prepare_input(
    input: &StrategyInput,
    providers: &[StakingProvider],
    economics: &Economics,
) -> Result<StrategyInput, StrategyError> {
    if economics.egld_price_usd <= Decimal::ZERO {
        return Err(StrategyError::InvalidEconomics(format!(
            "EGLD price must be positive, got {}",
            economics.egld_price_usd
        )));
    }
    if economics.mex_price_usd <= Decimal::ZERO {
        return Err(StrategyError::InvalidEconomics(format!(
            "MEX price must be positive, got {}",
            economics.mex_price_usd
        )));
    }

    let egld_apr = resolve_provider_apr(&input.staking_provider_identity, providers)?;

    let (egld_held, mex_held) = match input.percent_portfolio_in_egld {
        Some(egld_percent) => rebalance(
            input.egld_held,
            input.mex_held,
            egld_percent,
            economics.egld_price_usd,
            economics.mex_price_usd,
        )?,
        None => (input.egld_held, input.mex_held),
    };

    Ok(StrategyInput {
        egld_held,
        mex_held,
        egld_apr,
        mex_apr_locked: economics.mex_apr_locked,
        mex_apr_unlocked: economics.mex_apr_unlocked,
        ..input.clone()
    })
}

/// Run every applicable strategy for `input` and format the results
///
/// Assets whose (possibly rebalanced) holdings are at or below the
/// near-zero threshold are skipped entirely. A strategy failure (an amount
/// outside the decimal range) aborts the whole calculation.
pub fn calculate_strategies(
    input: &StrategyInput,
    providers: &[StakingProvider],
    economics: &Economics,
) -> Result<CalculationResponse, StrategyError> {
    let projected = prepare_input(input, providers, economics).map_err(|e| {
        error!("Cannot compute strategies: {}", e);
        e
    })?;

    debug!(
        egld_held = %projected.egld_held,
        mex_held = %projected.mex_held,
        egld_apr = %projected.egld_apr,
        "Prepared strategy input"
    );

    let mut results = BTreeMap::new();
    for (asset, initial_price) in [
        (Asset::Egld, economics.egld_price_usd),
        (Asset::Mex, economics.mex_price_usd),
    ] {
        if !is_positive(projected.balance(asset)) {
            debug!(%asset, "Skipping strategies for empty balance");
            continue;
        }

        for strategy in strategies_for(asset) {
            let key = strategy.key(asset);
            let result = strategy
                .evaluate(asset, &projected, initial_price)
                .map_err(|e| {
                    error!(strategy = %key, "Strategy failed: {}", e);
                    e
                })?;
            info!(
                strategy = %key,
                roi = %result.roi_percent,
                total_usd = %result.total_balance_in_usd,
                "Strategy computed"
            );
            results.insert(key, result.format());
        }
    }

    Ok(CalculationResponse {
        results,
        prices: economics.prices(),
    })
}
