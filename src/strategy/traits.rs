use rust_decimal::Decimal;

use crate::common::errors::StrategyError;
use crate::common::types::Asset;
use crate::strategy::types::{StrategyInput, StrategyResult};

/// Core strategy trait
///
/// A strategy projects the holdings of one asset over the investment horizon.
///
/// # Implementation Notes
///
/// - `evaluate` is pure: no I/O, no shared state, no mutation of `input`
/// - Balance, APR and target price come from `input` for the given asset
/// - `initial_price` values the earned tokens at today's price
/// - Amounts outside the decimal range are reported as
///   [`StrategyError::Overflow`], never as a panic
///
/// # Example
///
/// ```ignore
/// struct Burn;
///
/// impl Strategy for Burn {
///     fn name(&self) -> &'static str { "burn" }
///
///     fn evaluate(
///         &self,
///         asset: Asset,
///         input: &StrategyInput,
///         _price: Decimal,
///     ) -> Result<StrategyResult, StrategyError> {
///         Ok(StrategyResult::default())
///     }
/// }
/// ```
pub trait Strategy: Send + Sync {
    /// Identifier used in result keys (`{asset}_{name}`)
    fn name(&self) -> &'static str;

    /// Project `asset` holdings from `input`
    ///
    /// # Arguments
    /// * `asset` - Asset whose balance, APR and target price are used
    /// * `input` - Validated projection parameters
    /// * `initial_price` - Current USD price of `asset`
    fn evaluate(
        &self,
        asset: Asset,
        input: &StrategyInput,
        initial_price: Decimal,
    ) -> Result<StrategyResult, StrategyError>;

    /// Result key for `asset`
    fn key(&self, asset: Asset) -> String {
        format!("{}_{}", asset, self.name())
    }
}

/// Boxed strategy for dynamic dispatch
pub type BoxedStrategy = Box<dyn Strategy>;
