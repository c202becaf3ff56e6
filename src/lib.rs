//! Staking Projection Library
//!
//! Deterministic projections of holding, staking and redelegating EGLD and
//! MEX over a horizon, fed by a cache of live prices, MEX farm rates and
//! EGLD staking providers.

pub mod cache;
pub mod common;
pub mod config;
pub mod fetcher;
pub mod strategy;

// Re-export commonly used types
pub use cache::{EconomicsCache, SnapshotStore};
pub use common::errors::{ClientError, Result, StrategyError, ValidationError};
pub use common::types::{Asset, Economics, MexEconomics, Prices, StakingProvider};
pub use config::types::AppConfig;
pub use fetcher::{CoingeckoPriceFetcher, ElrondProvidersFetcher, Fetchers, MaiarEconomicsFetcher};

// Strategy types
pub use strategy::{
    calculate_strategies, BoxedStrategy, CalculateRequest, CalculationResponse,
    FormattedStrategyResult, Hold, Redelegate, Stake, Strategy, StrategyInput, StrategyResult,
};
