//! Capability traits for market data sources
//!
//! The snapshot cache only depends on these traits, so any data provider
//! (or a test double) can feed it.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::errors::Result;
use super::types::{MexEconomics, StakingProvider};

/// Source of the EGLD USD price
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EgldPriceFetcher: Send + Sync {
    /// Fetch the current EGLD price in USD
    async fn fetch_egld_price(&self) -> Result<Decimal>;
}

/// Source of the MEX price and the locked/unlocked reward APRs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MexEconomicsFetcher: Send + Sync {
    /// Fetch the MEX price and farm reward rates
    async fn fetch_mex_economics(&self) -> Result<MexEconomics>;
}

/// Source of the EGLD staking provider list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StakingProvidersFetcher: Send + Sync {
    /// Fetch every staking provider.
    ///
    /// Implementations return providers with a non-empty identity; nameless
    /// entries are named `unknown_<n>` in list order.
    async fn fetch_staking_providers(&self) -> Result<Vec<StakingProvider>>;
}
