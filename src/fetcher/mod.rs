//! Fetcher module - HTTP clients for prices, MEX farm rates and staking providers

pub mod messages;
pub mod rest;

pub use rest::{CoingeckoPriceFetcher, ElrondProvidersFetcher, Fetchers, MaiarEconomicsFetcher};
