//! Economics snapshot cache: refreshed market data feeding the strategy orchestrator

pub mod economics;
pub mod store;

pub use economics::EconomicsCache;
pub use store::{Snapshot, SnapshotStore, EGLD_PRICE_KEY, MEX_ECONOMICS_KEY, STAKING_PROVIDERS_KEY};
