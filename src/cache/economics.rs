//! Periodic refresh of market data into the snapshot store

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::store::{SnapshotStore, EGLD_PRICE_KEY, MEX_ECONOMICS_KEY, STAKING_PROVIDERS_KEY};
use crate::common::channels::{create_failure_channel, RefreshFailure};
use crate::common::errors::{ClientError, Result};
use crate::common::traits::{EgldPriceFetcher, MexEconomicsFetcher, StakingProvidersFetcher};
use crate::common::types::{Economics, MexEconomics, Prices, StakingProvider};

/// Keeps the latest prices, MEX rates and staking providers as snapshots
///
/// The three sources are refreshed independently; a failing source keeps its
/// previous snapshot while the others are updated.
#[derive(Clone)]
pub struct EconomicsCache {
    store: Arc<SnapshotStore>,
    egld_price: Arc<dyn EgldPriceFetcher>,
    mex_economics: Arc<dyn MexEconomicsFetcher>,
    staking_providers: Arc<dyn StakingProvidersFetcher>,
}

impl EconomicsCache {
    pub fn new(
        egld_price: Arc<dyn EgldPriceFetcher>,
        mex_economics: Arc<dyn MexEconomicsFetcher>,
        staking_providers: Arc<dyn StakingProvidersFetcher>,
    ) -> Self {
        Self {
            store: Arc::new(SnapshotStore::new()),
            egld_price,
            mex_economics,
            staking_providers,
        }
    }

    /// Underlying snapshot store
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Refresh all snapshots concurrently and return the failed updates
    pub async fn refresh(&self) -> Vec<RefreshFailure> {
        let (tx, mut rx) = create_failure_channel();

        let providers = Arc::clone(&self.staking_providers);
        let mex = Arc::clone(&self.mex_economics);
        let egld = Arc::clone(&self.egld_price);
        let handles = [
            self.spawn_update(STAKING_PROVIDERS_KEY, tx.clone(), async move {
                providers.fetch_staking_providers().await
            }),
            self.spawn_update(MEX_ECONOMICS_KEY, tx.clone(), async move {
                mex.fetch_mex_economics().await
            }),
            self.spawn_update(EGLD_PRICE_KEY, tx.clone(), async move {
                egld.fetch_egld_price().await
            }),
        ];

        drop(tx);

        let mut failures = Vec::new();
        for (key, handle) in handles {
            if let Err(e) = handle.await {
                failures.push((key, ClientError::Internal(format!("refresh task failed: {}", e))));
            }
        }
        while let Some(failure) = rx.recv().await {
            failures.push(failure);
        }

        for (key, e) in &failures {
            match self.store.stored_at(key).await {
                Some(stored_at) => {
                    let age = Utc::now().signed_duration_since(stored_at).num_seconds();
                    error!(
                        snapshot = *key,
                        age_seconds = age,
                        "Snapshot refresh failed, serving stale data: {}",
                        e
                    );
                }
                None => error!(snapshot = *key, "Snapshot refresh failed, no data yet: {}", e),
            }
        }
        failures
    }

    /// Store the outcome of `fetch` under `key`, reporting failures on `failures`
    fn spawn_update<T, F>(
        &self,
        key: &'static str,
        failures: mpsc::Sender<RefreshFailure>,
        fetch: F,
    ) -> (&'static str, JoinHandle<()>)
    where
        T: Serialize + Send + Sync + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let handle = tokio::spawn(async move {
            let result = match fetch.await {
                Ok(value) => store.put(key, &value).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                let _ = failures.send((key, e)).await;
            }
        });
        (key, handle)
    }

    /// First refresh; fails if any snapshot could not be stored
    pub async fn warmup(&self) -> Result<()> {
        let failures = self.refresh().await;
        if failures.is_empty() {
            info!(snapshots = self.store.len().await, "Snapshot cache warmed up");
            return Ok(());
        }

        let summary = failures
            .iter()
            .map(|(key, e)| format!("{}: {}", key, e))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ClientError::Internal(format!("cache warmup failed: {}", summary)))
    }

    /// Refresh every `interval` until `shutdown` flips to true
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; warmup already covered it
        ticker.tick().await;

        info!("Starting snapshot refresh loop with {:?} interval", interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let failures = self.refresh().await;
                    if !failures.is_empty() {
                        warn!(failed = failures.len(), "Refresh finished with stale snapshots");
                    } else if let Ok(prices) = self.prices().await {
                        info!(egld = %prices.egld, mex = %prices.mex, "Snapshots refreshed");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Snapshot refresh loop stopped");
                        break;
                    }
                }
            }
        }
    }

    /// Latest prices and MEX rates
    pub async fn economics(&self) -> Result<Economics> {
        let egld_price: Decimal = self.store.get(EGLD_PRICE_KEY).await?;
        let mex: MexEconomics = self.store.get(MEX_ECONOMICS_KEY).await?;
        Ok(Economics::new(egld_price, mex))
    }

    /// Latest live prices
    pub async fn prices(&self) -> Result<Prices> {
        Ok(self.economics().await?.prices())
    }

    /// Latest staking provider list
    pub async fn staking_providers(&self) -> Result<Vec<StakingProvider>> {
        self.store.get(STAKING_PROVIDERS_KEY).await
    }
}
