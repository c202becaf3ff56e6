//! In-memory store of serialized snapshots

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::common::errors::{ClientError, Result};

/// Snapshot key of the staking provider list
pub const STAKING_PROVIDERS_KEY: &str = "staking_providers_egld";
/// Snapshot key of the MEX economics
pub const MEX_ECONOMICS_KEY: &str = "mex_economics";
/// Snapshot key of the EGLD price
pub const EGLD_PRICE_KEY: &str = "egld_price";

/// A serialized value and when it was written
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub data: String,
    pub stored_at: DateTime<Utc>,
}

/// JSON snapshots keyed by name
///
/// Readers always decode a complete snapshot: a refresh replaces the whole
/// serialized value under the write lock.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    entries: RwLock<HashMap<&'static str, Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `value` and store it under `key`
    pub async fn put<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<()> {
        let data = serde_json::to_string(value)?;
        let snapshot = Snapshot {
            data,
            stored_at: Utc::now(),
        };
        self.entries.write().await.insert(key, snapshot);
        Ok(())
    }

    /// Decode the snapshot stored under `key`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let entries = self.entries.read().await;
        let snapshot = entries
            .get(key)
            .ok_or_else(|| ClientError::SnapshotMissing(key.to_string()))?;
        Ok(serde_json::from_str(&snapshot.data)?)
    }

    /// When the snapshot under `key` was last written
    pub async fn stored_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.entries.read().await.get(key).map(|s| s.stored_at)
    }

    /// Number of stored snapshots
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
