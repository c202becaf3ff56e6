//! Market data types shared by the data sources, the snapshot cache and the strategies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::StrategyError;

/// Asset a strategy is evaluated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Asset {
    Egld,
    Mex,
}

impl Asset {
    pub fn tag(&self) -> &'static str {
        match self {
            Asset::Egld => "egld",
            Asset::Mex => "mex",
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parses the `egld`/`mex` tags, case-insensitively
///
/// Strategy code takes [`Asset`] directly; this conversion is the boundary
/// for callers holding string tags, and the only place an
/// [`StrategyError::UnknownAsset`] can arise.
impl FromStr for Asset {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "egld" => Ok(Asset::Egld),
            "mex" => Ok(Asset::Mex),
            _ => Err(StrategyError::UnknownAsset(s.to_string())),
        }
    }
}

/// An EGLD staking provider as listed by the network API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakingProvider {
    /// Provider name; unnamed providers get `unknown_<n>`
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub service_fee: Decimal,
    #[serde(default)]
    pub apr: Decimal,
}

impl StakingProvider {
    pub fn new(identity: impl Into<String>, service_fee: Decimal, apr: Decimal) -> Self {
        Self {
            identity: identity.into(),
            service_fee,
            apr,
        }
    }
}

/// Give every nameless provider a unique `unknown_<n>` identity, counting in list order
pub fn backfill_identities(providers: &mut [StakingProvider]) {
    let mut unknown = 0usize;
    for provider in providers.iter_mut() {
        if provider.identity.is_empty() {
            provider.identity = format!("unknown_{}", unknown);
            unknown += 1;
        }
    }
}

/// MEX price and farm reward rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MexEconomics {
    pub price: Decimal,
    pub locked_rewards_apr: Decimal,
    pub unlocked_rewards_apr: Decimal,
}

/// Live market values consumed by the strategy orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economics {
    pub egld_price_usd: Decimal,
    pub mex_price_usd: Decimal,
    #[serde(rename = "mexAPRLocked")]
    pub mex_apr_locked: Decimal,
    #[serde(rename = "mexAPRUnlocked")]
    pub mex_apr_unlocked: Decimal,
}

impl Economics {
    pub fn new(egld_price_usd: Decimal, mex: MexEconomics) -> Self {
        Self {
            egld_price_usd,
            mex_price_usd: mex.price,
            mex_apr_locked: mex.locked_rewards_apr,
            mex_apr_unlocked: mex.unlocked_rewards_apr,
        }
    }

    /// Live USD prices in their display form
    pub fn prices(&self) -> Prices {
        Prices {
            egld: self.egld_price_usd.normalize().to_string(),
            mex: self.mex_price_usd.normalize().to_string(),
        }
    }
}

/// Live USD prices as returned to API consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    pub egld: String,
    pub mex: String,
}
