//! Configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Market data source configuration
    #[serde(default)]
    pub fetchers: FetcherConfig,
    /// Snapshot cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Market data source endpoints and parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// CoinGecko simple price endpoint
    #[serde(default = "default_egld_price_url")]
    pub egld_price_url: String,
    /// CoinGecko coin id of EGLD
    #[serde(default = "default_coin_id")]
    pub egld_coin_id: String,
    /// Quote currency for the EGLD price
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Maiar exchange GraphQL endpoint
    #[serde(default = "default_mex_economics_url")]
    pub mex_economics_url: String,
    /// Farm token whose rates and price are used for MEX
    #[serde(default = "default_mex_farm_token")]
    pub mex_farm_token: String,
    /// Staking provider list endpoint
    #[serde(default = "default_staking_providers_url")]
    pub staking_providers_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            egld_price_url: default_egld_price_url(),
            egld_coin_id: default_coin_id(),
            currency: default_currency(),
            mex_economics_url: default_mex_economics_url(),
            mex_farm_token: default_mex_farm_token(),
            staking_providers_url: default_staking_providers_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_egld_price_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_coin_id() -> String {
    "elrond-erd-2".to_string()
}

fn default_currency() -> String {
    "usd".to_string()
}

fn default_mex_economics_url() -> String {
    "https://testnet-exchange-graph.elrond.com/graphql".to_string()
}

fn default_mex_farm_token() -> String {
    "MEXStaked".to_string()
}

fn default_staking_providers_url() -> String {
    "https://api.elrond.com/providers".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

/// Snapshot cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds between two refreshes
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_seconds: u64,
    /// Fail startup when the first refresh fails
    #[serde(default = "default_warmup")]
    pub warmup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refresh_interval_seconds: default_refresh_interval(),
            warmup: default_warmup(),
        }
    }
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_warmup() -> bool {
    true
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
