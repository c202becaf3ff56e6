//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP_, nested with `__`)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    // Pick up a local .env before reading the environment
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = load_config(Some("does-not-exist.toml")).unwrap();

        assert_eq!(config.fetchers.egld_coin_id, "elrond-erd-2");
        assert_eq!(config.fetchers.mex_farm_token, "MEXStaked");
        assert_eq!(config.fetchers.request_timeout_seconds, 15);
        assert_eq!(config.cache.refresh_interval_seconds, 300);
        assert_eq!(config.settings.log_level, "info");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("staking_projection_{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[fetchers]\ncurrency = \"eur\"\n\n[cache]\nrefresh_interval_seconds = 60\nwarmup = false"
        )
        .unwrap();

        let config = load_config(path.to_str()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.fetchers.currency, "eur");
        assert_eq!(config.cache.refresh_interval_seconds, 60);
        assert!(!config.cache.warmup);
        assert_eq!(config.fetchers.egld_coin_id, "elrond-erd-2");
    }
}
