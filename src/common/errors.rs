//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error type for data source, snapshot cache and configuration operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Decimal parsing errors for values returned by a data source
    #[error("Decimal parsing error: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No snapshot stored under the requested key
    #[error("Snapshot not found: {0}")]
    SnapshotMissing(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors that abort a strategy computation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    /// The requested staking provider is not in the supplied list
    #[error("staking provider not found: {0}")]
    ProviderNotFound(String),

    /// An asset tag outside the supported set
    #[error("unknown asset '{0}'")]
    UnknownAsset(String),

    /// A projected amount left the representable decimal range
    #[error("decimal overflow while computing {0}")]
    Overflow(String),

    /// Economics snapshot unusable for the computation (e.g. a zero price)
    #[error("invalid economics: {0}")]
    InvalidEconomics(String),
}

/// A single invalid field of a calculation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid field '{field}': {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}
