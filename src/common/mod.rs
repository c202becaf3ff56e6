//! Shared building blocks: errors, market data types, decimal helpers and data source traits

pub mod channels;
pub mod decimal;
pub mod errors;
pub mod traits;
pub mod types;
