//! Strategy module for staking projections
//!
//! This module turns a validated request plus live market values into the
//! projected outcome of holding, staking and redelegating EGLD and MEX.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    REQUEST (sync, pure)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CalculateRequest.into_input() → StrategyInput | [errors]   │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  calculate_strategies()                                     │
//! │    - resolve provider APR (ProviderNotFound aborts)         │
//! │    - rebalance() when a percentage split is requested       │
//! │    - Hold / Stake / Redelegate per non-empty asset          │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  CalculationResponse { results, prices }                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Strategy`]: Trait implemented by [`Hold`], [`Stake`] and [`Redelegate`]
//! - [`swap`] / [`rebalance`]: Price-ratio conversion between the two assets
//! - [`calculate_strategies`]: Runs every applicable strategy
//! - [`CalculateRequest`]: Request payload validation
//!
//! # Example
//!
//! ```ignore
//! use staking_projection::strategy::{calculate_strategies, CalculateRequest};
//!
//! let input = request.into_input()?;
//! let response = calculate_strategies(&input, &providers, &economics)?;
//! println!("{}", response.results["egld_redelegate"].roi_percent);
//! ```

mod computer;
mod orchestrator;
mod request;
mod swap;
mod traits;
mod types;

pub use types::{CalculationResponse, FormattedStrategyResult, StrategyInput, StrategyResult};

pub use traits::{BoxedStrategy, Strategy};

pub use computer::{hold, redelegate, stake, Hold, Redelegate, Stake};

pub use orchestrator::{calculate_strategies, prepare_input, resolve_provider_apr};

pub use request::{CalculateRequest, MAX_INVESTMENT_DAYS};

pub use swap::{rebalance, swap};
