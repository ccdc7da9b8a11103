//! # tpv_core - Transfer Portal Valuation Engine
//!
//! Deterministic valuation of college football transfer portal players,
//! with a backtesting and calibration framework for tuning the model
//! against historical outcomes.
//!
//! ## Features
//! - Component scores (performance, scheme fit, brand, win impact) with
//!   explicit confidence, never silently absorbed into point estimates
//! - Program-specific and open-market dollar valuations with a banded
//!   risk divisor
//! - No-lookahead historical replay with accuracy metrics, bias
//!   detection, and damped coefficient proposals
//! - Fully deterministic: identical inputs and config produce identical
//!   output, byte for byte

pub mod calibration;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod scoring;

pub use calibration::{Backtester, TestPeriod};
pub use config::ValuationConfig;
pub use engine::ValuationEngine;
pub use error::{EngineError, Result};
pub use models::{PlayerProfile, SchemeRequirement, ValuationResult};
pub use scoring::TeamContext;
