//! Valuation engine: risk assessment and the orchestrating evaluator.

pub mod risk;
pub mod valuation;

#[cfg(test)]
mod scenario_test;

pub use risk::{RiskAssessment, RiskCategory, RiskModel};
pub use valuation::ValuationEngine;
