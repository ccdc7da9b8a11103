//! Scheme requirements
//!
//! A program's offensive or defensive system expressed as per-attribute
//! targets with tolerances, matched against a player's skill vector.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Program market tier for NIL purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketTier {
    National,
    Large,
    Mid,
    Small,
}

impl fmt::Display for MarketTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MarketTier::National => "national",
            MarketTier::Large => "large",
            MarketTier::Mid => "mid",
            MarketTier::Small => "small",
        };
        write!(f, "{}", s)
    }
}

/// One required skill: a 0-100 target, how far off-target is acceptable, and
/// how much the scheme cares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTarget {
    pub attribute: String,
    pub target: f64,
    pub tolerance: f64,
    pub importance: f64,
}

/// Per-program, per-scheme skill requirements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeRequirement {
    pub program_id: String,
    pub scheme: String,
    pub market_tier: MarketTier,
    pub targets: Vec<AttributeTarget>,
}

impl SchemeRequirement {
    pub fn validate(&self) -> Result<()> {
        if self.program_id.trim().is_empty() {
            return Err(EngineError::SchemaValidation(
                "scheme requirement: program_id must not be empty".to_string(),
            ));
        }
        if self.targets.is_empty() {
            return Err(EngineError::SchemaValidation(format!(
                "scheme requirement for {}: no attribute targets declared",
                self.program_id
            )));
        }
        for target in &self.targets {
            if target.attribute.trim().is_empty() {
                return Err(EngineError::SchemaValidation(format!(
                    "scheme requirement for {}: empty attribute name",
                    self.program_id
                )));
            }
            if !(0.0..=100.0).contains(&target.target) {
                return Err(EngineError::SchemaValidation(format!(
                    "scheme requirement for {}: {} target out of range: {}",
                    self.program_id, target.attribute, target.target
                )));
            }
            if target.tolerance < 0.0 {
                return Err(EngineError::SchemaValidation(format!(
                    "scheme requirement for {}: {} tolerance must be non-negative",
                    self.program_id, target.attribute
                )));
            }
            if target.importance <= 0.0 {
                return Err(EngineError::SchemaValidation(format!(
                    "scheme requirement for {}: {} importance must be positive",
                    self.program_id, target.attribute
                )));
            }
        }
        Ok(())
    }
}
