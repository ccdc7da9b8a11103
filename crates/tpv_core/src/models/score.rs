//! Component score
//!
//! Common output shape of every calculator: a 0-100 score, a sub-factor
//! breakdown, and a sample-size-driven confidence in [0, 1].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Normalized calculator output.
///
/// Invariants are enforced by the constructor: `score` is clamped to
/// [0, 100] and `confidence` to [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    pub score: f64,
    pub confidence: f64,
    /// Sub-factor name to contribution. Downstream consumers show these,
    /// never just the aggregate.
    pub breakdown: BTreeMap<String, f64>,
}

impl ComponentScore {
    pub fn new(score: f64, confidence: f64, breakdown: BTreeMap<String, f64>) -> Self {
        Self {
            score: score.clamp(0.0, 100.0),
            confidence: confidence.clamp(0.0, 1.0),
            breakdown,
        }
    }

    /// Saturating confidence curve over sample size: `n / (n + halfway)`.
    ///
    /// Monotonically increasing in `n`, 0.5 at `n == halfway`, approaching
    /// but never reaching 1.0.
    pub fn confidence_from_sample(samples: u32, halfway: f64) -> f64 {
        let n = samples as f64;
        n / (n + halfway.max(f64::EPSILON))
    }
}
