//! Systematic bias detection across backtest predictions.
//!
//! Looks for position groups the engine consistently over- or under-values.
//! Signed percentage errors are averaged per position; a mean beyond the
//! reporting threshold with enough samples becomes a finding.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::player::Position;

use super::backtester::BacktestResult;

/// Mean signed error below this magnitude is treated as noise.
pub const BIAS_THRESHOLD: f64 = 0.10;
/// Positions with fewer predictions than this are not reported.
pub const MIN_BIAS_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiasDirection {
    /// Predictions run high against signed values.
    Overvalued,
    /// Predictions run low.
    Undervalued,
    Neutral,
}

/// Accumulated signed error for one position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionBias {
    /// Mean of `(predicted - actual) / actual` over usable predictions.
    pub mean_signed_error: f64,
    pub samples: usize,
    pub direction: BiasDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasFinding {
    pub position: Position,
    pub bias: PositionBias,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub config_version: String,
    /// Every position seen in the backtest, biased or not.
    pub per_position: BTreeMap<Position, PositionBias>,
    /// Positions whose mean error clears the threshold, worst first.
    pub findings: Vec<BiasFinding>,
}

pub fn identify_biases(result: &BacktestResult) -> BiasReport {
    let mut sums: BTreeMap<Position, (f64, usize)> = BTreeMap::new();
    for p in &result.predictions {
        if p.actual_value <= 0.0 {
            continue;
        }
        let signed = (p.predicted_value - p.actual_value) / p.actual_value;
        let entry = sums.entry(p.position).or_insert((0.0, 0));
        entry.0 += signed;
        entry.1 += 1;
    }

    let mut per_position = BTreeMap::new();
    let mut findings = Vec::new();
    for (position, (sum, samples)) in sums {
        let mean = sum / samples as f64;
        let direction = if samples < MIN_BIAS_SAMPLES || mean.abs() < BIAS_THRESHOLD {
            BiasDirection::Neutral
        } else if mean > 0.0 {
            BiasDirection::Overvalued
        } else {
            BiasDirection::Undervalued
        };
        let bias = PositionBias { mean_signed_error: mean, samples, direction };
        if direction != BiasDirection::Neutral {
            warn!(
                position = %position,
                mean_signed_error = mean,
                samples,
                "systematic valuation bias detected"
            );
            findings.push(BiasFinding { position, bias });
        }
        per_position.insert(position, bias);
    }
    findings.sort_by(|a, b| {
        b.bias
            .mean_signed_error
            .abs()
            .partial_cmp(&a.bias.mean_signed_error.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.position.to_string().cmp(&b.position.to_string()))
    });

    BiasReport { config_version: result.config_version.clone(), per_position, findings }
}
