//! Damped coefficient adjustment proposals.
//!
//! Turns a bias report into concrete, reviewable weight changes. Proposals
//! are never applied automatically; `apply` produces a fresh config under a
//! new version string for a side-by-side backtest, leaving the base config
//! untouched.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ValuationConfig;
use crate::error::{EngineError, Result};
use crate::models::player::Position;

use super::bias::{BiasDirection, BiasReport};

/// Fraction of the corrective step taken per calibration round. Full-step
/// corrections oscillate on noisy samples.
pub const PROPOSAL_DAMPING: f64 = 0.5;
/// Minimum predictions behind a finding before a change is proposed.
pub const MIN_PROPOSAL_SAMPLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAdjustment {
    pub position: Position,
    /// Dotted path of the coefficient being changed.
    pub parameter: String,
    pub current: f64,
    pub proposed: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigProposal {
    /// Version of the config the adjustments were computed against.
    pub base_version: String,
    pub adjustments: Vec<WeightAdjustment>,
}

impl ConfigProposal {
    /// Derive position-value adjustments from systematic biases.
    ///
    /// An overvalued position gets its base value scaled down by the damped
    /// inverse of the mean signed error, and vice versa. Findings with too
    /// few samples are ignored.
    pub fn from_bias_report(report: &BiasReport, config: &ValuationConfig) -> Self {
        let mut adjustments = Vec::new();
        for finding in &report.findings {
            if finding.bias.samples < MIN_PROPOSAL_SAMPLES {
                continue;
            }
            if finding.bias.direction == BiasDirection::Neutral {
                continue;
            }
            let current = config.engine.position_values.for_position(finding.position);
            let corrective = 1.0 / (1.0 + finding.bias.mean_signed_error);
            let damped = 1.0 + PROPOSAL_DAMPING * (corrective - 1.0);
            let proposed = current * damped;
            let rationale = format!(
                "{} predictions off by {:+.1}% on average over {} transfers",
                finding.position,
                finding.bias.mean_signed_error * 100.0,
                finding.bias.samples
            );
            info!(
                position = %finding.position,
                current,
                proposed,
                "proposing position value adjustment"
            );
            adjustments.push(WeightAdjustment {
                position: finding.position,
                parameter: format!("engine.position_values.{}", finding.position),
                current,
                proposed,
                rationale,
            });
        }
        Self { base_version: report.config_version.clone(), adjustments }
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }

    /// Produce the adjusted config under `new_version`.
    ///
    /// Fails if the proposal was computed against a different config version,
    /// or if the adjusted config no longer validates.
    pub fn apply(&self, config: &ValuationConfig, new_version: &str) -> Result<ValuationConfig> {
        if config.version != self.base_version {
            return Err(EngineError::InvalidConfiguration(format!(
                "proposal targets config {} but got {}",
                self.base_version, config.version
            )));
        }
        let mut next = config.clone();
        next.version = new_version.to_string();
        for adjustment in &self.adjustments {
            next.engine.position_values = next
                .engine
                .position_values
                .with_position(adjustment.position, adjustment.proposed);
        }
        next.validate()?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::bias::{BiasFinding, PositionBias};
    use std::collections::BTreeMap;

    fn report_with(position: Position, mean: f64, samples: usize) -> BiasReport {
        let direction = if mean > 0.0 {
            BiasDirection::Overvalued
        } else {
            BiasDirection::Undervalued
        };
        let bias = PositionBias { mean_signed_error: mean, samples, direction };
        let mut per_position = BTreeMap::new();
        per_position.insert(position, bias);
        BiasReport {
            config_version: "v1".to_string(),
            per_position,
            findings: vec![BiasFinding { position, bias }],
        }
    }

    #[test]
    fn test_overvaluation_proposes_damped_reduction() {
        let config = ValuationConfig::default();
        let proposal =
            ConfigProposal::from_bias_report(&report_with(Position::QB, 0.20, 8), &config);
        assert_eq!(proposal.adjustments.len(), 1);
        let adj = &proposal.adjustments[0];
        assert_eq!(adj.position, Position::QB);
        // Corrective factor 1/1.2, half-stepped.
        let expected = adj.current * (1.0 + 0.5 * (1.0 / 1.2 - 1.0));
        assert!((adj.proposed - expected).abs() < 1e-9);
        assert!(adj.proposed < adj.current);
    }

    #[test]
    fn test_undervaluation_raises_value() {
        let config = ValuationConfig::default();
        let proposal =
            ConfigProposal::from_bias_report(&report_with(Position::TE, -0.25, 10), &config);
        let adj = &proposal.adjustments[0];
        assert!(adj.proposed > adj.current);
    }

    #[test]
    fn test_thin_samples_propose_nothing() {
        let config = ValuationConfig::default();
        let proposal =
            ConfigProposal::from_bias_report(&report_with(Position::RB, 0.30, 4), &config);
        assert!(proposal.is_empty());
    }

    #[test]
    fn test_apply_bumps_version_and_only_the_target() {
        let config = ValuationConfig::default();
        let proposal =
            ConfigProposal::from_bias_report(&report_with(Position::QB, 0.20, 8), &config);
        let next = proposal.apply(&config, "v2").unwrap();
        assert_eq!(next.version, "v2");
        assert!(
            next.engine.position_values.for_position(Position::QB)
                < config.engine.position_values.for_position(Position::QB)
        );
        assert_eq!(
            next.engine.position_values.for_position(Position::RB),
            config.engine.position_values.for_position(Position::RB)
        );
        // Base config untouched.
        assert_eq!(config.version, "v1");
    }

    #[test]
    fn test_apply_rejects_version_mismatch() {
        let mut config = ValuationConfig::default();
        let proposal =
            ConfigProposal::from_bias_report(&report_with(Position::QB, 0.20, 8), &config);
        config.version = "v9".to_string();
        let err = proposal.apply(&config, "v10").unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    }
}
