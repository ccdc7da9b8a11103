//! Risk assessment
//!
//! Injury history, performance variance, and off-field flags fold into one
//! composite risk score in [0, 1], mapped onto banded divisor multipliers.
//! Higher risk divides value down; a sub-1.0 multiplier for clean profiles
//! divides value up.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{RiskConfig, ValuationConfig};
use crate::models::player::PlayerProfile;
use crate::scoring::pool_stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Average,
    Elevated,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskCategory::Low => "low",
            RiskCategory::Average => "average",
            RiskCategory::Elevated => "elevated",
            RiskCategory::High => "high",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Composite risk score in [0, 1].
    pub score: f64,
    pub category: RiskCategory,
    /// Divisor applied to every dollar value.
    pub multiplier: f64,
}

#[derive(Debug, Clone)]
pub struct RiskModel {
    cfg: RiskConfig,
}

impl RiskModel {
    pub fn new(config: &ValuationConfig) -> Self {
        Self { cfg: config.risk.clone() }
    }

    pub fn assess(&self, profile: &PlayerProfile) -> RiskAssessment {
        let injury = (profile.risk.injury_count as f64 * self.cfg.per_injury
            + profile.risk.games_missed as f64 * self.cfg.per_game_missed)
            .min(1.0);
        let indices: Vec<f64> =
            profile.game_log.iter().map(|g| g.performance_index).collect();
        let variance = (pool_stats(&indices).stdev * self.cfg.per_variance_point).min(1.0);
        let flags = (profile.risk.off_field_flags as f64 * self.cfg.per_flag).min(1.0);

        let score = self.cfg.injury_weight * injury
            + self.cfg.variance_weight * variance
            + self.cfg.flags_weight * flags;

        let category = if score <= self.cfg.low_band_max {
            RiskCategory::Low
        } else if score <= self.cfg.average_band_max {
            RiskCategory::Average
        } else if score <= self.cfg.elevated_band_max {
            RiskCategory::Elevated
        } else {
            RiskCategory::High
        };

        RiskAssessment { score, category, multiplier: self.multiplier(score) }
    }

    /// Piecewise-linear map from risk score to the banded divisor:
    /// 0.9-1.0 (low), 1.0-1.15 (average), 1.15-1.3 (elevated), above 1.3
    /// (high), capped at `max_multiplier`. Strictly increasing in the score.
    fn multiplier(&self, score: f64) -> f64 {
        let c = &self.cfg;
        let m = if score <= c.low_band_max {
            0.9 + 0.1 * score / c.low_band_max
        } else if score <= c.average_band_max {
            1.0 + 0.15 * (score - c.low_band_max) / (c.average_band_max - c.low_band_max)
        } else if score <= c.elevated_band_max {
            1.15 + 0.15 * (score - c.average_band_max) / (c.elevated_band_max - c.average_band_max)
        } else {
            1.3 + (c.max_multiplier - 1.3) * (score - c.elevated_band_max)
                / (1.0 - c.elevated_band_max)
        };
        m.min(c.max_multiplier)
    }
}
