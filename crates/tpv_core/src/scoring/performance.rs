//! Performance scoring
//!
//! Normalizes a position-specific stat line onto 0-100, then adjusts for
//! strength of schedule, week-to-week consistency, and situational leverage.
//! The leverage split is kept as its own breakdown dimension because
//! production inflated by low-leverage snaps is the documented red flag.

use std::collections::BTreeMap;

use crate::config::{PerformanceConfig, ValuationConfig};
use crate::error::{EngineError, Result};
use crate::models::player::PlayerProfile;
use crate::models::score::ComponentScore;
use crate::scoring::normalize::{self, pool_stats};

/// Stateless performance calculator. Construct once per configuration;
/// safe to share across threads.
#[derive(Debug, Clone)]
pub struct PerformanceCalculator {
    cfg: PerformanceConfig,
}

impl PerformanceCalculator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self { cfg: config.performance.clone() }
    }

    /// Score a profile.
    ///
    /// Fails with `InsufficientData` when more than the configured fraction
    /// of required fields is missing. Below that, missing required fields are
    /// substituted with position averages and confidence drops in proportion
    /// to the substituted share.
    pub fn score(&self, profile: &PlayerProfile) -> Result<ComponentScore> {
        let group = profile.stats.group();
        let required = profile.stats.required_fields();
        let missing = profile.stats.missing_required();
        let missing_fraction = profile.stats.missing_fraction();
        if missing_fraction > self.cfg.max_missing_fraction {
            return Err(EngineError::InsufficientData {
                position: profile.position.to_string(),
                missing,
                required: required.len(),
                max_missing_fraction: self.cfg.max_missing_fraction,
            });
        }

        // Normalize each stat; substitute the reference mean for missing
        // required fields, skip missing optional ones.
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut substituted = 0usize;
        for (field, value) in profile.stats.fields() {
            let reference = match normalize::reference_for(group, field) {
                Some(r) => r,
                None => continue,
            };
            let value = match value {
                Some(v) => v,
                None if required.contains(&field) => {
                    substituted += 1;
                    reference.mean
                }
                None => continue,
            };
            let normalized = normalize::normalize_stat(group, field, value, self.cfg.z_clip)
                .unwrap_or(50.0);
            weighted_sum += normalized * reference.weight;
            weight_total += reference.weight;
        }
        let base_production = if weight_total > 0.0 { weighted_sum / weight_total } else { 50.0 };

        // Strength of schedule: stronger opponents amplify deviation from
        // average in both directions.
        let sos = if profile.game_log.is_empty() {
            0.5
        } else {
            profile.game_log.iter().map(|g| g.opponent_strength).sum::<f64>()
                / profile.game_log.len() as f64
        };
        let sos_factor = 1.0 + self.cfg.sos_amplification * (sos - 0.5) * 2.0;
        let schedule_adjusted = (50.0 + (base_production - 50.0) * sos_factor).clamp(0.0, 100.0);

        let consistency = self.consistency_score(profile);
        let (leverage, inflation) = self.leverage_score(profile);

        let score = self.cfg.production_weight * schedule_adjusted
            + self.cfg.consistency_weight * consistency
            + self.cfg.leverage_weight * leverage;

        let substituted_fraction = substituted as f64 / required.len() as f64;
        let sample_confidence = ComponentScore::confidence_from_sample(
            profile.games_played,
            self.cfg.confidence_halfway_games,
        );
        let confidence = sample_confidence * (1.0 - substituted_fraction);

        let mut breakdown = BTreeMap::new();
        breakdown.insert("base_production".to_string(), base_production);
        breakdown.insert("schedule_adjusted".to_string(), schedule_adjusted);
        breakdown.insert("consistency".to_string(), consistency);
        breakdown.insert("leverage".to_string(), leverage);
        breakdown.insert("low_leverage_inflation".to_string(), inflation);
        breakdown.insert("substituted_fraction".to_string(), substituted_fraction);

        Ok(ComponentScore::new(score, confidence, breakdown))
    }

    /// 100 minus a penalty proportional to weekly stdev. Neutral 50 without
    /// a game log.
    fn consistency_score(&self, profile: &PlayerProfile) -> f64 {
        if profile.game_log.len() < 2 {
            return 50.0;
        }
        let indices: Vec<f64> = profile.game_log.iter().map(|g| g.performance_index).collect();
        let stats = pool_stats(&indices);
        (100.0 - self.cfg.consistency_sensitivity * stats.stdev).clamp(0.0, 100.0)
    }

    /// Leverage factor: production in high-leverage snaps against production
    /// in low-leverage snaps. Returns `(score, inflation)`, where inflation
    /// is how far garbage-time production exceeds clutch production.
    fn leverage_score(&self, profile: &PlayerProfile) -> (f64, f64) {
        let mut clutch_weight = 0.0;
        let mut clutch_sum = 0.0;
        let mut garbage_weight = 0.0;
        let mut garbage_sum = 0.0;
        for game in &profile.game_log {
            clutch_weight += game.leverage_share;
            clutch_sum += game.performance_index * game.leverage_share;
            garbage_weight += 1.0 - game.leverage_share;
            garbage_sum += game.performance_index * (1.0 - game.leverage_share);
        }
        if clutch_weight <= 0.0 || garbage_weight <= 0.0 {
            return (50.0, 0.0);
        }
        let clutch = clutch_sum / clutch_weight;
        let garbage = garbage_sum / garbage_weight;
        let gap = clutch - garbage;
        let score = (50.0 + self.cfg.leverage_sensitivity * gap).clamp(0.0, 100.0);
        (score, (-gap).max(0.0))
    }
}
