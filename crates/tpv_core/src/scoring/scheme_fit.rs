//! Scheme fit scoring
//!
//! Compatibility between a player's skill vector and a scheme's required
//! attribute targets. The calculator is pure: the same player can be scored
//! against any number of candidate schemes with no shared state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{SchemeFitConfig, ValuationConfig};
use crate::error::Result;
use crate::models::player::PlayerProfile;
use crate::models::scheme::SchemeRequirement;
use crate::models::score::ComponentScore;

/// One attribute driving a scheme mismatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationConcern {
    pub attribute: String,
    pub player_value: f64,
    pub target: f64,
    /// Gap beyond tolerance, in attribute points.
    pub gap: f64,
}

/// Estimated time to adapt to a scheme, with the specific attributes that
/// drive the mismatch, not just a count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationEstimate {
    pub timeline_weeks: f64,
    /// True when the fit score falls below the adaptation threshold.
    pub significant_challenge: bool,
    /// Sorted by weighted gap, largest first.
    pub concerns: Vec<AdaptationConcern>,
}

#[derive(Debug, Clone)]
pub struct SchemeFitCalculator {
    cfg: SchemeFitConfig,
}

impl SchemeFitCalculator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self { cfg: config.scheme_fit.clone() }
    }

    /// Fit score: importance-weighted mean of per-attribute gaps beyond
    /// tolerance, inverted onto 0-100. A player inside every tolerance
    /// scores exactly 100.
    pub fn fit(&self, profile: &PlayerProfile, scheme: &SchemeRequirement) -> Result<ComponentScore> {
        scheme.validate()?;
        let (weighted_gap, known, breakdown) = self.weighted_gaps(profile, scheme);
        let score = (100.0 - self.cfg.mismatch_scale * weighted_gap).clamp(0.0, 100.0);
        // Confidence tracks how much of the requirement vector the profile
        // actually rates; defaulted attributes are guesses.
        let confidence = known as f64 / scheme.targets.len() as f64;
        Ok(ComponentScore::new(score, confidence, breakdown))
    }

    /// Adaptation timeline plus the attributes driving the mismatch.
    pub fn adaptation_estimate(
        &self,
        profile: &PlayerProfile,
        scheme: &SchemeRequirement,
    ) -> Result<AdaptationEstimate> {
        let fit = self.fit(profile, scheme)?;
        let mut concerns: Vec<(f64, AdaptationConcern)> = Vec::new();
        for target in &scheme.targets {
            let player_value = profile
                .skills
                .get(&target.attribute)
                .copied()
                .unwrap_or(self.cfg.unknown_attribute_default);
            let gap = ((player_value - target.target).abs() - target.tolerance).max(0.0);
            if gap > 0.0 {
                concerns.push((
                    gap * target.importance,
                    AdaptationConcern {
                        attribute: target.attribute.clone(),
                        player_value,
                        target: target.target,
                        gap,
                    },
                ));
            }
        }
        concerns.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        let (weighted_gap, _, _) = self.weighted_gaps(profile, scheme);
        Ok(AdaptationEstimate {
            timeline_weeks: self.cfg.base_adaptation_weeks
                + self.cfg.weeks_per_gap_point * weighted_gap,
            significant_challenge: fit.score < self.cfg.adaptation_threshold,
            concerns: concerns.into_iter().map(|(_, c)| c).collect(),
        })
    }

    /// Importance-weighted mean gap beyond tolerance, count of attributes
    /// the profile rates, and the per-attribute breakdown.
    fn weighted_gaps(
        &self,
        profile: &PlayerProfile,
        scheme: &SchemeRequirement,
    ) -> (f64, usize, BTreeMap<String, f64>) {
        let mut penalty = 0.0;
        let mut importance_total = 0.0;
        let mut known = 0usize;
        let mut breakdown = BTreeMap::new();
        for target in &scheme.targets {
            let player_value = match profile.skills.get(&target.attribute) {
                Some(v) => {
                    known += 1;
                    *v
                }
                None => self.cfg.unknown_attribute_default,
            };
            let gap = ((player_value - target.target).abs() - target.tolerance).max(0.0);
            penalty += gap * target.importance;
            importance_total += target.importance;
            breakdown.insert(target.attribute.clone(), gap * target.importance);
        }
        let weighted_gap = if importance_total > 0.0 { penalty / importance_total } else { 0.0 };
        (weighted_gap, known, breakdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::{
        ClassYear, Position, PositionStats, QuarterbackStats, RiskIndicators, SocialReach,
    };
    use crate::models::scheme::{AttributeTarget, MarketTier};
    use std::collections::BTreeMap as Map;

    fn profile_with_skills(skills: &[(&str, f64)]) -> PlayerProfile {
        PlayerProfile {
            id: "qb-1".to_string(),
            name: "Fit Test".to_string(),
            position: Position::QB,
            class_year: ClassYear::Senior,
            stats: PositionStats::Quarterback(QuarterbackStats::default()),
            skills: skills.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            game_log: vec![],
            social: SocialReach::default(),
            risk: RiskIndicators::default(),
            games_played: 10,
            snap_count: 600,
        }
    }

    fn scheme(targets: &[(&str, f64, f64, f64)]) -> SchemeRequirement {
        SchemeRequirement {
            program_id: "state-u".to_string(),
            scheme: "spread".to_string(),
            market_tier: MarketTier::Mid,
            targets: targets
                .iter()
                .map(|(attribute, target, tolerance, importance)| AttributeTarget {
                    attribute: attribute.to_string(),
                    target: *target,
                    tolerance: *tolerance,
                    importance: *importance,
                })
                .collect(),
        }
    }

    fn calculator() -> SchemeFitCalculator {
        SchemeFitCalculator::new(&ValuationConfig::default())
    }

    #[test]
    fn test_exact_match_scores_100_with_no_concerns() {
        let profile = profile_with_skills(&[("arm_strength", 85.0), ("mobility", 70.0)]);
        let requirement = scheme(&[
            ("arm_strength", 85.0, 5.0, 2.0),
            ("mobility", 70.0, 5.0, 1.0),
        ]);
        let calc = calculator();
        let fit = calc.fit(&profile, &requirement).unwrap();
        assert_eq!(fit.score, 100.0);
        let estimate = calc.adaptation_estimate(&profile, &requirement).unwrap();
        assert!(estimate.concerns.is_empty());
        assert!(!estimate.significant_challenge);
    }

    #[test]
    fn test_mismatch_names_driving_attributes() {
        let profile = profile_with_skills(&[("arm_strength", 40.0), ("mobility", 68.0)]);
        let requirement = scheme(&[
            ("arm_strength", 90.0, 5.0, 3.0),
            ("mobility", 70.0, 5.0, 1.0),
        ]);
        let calc = calculator();
        let fit = calc.fit(&profile, &requirement).unwrap();
        assert!(fit.score < 60.0);
        // Breakdown carries the weighted gap per attribute.
        assert!(fit.breakdown["arm_strength"] > 0.0);
        assert_eq!(fit.breakdown["mobility"], 0.0);

        let estimate = calc.adaptation_estimate(&profile, &requirement).unwrap();
        assert!(estimate.significant_challenge);
        assert_eq!(estimate.concerns.len(), 1);
        assert_eq!(estimate.concerns[0].attribute, "arm_strength");
        assert!(estimate.timeline_weeks > calc.cfg.base_adaptation_weeks);
    }

    #[test]
    fn test_concerns_sorted_by_weighted_gap() {
        let profile = profile_with_skills(&[("arm_strength", 60.0), ("football_iq", 50.0)]);
        let requirement = scheme(&[
            ("arm_strength", 80.0, 5.0, 1.0),
            ("football_iq", 85.0, 5.0, 3.0),
        ]);
        let estimate = calculator().adaptation_estimate(&profile, &requirement).unwrap();
        assert_eq!(estimate.concerns[0].attribute, "football_iq");
    }

    #[test]
    fn test_unknown_attribute_lowers_confidence() {
        let profile = profile_with_skills(&[("arm_strength", 80.0)]);
        let requirement = scheme(&[
            ("arm_strength", 80.0, 5.0, 1.0),
            ("release_quickness", 75.0, 5.0, 1.0),
        ]);
        let fit = calculator().fit(&profile, &requirement).unwrap();
        assert!((fit.confidence - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_repeated_invocation_is_pure() {
        let profile = profile_with_skills(&[("arm_strength", 72.0)]);
        let a = scheme(&[("arm_strength", 90.0, 2.0, 1.0)]);
        let b = scheme(&[("arm_strength", 72.0, 2.0, 1.0)]);
        let calc = calculator();
        let first_a = calc.fit(&profile, &a).unwrap();
        let _b = calc.fit(&profile, &b).unwrap();
        let second_a = calc.fit(&profile, &a).unwrap();
        assert_eq!(first_a, second_a);
    }
}
