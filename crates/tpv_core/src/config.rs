//! Valuation configuration
//!
//! Every tunable coefficient in the engine lives here, as one explicit,
//! versioned structure. Calibration runs never mutate a live config; they
//! construct a new one (see `calibration::proposal`).

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::player::{Position, PositionGroup};
use crate::models::scheme::MarketTier;

/// Top-level configuration for all calculators and the engine.
///
/// `version` identifies a calibration generation so backtest reports and
/// valuation records can be traced to the exact weight set that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    pub version: String,
    pub performance: PerformanceConfig,
    pub scheme_fit: SchemeFitConfig,
    pub brand: BrandConfig,
    pub win_impact: WinImpactConfig,
    pub risk: RiskConfig,
    pub engine: EngineConfig,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            performance: PerformanceConfig::default(),
            scheme_fit: SchemeFitConfig::default(),
            brand: BrandConfig::default(),
            win_impact: WinImpactConfig::default(),
            risk: RiskConfig::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl ValuationConfig {
    /// Bounds-check every coefficient. Called once by `ValuationEngine::new`;
    /// a config that fails here is never used for scoring.
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "version must not be empty".to_string(),
            ));
        }
        self.performance.validate()?;
        self.scheme_fit.validate()?;
        self.brand.validate()?;
        self.win_impact.validate()?;
        self.risk.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(EngineError::InvalidConfiguration(format!(
            "{} must be in [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value <= 0.0 || !value.is_finite() {
        return Err(EngineError::InvalidConfiguration(format!(
            "{} must be positive and finite, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value < 0.0 || !value.is_finite() {
        return Err(EngineError::InvalidConfiguration(format!(
            "{} must be non-negative and finite, got {}",
            name, value
        )));
    }
    Ok(())
}

// ============================================================================
// Performance
// ============================================================================

/// Weights for the performance score sub-factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Required-field gap above which scoring refuses to run.
    pub max_missing_fraction: f64,
    /// Z-score clip before rescaling to 0-100.
    pub z_clip: f64,
    /// Weight of the normalized stat line.
    pub production_weight: f64,
    /// Weight of the week-to-week consistency factor.
    pub consistency_weight: f64,
    /// Weight of the leverage (clutch vs. garbage-time) factor.
    pub leverage_weight: f64,
    /// How strongly opponent quality amplifies deviation from average.
    pub sos_amplification: f64,
    /// Points of consistency score lost per point of weekly stdev.
    pub consistency_sensitivity: f64,
    /// Points of leverage score per point of clutch/garbage gap.
    pub leverage_sensitivity: f64,
    /// Games played at which sample confidence reaches 0.5.
    pub confidence_halfway_games: f64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_missing_fraction: 0.5,
            z_clip: 2.5,
            production_weight: 0.55,
            consistency_weight: 0.20,
            leverage_weight: 0.25,
            sos_amplification: 0.3,
            consistency_sensitivity: 2.0,
            leverage_sensitivity: 0.8,
            confidence_halfway_games: 4.0,
        }
    }
}

impl PerformanceConfig {
    pub fn validate(&self) -> Result<()> {
        check_fraction("performance.max_missing_fraction", self.max_missing_fraction)?;
        check_positive("performance.z_clip", self.z_clip)?;
        check_non_negative("performance.production_weight", self.production_weight)?;
        check_non_negative("performance.consistency_weight", self.consistency_weight)?;
        check_non_negative("performance.leverage_weight", self.leverage_weight)?;
        let total = self.production_weight + self.consistency_weight + self.leverage_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidConfiguration(format!(
                "performance sub-factor weights must sum to 1.0, got {}",
                total
            )));
        }
        // Amplification above 1.0 would let a weak schedule flip the sign of
        // a stat improvement, breaking score monotonicity.
        check_fraction("performance.sos_amplification", self.sos_amplification)?;
        check_non_negative("performance.consistency_sensitivity", self.consistency_sensitivity)?;
        check_non_negative("performance.leverage_sensitivity", self.leverage_sensitivity)?;
        check_positive("performance.confidence_halfway_games", self.confidence_halfway_games)?;
        Ok(())
    }
}

// ============================================================================
// Scheme fit
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemeFitConfig {
    /// Fit score below this flags a significant adaptation challenge.
    pub adaptation_threshold: f64,
    /// Fit points lost per point of importance-weighted attribute gap.
    pub mismatch_scale: f64,
    /// Floor of the adaptation timeline, in weeks.
    pub base_adaptation_weeks: f64,
    /// Extra weeks per point of weighted attribute gap.
    pub weeks_per_gap_point: f64,
    /// Skill rating assumed when the profile does not rate an attribute.
    pub unknown_attribute_default: f64,
}

impl Default for SchemeFitConfig {
    fn default() -> Self {
        Self {
            adaptation_threshold: 60.0,
            mismatch_scale: 1.2,
            base_adaptation_weeks: 2.0,
            weeks_per_gap_point: 0.25,
            unknown_attribute_default: 50.0,
        }
    }
}

impl SchemeFitConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.adaptation_threshold) {
            return Err(EngineError::InvalidConfiguration(format!(
                "scheme_fit.adaptation_threshold must be in [0, 100], got {}",
                self.adaptation_threshold
            )));
        }
        check_positive("scheme_fit.mismatch_scale", self.mismatch_scale)?;
        check_non_negative("scheme_fit.base_adaptation_weeks", self.base_adaptation_weeks)?;
        check_non_negative("scheme_fit.weeks_per_gap_point", self.weeks_per_gap_point)?;
        if !(0.0..=100.0).contains(&self.unknown_attribute_default) {
            return Err(EngineError::InvalidConfiguration(format!(
                "scheme_fit.unknown_attribute_default must be in [0, 100], got {}",
                self.unknown_attribute_default
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Brand / NIL
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConfig {
    /// Weight of raw reach vs. engagement quality in a platform score.
    pub reach_weight: f64,
    pub engagement_weight: f64,
    /// NIL dollars for a perfect brand score before premiums.
    pub nil_base: f64,
    /// Superlinear exponent on brand score: reach compounds at the top end.
    pub nil_exponent: f64,
    pub position_premiums: PositionPremiums,
    pub market_multipliers: MarketMultipliers,
    /// Interval half-width at perfectly fresh, complete data.
    pub base_interval_width: f64,
    /// Additional width at one year of data staleness.
    pub staleness_width: f64,
    /// Additional width when no platforms are reported.
    pub completeness_width: f64,
    pub max_interval_width: f64,
    /// Platform count treated as complete coverage.
    pub expected_platforms: f64,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            reach_weight: 0.7,
            engagement_weight: 0.3,
            nil_base: 400_000.0,
            nil_exponent: 1.2,
            position_premiums: PositionPremiums::default(),
            market_multipliers: MarketMultipliers::default(),
            base_interval_width: 0.15,
            staleness_width: 0.35,
            completeness_width: 0.25,
            max_interval_width: 0.75,
            expected_platforms: 3.0,
        }
    }
}

impl BrandConfig {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("brand.reach_weight", self.reach_weight)?;
        check_non_negative("brand.engagement_weight", self.engagement_weight)?;
        let total = self.reach_weight + self.engagement_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidConfiguration(format!(
                "brand platform weights must sum to 1.0, got {}",
                total
            )));
        }
        check_positive("brand.nil_base", self.nil_base)?;
        check_positive("brand.nil_exponent", self.nil_exponent)?;
        self.position_premiums.validate()?;
        self.market_multipliers.validate()?;
        check_fraction("brand.base_interval_width", self.base_interval_width)?;
        check_fraction("brand.staleness_width", self.staleness_width)?;
        check_fraction("brand.completeness_width", self.completeness_width)?;
        if !(0.0..1.0).contains(&self.max_interval_width) {
            return Err(EngineError::InvalidConfiguration(format!(
                "brand.max_interval_width must be in [0, 1), got {}",
                self.max_interval_width
            )));
        }
        check_positive("brand.expected_platforms", self.expected_platforms)?;
        Ok(())
    }
}

/// Baseline marketability multiplier per position group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionPremiums {
    pub quarterback: f64,
    pub skill: f64,
    pub offensive_line: f64,
    pub defensive_front: f64,
    pub secondary: f64,
    pub specialist: f64,
}

impl Default for PositionPremiums {
    fn default() -> Self {
        Self {
            quarterback: 1.3,
            skill: 1.12,
            offensive_line: 0.9,
            defensive_front: 1.0,
            secondary: 1.0,
            specialist: 0.8,
        }
    }
}

impl PositionPremiums {
    pub fn for_group(&self, group: PositionGroup) -> f64 {
        match group {
            PositionGroup::Quarterback => self.quarterback,
            PositionGroup::Skill => self.skill,
            PositionGroup::OffensiveLine => self.offensive_line,
            PositionGroup::DefensiveFront => self.defensive_front,
            PositionGroup::Secondary => self.secondary,
            PositionGroup::Specialist => self.specialist,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("quarterback", self.quarterback),
            ("skill", self.skill),
            ("offensive_line", self.offensive_line),
            ("defensive_front", self.defensive_front),
            ("secondary", self.secondary),
            ("specialist", self.specialist),
        ] {
            check_positive(&format!("brand.position_premiums.{}", name), v)?;
        }
        Ok(())
    }
}

/// NIL multiplier per program market tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMultipliers {
    pub national: f64,
    pub large: f64,
    pub mid: f64,
    pub small: f64,
}

impl Default for MarketMultipliers {
    fn default() -> Self {
        Self {
            national: 1.3,
            large: 1.15,
            mid: 1.0,
            small: 0.85,
        }
    }
}

impl MarketMultipliers {
    pub fn for_tier(&self, tier: MarketTier) -> f64 {
        match tier {
            MarketTier::National => self.national,
            MarketTier::Large => self.large,
            MarketTier::Mid => self.mid,
            MarketTier::Small => self.small,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("national", self.national),
            ("large", self.large),
            ("mid", self.mid),
            ("small", self.small),
        ] {
            check_positive(&format!("brand.market_multipliers.{}", name), v)?;
        }
        Ok(())
    }
}

// ============================================================================
// Win impact (WAR)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinImpactConfig {
    /// Performance score of a replacement-level player.
    pub replacement_level: f64,
    /// Performance points per win of replacement delta, before weighting.
    pub points_per_war: f64,
    /// How much a bare depth chart amplifies marginal win value.
    pub scarcity_weight: f64,
    /// Discount on wins when production is heavily scheme-dependent.
    pub dependency_discount: f64,
    /// Share of adjusted wins counted toward championship leverage.
    pub championship_weight: f64,
    pub position_war_weights: PositionWarWeights,
}

impl Default for WinImpactConfig {
    fn default() -> Self {
        Self {
            replacement_level: 45.0,
            points_per_war: 10.0,
            scarcity_weight: 0.4,
            dependency_discount: 0.2,
            championship_weight: 0.35,
            position_war_weights: PositionWarWeights::default(),
        }
    }
}

impl WinImpactConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=100.0).contains(&self.replacement_level) {
            return Err(EngineError::InvalidConfiguration(format!(
                "win_impact.replacement_level must be in [0, 100], got {}",
                self.replacement_level
            )));
        }
        check_positive("win_impact.points_per_war", self.points_per_war)?;
        check_fraction("win_impact.scarcity_weight", self.scarcity_weight)?;
        check_fraction("win_impact.dependency_discount", self.dependency_discount)?;
        check_fraction("win_impact.championship_weight", self.championship_weight)?;
        self.position_war_weights.validate()?;
        Ok(())
    }
}

/// Wins per unit of replacement delta, by position.
///
/// Quarterbacks and edge rushers carry more win value per point of
/// performance than interior line or specialist spots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionWarWeights {
    pub qb: f64,
    pub rb: f64,
    pub wr: f64,
    pub te: f64,
    pub ol: f64,
    pub edge: f64,
    pub dl: f64,
    pub lb: f64,
    pub cb: f64,
    pub s: f64,
    pub k: f64,
    pub p: f64,
}

impl Default for PositionWarWeights {
    fn default() -> Self {
        Self {
            qb: 0.45,
            rb: 0.22,
            wr: 0.25,
            te: 0.20,
            ol: 0.15,
            edge: 0.35,
            dl: 0.25,
            lb: 0.22,
            cb: 0.25,
            s: 0.22,
            k: 0.08,
            p: 0.06,
        }
    }
}

impl PositionWarWeights {
    pub fn for_position(&self, position: Position) -> f64 {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::OL => self.ol,
            Position::Edge => self.edge,
            Position::DL => self.dl,
            Position::LB => self.lb,
            Position::CB => self.cb,
            Position::S => self.s,
            Position::K => self.k,
            Position::P => self.p,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for position in Position::ALL {
            check_positive(
                &format!("win_impact.position_war_weights.{}", position),
                self.for_position(position),
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Risk
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Component weights; must sum to 1.0.
    pub injury_weight: f64,
    pub variance_weight: f64,
    pub flags_weight: f64,
    /// Risk score per recorded injury.
    pub per_injury: f64,
    /// Risk score per game missed to injury.
    pub per_game_missed: f64,
    /// Risk score per point of weekly performance stdev.
    pub per_variance_point: f64,
    /// Risk score per off-field flag.
    pub per_flag: f64,
    /// Band edges on the composite risk score in [0, 1].
    pub low_band_max: f64,
    pub average_band_max: f64,
    pub elevated_band_max: f64,
    /// Hard cap on the divisor multiplier.
    pub max_multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            injury_weight: 0.4,
            variance_weight: 0.3,
            flags_weight: 0.3,
            per_injury: 0.15,
            per_game_missed: 0.04,
            per_variance_point: 0.04,
            per_flag: 0.35,
            low_band_max: 0.25,
            average_band_max: 0.5,
            elevated_band_max: 0.75,
            max_multiplier: 1.5,
        }
    }
}

impl RiskConfig {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("risk.injury_weight", self.injury_weight)?;
        check_non_negative("risk.variance_weight", self.variance_weight)?;
        check_non_negative("risk.flags_weight", self.flags_weight)?;
        let total = self.injury_weight + self.variance_weight + self.flags_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidConfiguration(format!(
                "risk component weights must sum to 1.0, got {}",
                total
            )));
        }
        check_non_negative("risk.per_injury", self.per_injury)?;
        check_non_negative("risk.per_game_missed", self.per_game_missed)?;
        check_non_negative("risk.per_variance_point", self.per_variance_point)?;
        check_non_negative("risk.per_flag", self.per_flag)?;
        if !(0.0 < self.low_band_max
            && self.low_band_max < self.average_band_max
            && self.average_band_max < self.elevated_band_max
            && self.elevated_band_max < 1.0)
        {
            return Err(EngineError::InvalidConfiguration(
                "risk band edges must satisfy 0 < low < average < elevated < 1".to_string(),
            ));
        }
        if self.max_multiplier <= 1.3 {
            return Err(EngineError::InvalidConfiguration(format!(
                "risk.max_multiplier must exceed the high-risk band floor 1.3, got {}",
                self.max_multiplier
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Engine aggregation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Roster-spot value of any scholarship player, in dollars.
    pub base_value: f64,
    pub position_values: PositionBaseValues,
    /// Weight on the NIL point estimate in the blended value.
    pub nil_weight: f64,
    /// Dollars of program value per win above replacement.
    pub dollars_per_war: f64,
    /// Continuity bonus applied only at the current program, in dollars.
    pub familiarity_bonus: f64,
    /// Fit score below which the multiplier drops under 1.0.
    pub poor_fit_threshold: f64,
    /// Fit score above which the multiplier grows superlinearly.
    pub high_fit_threshold: f64,
    /// Multiplier at fit score zero.
    pub poor_fit_floor: f64,
    /// Linear multiplier gain across the poor-to-high band.
    pub mid_fit_slope: f64,
    /// Maximum superlinear bonus at fit score 100.
    pub high_fit_bonus: f64,
    /// Relative gap over current value that triggers a transfer tag.
    pub transfer_gap_threshold: f64,
    /// Component confidence below which a valuation is flagged degraded.
    pub degraded_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_value: 60_000.0,
            position_values: PositionBaseValues::default(),
            nil_weight: 0.6,
            dollars_per_war: 160_000.0,
            familiarity_bonus: 25_000.0,
            poor_fit_threshold: 60.0,
            high_fit_threshold: 85.0,
            poor_fit_floor: 0.6,
            mid_fit_slope: 0.05,
            high_fit_bonus: 0.25,
            transfer_gap_threshold: 0.20,
            degraded_confidence: 0.5,
        }
    }
}

impl EngineConfig {
    /// Scheme-fit multiplier curve: sub-1.0 below the poor-fit threshold,
    /// gently linear through the middle band, superlinear above the high-fit
    /// threshold.
    pub fn fit_multiplier(&self, fit_score: f64) -> f64 {
        let fit = fit_score.clamp(0.0, 100.0);
        if fit < self.poor_fit_threshold {
            self.poor_fit_floor + (1.0 - self.poor_fit_floor) * fit / self.poor_fit_threshold
        } else if fit < self.high_fit_threshold {
            let band = self.high_fit_threshold - self.poor_fit_threshold;
            1.0 + self.mid_fit_slope * (fit - self.poor_fit_threshold) / band
        } else {
            let band = 100.0 - self.high_fit_threshold;
            let t = (fit - self.high_fit_threshold) / band;
            1.0 + self.mid_fit_slope + self.high_fit_bonus * t.powf(1.5)
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_positive("engine.base_value", self.base_value)?;
        self.position_values.validate()?;
        check_non_negative("engine.nil_weight", self.nil_weight)?;
        check_positive("engine.dollars_per_war", self.dollars_per_war)?;
        check_non_negative("engine.familiarity_bonus", self.familiarity_bonus)?;
        if !(0.0 < self.poor_fit_threshold
            && self.poor_fit_threshold < self.high_fit_threshold
            && self.high_fit_threshold < 100.0)
        {
            return Err(EngineError::InvalidConfiguration(
                "engine fit thresholds must satisfy 0 < poor < high < 100".to_string(),
            ));
        }
        if !(0.0 < self.poor_fit_floor && self.poor_fit_floor <= 1.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "engine.poor_fit_floor must be in (0, 1], got {}",
                self.poor_fit_floor
            )));
        }
        check_non_negative("engine.mid_fit_slope", self.mid_fit_slope)?;
        check_non_negative("engine.high_fit_bonus", self.high_fit_bonus)?;
        check_positive("engine.transfer_gap_threshold", self.transfer_gap_threshold)?;
        check_fraction("engine.degraded_confidence", self.degraded_confidence)?;
        Ok(())
    }
}

/// Positional roster value in dollars, before fit and risk adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBaseValues {
    pub qb: f64,
    pub rb: f64,
    pub wr: f64,
    pub te: f64,
    pub ol: f64,
    pub edge: f64,
    pub dl: f64,
    pub lb: f64,
    pub cb: f64,
    pub s: f64,
    pub k: f64,
    pub p: f64,
}

impl Default for PositionBaseValues {
    fn default() -> Self {
        Self {
            qb: 140_000.0,
            rb: 70_000.0,
            wr: 90_000.0,
            te: 60_000.0,
            ol: 55_000.0,
            edge: 110_000.0,
            dl: 80_000.0,
            lb: 65_000.0,
            cb: 85_000.0,
            s: 65_000.0,
            k: 25_000.0,
            p: 20_000.0,
        }
    }
}

impl PositionBaseValues {
    pub fn for_position(&self, position: Position) -> f64 {
        match position {
            Position::QB => self.qb,
            Position::RB => self.rb,
            Position::WR => self.wr,
            Position::TE => self.te,
            Position::OL => self.ol,
            Position::Edge => self.edge,
            Position::DL => self.dl,
            Position::LB => self.lb,
            Position::CB => self.cb,
            Position::S => self.s,
            Position::K => self.k,
            Position::P => self.p,
        }
    }

    pub fn with_position(&self, position: Position, value: f64) -> Self {
        let mut next = self.clone();
        match position {
            Position::QB => next.qb = value,
            Position::RB => next.rb = value,
            Position::WR => next.wr = value,
            Position::TE => next.te = value,
            Position::OL => next.ol = value,
            Position::Edge => next.edge = value,
            Position::DL => next.dl = value,
            Position::LB => next.lb = value,
            Position::CB => next.cb = value,
            Position::S => next.s = value,
            Position::K => next.k = value,
            Position::P => next.p = value,
        }
        next
    }

    pub fn validate(&self) -> Result<()> {
        for position in Position::ALL {
            check_positive(
                &format!("engine.position_values.{}", position),
                self.for_position(position),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(ValuationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = ValuationConfig::default();
        config.engine.base_value = -1.0;
        assert!(matches!(
            config.validate(),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_unbalanced_performance_weights_rejected() {
        let mut config = ValuationConfig::default();
        config.performance.production_weight = 0.9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fit_multiplier_bands() {
        let engine = EngineConfig::default();
        // Poor fit discounts.
        assert!(engine.fit_multiplier(30.0) < 1.0);
        // Threshold crossing is continuous at 1.0.
        assert!((engine.fit_multiplier(60.0) - 1.0).abs() < 1e-9);
        // Middle band is a gentle reward.
        let mid = engine.fit_multiplier(75.0);
        assert!(mid > 1.0 && mid < 1.06);
        // High band grows superlinearly toward the cap.
        let high = engine.fit_multiplier(94.0);
        let elite = engine.fit_multiplier(100.0);
        assert!(high > mid);
        assert!((elite - (1.0 + 0.05 + 0.25)).abs() < 1e-9);
        // Superlinear: second half of the band gains more than the first.
        let q1 = engine.fit_multiplier(92.5) - engine.fit_multiplier(85.0);
        let q2 = engine.fit_multiplier(100.0) - engine.fit_multiplier(92.5);
        assert!(q2 > q1);
    }

    #[test]
    fn test_fit_multiplier_monotone() {
        let engine = EngineConfig::default();
        let mut prev = engine.fit_multiplier(0.0);
        for i in 1..=100 {
            let next = engine.fit_multiplier(i as f64);
            assert!(next >= prev, "multiplier decreased at fit {}", i);
            prev = next;
        }
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ValuationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: ValuationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
