//! Valuation engine
//!
//! Orchestrates the four calculators into program-specific and market
//! valuations. Every program value comes from the same blend with only
//! scheme-fit and market-factor inputs varying, so the per-program map is
//! internally comparable.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::ValuationConfig;
use crate::error::Result;
use crate::models::player::PlayerProfile;
use crate::models::scheme::SchemeRequirement;
use crate::models::score::ComponentScore;
use crate::models::valuation::{NilEstimate, Recommendation, ValuationResult, WinImpact};
use crate::scoring::{
    BrandCalculator, PerformanceCalculator, SchemeFitCalculator, TeamContext, WinImpactCalculator,
};

use super::risk::RiskModel;

/// Everything computed for one (player, program) pair.
struct ProgramValuation {
    value: f64,
    fit: ComponentScore,
    brand: ComponentScore,
    nil: NilEstimate,
    impact: WinImpact,
}

/// Stateless orchestrator. Holds its configuration by value; building a
/// second engine with a different config gives an independent evaluator for
/// A/B calibration comparison.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: ValuationConfig,
    performance: PerformanceCalculator,
    scheme_fit: SchemeFitCalculator,
    brand: BrandCalculator,
    win_impact: WinImpactCalculator,
    risk: RiskModel,
}

impl ValuationEngine {
    /// Validates the configuration before any scoring can happen.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            performance: PerformanceCalculator::new(&config),
            scheme_fit: SchemeFitCalculator::new(&config),
            brand: BrandCalculator::new(&config),
            win_impact: WinImpactCalculator::new(&config),
            risk: RiskModel::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Evaluate a player at their current program and across candidate
    /// destinations.
    ///
    /// Calculator failures surface as errors; partial data degrades
    /// confidence and sets the `degraded` flag instead of being absorbed
    /// into a false full-confidence number. Ties between equal-valued
    /// alternatives resolve to the lexicographically smallest program id.
    pub fn evaluate(
        &self,
        profile: &PlayerProfile,
        current_program: &SchemeRequirement,
        candidate_programs: &[SchemeRequirement],
        context: &TeamContext,
    ) -> Result<ValuationResult> {
        profile.validate()?;

        let performance = self.performance.score(profile)?;
        let risk = self.risk.assess(profile);
        debug!(
            player = %profile.id,
            performance = performance.score,
            risk_category = %risk.category,
            "scored player"
        );

        let current =
            self.value_at(profile, current_program, context, &performance, risk.multiplier, true)?;

        let mut program_values = BTreeMap::new();
        let mut best_alternative: Option<(&str, f64)> = None;
        for candidate in candidate_programs {
            let valuation = self.value_at(
                profile,
                candidate,
                context,
                &performance,
                risk.multiplier,
                false,
            )?;
            program_values.insert(candidate.program_id.clone(), valuation.value);
        }
        // BTreeMap order plus strict comparison makes the tie-break stable:
        // the lowest program id wins equal values.
        for (program_id, value) in &program_values {
            if best_alternative.map_or(true, |(_, best)| *value > best) {
                best_alternative = Some((program_id, *value));
            }
        }

        let market_value = match best_alternative {
            Some((_, value)) => value,
            // With no candidates, the open-market reference is the current
            // scheme without the continuity bonus.
            None => current.value - self.config.engine.familiarity_bonus / risk.multiplier,
        };

        let recommendation = match best_alternative {
            Some((_, best))
                if best
                    > current.value * (1.0 + self.config.engine.transfer_gap_threshold) =>
            {
                Recommendation::TransferCandidate
            }
            Some((_, best)) if best > current.value => Recommendation::Monitor,
            _ => Recommendation::Retain,
        };

        let floor = self.config.engine.degraded_confidence;
        let degraded = performance.confidence < floor
            || current.fit.confidence < floor
            || current.brand.confidence < floor;

        debug!(
            player = %profile.id,
            current_value = current.value,
            market_value,
            recommendation = ?recommendation,
            degraded,
            "valuation complete"
        );

        Ok(ValuationResult {
            player_id: profile.id.clone(),
            config_version: self.config.version.clone(),
            current_program: current_program.program_id.clone(),
            current_program_value: current.value,
            market_value,
            program_values,
            win_impact: current.impact,
            risk_multiplier: risk.multiplier,
            recommendation,
            degraded,
            performance,
            scheme_fit: current.fit,
            brand: current.brand,
            nil_estimate: current.nil,
        })
    }

    /// One program's valuation:
    /// `(base + position) * fit_multiplier + nil * nil_weight + win value
    ///  + familiarity`, all divided by the risk multiplier.
    fn value_at(
        &self,
        profile: &PlayerProfile,
        program: &SchemeRequirement,
        context: &TeamContext,
        performance: &ComponentScore,
        risk_multiplier: f64,
        is_current: bool,
    ) -> Result<ProgramValuation> {
        let fit = self.scheme_fit.fit(profile, program)?;
        let (brand, nil) = self.brand.value(profile, program.market_tier)?;
        let impact = self.win_impact.war(performance.score, profile.position, context);

        let engine = &self.config.engine;
        let base = engine.base_value + engine.position_values.for_position(profile.position);
        let fit_multiplier = engine.fit_multiplier(fit.score);
        let familiarity = if is_current { engine.familiarity_bonus } else { 0.0 };
        let raw = base * fit_multiplier
            + nil.point * engine.nil_weight
            + impact.war * engine.dollars_per_war
            + familiarity;
        // Risk divides: elevated risk discounts, a clean profile earns a
        // small premium.
        let value = raw / risk_multiplier;

        Ok(ProgramValuation { value, fit, brand, nil, impact })
    }
}
