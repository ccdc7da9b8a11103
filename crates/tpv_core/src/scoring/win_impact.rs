//! Win impact (WAR)
//!
//! Converts a performance score into wins above replacement. Position
//! importance and depth-chart scarcity scale the marginal win value; the
//! resulting WAR is additive across players so depth-chart and scenario
//! tools can sum a lineup.

use serde::{Deserialize, Serialize};

use crate::config::{ValuationConfig, WinImpactConfig};
use crate::models::player::Position;
use crate::models::valuation::WinImpact;

/// Team situation at the position being filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamContext {
    /// Quality of existing depth at the position, 0 (none) to 1 (elite
    /// starter in place). Lower depth means a larger marginal win value.
    pub depth_quality: f64,
    /// How scheme-dependent the player's production is, 0 to 1.
    pub scheme_dependency: f64,
}

impl Default for TeamContext {
    fn default() -> Self {
        Self { depth_quality: 0.5, scheme_dependency: 0.5 }
    }
}

#[derive(Debug, Clone)]
pub struct WinImpactCalculator {
    cfg: WinImpactConfig,
}

impl WinImpactCalculator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self { cfg: config.win_impact.clone() }
    }

    /// WAR for one player. Below-replacement performance yields negative WAR.
    pub fn war(
        &self,
        performance_score: f64,
        position: Position,
        context: &TeamContext,
    ) -> WinImpact {
        let delta = performance_score - self.cfg.replacement_level;
        let position_weight = self.cfg.position_war_weights.for_position(position);
        let scarcity =
            1.0 + self.cfg.scarcity_weight * (1.0 - context.depth_quality.clamp(0.0, 1.0));
        let war = delta / self.cfg.points_per_war * position_weight * scarcity;
        let wins_added =
            war * (1.0 - self.cfg.dependency_discount * context.scheme_dependency.clamp(0.0, 1.0));
        WinImpact {
            war,
            wins_added,
            championship_impact: wins_added * self.cfg.championship_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::valuation::lineup_war;

    fn calculator() -> WinImpactCalculator {
        WinImpactCalculator::new(&ValuationConfig::default())
    }

    #[test]
    fn test_qb_outweighs_line_per_point() {
        let calc = calculator();
        let ctx = TeamContext::default();
        let qb = calc.war(80.0, Position::QB, &ctx);
        let ol = calc.war(80.0, Position::OL, &ctx);
        assert!(qb.war > ol.war);
        // Edge carries a premium over interior line too.
        let edge = calc.war(80.0, Position::Edge, &ctx);
        assert!(edge.war > ol.war);
    }

    #[test]
    fn test_empty_depth_chart_raises_marginal_wins() {
        let calc = calculator();
        let bare = calc.war(
            80.0,
            Position::WR,
            &TeamContext { depth_quality: 0.0, scheme_dependency: 0.5 },
        );
        let stacked = calc.war(
            80.0,
            Position::WR,
            &TeamContext { depth_quality: 1.0, scheme_dependency: 0.5 },
        );
        assert!(bare.war > stacked.war);
    }

    #[test]
    fn test_below_replacement_is_negative() {
        let impact = calculator().war(30.0, Position::RB, &TeamContext::default());
        assert!(impact.war < 0.0);
        assert!(impact.wins_added < 0.0);
    }

    #[test]
    fn test_lineup_war_additivity() {
        let calc = calculator();
        let ctx = TeamContext::default();
        let impacts = [
            calc.war(92.0, Position::QB, &ctx),
            calc.war(75.0, Position::WR, &ctx),
            calc.war(60.0, Position::OL, &ctx),
        ];
        let expected: f64 = impacts.iter().map(|i| i.war).sum();
        assert!((lineup_war(&impacts) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_elite_qb_war_band() {
        // A top-tier performance score in a settled room lands near 2 WAR.
        let impact = calculator().war(
            92.0,
            Position::QB,
            &TeamContext { depth_quality: 1.0, scheme_dependency: 0.3 },
        );
        assert!(impact.war > 1.5 && impact.war < 3.0, "war = {}", impact.war);
    }
}
