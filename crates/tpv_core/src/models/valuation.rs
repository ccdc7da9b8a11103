//! Valuation output records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::score::ComponentScore;

/// Wins Above Replacement output.
///
/// Additive across players: team WAR for a lineup is the plain sum of
/// individual `war` values, and every downstream consumer relies on that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinImpact {
    pub war: f64,
    pub wins_added: f64,
    pub championship_impact: f64,
}

/// Sum of individual WAR values for a lineup.
pub fn lineup_war(players: &[WinImpact]) -> f64 {
    players.iter().map(|impact| impact.war).sum()
}

/// NIL estimate: always a point value with an explicit interval, never a
/// bare point, so consumers can tell high-confidence estimates from guesses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NilEstimate {
    pub point: f64,
    pub low: f64,
    pub high: f64,
}

impl NilEstimate {
    /// Relative interval half-width; wider means less certain.
    pub fn relative_width(&self) -> f64 {
        if self.point <= 0.0 {
            return 1.0;
        }
        (self.high - self.low) / (2.0 * self.point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Retain,
    Monitor,
    TransferCandidate,
}

/// Aggregated valuation for one player.
///
/// Market value and every alternative-program value come from the same
/// formula with only scheme-fit and market-factor inputs varying, so they
/// are internally comparable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub player_id: String,
    /// Configuration generation that produced this record.
    pub config_version: String,
    pub current_program: String,
    pub current_program_value: f64,
    pub market_value: f64,
    /// Candidate program id to estimated value there.
    pub program_values: BTreeMap<String, f64>,
    pub win_impact: WinImpact,
    /// Composite risk divisor applied to every value.
    pub risk_multiplier: f64,
    pub recommendation: Recommendation,
    /// True when any component scored below the configured confidence floor;
    /// the record is usable but must not be read as a full-confidence number.
    pub degraded: bool,
    pub performance: ComponentScore,
    pub scheme_fit: ComponentScore,
    pub brand: ComponentScore,
    pub nil_estimate: NilEstimate,
}
