//! Player profile model
//!
//! Statistic sets differ by position, so the stat line is a tagged variant
//! per position group, each declaring its own required and optional fields.
//! Field presence is checked at load time (`PlayerProfile::validate`), not
//! discovered mid-scoring.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

// ============================================================================
// Positions
// ============================================================================

/// College football positions covered by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    QB,
    RB,
    WR,
    TE,
    OL,
    Edge,
    DL,
    LB,
    CB,
    S,
    K,
    P,
}

impl Position {
    pub const ALL: [Position; 12] = [
        Position::QB,
        Position::RB,
        Position::WR,
        Position::TE,
        Position::OL,
        Position::Edge,
        Position::DL,
        Position::LB,
        Position::CB,
        Position::S,
        Position::K,
        Position::P,
    ];

    /// Statistic group this position scores under.
    pub fn group(&self) -> PositionGroup {
        match self {
            Position::QB => PositionGroup::Quarterback,
            Position::RB | Position::WR | Position::TE => PositionGroup::Skill,
            Position::OL => PositionGroup::OffensiveLine,
            Position::Edge | Position::DL | Position::LB => PositionGroup::DefensiveFront,
            Position::CB | Position::S => PositionGroup::Secondary,
            Position::K | Position::P => PositionGroup::Specialist,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::QB => "QB",
            Position::RB => "RB",
            Position::WR => "WR",
            Position::TE => "TE",
            Position::OL => "OL",
            Position::Edge => "EDGE",
            Position::DL => "DL",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::S => "S",
            Position::K => "K",
            Position::P => "P",
        };
        write!(f, "{}", s)
    }
}

/// Position groups sharing a statistic schema and reference distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PositionGroup {
    Quarterback,
    Skill,
    OffensiveLine,
    DefensiveFront,
    Secondary,
    Specialist,
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PositionGroup::Quarterback => "quarterback",
            PositionGroup::Skill => "skill",
            PositionGroup::OffensiveLine => "offensive_line",
            PositionGroup::DefensiveFront => "defensive_front",
            PositionGroup::Secondary => "secondary",
            PositionGroup::Specialist => "specialist",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    GradTransfer,
}

// ============================================================================
// Position statistics (tagged variants)
// ============================================================================

/// Per-season statistic line, one variant per position group.
///
/// Optional fields improve the score when present; absent required fields are
/// substituted with position averages up to the configured tolerance, at a
/// confidence cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum PositionStats {
    Quarterback(QuarterbackStats),
    Skill(SkillStats),
    OffensiveLine(OffensiveLineStats),
    DefensiveFront(DefensiveFrontStats),
    Secondary(SecondaryStats),
    Specialist(SpecialistStats),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterbackStats {
    pub pass_yards_per_game: Option<f64>,
    pub completion_pct: Option<f64>,
    pub pass_touchdowns: Option<f64>,
    pub interceptions: Option<f64>,
    pub yards_per_attempt: Option<f64>,
    pub rush_yards_per_game: Option<f64>,
    pub sack_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub scrimmage_yards_per_game: Option<f64>,
    pub touchdowns: Option<f64>,
    pub yards_per_touch: Option<f64>,
    pub receptions_per_game: Option<f64>,
    pub drop_rate: Option<f64>,
    pub broken_tackles: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OffensiveLineStats {
    pub pass_block_grade: Option<f64>,
    pub run_block_grade: Option<f64>,
    pub pressures_allowed_per_game: Option<f64>,
    pub penalties_per_game: Option<f64>,
    pub snaps_per_game: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefensiveFrontStats {
    pub tackles_per_game: Option<f64>,
    pub pressures_per_game: Option<f64>,
    pub sacks: Option<f64>,
    pub tackles_for_loss: Option<f64>,
    pub run_stop_rate: Option<f64>,
    pub missed_tackle_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryStats {
    pub coverage_grade: Option<f64>,
    pub passes_defended: Option<f64>,
    pub interceptions: Option<f64>,
    pub completion_pct_allowed: Option<f64>,
    pub tackles_per_game: Option<f64>,
    pub yards_per_target_allowed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecialistStats {
    pub accuracy_pct: Option<f64>,
    pub average_distance: Option<f64>,
    pub long_made: Option<f64>,
    pub pressure_success_rate: Option<f64>,
}

impl PositionStats {
    pub fn group(&self) -> PositionGroup {
        match self {
            PositionStats::Quarterback(_) => PositionGroup::Quarterback,
            PositionStats::Skill(_) => PositionGroup::Skill,
            PositionStats::OffensiveLine(_) => PositionGroup::OffensiveLine,
            PositionStats::DefensiveFront(_) => PositionGroup::DefensiveFront,
            PositionStats::Secondary(_) => PositionGroup::Secondary,
            PositionStats::Specialist(_) => PositionGroup::Specialist,
        }
    }

    /// Required field names for this variant's schema.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            PositionStats::Quarterback(_) => &[
                "pass_yards_per_game",
                "completion_pct",
                "pass_touchdowns",
                "interceptions",
            ],
            PositionStats::Skill(_) => {
                &["scrimmage_yards_per_game", "touchdowns", "yards_per_touch"]
            }
            PositionStats::OffensiveLine(_) => &[
                "pass_block_grade",
                "run_block_grade",
                "pressures_allowed_per_game",
            ],
            PositionStats::DefensiveFront(_) => {
                &["tackles_per_game", "pressures_per_game", "sacks"]
            }
            PositionStats::Secondary(_) => {
                &["coverage_grade", "passes_defended", "interceptions"]
            }
            PositionStats::Specialist(_) => &["accuracy_pct", "average_distance"],
        }
    }

    /// All field names and values, required first.
    pub fn fields(&self) -> Vec<(&'static str, Option<f64>)> {
        match self {
            PositionStats::Quarterback(s) => vec![
                ("pass_yards_per_game", s.pass_yards_per_game),
                ("completion_pct", s.completion_pct),
                ("pass_touchdowns", s.pass_touchdowns),
                ("interceptions", s.interceptions),
                ("yards_per_attempt", s.yards_per_attempt),
                ("rush_yards_per_game", s.rush_yards_per_game),
                ("sack_rate", s.sack_rate),
            ],
            PositionStats::Skill(s) => vec![
                ("scrimmage_yards_per_game", s.scrimmage_yards_per_game),
                ("touchdowns", s.touchdowns),
                ("yards_per_touch", s.yards_per_touch),
                ("receptions_per_game", s.receptions_per_game),
                ("drop_rate", s.drop_rate),
                ("broken_tackles", s.broken_tackles),
            ],
            PositionStats::OffensiveLine(s) => vec![
                ("pass_block_grade", s.pass_block_grade),
                ("run_block_grade", s.run_block_grade),
                ("pressures_allowed_per_game", s.pressures_allowed_per_game),
                ("penalties_per_game", s.penalties_per_game),
                ("snaps_per_game", s.snaps_per_game),
            ],
            PositionStats::DefensiveFront(s) => vec![
                ("tackles_per_game", s.tackles_per_game),
                ("pressures_per_game", s.pressures_per_game),
                ("sacks", s.sacks),
                ("tackles_for_loss", s.tackles_for_loss),
                ("run_stop_rate", s.run_stop_rate),
                ("missed_tackle_rate", s.missed_tackle_rate),
            ],
            PositionStats::Secondary(s) => vec![
                ("coverage_grade", s.coverage_grade),
                ("passes_defended", s.passes_defended),
                ("interceptions", s.interceptions),
                ("completion_pct_allowed", s.completion_pct_allowed),
                ("tackles_per_game", s.tackles_per_game),
                ("yards_per_target_allowed", s.yards_per_target_allowed),
            ],
            PositionStats::Specialist(s) => vec![
                ("accuracy_pct", s.accuracy_pct),
                ("average_distance", s.average_distance),
                ("long_made", s.long_made),
                ("pressure_success_rate", s.pressure_success_rate),
            ],
        }
    }

    /// Count of required fields that are absent.
    pub fn missing_required(&self) -> usize {
        let required = self.required_fields();
        self.fields()
            .iter()
            .filter(|(name, value)| required.contains(name) && value.is_none())
            .count()
    }

    /// Fraction of required fields absent, in [0, 1].
    pub fn missing_fraction(&self) -> f64 {
        self.missing_required() as f64 / self.required_fields().len() as f64
    }
}

// ============================================================================
// Game log, social reach, risk indicators
// ============================================================================

/// One week of play: opponent quality, situational leverage, and a single
/// 0-100 game performance index supplied by the stat provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLog {
    pub week: u32,
    /// Opponent strength percentile in [0, 1]; 0.5 is an average opponent.
    pub opponent_strength: f64,
    /// Share of this game's snaps taken in high-leverage situations.
    pub leverage_share: f64,
    /// Game performance index, 0-100.
    pub performance_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    TikTok,
    X,
    YouTube,
}

impl Platform {
    /// log10 follower count treated as a saturated audience on this platform.
    /// Platforms have different scale distributions, so each normalizes
    /// independently.
    pub fn log_follower_cap(&self) -> f64 {
        match self {
            Platform::Instagram => 7.0,
            Platform::TikTok => 7.3,
            Platform::X => 6.7,
            Platform::YouTube => 6.5,
        }
    }

    /// Typical engagement rate for an account with a real audience.
    pub fn typical_engagement(&self) -> f64 {
        match self {
            Platform::Instagram => 0.03,
            Platform::TikTok => 0.06,
            Platform::X => 0.015,
            Platform::YouTube => 0.04,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
            Platform::X => "x",
            Platform::YouTube => "youtube",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformReach {
    pub platform: Platform,
    pub followers: u64,
    /// Engagement rate in [0, 1].
    pub engagement_rate: f64,
}

/// Social-reach metrics as supplied by the loader, with data recency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialReach {
    pub platforms: Vec<PlatformReach>,
    /// Age of the reach snapshot when the profile was assembled, in days.
    pub data_age_days: u32,
}

/// Injury and off-field risk indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskIndicators {
    pub injury_count: u32,
    pub games_missed: u32,
    pub off_field_flags: u32,
}

// ============================================================================
// PlayerProfile
// ============================================================================

/// Immutable input record for one evaluation. Owned by the caller; the engine
/// never mutates or caches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub class_year: ClassYear,
    pub stats: PositionStats,
    /// Skill ratings (0-100) keyed by attribute name, matched against
    /// `SchemeRequirement` targets.
    pub skills: BTreeMap<String, f64>,
    pub game_log: Vec<GameLog>,
    pub social: SocialReach,
    pub risk: RiskIndicators,
    pub games_played: u32,
    pub snap_count: u32,
}

impl PlayerProfile {
    /// Schema validation: identity fields are mandatory and every bounded
    /// field must be in range. A record failing here is rejected before any
    /// scoring, never partially scored.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(EngineError::SchemaValidation(
                "player id must not be empty".to_string(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(EngineError::SchemaValidation(format!(
                "player {}: name must not be empty",
                self.id
            )));
        }
        if self.stats.group() != self.position.group() {
            return Err(EngineError::SchemaValidation(format!(
                "player {}: stat group {} does not match position {} (group {})",
                self.id,
                self.stats.group(),
                self.position,
                self.position.group()
            )));
        }
        for (attribute, value) in &self.skills {
            if !(0.0..=100.0).contains(value) {
                return Err(EngineError::SchemaValidation(format!(
                    "player {}: skill {} out of range: {}",
                    self.id, attribute, value
                )));
            }
        }
        for game in &self.game_log {
            if !(0.0..=1.0).contains(&game.opponent_strength) {
                return Err(EngineError::SchemaValidation(format!(
                    "player {}: week {} opponent_strength out of range: {}",
                    self.id, game.week, game.opponent_strength
                )));
            }
            if !(0.0..=1.0).contains(&game.leverage_share) {
                return Err(EngineError::SchemaValidation(format!(
                    "player {}: week {} leverage_share out of range: {}",
                    self.id, game.week, game.leverage_share
                )));
            }
            if !(0.0..=100.0).contains(&game.performance_index) {
                return Err(EngineError::SchemaValidation(format!(
                    "player {}: week {} performance_index out of range: {}",
                    self.id, game.week, game.performance_index
                )));
            }
        }
        for reach in &self.social.platforms {
            if !(0.0..=1.0).contains(&reach.engagement_rate) {
                return Err(EngineError::SchemaValidation(format!(
                    "player {}: {} engagement_rate out of range: {}",
                    self.id, reach.platform, reach.engagement_rate
                )));
            }
        }
        Ok(())
    }
}
