//! Data model: player profiles, scheme requirements, scores, valuations and
//! historical transfer records.

pub mod player;
pub mod scheme;
pub mod score;
pub mod transfer;
pub mod valuation;

pub use player::{
    ClassYear, GameLog, Platform, PlatformReach, PlayerProfile, Position, PositionGroup,
    PositionStats, RiskIndicators, SocialReach,
};
pub use scheme::{AttributeTarget, MarketTier, SchemeRequirement};
pub use score::ComponentScore;
pub use transfer::{snapshot_before, PlayerHistory, PlayerSnapshot, TransferRecord};
pub use valuation::{lineup_war, NilEstimate, Recommendation, ValuationResult, WinImpact};
