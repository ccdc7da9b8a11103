//! Historical transfer records for backtesting

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::models::player::PlayerProfile;
use crate::models::scheme::SchemeRequirement;

/// One historical transfer with its recorded outcome. Immutable, externally
/// sourced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub player_id: String,
    /// Scheme at the program the player left.
    pub origin: SchemeRequirement,
    /// Program the player actually signed with.
    pub destination_program: String,
    /// Candidate destinations considered at the time, including the actual
    /// destination.
    pub candidates: Vec<SchemeRequirement>,
    pub transfer_date: NaiveDate,
    /// Reported or estimated NIL value at signing, in dollars.
    pub signed_nil_value: f64,
    /// First-season performance score (0-100) at the destination.
    pub first_season_performance: f64,
}

impl TransferRecord {
    pub fn validate(&self) -> Result<()> {
        if self.player_id.trim().is_empty() {
            return Err(EngineError::SchemaValidation(
                "transfer record: player_id must not be empty".to_string(),
            ));
        }
        self.origin.validate()?;
        if self.candidates.is_empty() {
            return Err(EngineError::SchemaValidation(format!(
                "transfer record for {}: no candidate programs",
                self.player_id
            )));
        }
        for candidate in &self.candidates {
            candidate.validate()?;
        }
        if !self
            .candidates
            .iter()
            .any(|c| c.program_id == self.destination_program)
        {
            return Err(EngineError::SchemaValidation(format!(
                "transfer record for {}: destination {} missing from candidate list",
                self.player_id, self.destination_program
            )));
        }
        if self.signed_nil_value < 0.0 {
            return Err(EngineError::SchemaValidation(format!(
                "transfer record for {}: negative signed NIL value",
                self.player_id
            )));
        }
        Ok(())
    }
}

/// Dated snapshot of a player profile as it was known at `as_of`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub as_of: NaiveDate,
    pub profile: PlayerProfile,
}

/// Player id to dated profile snapshots, the backtester's data source.
pub type PlayerHistory = BTreeMap<String, Vec<PlayerSnapshot>>;

/// Latest snapshot strictly before `cutoff`, if any.
///
/// Strict inequality is what enforces no-lookahead: data stamped on or after
/// the transfer date never feeds its own prediction.
pub fn snapshot_before<'a>(
    history: &'a PlayerHistory,
    player_id: &str,
    cutoff: NaiveDate,
) -> Option<&'a PlayerSnapshot> {
    history
        .get(player_id)?
        .iter()
        .filter(|snapshot| snapshot.as_of < cutoff)
        .max_by_key(|snapshot| snapshot.as_of)
}
