//! Input file loading: JSON profiles, scheme catalogs, player history, and
//! the CSV transfer ledger.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use tpv_core::config::ValuationConfig;
use tpv_core::models::player::PlayerProfile;
use tpv_core::models::scheme::SchemeRequirement;
use tpv_core::models::transfer::{PlayerHistory, TransferRecord};

pub fn load_config(path: Option<&Path>) -> Result<ValuationConfig> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            let config: ValuationConfig = serde_json::from_reader(file)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(config)
        }
        None => Ok(ValuationConfig::default()),
    }
}

pub fn load_profile(path: &Path) -> Result<PlayerProfile> {
    let file =
        File::open(path).with_context(|| format!("opening profile {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing profile {}", path.display()))
}

/// Scheme catalog: a JSON array of requirements, keyed by program id.
pub fn load_schemes(path: &Path) -> Result<BTreeMap<String, SchemeRequirement>> {
    let file =
        File::open(path).with_context(|| format!("opening schemes {}", path.display()))?;
    let schemes: Vec<SchemeRequirement> = serde_json::from_reader(file)
        .with_context(|| format!("parsing schemes {}", path.display()))?;
    let mut catalog = BTreeMap::new();
    for scheme in schemes {
        if catalog.insert(scheme.program_id.clone(), scheme).is_some() {
            bail!("duplicate program id in scheme catalog {}", path.display());
        }
    }
    Ok(catalog)
}

pub fn load_history(path: &Path) -> Result<PlayerHistory> {
    let file =
        File::open(path).with_context(|| format!("opening history {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing history {}", path.display()))
}

/// One row of the transfer ledger CSV. Candidate programs are a
/// semicolon-separated id list resolved against the scheme catalog.
#[derive(Debug, Deserialize)]
struct TransferRow {
    player_id: String,
    origin_program: String,
    destination_program: String,
    candidates: String,
    transfer_date: NaiveDate,
    signed_nil_value: f64,
    first_season_performance: f64,
}

pub fn load_transfers(
    path: &Path,
    schemes: &BTreeMap<String, SchemeRequirement>,
) -> Result<Vec<TransferRecord>> {
    let lookup = |program_id: &str| -> Result<SchemeRequirement> {
        schemes
            .get(program_id)
            .cloned()
            .with_context(|| format!("program {} missing from scheme catalog", program_id))
    };

    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening transfers {}", path.display()))?;
    let mut transfers = Vec::new();
    for (line, row) in reader.deserialize().enumerate() {
        let row: TransferRow =
            row.with_context(|| format!("transfers {} row {}", path.display(), line + 1))?;
        let candidates = row
            .candidates
            .split(';')
            .filter(|id| !id.trim().is_empty())
            .map(|id| lookup(id.trim()))
            .collect::<Result<Vec<_>>>()?;
        transfers.push(TransferRecord {
            player_id: row.player_id,
            origin: lookup(&row.origin_program)?,
            destination_program: row.destination_program,
            candidates,
            transfer_date: row.transfer_date,
            signed_nil_value: row.signed_nil_value,
            first_season_performance: row.first_season_performance,
        });
    }
    Ok(transfers)
}
