//! Backtesting framework
//!
//! Replays the valuation engine over historical transfers using only data
//! available before each transfer date, then compares predicted market value
//! and destination against what actually happened. Transfers are independent,
//! so the replay is data-parallel.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ValuationConfig;
use crate::engine::ValuationEngine;
use crate::error::{EngineError, Result};
use crate::models::player::Position;
use crate::models::transfer::{snapshot_before, PlayerHistory, TransferRecord};
use crate::scoring::TeamContext;

use super::metrics::{accuracy_metrics, AccuracyMetrics};

/// Inclusive date window for a backtest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TestPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Predicted vs. actual outcome for one historical transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferPrediction {
    pub player_id: String,
    pub position: Position,
    pub transfer_date: NaiveDate,
    pub predicted_value: f64,
    pub actual_value: f64,
    pub predicted_destination: String,
    pub actual_destination: String,
    pub predicted_performance: f64,
    pub actual_performance: f64,
}

/// Why a transfer was skipped instead of predicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No profile snapshot dated before the transfer.
    NoPriorSnapshot,
    /// Record or evaluation failure, with the underlying error text.
    Evaluation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedTransfer {
    pub player_id: String,
    pub transfer_date: NaiveDate,
    pub reason: SkipReason,
}

/// One full backtest pass. Created once per run, never mutated after.
///
/// Skips are recorded rather than dropped so aggregate metrics are never
/// silently computed over a biased subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub period: TestPeriod,
    pub config_version: String,
    pub predictions: Vec<TransferPrediction>,
    pub skipped: Vec<SkippedTransfer>,
}

/// Per-fold cross-validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldMetrics {
    pub fold: usize,
    pub period: TestPeriod,
    pub metrics: AccuracyMetrics,
}

/// Neutral team context for historical replay, where destination depth
/// charts are not reconstructed.
const REPLAY_CONTEXT: TeamContext = TeamContext { depth_quality: 0.5, scheme_dependency: 0.5 };

pub struct Backtester {
    engine: ValuationEngine,
}

impl Backtester {
    pub fn new(config: ValuationConfig) -> Result<Self> {
        Ok(Self { engine: ValuationEngine::new(config)? })
    }

    /// Replay every transfer inside `period` against the engine.
    pub fn backtest_transfers(
        &self,
        transfers: &[TransferRecord],
        history: &PlayerHistory,
        period: TestPeriod,
    ) -> BacktestResult {
        let in_period: Vec<&TransferRecord> = transfers
            .iter()
            .filter(|record| period.contains(record.transfer_date))
            .collect();
        let outcomes: Vec<std::result::Result<TransferPrediction, SkippedTransfer>> =
            in_period.par_iter().map(|record| self.replay_one(record, history)).collect();

        let mut predictions = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(prediction) => predictions.push(prediction),
                Err(skip) => skipped.push(skip),
            }
        }
        info!(
            evaluated = predictions.len(),
            skipped = skipped.len(),
            config = %self.engine.config().version,
            "backtest pass complete"
        );
        BacktestResult {
            period,
            config_version: self.engine.config().version.clone(),
            predictions,
            skipped,
        }
    }

    /// Temporal k-fold cross-validation.
    ///
    /// Folds partition the transfer set by date order, not randomly, so
    /// temporally correlated market conditions never leak across folds.
    /// Exactly `folds` contiguous slices are produced, sizes differing by
    /// at most one. Transfers sharing a date can land in adjacent folds,
    /// so fold periods may touch at the boundary date.
    /// Completed folds are logged as they finish; a failure partway leaves
    /// the already-returned folds intact in the caller's hands.
    pub fn cross_validate(
        &self,
        transfers: &[TransferRecord],
        history: &PlayerHistory,
        folds: usize,
    ) -> Result<Vec<FoldMetrics>> {
        if folds == 0 || folds > transfers.len() {
            return Err(EngineError::InvalidConfiguration(format!(
                "cross-validation folds must be in 1..={}, got {}",
                transfers.len(),
                folds
            )));
        }
        let mut ordered: Vec<&TransferRecord> = transfers.iter().collect();
        ordered.sort_by_key(|record| (record.transfer_date, record.player_id.clone()));

        // The first `len % folds` folds take one extra record, so every
        // requested fold exists even when the count does not divide evenly.
        let base = ordered.len() / folds;
        let extra = ordered.len() % folds;
        let mut results = Vec::with_capacity(folds);
        let mut start = 0;
        for fold in 0..folds {
            let size = base + usize::from(fold < extra);
            let chunk = &ordered[start..start + size];
            start += size;
            let period = TestPeriod {
                start: chunk.first().map(|r| r.transfer_date).unwrap_or_default(),
                end: chunk.last().map(|r| r.transfer_date).unwrap_or_default(),
            };
            let outcomes: Vec<std::result::Result<TransferPrediction, SkippedTransfer>> =
                chunk.par_iter().map(|record| self.replay_one(record, history)).collect();
            let mut predictions = Vec::new();
            let mut skipped = Vec::new();
            for outcome in outcomes {
                match outcome {
                    Ok(prediction) => predictions.push(prediction),
                    Err(skip) => skipped.push(skip),
                }
            }
            let result = BacktestResult {
                period,
                config_version: self.engine.config().version.clone(),
                predictions,
                skipped,
            };
            let metrics = accuracy_metrics(&result);
            info!(fold, mape = metrics.mape, "cross-validation fold complete");
            results.push(FoldMetrics { fold, period, metrics });
        }
        Ok(results)
    }

    /// Replay one transfer with strictly pre-transfer data.
    fn replay_one(
        &self,
        record: &TransferRecord,
        history: &PlayerHistory,
    ) -> std::result::Result<TransferPrediction, SkippedTransfer> {
        let skip = |reason: SkipReason| SkippedTransfer {
            player_id: record.player_id.clone(),
            transfer_date: record.transfer_date,
            reason,
        };
        if let Err(err) = record.validate() {
            return Err(skip(SkipReason::Evaluation(err.to_string())));
        }
        let snapshot = snapshot_before(history, &record.player_id, record.transfer_date)
            .ok_or_else(|| skip(SkipReason::NoPriorSnapshot))?;

        let result = self
            .engine
            .evaluate(&snapshot.profile, &record.origin, &record.candidates, &REPLAY_CONTEXT)
            .map_err(|err| skip(SkipReason::Evaluation(err.to_string())))?;

        // Highest-valued candidate wins; BTreeMap order plus strict
        // comparison breaks ties toward the lowest program id.
        let mut predicted_destination = String::new();
        let mut best = f64::NEG_INFINITY;
        for (program_id, value) in &result.program_values {
            if *value > best {
                best = *value;
                predicted_destination = program_id.clone();
            }
        }

        Ok(TransferPrediction {
            player_id: record.player_id.clone(),
            position: snapshot.profile.position,
            transfer_date: record.transfer_date,
            predicted_value: result.market_value,
            actual_value: record.signed_nil_value,
            predicted_destination,
            actual_destination: record.destination_program.clone(),
            predicted_performance: result.performance.score,
            actual_performance: record.first_season_performance,
        })
    }
}
