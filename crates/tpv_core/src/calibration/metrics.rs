//! Aggregate accuracy metrics over a backtest pass.

use serde::{Deserialize, Serialize};

use super::backtester::BacktestResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean absolute percentage error of predicted vs. signed value.
    /// Predictions with a non-positive actual value carry no percentage
    /// error and are excluded; `mape_samples` reports how many remain.
    pub mape: f64,
    /// Predictions in the MAPE denominator. A gap against `evaluated` means
    /// some signed values were non-positive and left out.
    pub mape_samples: usize,
    /// Fraction of transfers whose predicted destination matched the real one.
    pub destination_accuracy: f64,
    /// Mean absolute error of predicted vs. observed first-season
    /// performance, on the 0-100 scale.
    pub performance_mae: f64,
    pub evaluated: usize,
    pub skipped: usize,
}

pub fn accuracy_metrics(result: &BacktestResult) -> AccuracyMetrics {
    let predictions = &result.predictions;
    let evaluated = predictions.len();

    let mut pct_errors = Vec::new();
    let mut destination_hits = 0usize;
    let mut performance_error = 0.0;
    for p in predictions {
        if p.actual_value > 0.0 {
            pct_errors.push((p.predicted_value - p.actual_value).abs() / p.actual_value);
        }
        if p.predicted_destination == p.actual_destination {
            destination_hits += 1;
        }
        performance_error += (p.predicted_performance - p.actual_performance).abs();
    }

    let mape_samples = pct_errors.len();
    let mape = if pct_errors.is_empty() {
        0.0
    } else {
        pct_errors.iter().sum::<f64>() / mape_samples as f64
    };
    let destination_accuracy =
        if evaluated == 0 { 0.0 } else { destination_hits as f64 / evaluated as f64 };
    let performance_mae =
        if evaluated == 0 { 0.0 } else { performance_error / evaluated as f64 };

    AccuracyMetrics {
        mape,
        mape_samples,
        destination_accuracy,
        performance_mae,
        evaluated,
        skipped: result.skipped.len(),
    }
}
