//! Backtesting and calibration: historical replay, accuracy metrics,
//! systematic bias detection, and damped config adjustment proposals.

pub mod backtester;
pub mod bias;
pub mod metrics;
pub mod proposal;


pub use backtester::{
    BacktestResult, Backtester, FoldMetrics, SkipReason, SkippedTransfer, TestPeriod,
    TransferPrediction,
};
pub use bias::{identify_biases, BiasDirection, BiasFinding, BiasReport, PositionBias};
pub use metrics::{accuracy_metrics, AccuracyMetrics};
pub use proposal::{ConfigProposal, WeightAdjustment};
