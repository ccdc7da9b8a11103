//! Scoring calculators
//!
//! The four deterministic sub-score calculators plus normalization helpers.
//! Each calculator is independently constructible from a `ValuationConfig`
//! and holds no mutable state, so distinct configurations can be evaluated
//! side by side without cross-contamination.

pub mod brand;
pub mod normalize;
pub mod performance;
pub mod scheme_fit;
pub mod win_impact;

#[cfg(test)]
mod invariants_test;

pub use brand::BrandCalculator;
pub use normalize::{pool_stats, z_to_score, zscore, PoolStats, ReferenceStat};
pub use performance::PerformanceCalculator;
pub use scheme_fit::{AdaptationConcern, AdaptationEstimate, SchemeFitCalculator};
pub use win_impact::{TeamContext, WinImpactCalculator};
