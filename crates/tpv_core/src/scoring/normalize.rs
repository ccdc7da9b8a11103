//! Statistic normalization
//!
//! Raw statistics are z-scored against a position-specific reference
//! distribution, clipped, and linearly rescaled onto 0-100. The reference
//! table doubles as the source of position-average defaults for graceful
//! degradation.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::models::player::PositionGroup;

/// Threshold below which a standard deviation is treated as zero.
const STDEV_EPSILON: f64 = 1e-9;

/// Mean and standard deviation for one statistic across a player pool.
#[derive(Debug, Clone, Copy)]
pub struct PoolStats {
    pub mean: f64,
    pub stdev: f64,
}

/// Population mean/stdev of a slice. Empty slices yield zeros.
///
/// Population (N denominator) rather than sample: the pool is the full
/// relevant universe, not a sample from it.
pub fn pool_stats(values: &[f64]) -> PoolStats {
    if values.is_empty() {
        return PoolStats { mean: 0.0, stdev: 0.0 };
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    PoolStats { mean, stdev: variance.sqrt() }
}

/// Z-score with a zero-stdev guard.
pub fn zscore(value: f64, mean: f64, stdev: f64) -> f64 {
    if stdev < STDEV_EPSILON {
        return 0.0;
    }
    (value - mean) / stdev
}

/// Map a z-score onto 0-100: clip to `±clip`, then rescale linearly so the
/// reference mean lands on 50. Monotone in the input.
pub fn z_to_score(z: f64, clip: f64) -> f64 {
    50.0 + 50.0 * z.clamp(-clip, clip) / clip
}

/// Reference distribution for one statistic within a position group.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceStat {
    pub mean: f64,
    pub stdev: f64,
    /// Relative weight in the production sub-score.
    pub weight: f64,
    /// False for stats where lower is better (interceptions, pressures
    /// allowed); the z-score is sign-flipped before rescaling.
    pub higher_is_better: bool,
}

const fn reference(mean: f64, stdev: f64, weight: f64, higher_is_better: bool) -> ReferenceStat {
    ReferenceStat { mean, stdev, weight, higher_is_better }
}

/// Historical per-group reference distributions.
///
/// Recalibrated offline from multi-season FBS data; treated as static input
/// rather than configuration because they describe the population, not a
/// modeling choice.
static REFERENCE_TABLE: Lazy<BTreeMap<(PositionGroup, &'static str), ReferenceStat>> =
    Lazy::new(|| {
        use PositionGroup::*;
        let mut table = BTreeMap::new();
        // Quarterback
        table.insert((Quarterback, "pass_yards_per_game"), reference(230.0, 60.0, 1.0, true));
        table.insert((Quarterback, "completion_pct"), reference(62.0, 6.0, 1.0, true));
        table.insert((Quarterback, "pass_touchdowns"), reference(18.0, 9.0, 1.0, true));
        table.insert((Quarterback, "interceptions"), reference(8.0, 4.0, 1.0, false));
        table.insert((Quarterback, "yards_per_attempt"), reference(7.4, 1.0, 0.6, true));
        table.insert((Quarterback, "rush_yards_per_game"), reference(18.0, 18.0, 0.6, true));
        table.insert((Quarterback, "sack_rate"), reference(6.5, 2.5, 0.6, false));
        // Skill (RB/WR/TE)
        table.insert((Skill, "scrimmage_yards_per_game"), reference(65.0, 30.0, 1.0, true));
        table.insert((Skill, "touchdowns"), reference(6.0, 4.0, 1.0, true));
        table.insert((Skill, "yards_per_touch"), reference(8.5, 3.0, 1.0, true));
        table.insert((Skill, "receptions_per_game"), reference(3.0, 1.8, 0.6, true));
        table.insert((Skill, "drop_rate"), reference(6.0, 3.0, 0.6, false));
        table.insert((Skill, "broken_tackles"), reference(12.0, 8.0, 0.6, true));
        // Offensive line
        table.insert((OffensiveLine, "pass_block_grade"), reference(65.0, 12.0, 1.0, true));
        table.insert((OffensiveLine, "run_block_grade"), reference(65.0, 12.0, 1.0, true));
        table.insert(
            (OffensiveLine, "pressures_allowed_per_game"),
            reference(1.8, 0.9, 1.0, false),
        );
        table.insert((OffensiveLine, "penalties_per_game"), reference(0.4, 0.25, 0.6, false));
        table.insert((OffensiveLine, "snaps_per_game"), reference(55.0, 12.0, 0.6, true));
        // Defensive front (EDGE/DL/LB)
        table.insert((DefensiveFront, "tackles_per_game"), reference(4.5, 2.0, 1.0, true));
        table.insert((DefensiveFront, "pressures_per_game"), reference(2.2, 1.4, 1.0, true));
        table.insert((DefensiveFront, "sacks"), reference(4.0, 3.0, 1.0, true));
        table.insert((DefensiveFront, "tackles_for_loss"), reference(7.0, 4.0, 0.6, true));
        table.insert((DefensiveFront, "run_stop_rate"), reference(7.5, 2.5, 0.6, true));
        table.insert((DefensiveFront, "missed_tackle_rate"), reference(10.0, 4.0, 0.6, false));
        // Secondary (CB/S)
        table.insert((Secondary, "coverage_grade"), reference(65.0, 12.0, 1.0, true));
        table.insert((Secondary, "passes_defended"), reference(7.0, 4.0, 1.0, true));
        table.insert((Secondary, "interceptions"), reference(2.0, 1.5, 1.0, true));
        table.insert((Secondary, "completion_pct_allowed"), reference(58.0, 8.0, 0.6, false));
        table.insert((Secondary, "tackles_per_game"), reference(4.0, 2.0, 0.6, true));
        table.insert(
            (Secondary, "yards_per_target_allowed"),
            reference(7.5, 1.6, 0.6, false),
        );
        // Specialists (K/P)
        table.insert((Specialist, "accuracy_pct"), reference(78.0, 9.0, 1.0, true));
        table.insert((Specialist, "average_distance"), reference(42.0, 4.0, 1.0, true));
        table.insert((Specialist, "long_made"), reference(50.0, 5.0, 0.6, true));
        table.insert((Specialist, "pressure_success_rate"), reference(75.0, 10.0, 0.6, true));
        table
    });

/// Reference distribution for a statistic, if the schema declares it.
pub fn reference_for(group: PositionGroup, field: &'static str) -> Option<&'static ReferenceStat> {
    REFERENCE_TABLE.get(&(group, field))
}

/// Normalize one statistic onto 0-100 against its reference distribution.
pub fn normalize_stat(group: PositionGroup, field: &'static str, value: f64, clip: f64) -> Option<f64> {
    let reference = reference_for(group, field)?;
    let mut z = zscore(value, reference.mean, reference.stdev);
    if !reference.higher_is_better {
        z = -z;
    }
    Some(z_to_score(z, clip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::PositionStats;
    use crate::models::player::QuarterbackStats;

    #[test]
    fn test_pool_stats_basics() {
        let stats = pool_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.stdev - 2.0).abs() < 1e-12);
        let empty = pool_stats(&[]);
        assert_eq!(empty.mean, 0.0);
        assert_eq!(empty.stdev, 0.0);
    }

    #[test]
    fn test_zscore_guards_zero_stdev() {
        assert_eq!(zscore(10.0, 5.0, 0.0), 0.0);
        assert!((zscore(10.0, 5.0, 2.5) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_z_to_score_clips_and_centers() {
        assert_eq!(z_to_score(0.0, 2.5), 50.0);
        assert_eq!(z_to_score(10.0, 2.5), 100.0);
        assert_eq!(z_to_score(-10.0, 2.5), 0.0);
        assert!(z_to_score(1.0, 2.5) > 50.0);
    }

    #[test]
    fn test_lower_is_better_flips() {
        // Fewer interceptions than average must score above 50.
        let few = normalize_stat(PositionGroup::Quarterback, "interceptions", 3.0, 2.5).unwrap();
        let many = normalize_stat(PositionGroup::Quarterback, "interceptions", 14.0, 2.5).unwrap();
        assert!(few > 50.0);
        assert!(many < 50.0);
    }

    #[test]
    fn test_every_schema_field_has_a_reference() {
        // Each stat variant's declared fields must resolve in the table, so
        // scoring never discovers an unknown field at runtime.
        let variants: Vec<PositionStats> = vec![
            PositionStats::Quarterback(QuarterbackStats::default()),
            PositionStats::Skill(Default::default()),
            PositionStats::OffensiveLine(Default::default()),
            PositionStats::DefensiveFront(Default::default()),
            PositionStats::Secondary(Default::default()),
            PositionStats::Specialist(Default::default()),
        ];
        for stats in variants {
            for (field, _) in stats.fields() {
                assert!(
                    reference_for(stats.group(), field).is_some(),
                    "missing reference for {} / {}",
                    stats.group(),
                    field
                );
            }
        }
    }
}
