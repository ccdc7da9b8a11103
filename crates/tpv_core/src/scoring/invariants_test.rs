//! Property tests for the calculator invariants: score bounds, WAR
//! additivity, and performance monotonicity.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::config::ValuationConfig;
use crate::models::player::{
    ClassYear, GameLog, PlayerProfile, Position, PositionStats, QuarterbackStats, RiskIndicators,
    SocialReach,
};
use crate::models::valuation::lineup_war;
use crate::scoring::{PerformanceCalculator, TeamContext, WinImpactCalculator};

fn qb_profile(stats: QuarterbackStats, game_log: Vec<GameLog>, games_played: u32) -> PlayerProfile {
    PlayerProfile {
        id: "prop-qb".to_string(),
        name: "Property QB".to_string(),
        position: Position::QB,
        class_year: ClassYear::Junior,
        stats: PositionStats::Quarterback(stats),
        skills: BTreeMap::new(),
        game_log,
        social: SocialReach::default(),
        risk: RiskIndicators::default(),
        games_played,
        snap_count: games_played * 60,
    }
}

fn arb_qb_stats() -> impl Strategy<Value = QuarterbackStats> {
    (
        0.0..500.0f64,
        30.0..80.0f64,
        0.0..55.0f64,
        0.0..25.0f64,
        proptest::option::of(3.0..12.0f64),
        proptest::option::of(-10.0..120.0f64),
    )
        .prop_map(|(yards, comp, tds, ints, ypa, rush)| QuarterbackStats {
            pass_yards_per_game: Some(yards),
            completion_pct: Some(comp),
            pass_touchdowns: Some(tds),
            interceptions: Some(ints),
            yards_per_attempt: ypa,
            rush_yards_per_game: rush,
            sack_rate: None,
        })
}

fn arb_game_log() -> impl Strategy<Value = Vec<GameLog>> {
    proptest::collection::vec(
        (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=100.0f64).prop_map(|(opp, lev, perf)| GameLog {
            week: 1,
            opponent_strength: opp,
            leverage_share: lev,
            performance_index: perf,
        }),
        0..14,
    )
    .prop_map(|mut log| {
        for (i, game) in log.iter_mut().enumerate() {
            game.week = i as u32 + 1;
        }
        log
    })
}

proptest! {
    #[test]
    fn prop_performance_score_in_bounds(
        stats in arb_qb_stats(),
        log in arb_game_log(),
        games in 0u32..16,
    ) {
        let calc = PerformanceCalculator::new(&ValuationConfig::default());
        let score = calc.score(&qb_profile(stats, log, games)).unwrap();
        prop_assert!((0.0..=100.0).contains(&score.score));
        prop_assert!((0.0..=1.0).contains(&score.confidence));
    }

    #[test]
    fn prop_more_pass_yards_never_hurts(
        stats in arb_qb_stats(),
        log in arb_game_log(),
        bump in 1.0..200.0f64,
    ) {
        let calc = PerformanceCalculator::new(&ValuationConfig::default());
        let baseline = qb_profile(stats.clone(), log.clone(), 12);
        let mut improved_stats = stats;
        improved_stats.pass_yards_per_game =
            improved_stats.pass_yards_per_game.map(|y| y + bump);
        let improved = qb_profile(improved_stats, log, 12);
        let low = calc.score(&baseline).unwrap().score;
        let high = calc.score(&improved).unwrap().score;
        prop_assert!(high >= low - 1e-9, "score dropped from {} to {}", low, high);
    }

    #[test]
    fn prop_war_additive_over_lineup(
        scores in proptest::collection::vec(0.0..=100.0f64, 1..12),
        depth in 0.0..=1.0f64,
    ) {
        let calc = WinImpactCalculator::new(&ValuationConfig::default());
        let ctx = TeamContext { depth_quality: depth, scheme_dependency: 0.5 };
        let impacts: Vec<_> = scores
            .iter()
            .map(|s| calc.war(*s, Position::WR, &ctx))
            .collect();
        let summed: f64 = impacts.iter().map(|i| i.war).sum();
        prop_assert!((lineup_war(&impacts) - summed).abs() < 1e-9);
    }
}
