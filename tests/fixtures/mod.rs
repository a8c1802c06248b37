//! Shared helpers for integration testing
#![allow(dead_code)]

use std::sync::Once;
use trueskill_lite::{PlayerId, Rating, RatingConfig, Team, TrueSkillCalculator};

static TRACING: Once = Once::new();

/// Install a test subscriber once; honours RUST_LOG
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn rating(mean: f64, stddev: f64) -> Rating {
    Rating::new(mean, stddev).unwrap()
}

/// Team from `(player id, mean, stddev)` triples
pub fn team(members: &[(u64, f64, f64)]) -> Team {
    Team::new(
        members
            .iter()
            .map(|&(id, mean, stddev)| (PlayerId(id), rating(mean, stddev))),
    )
    .unwrap()
}

pub fn default_calculator() -> TrueSkillCalculator {
    TrueSkillCalculator::new(RatingConfig::default()).unwrap()
}

pub fn assert_valid(rating: &Rating) {
    assert!(rating.mean().is_finite(), "mean is not finite: {}", rating);
    assert!(
        rating.stddev().is_finite() && rating.stddev() > 0.0,
        "stddev is not positive: {}",
        rating
    );
}
