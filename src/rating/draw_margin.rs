//! Draw margin derived from the configured draw probability

use crate::config::RatingConfig;
use crate::rating::truncation::inverse_cdf;

/// Largest draw probability the quantile can be taken of
const MAX_DRAW_PROBABILITY: f64 = 1.0 - f64::EPSILON;

/// Performance difference below which a match is counted as a draw.
///
/// Inverts `P(draw) = 2 Φ(margin / sqrt(2 β²)) - 1` for two equally skilled
/// sides. Depends only on the configuration and is recomputed on every call.
///
/// `config` is expected to have passed [`RatingConfig::validate`]. A draw
/// probability outside `[0, 1)` is clamped into range, and NaN is read as no
/// draws.
pub fn compute_draw_margin(config: &RatingConfig) -> f64 {
    let draw_probability = if config.draw_probability.is_nan() {
        0.0
    } else {
        config.draw_probability.clamp(0.0, MAX_DRAW_PROBABILITY)
    };
    let quantile = inverse_cdf(0.5 * (draw_probability + 1.0));
    (quantile * (2.0 * config.skill_class_width).sqrt()).max(0.0)
}
