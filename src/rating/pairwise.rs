//! Rating updates for a match between two individual players
//!
//! Both sides are updated from the pre-match ratings only: side B's posterior
//! is side A's computation with the sides swapped and the outcome reversed.

use crate::config::{MeanAttribution, RatingConfig};
use crate::rating::draw_margin::compute_draw_margin;
use crate::rating::truncation::{one_sided_v, one_sided_w, two_sided_v, two_sided_w};
use crate::types::{Outcome, Rating};
use tracing::debug;

/// Truncation corrections for one side of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SideCorrection {
    /// Additive mean correction
    pub v: f64,
    /// Multiplicative variance correction
    pub w: f64,
    /// Sign applied to the mean update
    pub direction: f64,
    /// Combined performance scale of the match
    pub c: f64,
}

impl SideCorrection {
    /// Correction for the side whose (aggregate) mean is `own_mean`.
    ///
    /// `c` is the combined scale of both sides, `outcome` is from this side's
    /// perspective.
    pub fn compute(
        config: &RatingConfig,
        own_mean: f64,
        other_mean: f64,
        c: f64,
        outcome: Outcome,
    ) -> Self {
        let draw_margin = compute_draw_margin(config);

        // Draws are oriented as if this side won.
        let (winning_mean, losing_mean) = if outcome.value() >= 0 {
            (own_mean, other_mean)
        } else {
            (other_mean, own_mean)
        };
        let t = (winning_mean - losing_mean) / c;
        let margin = draw_margin / c;

        let (v, w, direction) = match outcome {
            Outcome::Draw => (
                two_sided_v(t, -margin, margin, config.tolerance),
                two_sided_w(t, -margin, margin, config.tolerance),
                1.0,
            ),
            Outcome::Win | Outcome::Loss => (
                one_sided_v(t, margin, config.tolerance),
                one_sided_w(t, margin, config.tolerance),
                outcome.value() as f64,
            ),
        };

        debug!(%outcome, t, margin, v, w, c, "computed side correction");

        Self { v, w, direction, c }
    }

    /// Move a single player's belief by this correction
    pub fn apply(&self, config: &RatingConfig, rating: &Rating) -> Rating {
        let variance = rating.variance() + config.dynamics_factor;
        let mean_multiplier = match config.mean_attribution {
            MeanAttribution::Variance => variance / self.c,
            MeanAttribution::SquaredMean => {
                (rating.mean() * rating.mean() + config.dynamics_factor) / self.c
            }
        };
        let stddev_multiplier = variance / (self.c * self.c);

        let new_mean = rating.mean() + self.direction * mean_multiplier * self.v;
        // 1 - w·var/c² rounds to zero once var dominates c²
        let remaining = (1.0 - self.w * stddev_multiplier).max(f64::EPSILON);
        let new_stddev = (variance * remaining).sqrt();

        Rating::from_posterior(new_mean, new_stddev)
    }
}

/// Combined performance scale of a one-on-one match
fn pairwise_scale(config: &RatingConfig, rating_a: &Rating, rating_b: &Rating) -> f64 {
    (rating_a.variance() + rating_b.variance() + 2.0 * config.skill_class_width).sqrt()
}

fn update_one_player(
    config: &RatingConfig,
    rating: &Rating,
    opponent: &Rating,
    outcome: Outcome,
) -> Rating {
    let c = pairwise_scale(config, rating, opponent);
    SideCorrection::compute(config, rating.mean(), opponent.mean(), c, outcome).apply(config, rating)
}

/// New ratings for both players after a match.
///
/// `outcome` is from `rating_a`'s point of view. `config` is expected to have
/// passed [`RatingConfig::validate`]; [`TrueSkillCalculator`] enforces that.
///
/// [`TrueSkillCalculator`]: crate::rating::TrueSkillCalculator
pub fn update_ratings(
    config: &RatingConfig,
    rating_a: &Rating,
    rating_b: &Rating,
    outcome: Outcome,
) -> (Rating, Rating) {
    (
        update_one_player(config, rating_a, rating_b, outcome),
        update_one_player(config, rating_b, rating_a, outcome.reversed()),
    )
}
