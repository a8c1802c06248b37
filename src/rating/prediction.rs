//! Outcome probabilities before a match is played

use crate::config::RatingConfig;
use crate::rating::draw_margin::compute_draw_margin;
use crate::rating::team::team_scale;
use crate::rating::truncation::cdf;
use crate::types::{OutcomeProbabilities, Rating, Team};

fn probabilities(config: &RatingConfig, mean_diff: f64, c: f64) -> OutcomeProbabilities {
    let margin = compute_draw_margin(config);
    let win = cdf((mean_diff - margin) / c);
    let loss = cdf((-mean_diff - margin) / c);

    OutcomeProbabilities {
        win,
        draw: (1.0 - win - loss).max(0.0),
        loss,
    }
}

/// Win/draw/loss probabilities for `rating_a` against `rating_b`
pub fn predict_outcome(
    config: &RatingConfig,
    rating_a: &Rating,
    rating_b: &Rating,
) -> OutcomeProbabilities {
    let c = (rating_a.variance() + rating_b.variance() + 2.0 * config.skill_class_width).sqrt();
    probabilities(config, rating_a.mean() - rating_b.mean(), c)
}

/// Win/draw/loss probabilities for `team_a` against `team_b`
pub fn predict_team_outcome(
    config: &RatingConfig,
    team_a: &Team,
    team_b: &Team,
) -> OutcomeProbabilities {
    let c = team_scale(config, team_a, team_b);
    probabilities(config, team_a.mean_sum() - team_b.mean_sum(), c)
}
