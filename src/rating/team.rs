//! Rating updates for a match between two teams of any size
//!
//! Each team is treated as a single competitor whose performance is the sum
//! of its members' performances. The shared correction computed for that
//! aggregate is then attributed back to every member using the member's own
//! rating.

use crate::config::RatingConfig;
use crate::error::{RatingError, Result};
use crate::rating::pairwise::SideCorrection;
use crate::types::{Outcome, PlayerId, Rating, Team};
use std::collections::HashMap;
use tracing::debug;

/// Combined performance scale of a team match.
///
/// Every player on the field contributes one `β²` of performance noise.
pub(crate) fn team_scale(config: &RatingConfig, team_a: &Team, team_b: &Team) -> f64 {
    let player_count = (team_a.len() + team_b.len()) as f64;
    (team_a.variance_sum() + team_b.variance_sum() + player_count * config.skill_class_width).sqrt()
}

fn update_one_team(
    config: &RatingConfig,
    team: &Team,
    opponents: &Team,
    outcome: Outcome,
) -> HashMap<PlayerId, Rating> {
    let c = team_scale(config, team, opponents);
    let correction = SideCorrection::compute(config, team.mean_sum(), opponents.mean_sum(), c, outcome);

    team.iter()
        .map(|(player_id, rating)| {
            let new_rating = correction.apply(config, rating);
            debug!(%player_id, old = %rating, new = %new_rating, "updated team member");
            (*player_id, new_rating)
        })
        .collect()
}

/// Fail if any player is listed on both rosters
pub fn ensure_disjoint(team_a: &Team, team_b: &Team) -> Result<()> {
    let (smaller, larger) = if team_a.len() <= team_b.len() {
        (team_a, team_b)
    } else {
        (team_b, team_a)
    };

    match smaller.iter().find(|(player_id, _)| larger.contains(player_id)) {
        Some((player_id, _)) => Err(RatingError::OverlappingRosters {
            player_id: *player_id,
        }
        .into()),
        None => Ok(()),
    }
}

/// Union of two per-player results that must not share any player
pub fn merge_disjoint(
    mut left: HashMap<PlayerId, Rating>,
    right: HashMap<PlayerId, Rating>,
) -> Result<HashMap<PlayerId, Rating>> {
    left.reserve(right.len());
    for (player_id, rating) in right {
        if left.insert(player_id, rating).is_some() {
            return Err(RatingError::OverlappingRosters { player_id }.into());
        }
    }
    Ok(left)
}

/// New ratings for every member of both teams after a match.
///
/// `outcome` is from `team_a`'s point of view. The rosters must be disjoint
/// and `config` should already have passed [`RatingConfig::validate`].
pub fn update_team_ratings(
    config: &RatingConfig,
    team_a: &Team,
    team_b: &Team,
    outcome: Outcome,
) -> Result<HashMap<PlayerId, Rating>> {
    ensure_disjoint(team_a, team_b)?;

    let updated_a = update_one_team(config, team_a, team_b, outcome);
    let updated_b = update_one_team(config, team_b, team_a, outcome.reversed());

    merge_disjoint(updated_a, updated_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::pairwise::update_ratings;

    const P1: PlayerId = PlayerId(1);
    const P2: PlayerId = PlayerId(2);
    const P3: PlayerId = PlayerId(3);
    const P4: PlayerId = PlayerId(4);

    fn rating(mean: f64, stddev: f64) -> Rating {
        Rating::new(mean, stddev).unwrap()
    }

    fn two_vs_two(stddev: f64) -> (Team, Team) {
        let team1 = Team::new(vec![(P1, rating(10.0, stddev)), (P2, rating(11.0, stddev))]).unwrap();
        let team2 = Team::new(vec![(P3, rating(2.0, stddev)), (P4, rating(3.0, stddev))]).unwrap();
        (team1, team2)
    }

    #[test]
    fn test_unsurprising_team1_win() {
        let (team1, team2) = two_vs_two(1.0);
        let new = update_team_ratings(&RatingConfig::default(), &team1, &team2, Outcome::Win).unwrap();

        assert_eq!(new.len(), 4);
        assert!(new[&P1].mean() > 10.0);
        assert!(new[&P2].mean() > 11.0);
        assert!(new[&P3].mean() < 2.0);
        assert!(new[&P4].mean() < 3.0);
    }

    #[test]
    fn test_surprising_team2_win() {
        let (team1, team2) = two_vs_two(0.1);
        let new = update_team_ratings(&RatingConfig::default(), &team1, &team2, Outcome::Loss).unwrap();

        assert!(new[&P1].mean() < 10.0);
        assert!(new[&P2].mean() < 11.0);
        assert!(new[&P3].mean() > 2.0);
        assert!(new[&P4].mean() > 3.0);
        for player in [P1, P2, P3, P4] {
            assert!(new[&player].stddev() > 0.1);
        }
    }

    #[test]
    fn test_squared_mean_attribution_surprising_team2_win() {
        let (team1, team2) = two_vs_two(0.1);
        let new = update_team_ratings(&RatingConfig::legacy(), &team1, &team2, Outcome::Loss).unwrap();

        assert!(new[&P1].mean() + new[&P2].mean() < 2.0 + 3.0);
        assert!(new[&P3].mean() > 2.0);
        assert!(new[&P4].mean() > 3.0);
    }

    #[test]
    fn test_team_draw_pulls_teams_together() {
        let (team1, team2) = two_vs_two(1.0);
        let new = update_team_ratings(&RatingConfig::default(), &team1, &team2, Outcome::Draw).unwrap();

        assert!(new[&P1].mean() < 10.0);
        assert!(new[&P2].mean() < 11.0);
        assert!(new[&P3].mean() > 2.0);
        assert!(new[&P4].mean() > 3.0);
    }

    #[test]
    fn test_members_with_wider_priors_move_further() {
        let team1 = Team::new(vec![(P1, rating(10.0, 1.0)), (P2, rating(10.0, 4.0))]).unwrap();
        let team2 = Team::new(vec![(P3, rating(10.0, 2.0)), (P4, rating(10.0, 2.0))]).unwrap();
        let new = update_team_ratings(&RatingConfig::default(), &team1, &team2, Outcome::Win).unwrap();

        let confident_gain = new[&P1].mean() - 10.0;
        let uncertain_gain = new[&P2].mean() - 10.0;
        assert!(confident_gain > 0.0);
        assert!(uncertain_gain > confident_gain);
    }

    #[test]
    fn test_solo_teams_match_pairwise_update() {
        let config = RatingConfig::default();
        let (a, b) = (rating(20.0, 3.0), rating(24.0, 5.0));

        for outcome in [Outcome::Win, Outcome::Loss, Outcome::Draw] {
            let (expected_a, expected_b) = update_ratings(&config, &a, &b, outcome);
            let new = update_team_ratings(&config, &Team::solo(P1, a), &Team::solo(P2, b), outcome).unwrap();

            assert!((new[&P1].mean() - expected_a.mean()).abs() < 1e-12);
            assert!((new[&P1].stddev() - expected_a.stddev()).abs() < 1e-12);
            assert!((new[&P2].mean() - expected_b.mean()).abs() < 1e-12);
            assert!((new[&P2].stddev() - expected_b.stddev()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_team_scale_counts_every_player() {
        let config = RatingConfig::default();
        let (team1, team2) = two_vs_two(1.0);
        let expected = (4.0 + 4.0 * config.skill_class_width).sqrt();
        assert!((team_scale(&config, &team1, &team2) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_overlapping_rosters_are_rejected() {
        let team1 = Team::new(vec![(P1, rating(10.0, 1.0)), (P2, rating(11.0, 1.0))]).unwrap();
        let team2 = Team::new(vec![(P2, rating(11.0, 1.0)), (P3, rating(2.0, 1.0))]).unwrap();

        let err = update_team_ratings(&RatingConfig::default(), &team1, &team2, Outcome::Win).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RatingError>(),
            Some(&RatingError::OverlappingRosters { player_id: P2 })
        );
    }

    #[test]
    fn test_merge_disjoint() {
        let left: HashMap<_, _> = [(P1, rating(1.0, 1.0))].into_iter().collect();
        let right: HashMap<_, _> = [(P2, rating(2.0, 1.0))].into_iter().collect();
        let merged = merge_disjoint(left.clone(), right).unwrap();
        assert_eq!(merged.len(), 2);

        let clash: HashMap<_, _> = [(P1, rating(3.0, 1.0))].into_iter().collect();
        let err = merge_disjoint(left, clash).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RatingError>(),
            Some(&RatingError::OverlappingRosters { player_id: P1 })
        );
    }
}
