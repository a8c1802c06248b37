//! Property-based tests for the rating updates

mod fixtures;

use proptest::prelude::*;
use trueskill_lite::rating::predict_outcome;
use trueskill_lite::{
    update_ratings, update_team_ratings, Outcome, PlayerId, Rating, RatingConfig, Team,
};

use fixtures::assert_valid;

/// Mostly everyday stddevs, with some very wide priors
fn any_stddev() -> impl Strategy<Value = f64> {
    prop_oneof![4 => 0.01f64..50.0, 1 => 50.0f64..1e12]
}

fn any_rating() -> impl Strategy<Value = Rating> {
    (-200.0f64..200.0, any_stddev()).prop_map(|(mean, stddev)| Rating::new(mean, stddev).unwrap())
}

fn any_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Win), Just(Outcome::Loss), Just(Outcome::Draw)]
}

/// Team with ids starting at `first_id`
fn any_team(first_id: u64) -> impl Strategy<Value = Team> {
    prop::collection::vec(any_rating(), 1..6).prop_map(move |ratings| {
        Team::new(
            ratings
                .into_iter()
                .enumerate()
                .map(|(i, rating)| (PlayerId(first_id + i as u64), rating)),
        )
        .unwrap()
    })
}

proptest! {
    /// Property: swapping the sides and reversing the outcome mirrors the result
    #[test]
    fn prop_outcome_sign_symmetry(a in any_rating(), b in any_rating(), outcome in any_outcome()) {
        let config = RatingConfig::default();
        let (new_a, new_b) = update_ratings(&config, &a, &b, outcome);
        let (mirrored_b, mirrored_a) = update_ratings(&config, &b, &a, outcome.reversed());

        prop_assert_eq!(new_a, mirrored_a);
        prop_assert_eq!(new_b, mirrored_b);
    }

    /// Property: posteriors are always finite with positive stddev
    #[test]
    fn prop_updates_stay_valid(a in any_rating(), b in any_rating(), outcome in any_outcome()) {
        for config in [RatingConfig::default(), RatingConfig::legacy()] {
            let (new_a, new_b) = update_ratings(&config, &a, &b, outcome);
            prop_assert!(new_a.stddev().is_finite() && new_a.stddev() > 0.0);
            prop_assert!(new_b.stddev().is_finite() && new_b.stddev() > 0.0);
        }

        let (new_a, new_b) = update_ratings(&RatingConfig::default(), &a, &b, outcome);
        assert_valid(&new_a);
        assert_valid(&new_b);
    }

    /// Property: winning never lowers a mean, losing never raises one
    #[test]
    fn prop_win_moves_means_in_the_right_direction(a in any_rating(), b in any_rating()) {
        let (winner, loser) = update_ratings(&RatingConfig::default(), &a, &b, Outcome::Win);
        prop_assert!(winner.mean() >= a.mean());
        prop_assert!(loser.mean() <= b.mean());
    }

    /// Property: a draw between identical ratings leaves the means untouched
    #[test]
    fn prop_equal_draw_keeps_means(player in any_rating()) {
        let (new_a, new_b) = update_ratings(&RatingConfig::default(), &player, &player, Outcome::Draw);
        prop_assert_eq!(new_a.mean(), player.mean());
        prop_assert_eq!(new_b.mean(), player.mean());
    }

    /// Property: team updates cover every member and follow the result
    #[test]
    fn prop_team_update_covers_rosters(team_a in any_team(0), team_b in any_team(100)) {
        let config = RatingConfig::default();
        let new = update_team_ratings(&config, &team_a, &team_b, Outcome::Win).unwrap();

        prop_assert_eq!(new.len(), team_a.len() + team_b.len());
        for (player_id, old) in team_a.iter() {
            assert_valid(&new[player_id]);
            prop_assert!(new[player_id].mean() >= old.mean());
        }
        for (player_id, old) in team_b.iter() {
            assert_valid(&new[player_id]);
            prop_assert!(new[player_id].mean() <= old.mean());
        }
    }

    /// Property: predicted probabilities form a distribution
    #[test]
    fn prop_prediction_is_a_distribution(a in any_rating(), b in any_rating()) {
        let prediction = predict_outcome(&RatingConfig::default(), &a, &b);
        for p in [prediction.win, prediction.draw, prediction.loss] {
            prop_assert!((0.0..=1.0).contains(&p));
        }
        prop_assert!((prediction.win + prediction.draw + prediction.loss - 1.0).abs() < 1e-9);
    }
}
