//! Rating calculator trait
//!
//! This module defines the interface for rating calculations so callers
//! (matchmaking, leaderboards) can hold any implementation behind a trait
//! object.

use crate::types::{Outcome, OutcomeProbabilities, PlayerId, Rating, RatingChange, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of a team rating calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Rating changes for all players; calculators emit them ordered by player id
    pub rating_changes: Vec<RatingChange>,
    /// Outcome probabilities for team A as predicted before the match
    pub prior_prediction: OutcomeProbabilities,
}

impl RatingCalculationResult {
    /// Look up the change for one player
    pub fn change_for(&self, player_id: PlayerId) -> Option<&RatingChange> {
        self.rating_changes
            .iter()
            .find(|change| change.player_id == player_id)
    }

    /// New ratings keyed by player
    pub fn new_ratings(&self) -> HashMap<PlayerId, Rating> {
        self.rating_changes
            .iter()
            .map(|change| (change.player_id, change.new_rating))
            .collect()
    }
}

/// Trait for calculating rating changes after games
pub trait RatingCalculator: Send + Sync {
    /// New ratings for two players; `outcome` is from `rating_a`'s side
    fn rate_pair(&self, rating_a: &Rating, rating_b: &Rating, outcome: Outcome) -> (Rating, Rating);

    /// Calculate rating changes for every member of both teams
    ///
    /// # Arguments
    /// * `team_a` - First team, whose perspective `outcome` is given from
    /// * `team_b` - Second team, disjoint from `team_a`
    ///
    /// # Returns
    /// Result containing per-player rating changes and the pre-match prediction
    fn rate_teams(
        &self,
        team_a: &Team,
        team_b: &Team,
        outcome: Outcome,
    ) -> crate::error::Result<RatingCalculationResult>;

    /// Get the initial rating for new players
    fn get_initial_rating(&self) -> Rating;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}
