//! TrueSkill rating calculator
//!
//! This module provides the concrete implementation of the rating calculator
//! on top of the pairwise and team update functions.

use crate::config::RatingConfig;
use crate::error::RatingError;
use crate::rating::calculator::{RatingCalculationResult, RatingCalculator};
use crate::rating::draw_margin::compute_draw_margin;
use crate::rating::pairwise::update_ratings;
use crate::rating::prediction::{predict_outcome, predict_team_outcome};
use crate::rating::team::update_team_ratings;
use crate::types::{Outcome, OutcomeProbabilities, Rating, RatingChange, Team};
use tracing::{info, warn};

/// TrueSkill rating calculator implementation
#[derive(Debug, Clone)]
pub struct TrueSkillCalculator {
    config: RatingConfig,
    initial_rating: Rating,
}

impl TrueSkillCalculator {
    /// Create a new calculator, validating the configuration
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;
        let initial_rating = config.initial_rating()?;

        Ok(Self {
            config,
            initial_rating,
        })
    }

    /// Configuration in use
    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Draw margin for the current configuration
    pub fn draw_margin(&self) -> f64 {
        compute_draw_margin(&self.config)
    }

    /// Outcome probabilities for a one-on-one match
    pub fn predict_outcome(&self, rating_a: &Rating, rating_b: &Rating) -> OutcomeProbabilities {
        predict_outcome(&self.config, rating_a, rating_b)
    }

    /// Outcome probabilities for a team match
    pub fn predict_team_outcome(&self, team_a: &Team, team_b: &Team) -> OutcomeProbabilities {
        predict_team_outcome(&self.config, team_a, team_b)
    }
}

impl RatingCalculator for TrueSkillCalculator {
    fn rate_pair(&self, rating_a: &Rating, rating_b: &Rating, outcome: Outcome) -> (Rating, Rating) {
        update_ratings(&self.config, rating_a, rating_b, outcome)
    }

    fn rate_teams(
        &self,
        team_a: &Team,
        team_b: &Team,
        outcome: Outcome,
    ) -> crate::error::Result<RatingCalculationResult> {
        let prior_prediction = self.predict_team_outcome(team_a, team_b);
        let new_ratings = update_team_ratings(&self.config, team_a, team_b, outcome)?;

        let mut rating_changes: Vec<RatingChange> = team_a
            .iter()
            .chain(team_b.iter())
            .filter_map(|(player_id, old_rating)| {
                new_ratings.get(player_id).map(|new_rating| RatingChange {
                    player_id: *player_id,
                    old_rating: *old_rating,
                    new_rating: *new_rating,
                })
            })
            .collect();
        rating_changes.sort_by_key(|change| change.player_id);

        Ok(RatingCalculationResult {
            rating_changes,
            prior_prediction,
        })
    }

    fn get_initial_rating(&self) -> Rating {
        self.initial_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let new_config: RatingConfig =
            serde_json::from_value(config).map_err(|e| RatingError::ConfigurationError {
                message: format!("Invalid TrueSkill configuration: {}", e),
            })?;

        if let Err(e) = new_config.validate() {
            warn!("Rejected TrueSkill configuration: {}", e);
            return Err(e);
        }

        self.initial_rating = new_config.initial_rating()?;
        self.config = new_config;
        info!(
            draw_probability = self.config.draw_probability,
            mean_attribution = ?self.config.mean_attribution,
            "Updated TrueSkill configuration"
        );
        Ok(())
    }
}
