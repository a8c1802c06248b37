//! TrueSkill Lite - Bayesian skill ratings for two-sided matches
//!
//! This crate updates Gaussian skill beliefs after a win, loss or draw between
//! two players or two teams of any size, using the moment-matched updates of
//! the TrueSkill model. All operations are pure functions of the ratings and
//! an explicit `RatingConfig`.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::{MeanAttribution, RatingConfig};
pub use rating::{
    compute_draw_margin, update_ratings, update_team_ratings, RatingCalculator,
    TrueSkillCalculator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
