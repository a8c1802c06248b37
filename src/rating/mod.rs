//! TrueSkill rating updates for two-sided matches
//!
//! This module provides the truncated-Gaussian corrections, the draw margin,
//! the pairwise and team updates built on them, and a calculator that bundles
//! them behind the `RatingCalculator` trait.

pub mod calculator;
pub mod draw_margin;
pub mod pairwise;
pub mod prediction;
pub mod team;
pub mod truncation;
pub mod trueskill;

// Re-export commonly used types
pub use calculator::{RatingCalculationResult, RatingCalculator};
pub use draw_margin::compute_draw_margin;
pub use pairwise::update_ratings;
pub use prediction::{predict_outcome, predict_team_outcome};
pub use team::{merge_disjoint, update_team_ratings};
pub use trueskill::TrueSkillCalculator;
