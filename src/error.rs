//! Error types for rating calculations
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate. Specific failures are raised as `RatingError` and can be
//! recovered with `downcast_ref`.

use crate::types::PlayerId;

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Precondition violations surfaced to the caller
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid outcome value: {value} (expected -1, 0 or 1)")]
    InvalidOutcome { value: i64 },

    #[error("Invalid rating: {reason}")]
    InvalidRating { reason: String },

    #[error("Team must contain at least one player")]
    EmptyTeam,

    #[error("Player {player_id} appears more than once in a team")]
    DuplicatePlayer { player_id: PlayerId },

    #[error("Player {player_id} is on both teams")]
    OverlappingRosters { player_id: PlayerId },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
