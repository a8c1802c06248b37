//! Configuration for the rating model
//!
//! This module holds the model constants, their defaults and validation, and
//! helpers to load them from TOML or environment variables.

pub mod rating;

// Re-export commonly used types
pub use rating::{MeanAttribution, RatingConfig};
