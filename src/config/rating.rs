//! Rating system configuration
//!
//! All tunable constants of the model live in a single immutable value that is
//! passed explicitly into every rating operation, so several configurations
//! (e.g. one per game mode) can be used side by side.

use crate::error::{RatingError, Result};
use crate::types::Rating;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// How a shared team correction is attributed to an individual's mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanAttribution {
    /// `(stddev² + τ²) / c`, the standard TrueSkill multiplier
    #[default]
    Variance,
    /// `(mean² + τ²) / c`, kept for replaying ratings computed with it
    SquaredMean,
}

impl FromStr for MeanAttribution {
    type Err = RatingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "variance" => Ok(MeanAttribution::Variance),
            "squared_mean" => Ok(MeanAttribution::SquaredMean),
            other => Err(RatingError::ConfigurationError {
                message: format!("Unknown mean attribution: {}", other),
            }),
        }
    }
}

/// Constants of the TrueSkill model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Mean of a new player's skill belief
    pub default_mean: f64,
    /// Standard deviation of a new player's skill belief
    pub default_stddev: f64,
    /// β², the performance variance around a player's skill
    pub skill_class_width: f64,
    /// τ², variance added before every update to model skill drift
    pub dynamics_factor: f64,
    /// Probability that two equally skilled sides draw
    pub draw_probability: f64,
    /// Normalizers below this value switch to limiting formulas
    pub tolerance: f64,
    /// Multiplier used to move each player's mean
    pub mean_attribution: MeanAttribution,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self::from_default_mean(25.0)
    }
}

impl RatingConfig {
    /// Derive every scale constant from the initial mean.
    ///
    /// stddev = mean / 3, β = stddev / 2, τ = stddev / 100.
    pub fn from_default_mean(default_mean: f64) -> Self {
        let default_stddev = default_mean / 3.0;
        Self {
            default_mean,
            default_stddev,
            skill_class_width: (default_stddev / 2.0).powi(2),
            dynamics_factor: (default_stddev / 100.0).powi(2),
            draw_probability: 0.01,
            tolerance: 1e-18,
            mean_attribution: MeanAttribution::Variance,
        }
    }

    /// Default constants with the squared-mean attribution
    pub fn legacy() -> Self {
        Self {
            mean_attribution: MeanAttribution::SquaredMean,
            ..Self::default()
        }
    }

    /// Rating handed to players with no history
    pub fn initial_rating(&self) -> Result<Rating> {
        Rating::new(self.default_mean, self.default_stddev)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("default_mean", self.default_mean),
            ("default_stddev", self.default_stddev),
            ("skill_class_width", self.skill_class_width),
            ("dynamics_factor", self.dynamics_factor),
            ("draw_probability", self.draw_probability),
            ("tolerance", self.tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(config_error(format!("{} must be finite", name)));
            }
        }

        if self.default_stddev <= 0.0 {
            return Err(config_error("Default stddev must be positive"));
        }

        if self.skill_class_width <= 0.0 {
            return Err(config_error("Skill class width must be positive"));
        }

        if self.dynamics_factor < 0.0 {
            return Err(config_error("Dynamics factor must be non-negative"));
        }

        // Keeps (stddev² + τ²) / c² below one, so posterior variances stay positive.
        if self.dynamics_factor >= 2.0 * self.skill_class_width {
            return Err(config_error(
                "Dynamics factor must be smaller than twice the skill class width",
            ));
        }

        if !(0.0..1.0).contains(&self.draw_probability) {
            return Err(config_error("Draw probability must be in [0, 1)"));
        }

        if self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(config_error("Tolerance must be in (0, 1)"));
        }

        Ok(())
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|e| RatingError::ConfigurationError {
            message: format!("Invalid rating configuration: {}", e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(mean) = env_f64("TRUESKILL_DEFAULT_MEAN")? {
            config = Self {
                mean_attribution: config.mean_attribution,
                ..Self::from_default_mean(mean)
            };
        }
        if let Some(stddev) = env_f64("TRUESKILL_DEFAULT_STDDEV")? {
            config.default_stddev = stddev;
        }
        if let Some(width) = env_f64("TRUESKILL_SKILL_CLASS_WIDTH")? {
            config.skill_class_width = width;
        }
        if let Some(dynamics) = env_f64("TRUESKILL_DYNAMICS_FACTOR")? {
            config.dynamics_factor = dynamics;
        }
        if let Some(draw) = env_f64("TRUESKILL_DRAW_PROBABILITY")? {
            config.draw_probability = draw;
        }
        if let Some(tolerance) = env_f64("TRUESKILL_TOLERANCE")? {
            config.tolerance = tolerance;
        }
        if let Ok(attribution) = env::var("TRUESKILL_MEAN_ATTRIBUTION") {
            config.mean_attribution = attribution.parse()?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn config_error(message: impl Into<String>) -> anyhow::Error {
    RatingError::ConfigurationError {
        message: message.into(),
    }
    .into()
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| config_error(format!("Invalid {} value: {}", key, value))),
        Err(_) => Ok(None),
    }
}
