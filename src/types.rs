//! Common types used throughout the rating crate

use crate::error::{RatingError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Unique identifier for a rated player
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Gaussian skill belief for a single player
///
/// The standard deviation is always finite and strictly positive. Values are
/// never mutated; every update produces a new `Rating`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRating")]
pub struct Rating {
    mean: f64,
    stddev: f64,
}

#[derive(Deserialize)]
struct RawRating {
    mean: f64,
    stddev: f64,
}

impl TryFrom<RawRating> for Rating {
    type Error = RatingError;

    fn try_from(raw: RawRating) -> std::result::Result<Self, Self::Error> {
        check_rating(raw.mean, raw.stddev)?;
        Ok(Self {
            mean: raw.mean,
            stddev: raw.stddev,
        })
    }
}

fn check_rating(mean: f64, stddev: f64) -> std::result::Result<(), RatingError> {
    if !mean.is_finite() {
        return Err(RatingError::InvalidRating {
            reason: format!("mean must be finite, got {}", mean),
        });
    }
    if !stddev.is_finite() || stddev <= 0.0 {
        return Err(RatingError::InvalidRating {
            reason: format!("stddev must be finite and positive, got {}", stddev),
        });
    }
    Ok(())
}

impl Rating {
    /// Create a rating, rejecting non-finite values and non-positive stddev
    pub fn new(mean: f64, stddev: f64) -> Result<Self> {
        check_rating(mean, stddev)?;
        Ok(Self { mean, stddev })
    }

    /// Build a posterior produced by the update math.
    pub(crate) fn from_posterior(mean: f64, stddev: f64) -> Self {
        debug_assert!(mean.is_finite(), "posterior mean is not finite");
        debug_assert!(
            stddev.is_finite() && stddev > 0.0,
            "posterior stddev must stay positive"
        );
        Self { mean, stddev }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn stddev(&self) -> f64 {
        self.stddev
    }

    pub fn variance(&self) -> f64 {
        self.stddev * self.stddev
    }

    /// Skill the player is `k` standard deviations below their mean.
    ///
    /// With `k = 3.0` this is the usual leaderboard value: the true skill is
    /// above it with ~99.9% confidence.
    pub fn conservative_estimate(&self, k: f64) -> f64 {
        self.mean - k * self.stddev
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            mean: 25.0,
            stddev: 25.0 / 3.0,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N({:.3}, {:.3}²)", self.mean, self.stddev)
    }
}

/// Match result from the perspective of side A
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Numeric encoding: +1 win, -1 loss, 0 draw
    pub fn value(self) -> i64 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Draw => 0,
        }
    }

    /// The same result seen from side B
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }

    pub fn is_draw(self) -> bool {
        self == Outcome::Draw
    }
}

impl TryFrom<i64> for Outcome {
    type Error = RatingError;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Outcome::Win),
            -1 => Ok(Outcome::Loss),
            0 => Ok(Outcome::Draw),
            _ => Err(RatingError::InvalidOutcome { value }),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Non-empty roster of players and their current ratings
///
/// Serialized as a list of members ordered by player id. Deserializing goes
/// through the same checks as [`Team::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TeamMember>", into = "Vec<TeamMember>")]
pub struct Team {
    ratings: HashMap<PlayerId, Rating>,
}

/// One entry of a serialized team
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub player_id: PlayerId,
    pub rating: Rating,
}

fn collect_roster<I>(members: I) -> std::result::Result<HashMap<PlayerId, Rating>, RatingError>
where
    I: IntoIterator<Item = (PlayerId, Rating)>,
{
    let mut ratings = HashMap::new();
    for (player_id, rating) in members {
        if ratings.insert(player_id, rating).is_some() {
            return Err(RatingError::DuplicatePlayer { player_id });
        }
    }

    if ratings.is_empty() {
        return Err(RatingError::EmptyTeam);
    }

    Ok(ratings)
}

impl Team {
    /// Build a team, rejecting empty rosters and repeated players
    pub fn new<I>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = (PlayerId, Rating)>,
    {
        Ok(Self {
            ratings: collect_roster(members)?,
        })
    }

    /// Team of exactly one player
    pub fn solo(player_id: PlayerId, rating: Rating) -> Self {
        let mut ratings = HashMap::with_capacity(1);
        ratings.insert(player_id, rating);
        Self { ratings }
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Always false for a constructed team
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn get(&self, player_id: &PlayerId) -> Option<&Rating> {
        self.ratings.get(player_id)
    }

    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.ratings.contains_key(player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Rating)> {
        self.ratings.iter()
    }

    pub fn ratings(&self) -> &HashMap<PlayerId, Rating> {
        &self.ratings
    }

    /// Sum of member means, the mean of the team's total performance
    pub fn mean_sum(&self) -> f64 {
        self.ratings.values().map(Rating::mean).sum()
    }

    /// Sum of member variances
    pub fn variance_sum(&self) -> f64 {
        self.ratings.values().map(Rating::variance).sum()
    }
}

impl TryFrom<Vec<TeamMember>> for Team {
    type Error = RatingError;

    fn try_from(members: Vec<TeamMember>) -> std::result::Result<Self, Self::Error> {
        let ratings = collect_roster(
            members
                .into_iter()
                .map(|member| (member.player_id, member.rating)),
        )?;
        Ok(Self { ratings })
    }
}

impl From<Team> for Vec<TeamMember> {
    fn from(team: Team) -> Self {
        let mut members: Vec<TeamMember> = team
            .ratings
            .into_iter()
            .map(|(player_id, rating)| TeamMember { player_id, rating })
            .collect();
        members.sort_by_key(|member| member.player_id);
        members
    }
}

/// Rating change information for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: Rating,
    pub new_rating: Rating,
}

impl RatingChange {
    /// Signed change in mean skill
    pub fn mean_delta(&self) -> f64 {
        self.new_rating.mean() - self.old_rating.mean()
    }

    /// Signed change in uncertainty
    pub fn stddev_delta(&self) -> f64 {
        self.new_rating.stddev() - self.old_rating.stddev()
    }
}

/// Predicted result probabilities for side A
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}
