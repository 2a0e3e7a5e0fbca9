//! LiNT regression scoring and difficulty levels.
//!
//! The formula is a frozen linear regression over four sentence features:
//!
//! ```text
//! raw   = constant + f*frequency + s*dependency_length + d*density + c*concrete
//! score = 100 - raw
//! ```
//!
//! Higher scores mean harder text. The coefficient set is a versioned
//! input, not a hard-coded truth: published revisions of the model differ,
//! so [`Coefficients`] is replaceable wholesale (see [`crate::config`])
//! and [`Coefficients::default`] carries the reference fit.
//!
//! A score is only produced when all four features are available; a single
//! missing feature makes the whole score unavailable. No partial
//! computation, no default substitution, and no clamping — the level
//! mapping is open-ended at both extremes instead.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scores below this bound map to difficulty level 1.
pub const LEVEL_2_LOWER_BOUND: f64 = 34.0;
/// Scores at or above [`LEVEL_2_LOWER_BOUND`] and below this map to level 2.
pub const LEVEL_3_LOWER_BOUND: f64 = 46.0;
/// Scores at or above [`LEVEL_3_LOWER_BOUND`] and below this map to level 3;
/// at or above this bound, level 4.
pub const LEVEL_4_LOWER_BOUND: f64 = 58.0;

/// Regression coefficients for the readability formula.
///
/// Deserializable so a model revision can be loaded from configuration;
/// the default is the reference fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Coefficients {
    /// Intercept term.
    pub constant: f64,
    /// Weight for mean log word frequency.
    pub frequency: f64,
    /// Weight for maximum syntactic dependency length.
    pub dependency_length: f64,
    /// Weight for content words per clause.
    pub density: f64,
    /// Weight for the proportion of concrete nouns.
    pub concrete: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            constant: -4.21,
            frequency: 17.28,
            dependency_length: -1.62,
            density: -2.54,
            concrete: 16.00,
        }
    }
}

/// The four feature values that feed the formula.
///
/// Each is either a finite number or `None` when the feature could not be
/// computed for the sentence (or document). Sentence-level dependency
/// length is an integer count; it is carried as `f64` here because the
/// document level averages it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    /// Mean log (Zipf) word frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// Maximum syntactic dependency length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_length: Option<f64>,
    /// Content words per clause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    /// Proportion of concrete nouns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concrete: Option<f64>,
}

/// Outcome of scoring a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    /// Readability score on the 0–100 scale (higher = harder), unclamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Difficulty level 1–4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
}

impl ScoreResult {
    const UNAVAILABLE: Self = Self {
        score: None,
        level: None,
    };
}

impl Coefficients {
    /// Apply the formula to a feature vector.
    ///
    /// Returns an unavailable result when any of the four features is
    /// `None`.
    pub fn score(&self, features: &FeatureVector) -> ScoreResult {
        let (Some(freq), Some(sdl), Some(density), Some(concrete)) = (
            features.frequency,
            features.dependency_length,
            features.density,
            features.concrete,
        ) else {
            return ScoreResult::UNAVAILABLE;
        };

        let raw = self.constant
            + self.frequency * freq
            + self.dependency_length * sdl
            + self.density * density
            + self.concrete * concrete;
        let score = 100.0 - raw;

        ScoreResult {
            score: Some(score),
            level: Some(difficulty_level(score)),
        }
    }
}

/// Map a score to its difficulty level (1 easiest – 4 hardest).
///
/// The partition is total: each boundary belongs to the higher level, and
/// the scale is open-ended below 0 and above 100.
pub fn difficulty_level(score: f64) -> u8 {
    if score < LEVEL_2_LOWER_BOUND {
        1
    } else if score < LEVEL_3_LOWER_BOUND {
        2
    } else if score < LEVEL_4_LOWER_BOUND {
        3
    } else {
        4
    }
}
