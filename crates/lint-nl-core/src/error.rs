//! Error types for lint-nl-core.

use thiserror::Error;

/// Errors raised when an annotated sentence violates its structural contract.
///
/// These are collaborator-side contract violations (a broken parse), not
/// analysis outcomes. Unavailable features are `None` values in the report,
/// never errors.
#[derive(Error, Debug)]
pub enum AnnotationError {
    /// A token's head index points outside the sentence.
    #[error("token {token} ({text:?}) has head index {head} but the sentence has {len} tokens")]
    HeadOutOfBounds {
        /// Index of the offending token.
        token: usize,
        /// Surface text of the offending token.
        text: String,
        /// The out-of-bounds head index.
        head: usize,
        /// Number of tokens in the sentence.
        len: usize,
    },

    /// No token is its own head.
    #[error("sentence has no root token (no token is its own head)")]
    MissingRoot,

    /// More than one token is its own head.
    #[error("sentence has multiple root tokens (at indices {first} and {second})")]
    MultipleRoots {
        /// Index of the first self-headed token.
        first: usize,
        /// Index of the second self-headed token.
        second: usize,
    },

    /// Conjunct back-references form a cycle instead of a chain.
    #[error("conjunct chain starting at token {token} ({text:?}) never reaches a first conjunct")]
    ConjunctCycle {
        /// Index of the token whose chain walk cycled.
        token: usize,
        /// Surface text of that token.
        text: String,
    },

    /// The sentence contains no tokens at all.
    #[error("sentence is empty")]
    EmptySentence,
}

/// Result type alias using [`AnnotationError`].
pub type AnnotationResult<T> = Result<T, AnnotationError>;

/// Errors that can occur when loading the scoring model configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;
