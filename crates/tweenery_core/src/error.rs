//! Error types shared across Tweenery crates

use thiserror::Error;

/// Errors produced by composition, parsing, and host configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// `merge_all`/`sequence` called without any tween
    #[error("Cannot compose an empty list of tweens")]
    EmptyComposition,

    /// Two paths have a different number of segments
    #[error("Path segment counts differ: expected {expected}, found {found}")]
    PathLengthMismatch { expected: usize, found: usize },

    /// Two paths disagree on the argument count of a segment
    #[error("Path shapes differ at segment {segment}: expected {expected} values, found {found}")]
    PathShapeMismatch {
        segment: usize,
        expected: usize,
        found: usize,
    },

    /// A path argument could not be parsed as a number
    #[error("Invalid number in path segment {segment}: {token:?}")]
    InvalidNumber { segment: usize, token: String },

    /// Easing name not present in the easing table
    #[error("Unknown easing function: {0}")]
    UnknownEasing(String),

    /// A frame host was assembled without a required capability
    #[error("Frame host is missing the `{0}` capability")]
    MissingCapability(&'static str),
}

/// Result type for Tweenery operations
pub type Result<T> = std::result::Result<T, Error>;
