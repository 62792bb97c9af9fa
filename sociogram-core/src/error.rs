//! Error types for the sociogram core library.
//!
//! Only configuration validation can fail; malformed input data degrades to
//! safe defaults inside the pipeline instead of raising errors, and an empty
//! filtered population is a normal empty-report outcome.

use thiserror::Error;

/// Error produced when validating a [`crate::SociogramBuilder`] configuration.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SociogramError {
    /// The intra-faction scaling exponent must be finite and non-negative.
    #[error("intra-faction scaling exponent must be finite and non-negative (got {got})")]
    InvalidScalingExponent {
        /// The invalid exponent supplied by the caller.
        got: f64,
    },
    /// The offset-union popularity offset must lie in [0, 1].
    #[error("popularity offset must lie in [0, 1] (got {got})")]
    InvalidPopularityOffset {
        /// The invalid offset supplied by the caller.
        got: f64,
    },
    /// The celebrity weight must lie in [0, 1].
    #[error("celebrity weight must lie in [0, 1] (got {got})")]
    InvalidCelebrityWeight {
        /// The invalid weight supplied by the caller.
        got: f64,
    },
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SociogramError>;
