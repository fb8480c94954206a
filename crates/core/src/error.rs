//! Typed errors shared across the market signal crates.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors raised while validating engine configuration.
///
/// These are fatal for the configuration that produced them; callers are
/// expected to reject the whole configuration rather than patch it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A risk factor weight is negative, above 1, or not finite.
    #[error("weight for {factor} must be a finite value in [0, 1], got {value}")]
    WeightOutOfRange {
        /// Factor the weight belongs to.
        factor: String,
        /// The rejected weight.
        value: f64,
    },

    /// Risk factor weights do not add up to 1.
    #[error("risk factor weights must sum to 1.0, got {sum}")]
    WeightSum {
        /// Actual sum of the configured weights.
        sum: f64,
    },

    /// Correlation strength thresholds are not strictly ascending.
    #[error(
        "{indicator} strength thresholds must be finite and strictly ascending, got {moderate}, {strong}, {very_strong}"
    )]
    ThresholdOrder {
        /// Indicator the thresholds belong to.
        indicator: String,
        /// Weak to moderate boundary.
        moderate: f64,
        /// Moderate to strong boundary.
        strong: f64,
        /// Strong to very strong boundary.
        very_strong: f64,
    },

    /// Rolling window too small to produce a standard deviation.
    #[error("statistics window must hold at least 2 observations, got {0}")]
    WindowSize(usize),
}

/// Errors raised when building a time series.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    /// Observation dates went backwards or repeated.
    #[error("series dates must be strictly increasing: {previous} followed by {next}")]
    NonIncreasing {
        /// Date of the earlier point.
        previous: DateTime<Utc>,
        /// Offending date.
        next: DateTime<Utc>,
    },

    /// An observation carried NaN or infinity.
    #[error("series value at {date} is not finite")]
    NonFinite {
        /// Date of the offending point.
        date: DateTime<Utc>,
    },
}

/// Errors raised by regime state persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading/writing the backing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store rejected the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
