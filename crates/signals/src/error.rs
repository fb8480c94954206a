//! Error types for the signal engine.

use market_signal_core::ConfigError;
use thiserror::Error;

use crate::risk::RiskFactorType;

/// Errors raised while configuring or feeding the engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// Weight table or thresholds failed validation.
    #[error("invalid engine configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A normalized factor value fell outside [0, 1].
    #[error("normalized value for {factor} must be a finite value in [0, 1], got {value}")]
    InvalidFactorValue {
        /// Factor that carried the value.
        factor: RiskFactorType,
        /// The rejected value.
        value: f64,
    },
}
