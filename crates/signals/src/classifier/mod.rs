//! Threshold classifiers.
//!
//! Maps raw and derived indicator values to ordinal tiers: correlation
//! strength, regime votes, risk categories, and z-score severity.

mod metadata;
mod strength;
mod tiers;
pub mod vote;

pub use metadata::{Describe, Severity, TierMetadata};
pub use strength::{CorrelationStrength, IndicatorStrengths, StrengthClassifier};
pub use tiers::{RiskCategory, ZScoreSeverity};
pub use vote::{snapshot_votes, vote};
