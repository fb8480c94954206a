//! Market signal engine.
//!
//! Statistical summaries, correlation and signal classification, multi-factor
//! risk composition, and macro regime change detection over plain data
//! records delivered by an external data layer.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod regime;
pub mod risk;
pub mod summary;

pub use classifier::{
    CorrelationStrength, Describe, IndicatorStrengths, RiskCategory, Severity,
    StrengthClassifier, TierMetadata, ZScoreSeverity,
};
pub use engine::{MacroReport, SignalEngine};
pub use error::EngineError;
pub use regime::{
    classify_regime, InMemoryRegimeStore, JsonFileRegimeStore, MacroSeries, NoopNotifier,
    RegimeAssessment, RegimeChangeDetector,
};
pub use risk::{
    FactorReading, MultiFactorRiskComposer, MultiFactorRiskPoint, RiskComposition, RiskFactor,
    RiskFactorType,
};
pub use summary::{rarity_for_zscore, StatisticalSummary, DEFAULT_WINDOW};
