//! Macro regime classification and change detection.

mod classify;
mod detector;
mod store;

pub use classify::{
    classify_regime, MacroSeries, RegimeAssessment, DXY_CHANGE_DAYS, M2_CHANGE_DAYS, MIN_SIGNALS,
};
pub use detector::{NoopNotifier, RegimeChangeDetector};
pub use store::{InMemoryRegimeStore, JsonFileRegimeStore};
