//! Multi-factor risk composition.

mod composer;
mod factor;

pub use composer::{MultiFactorRiskComposer, MultiFactorRiskPoint, RiskComposition};
pub use factor::{FactorReading, RiskFactor, RiskFactorType};
