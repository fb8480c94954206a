//! Risk factor records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use market_signal_core::RiskWeights;

/// Independently scored inputs to the composite risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactorType {
    /// Price position relative to the logarithmic regression fair value
    LogRegression,
    /// Relative strength index
    Rsi,
    /// Price position relative to long simple moving averages
    SmaPosition,
    /// Perpetual futures funding rate
    FundingRate,
    /// Fear and greed index
    FearGreed,
    /// Macro environment risk
    MacroRisk,
}

impl RiskFactorType {
    /// All factors in canonical order.
    pub const ALL: [Self; 6] = [
        Self::LogRegression,
        Self::Rsi,
        Self::SmaPosition,
        Self::FundingRate,
        Self::FearGreed,
        Self::MacroRisk,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LogRegression => "log_regression",
            Self::Rsi => "rsi",
            Self::SmaPosition => "sma_position",
            Self::FundingRate => "funding_rate",
            Self::FearGreed => "fear_greed",
            Self::MacroRisk => "macro_risk",
        }
    }

    /// Nominal weight of this factor in a weight table.
    #[must_use]
    pub const fn weight_in(self, weights: &RiskWeights) -> f64 {
        match self {
            Self::LogRegression => weights.log_regression,
            Self::Rsi => weights.rsi,
            Self::SmaPosition => weights.sma_position,
            Self::FundingRate => weights.funding_rate,
            Self::FearGreed => weights.fear_greed,
            Self::MacroRisk => weights.macro_risk,
        }
    }
}

impl fmt::Display for RiskFactorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A factor reading delivered by the normalization layer.
///
/// A reading without a normalized value is unavailable and drops out of the
/// composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorReading {
    #[serde(rename = "factor")]
    pub factor_type: RiskFactorType,
    #[serde(default)]
    pub raw_value: Option<f64>,
    #[serde(default)]
    pub normalized_value: Option<f64>,
}

impl FactorReading {
    /// Creates an available reading.
    ///
    /// # Errors
    /// Returns error if `normalized` is not a finite value in [0, 1].
    pub fn new(factor_type: RiskFactorType, normalized: f64) -> Result<Self, EngineError> {
        let reading = Self {
            factor_type,
            raw_value: None,
            normalized_value: Some(normalized),
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Creates a reading for a factor with no data.
    #[must_use]
    pub const fn unavailable(factor_type: RiskFactorType) -> Self {
        Self {
            factor_type,
            raw_value: None,
            normalized_value: None,
        }
    }

    /// Attaches the raw, pre-normalization value.
    #[must_use]
    pub fn with_raw(mut self, raw: f64) -> Self {
        self.raw_value = Some(raw);
        self
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.normalized_value.is_some()
    }

    /// # Errors
    /// Returns error if the normalized value is present but outside [0, 1].
    pub fn validate(&self) -> Result<(), EngineError> {
        match self.normalized_value {
            Some(value) if !value.is_finite() || !(0.0..=1.0).contains(&value) => {
                Err(EngineError::InvalidFactorValue {
                    factor: self.factor_type,
                    value,
                })
            }
            _ => Ok(()),
        }
    }
}

/// A factor as it took part in a composition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor_type: RiskFactorType,
    pub raw_value: Option<f64>,
    pub normalized_value: Option<f64>,
    /// Nominal weight from the weight table
    pub weight: f64,
    /// Weight after redistribution; None when the factor was unavailable
    pub effective_weight: Option<f64>,
    /// `effective_weight * normalized_value`
    pub contribution: Option<f64>,
}

impl RiskFactor {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.normalized_value.is_some()
    }
}
