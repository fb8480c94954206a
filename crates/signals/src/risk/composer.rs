//! Multi-factor composite risk.
//!
//! Blends up to six independently normalized factors into one risk level in
//! [0, 1]. Weights of unavailable factors are redistributed proportionally
//! among the available ones.

use chrono::{DateTime, Utc};
use market_signal_core::RiskWeights;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::factor::{FactorReading, RiskFactor, RiskFactorType};
use crate::classifier::RiskCategory;
use crate::error::EngineError;

/// Result of blending the factor readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskComposition {
    /// Composite risk level; None when no factor could contribute
    pub risk_level: Option<f64>,
    /// Every factor in canonical order, available or not
    pub factors: Vec<RiskFactor>,
}

impl RiskComposition {
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.risk_level.is_some()
    }

    #[must_use]
    pub fn category(&self) -> Option<RiskCategory> {
        self.risk_level.and_then(RiskCategory::from_risk_level)
    }

    /// Number of factors that contributed.
    #[must_use]
    pub fn available_count(&self) -> usize {
        self.factors.iter().filter(|f| f.is_available()).count()
    }
}

/// Dated composite risk alongside the price it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiFactorRiskPoint {
    pub date: DateTime<Utc>,
    pub risk_level: Option<f64>,
    pub price: Decimal,
    pub fair_value: Decimal,
    /// `(price - fair_value) / fair_value`, 0 when fair value is zero
    pub deviation: f64,
    pub factors: Vec<RiskFactor>,
}

/// Composes factor readings using a validated weight table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiFactorRiskComposer {
    weights: RiskWeights,
}

impl Default for MultiFactorRiskComposer {
    fn default() -> Self {
        Self {
            weights: RiskWeights::default(),
        }
    }
}

impl MultiFactorRiskComposer {
    /// Creates a composer with a custom weight table.
    ///
    /// # Errors
    /// Returns error if any weight is outside [0, 1] or the weights do not
    /// sum to 1. Weights are never silently rescaled.
    pub fn new(weights: RiskWeights) -> Result<Self, EngineError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    #[must_use]
    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    /// Blends the readings into a composite risk level.
    ///
    /// Factors absent from `readings` count as unavailable. If a factor
    /// appears more than once, the first reading wins.
    ///
    /// # Errors
    /// Returns error if a reading carries a normalized value outside [0, 1].
    pub fn compose(&self, readings: &[FactorReading]) -> Result<RiskComposition, EngineError> {
        for reading in readings {
            reading.validate()?;
        }

        let lookup = |factor_type: RiskFactorType| {
            readings
                .iter()
                .find(|r| r.factor_type == factor_type)
                .copied()
                .unwrap_or(FactorReading::unavailable(factor_type))
        };
        let selected = RiskFactorType::ALL.map(lookup);

        let available_weight: f64 = selected
            .iter()
            .filter(|r| r.is_available())
            .map(|r| r.factor_type.weight_in(&self.weights))
            .sum();
        let can_redistribute = available_weight > f64::EPSILON;

        let factors: Vec<RiskFactor> = selected
            .iter()
            .map(|reading| {
                let weight = reading.factor_type.weight_in(&self.weights);
                let effective_weight = reading
                    .normalized_value
                    .filter(|_| can_redistribute)
                    .map(|_| weight / available_weight);
                let contribution = effective_weight
                    .zip(reading.normalized_value)
                    .map(|(w, v)| w * v);
                RiskFactor {
                    factor_type: reading.factor_type,
                    raw_value: reading.raw_value,
                    normalized_value: reading.normalized_value,
                    weight,
                    effective_weight,
                    contribution,
                }
            })
            .collect();

        let risk_level = can_redistribute.then(|| {
            factors
                .iter()
                .filter_map(|f| f.contribution)
                .sum::<f64>()
                .clamp(0.0, 1.0)
        });

        match risk_level {
            Some(level) => tracing::debug!(
                risk_level = level,
                available = factors.iter().filter(|f| f.is_available()).count(),
                "composed multi-factor risk"
            ),
            None => tracing::debug!("no risk factors available, composite unavailable"),
        }

        Ok(RiskComposition {
            risk_level,
            factors,
        })
    }

    /// Composes the readings into a dated risk point.
    ///
    /// # Errors
    /// Returns error if a reading carries a normalized value outside [0, 1].
    pub fn compose_point(
        &self,
        date: DateTime<Utc>,
        price: Decimal,
        fair_value: Decimal,
        readings: &[FactorReading],
    ) -> Result<MultiFactorRiskPoint, EngineError> {
        let composition = self.compose(readings)?;
        let deviation = if fair_value.is_zero() {
            0.0
        } else {
            ((price - fair_value) / fair_value).to_f64().unwrap_or(0.0)
        };

        Ok(MultiFactorRiskPoint {
            date,
            risk_level: composition.risk_level,
            price,
            fair_value,
            deviation,
            factors: composition.factors,
        })
    }
}
