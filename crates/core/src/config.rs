use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance when checking that risk weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub statistics: StatisticsConfig,
    pub risk_weights: RiskWeights,
    pub thresholds: ThresholdsConfig,
    pub regime: RegimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    pub window_size: usize,
}

/// Nominal weight of each risk factor in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    pub log_regression: f64,
    pub rsi: f64,
    pub sma_position: f64,
    pub funding_rate: f64,
    pub fear_greed: f64,
    pub macro_risk: f64,
}

/// Correlation strength tier boundaries for one indicator.
///
/// A value strictly greater than a boundary moves to the next tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthThresholds {
    pub moderate: f64,
    pub strong: f64,
    pub very_strong: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub vix: StrengthThresholds,
    pub dxy: StrengthThresholds,
    pub m2: StrengthThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeConfig {
    pub state_path: String,
    pub notifications_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            statistics: StatisticsConfig { window_size: 90 },
            risk_weights: RiskWeights::default(),
            thresholds: ThresholdsConfig::default(),
            regime: RegimeConfig {
                state_path: "data/regime_state.json".to_string(),
                notifications_enabled: false,
            },
        }
    }
}

impl AppConfig {
    /// Validates every section.
    ///
    /// # Errors
    /// Returns the first configuration error found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.statistics.window_size < 2 {
            return Err(ConfigError::WindowSize(self.statistics.window_size));
        }
        self.risk_weights.validate()?;
        self.thresholds.validate()
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            log_regression: 0.40,
            rsi: 0.15,
            sma_position: 0.15,
            funding_rate: 0.10,
            fear_greed: 0.10,
            macro_risk: 0.10,
        }
    }
}

impl RiskWeights {
    /// Weights paired with their config key, in canonical factor order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("log_regression", self.log_regression),
            ("rsi", self.rsi),
            ("sma_position", self.sma_position),
            ("funding_rate", self.funding_rate),
            ("fear_greed", self.fear_greed),
            ("macro_risk", self.macro_risk),
        ]
    }

    /// Checks that every weight is in [0, 1] and that they sum to 1.
    ///
    /// # Errors
    /// Returns `WeightOutOfRange` or `WeightSum`; weights are never rescaled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let entries = self.entries();
        for (factor, value) in entries {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange {
                    factor: factor.to_string(),
                    value,
                });
            }
        }

        let sum: f64 = entries.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }
        Ok(())
    }
}

impl StrengthThresholds {
    #[must_use]
    pub const fn new(moderate: f64, strong: f64, very_strong: f64) -> Self {
        Self {
            moderate,
            strong,
            very_strong,
        }
    }

    /// VIX absolute level.
    pub const VIX: Self = Self::new(18.0, 25.0, 30.0);
    /// DXY absolute percent change.
    pub const DXY: Self = Self::new(0.2, 0.5, 0.8);
    /// M2 absolute monthly percent change.
    pub const M2: Self = Self::new(0.5, 1.0, 2.0);

    /// # Errors
    /// Returns `ThresholdOrder` unless `moderate < strong < very_strong`.
    pub fn validate(&self, indicator: &str) -> Result<(), ConfigError> {
        let finite = [self.moderate, self.strong, self.very_strong]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.moderate >= self.strong || self.strong >= self.very_strong {
            return Err(ConfigError::ThresholdOrder {
                indicator: indicator.to_string(),
                moderate: self.moderate,
                strong: self.strong,
                very_strong: self.very_strong,
            });
        }
        Ok(())
    }
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            vix: StrengthThresholds::VIX,
            dxy: StrengthThresholds::DXY,
            m2: StrengthThresholds::M2,
        }
    }
}

impl ThresholdsConfig {
    /// # Errors
    /// Returns the first indicator whose thresholds are out of order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vix.validate("VIX")?;
        self.dxy.validate("DXY")?;
        self.m2.validate("M2")
    }
}
