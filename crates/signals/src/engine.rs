//! Configured entry point bundling the stateless engine components.

use market_signal_core::{AppConfig, MacroSnapshot, TimeSeries};
use serde::Serialize;

use crate::classifier::{IndicatorStrengths, StrengthClassifier};
use crate::error::EngineError;
use crate::regime::{classify_regime, RegimeAssessment};
use crate::risk::{FactorReading, MultiFactorRiskComposer, RiskComposition};
use crate::summary::StatisticalSummary;

/// Regime and correlation strengths for one macro snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroReport {
    pub snapshot: MacroSnapshot,
    pub assessment: RegimeAssessment,
    pub strengths: IndicatorStrengths,
}

/// Stateless engine components configured from an [`AppConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalEngine {
    window: usize,
    composer: MultiFactorRiskComposer,
    strengths: StrengthClassifier,
}

impl SignalEngine {
    /// Builds the engine, rejecting invalid weights or thresholds up front.
    ///
    /// # Errors
    /// Returns error if the configuration fails validation.
    pub fn from_config(config: &AppConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            window: config.statistics.window_size,
            composer: MultiFactorRiskComposer::new(config.risk_weights)?,
            strengths: StrengthClassifier::new(config.thresholds)?,
        })
    }

    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    #[must_use]
    pub fn summarize(&self, series: &TimeSeries) -> Option<StatisticalSummary> {
        StatisticalSummary::from_series(series, self.window)
    }

    /// # Errors
    /// Returns error if a reading carries a normalized value outside [0, 1].
    pub fn compose_risk(&self, readings: &[FactorReading]) -> Result<RiskComposition, EngineError> {
        self.composer.compose(readings)
    }

    #[must_use]
    pub fn macro_report(&self, snapshot: &MacroSnapshot) -> MacroReport {
        MacroReport {
            snapshot: *snapshot,
            assessment: classify_regime(snapshot),
            strengths: self.strengths.classify_snapshot(snapshot),
        }
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self {
            window: crate::summary::DEFAULT_WINDOW,
            composer: MultiFactorRiskComposer::default(),
            strengths: StrengthClassifier::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::CorrelationStrength;
    use market_signal_core::{ConfigError, MarketRegime};

    #[test]
    fn from_default_config() {
        let engine = SignalEngine::from_config(&AppConfig::default()).unwrap();
        assert_eq!(engine, SignalEngine::default());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = AppConfig::default();
        config.risk_weights.fear_greed = 0.3;
        assert!(matches!(
            SignalEngine::from_config(&config),
            Err(EngineError::InvalidConfig(ConfigError::WeightSum { .. }))
        ));
    }

    #[test]
    fn macro_report_combines_regime_and_strengths() {
        let snapshot = MacroSnapshot::new().with_vix(27.0).with_dxy_change(0.9);
        let report = SignalEngine::default().macro_report(&snapshot);
        assert_eq!(report.assessment.regime, MarketRegime::RiskOff);
        assert_eq!(report.strengths.vix, CorrelationStrength::Strong);
        assert_eq!(report.strengths.dxy, CorrelationStrength::VeryStrong);
        assert_eq!(report.strengths.m2, CorrelationStrength::Weak);
    }
}
