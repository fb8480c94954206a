//! Correlation strength tiers.
//!
//! Each macro indicator is banded on its own scale: VIX on its absolute level,
//! DXY on the absolute percent change, M2 on the absolute monthly percent
//! change. A reading strictly above a boundary moves to the next tier.

use market_signal_core::{MacroIndicator, MacroSnapshot, StrengthThresholds, ThresholdsConfig};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Ordinal tier describing how strongly an indicator co-moves with the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CorrelationStrength {
    Weak = 1,
    Moderate = 2,
    Strong = 3,
    VeryStrong = 4,
}

impl CorrelationStrength {
    /// Ordinal rank, 1 (weak) through 4 (very strong).
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Bands a magnitude against one indicator's thresholds.
    ///
    /// Non-finite input is treated as missing data and maps to `Weak`.
    #[must_use]
    pub fn from_magnitude(value: f64, thresholds: &StrengthThresholds) -> Self {
        if !value.is_finite() {
            return Self::Weak;
        }
        let magnitude = value.abs();
        if magnitude > thresholds.very_strong {
            Self::VeryStrong
        } else if magnitude > thresholds.strong {
            Self::Strong
        } else if magnitude > thresholds.moderate {
            Self::Moderate
        } else {
            Self::Weak
        }
    }
}

/// Strength tier per macro indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorStrengths {
    pub vix: CorrelationStrength,
    pub dxy: CorrelationStrength,
    pub m2: CorrelationStrength,
}

/// Maps macro readings to correlation strength tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthClassifier {
    thresholds: ThresholdsConfig,
}

impl Default for StrengthClassifier {
    fn default() -> Self {
        Self {
            thresholds: ThresholdsConfig::default(),
        }
    }
}

impl StrengthClassifier {
    /// Creates a classifier with custom thresholds.
    ///
    /// # Errors
    /// Returns error if any indicator's thresholds are not strictly ascending.
    pub fn new(thresholds: ThresholdsConfig) -> Result<Self, EngineError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    #[must_use]
    pub fn thresholds(&self, indicator: MacroIndicator) -> &StrengthThresholds {
        match indicator {
            MacroIndicator::Vix => &self.thresholds.vix,
            MacroIndicator::Dxy => &self.thresholds.dxy,
            MacroIndicator::M2 => &self.thresholds.m2,
        }
    }

    /// Classifies one reading. Missing data maps to `Weak`.
    #[must_use]
    pub fn classify(&self, indicator: MacroIndicator, value: Option<f64>) -> CorrelationStrength {
        value.map_or(CorrelationStrength::Weak, |v| {
            CorrelationStrength::from_magnitude(v, self.thresholds(indicator))
        })
    }

    /// Classifies every indicator in a snapshot.
    #[must_use]
    pub fn classify_snapshot(&self, snapshot: &MacroSnapshot) -> IndicatorStrengths {
        IndicatorStrengths {
            vix: self.classify(MacroIndicator::Vix, snapshot.get(MacroIndicator::Vix)),
            dxy: self.classify(MacroIndicator::Dxy, snapshot.get(MacroIndicator::Dxy)),
            m2: self.classify(MacroIndicator::M2, snapshot.get(MacroIndicator::M2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(indicator: MacroIndicator, value: f64) -> CorrelationStrength {
        StrengthClassifier::default().classify(indicator, Some(value))
    }

    #[test]
    fn vix_tiers() {
        assert_eq!(classify(MacroIndicator::Vix, 12.0), CorrelationStrength::Weak);
        assert_eq!(classify(MacroIndicator::Vix, 18.0), CorrelationStrength::Weak);
        assert_eq!(classify(MacroIndicator::Vix, 18.01), CorrelationStrength::Moderate);
        assert_eq!(classify(MacroIndicator::Vix, 25.0), CorrelationStrength::Moderate);
        assert_eq!(classify(MacroIndicator::Vix, 27.0), CorrelationStrength::Strong);
        assert_eq!(classify(MacroIndicator::Vix, 30.0), CorrelationStrength::Strong);
        assert_eq!(classify(MacroIndicator::Vix, 35.0), CorrelationStrength::VeryStrong);
    }

    #[test]
    fn dxy_uses_absolute_change() {
        assert_eq!(classify(MacroIndicator::Dxy, 0.1), CorrelationStrength::Weak);
        assert_eq!(classify(MacroIndicator::Dxy, -0.3), CorrelationStrength::Moderate);
        assert_eq!(classify(MacroIndicator::Dxy, 0.6), CorrelationStrength::Strong);
        assert_eq!(classify(MacroIndicator::Dxy, -0.9), CorrelationStrength::VeryStrong);
    }

    #[test]
    fn m2_tiers() {
        assert_eq!(classify(MacroIndicator::M2, 0.5), CorrelationStrength::Weak);
        assert_eq!(classify(MacroIndicator::M2, 0.8), CorrelationStrength::Moderate);
        assert_eq!(classify(MacroIndicator::M2, -1.5), CorrelationStrength::Strong);
        assert_eq!(classify(MacroIndicator::M2, 2.5), CorrelationStrength::VeryStrong);
    }

    #[test]
    fn missing_data_is_weak() {
        let classifier = StrengthClassifier::default();
        for indicator in MacroIndicator::ALL {
            assert_eq!(classifier.classify(indicator, None), CorrelationStrength::Weak);
        }
        assert_eq!(
            classifier.classify(MacroIndicator::Vix, Some(f64::NAN)),
            CorrelationStrength::Weak
        );
    }

    #[test]
    fn tiers_are_monotonic_in_magnitude() {
        let classifier = StrengthClassifier::default();
        for indicator in MacroIndicator::ALL {
            let mut previous = CorrelationStrength::Weak;
            for i in 0..=4000 {
                let value = f64::from(i) / 100.0;
                let tier = classifier.classify(indicator, Some(value));
                assert!(tier >= previous, "{indicator} tier dropped at {value}");
                assert_eq!(tier, classifier.classify(indicator, Some(-value)));
                previous = tier;
            }
        }
    }

    #[test]
    fn rank_matches_ordinal() {
        assert_eq!(CorrelationStrength::Weak.rank(), 1);
        assert_eq!(CorrelationStrength::VeryStrong.rank(), 4);
    }

    #[test]
    fn snapshot_classification() {
        let snapshot = MacroSnapshot::new().with_vix(26.0).with_m2_change(1.2);
        let strengths = StrengthClassifier::default().classify_snapshot(&snapshot);
        assert_eq!(strengths.vix, CorrelationStrength::Strong);
        assert_eq!(strengths.dxy, CorrelationStrength::Weak);
        assert_eq!(strengths.m2, CorrelationStrength::Strong);
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let thresholds = ThresholdsConfig {
            vix: StrengthThresholds::new(30.0, 25.0, 18.0),
            ..ThresholdsConfig::default()
        };
        assert!(StrengthClassifier::new(thresholds).is_err());
    }
}
