//! Discrete tiers for the composite risk level and z-score magnitude.

use serde::{Deserialize, Serialize};

/// Banding of a composite risk level in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// [0, 0.2)
    VeryLow,
    /// [0.2, 0.4)
    Low,
    /// [0.4, 0.55)
    Neutral,
    /// [0.55, 0.7)
    Elevated,
    /// [0.7, 0.85)
    High,
    /// [0.85, 1]
    Extreme,
}

impl RiskCategory {
    /// Bands a risk level. Returns None for non-finite input; values outside
    /// [0, 1] are clamped first.
    #[must_use]
    pub fn from_risk_level(level: f64) -> Option<Self> {
        if !level.is_finite() {
            return None;
        }
        let level = level.clamp(0.0, 1.0);
        let category = if level < 0.2 {
            Self::VeryLow
        } else if level < 0.4 {
            Self::Low
        } else if level < 0.55 {
            Self::Neutral
        } else if level < 0.7 {
            Self::Elevated
        } else if level < 0.85 {
            Self::High
        } else {
            Self::Extreme
        };
        Some(category)
    }
}

/// How far a reading sits from its historical mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZScoreSeverity {
    /// |z| < 1
    Normal,
    /// 1 <= |z| < 2
    Notable,
    /// 2 <= |z| < 3
    Significant,
    /// |z| >= 3
    Extreme,
}

impl ZScoreSeverity {
    #[must_use]
    pub fn from_zscore(z_score: f64) -> Self {
        let z = z_score.abs();
        if z.is_nan() || z < 1.0 {
            Self::Normal
        } else if z < 2.0 {
            Self::Notable
        } else if z < 3.0 {
            Self::Significant
        } else {
            Self::Extreme
        }
    }
}
