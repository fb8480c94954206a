//! Macro regime types.
//!
//! Shared between the classifier that produces a [`MarketRegime`] and the
//! stores that persist the last known one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregate macro-risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRegime {
    /// At least two indicators bullish and none bearish
    RiskOn,
    /// At least two indicators bearish and none bullish
    RiskOff,
    /// Indicators disagree or lean neither way
    Mixed,
    /// Fewer than two indicators had data
    NoData,
}

impl MarketRegime {
    /// Stable identifier used for persistence.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskOn => "risk_on",
            Self::RiskOff => "risk_off",
            Self::Mixed => "mixed",
            Self::NoData => "no_data",
        }
    }

    /// Returns true if this regime carries an actual classification.
    #[must_use]
    pub const fn has_data(self) -> bool {
        !matches!(self, Self::NoData)
    }
}

impl fmt::Display for MarketRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarketRegime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "risk_on" => Ok(Self::RiskOn),
            "risk_off" => Ok(Self::RiskOff),
            "mixed" => Ok(Self::Mixed),
            "no_data" => Ok(Self::NoData),
            other => anyhow::bail!("unknown market regime: {other}"),
        }
    }
}

/// Per-indicator vote used for regime classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalVote {
    /// Indicator favours risk assets
    Bullish,
    /// Indicator warns against risk assets
    Bearish,
    /// Indicator inside its neutral band
    Neutral,
}

/// Macro indicators that take part in regime voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroIndicator {
    /// CBOE volatility index, absolute level
    Vix,
    /// US dollar index, percent change
    Dxy,
    /// M2 money supply, monthly percent change
    M2,
}

impl MacroIndicator {
    /// All indicators in voting order.
    pub const ALL: [Self; 3] = [Self::Vix, Self::Dxy, Self::M2];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vix => "VIX",
            Self::Dxy => "DXY",
            Self::M2 => "M2",
        }
    }
}

impl fmt::Display for MacroIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current readings of the macro indicators. Absent readings are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    /// VIX absolute level
    pub vix_level: Option<f64>,
    /// DXY percent change
    pub dxy_change_pct: Option<f64>,
    /// M2 monthly percent change
    pub m2_monthly_change_pct: Option<f64>,
}

impl MacroSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VIX level.
    #[must_use]
    pub fn with_vix(mut self, level: f64) -> Self {
        self.vix_level = Some(level);
        self
    }

    /// Sets the DXY percent change.
    #[must_use]
    pub fn with_dxy_change(mut self, pct: f64) -> Self {
        self.dxy_change_pct = Some(pct);
        self
    }

    /// Sets the M2 monthly percent change.
    #[must_use]
    pub fn with_m2_change(mut self, pct: f64) -> Self {
        self.m2_monthly_change_pct = Some(pct);
        self
    }

    /// Returns the reading for an indicator, ignoring non-finite values.
    #[must_use]
    pub fn get(&self, indicator: MacroIndicator) -> Option<f64> {
        let value = match indicator {
            MacroIndicator::Vix => self.vix_level,
            MacroIndicator::Dxy => self.dxy_change_pct,
            MacroIndicator::M2 => self.m2_monthly_change_pct,
        };
        value.filter(|v| v.is_finite())
    }
}

/// Emitted once per genuine regime transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeChange {
    /// Previously stored regime
    pub from: MarketRegime,
    /// Newly observed regime
    pub to: MarketRegime,
    /// When the transition was detected
    pub detected_at: DateTime<Utc>,
}

/// Persisted regime tracking state.
///
/// Lives from install to uninstall; reset only by an explicit user action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeChangeState {
    /// Last regime observed with data
    #[serde(default)]
    pub last_known_regime: Option<MarketRegime>,
    /// When `last_known_regime` was last written
    #[serde(default)]
    pub last_regime_change: Option<DateTime<Utc>>,
    /// Whether transitions should schedule a user notification
    #[serde(default)]
    pub notifications_enabled: bool,
}

impl RegimeChangeState {
    /// Returns true once a regime has been recorded.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.last_known_regime.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_string_round_trip() {
        for regime in [
            MarketRegime::RiskOn,
            MarketRegime::RiskOff,
            MarketRegime::Mixed,
            MarketRegime::NoData,
        ] {
            assert_eq!(regime.as_str().parse::<MarketRegime>().unwrap(), regime);
        }
    }

    #[test]
    fn unknown_regime_string_is_rejected() {
        assert!("bullish".parse::<MarketRegime>().is_err());
    }

    #[test]
    fn regime_serializes_as_snake_case() {
        let json = serde_json::to_string(&MarketRegime::RiskOff).unwrap();
        assert_eq!(json, "\"risk_off\"");
    }

    #[test]
    fn snapshot_ignores_non_finite_readings() {
        let snapshot = MacroSnapshot::new().with_vix(f64::NAN).with_dxy_change(0.3);
        assert_eq!(snapshot.get(MacroIndicator::Vix), None);
        assert_eq!(snapshot.get(MacroIndicator::Dxy), Some(0.3));
        assert_eq!(snapshot.get(MacroIndicator::M2), None);
    }

    #[test]
    fn default_state_is_uninitialized() {
        let state = RegimeChangeState::default();
        assert!(!state.is_tracking());
        assert!(!state.notifications_enabled);
    }

    #[test]
    fn state_tolerates_missing_keys() {
        let state: RegimeChangeState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, RegimeChangeState::default());
    }
}
