//! Display metadata lookup tables.
//!
//! Maps each classification enum to a label and an abstract severity. The
//! consumer decides how a severity is rendered.

use market_signal_core::{MarketRegime, SignalVote};
use serde::Serialize;

use super::strength::CorrelationStrength;
use super::tiers::{RiskCategory, ZScoreSeverity};

/// Rendering-agnostic severity of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Positive,
    Neutral,
    Caution,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierMetadata {
    pub label: &'static str,
    pub short_label: &'static str,
    pub severity: Severity,
}

const fn meta(label: &'static str, short_label: &'static str, severity: Severity) -> TierMetadata {
    TierMetadata {
        label,
        short_label,
        severity,
    }
}

/// Lookup of display metadata for a classification.
pub trait Describe {
    fn metadata(&self) -> TierMetadata;

    fn label(&self) -> &'static str {
        self.metadata().label
    }
}

impl Describe for CorrelationStrength {
    fn metadata(&self) -> TierMetadata {
        match self {
            Self::Weak => meta("Weak", "WEAK", Severity::Neutral),
            Self::Moderate => meta("Moderate", "MOD", Severity::Caution),
            Self::Strong => meta("Strong", "STRONG", Severity::Negative),
            Self::VeryStrong => meta("Very Strong", "V.STRONG", Severity::Negative),
        }
    }
}

impl Describe for MarketRegime {
    fn metadata(&self) -> TierMetadata {
        match self {
            Self::RiskOn => meta("Risk-On", "RISK ON", Severity::Positive),
            Self::RiskOff => meta("Risk-Off", "RISK OFF", Severity::Negative),
            Self::Mixed => meta("Mixed Signals", "MIXED", Severity::Caution),
            Self::NoData => meta("No Data", "N/A", Severity::Neutral),
        }
    }
}

impl Describe for SignalVote {
    fn metadata(&self) -> TierMetadata {
        match self {
            Self::Bullish => meta("Bullish", "BULL", Severity::Positive),
            Self::Bearish => meta("Bearish", "BEAR", Severity::Negative),
            Self::Neutral => meta("Neutral", "NEUT", Severity::Neutral),
        }
    }
}

impl Describe for RiskCategory {
    fn metadata(&self) -> TierMetadata {
        match self {
            Self::VeryLow => meta("Very Low Risk", "V.LOW", Severity::Positive),
            Self::Low => meta("Low Risk", "LOW", Severity::Positive),
            Self::Neutral => meta("Neutral", "NEUTRAL", Severity::Neutral),
            Self::Elevated => meta("Elevated Risk", "ELEV", Severity::Caution),
            Self::High => meta("High Risk", "HIGH", Severity::Negative),
            Self::Extreme => meta("Extreme Risk", "EXTREME", Severity::Negative),
        }
    }
}

impl Describe for ZScoreSeverity {
    fn metadata(&self) -> TierMetadata {
        match self {
            Self::Normal => meta("Normal", "NORMAL", Severity::Neutral),
            Self::Notable => meta("Notable", "NOTABLE", Severity::Caution),
            Self::Significant => meta("Significant", "SIG", Severity::Negative),
            Self::Extreme => meta("Extreme", "EXTREME", Severity::Negative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regime_labels() {
        assert_eq!(MarketRegime::RiskOn.label(), "Risk-On");
        assert_eq!(MarketRegime::NoData.metadata().severity, Severity::Neutral);
    }

    #[test]
    fn stronger_correlation_never_less_severe() {
        let order = [
            Severity::Positive,
            Severity::Neutral,
            Severity::Caution,
            Severity::Negative,
        ];
        let rank = |s: Severity| order.iter().position(|&o| o == s).unwrap();
        let tiers = [
            CorrelationStrength::Weak,
            CorrelationStrength::Moderate,
            CorrelationStrength::Strong,
            CorrelationStrength::VeryStrong,
        ];
        for pair in tiers.windows(2) {
            assert!(rank(pair[0].metadata().severity) <= rank(pair[1].metadata().severity));
        }
    }
}
