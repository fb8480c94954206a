//! Aggregate macro regime classification.
//!
//! Requires at least two indicators with data, and a two-vote majority with
//! no dissenting vote before calling a direction. A single contradicting vote
//! forces `Mixed`.

use market_signal_core::{MacroIndicator, MacroSnapshot, MarketRegime, SignalVote, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::classifier::snapshot_votes;

/// Minimum number of indicators with data for a classification.
pub const MIN_SIGNALS: usize = 2;
/// Lookback for the DXY percent change, in days.
pub const DXY_CHANGE_DAYS: i64 = 1;
/// Lookback for the M2 monthly percent change, in days.
pub const M2_CHANGE_DAYS: i64 = 30;

/// Regime together with the vote tally that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub regime: MarketRegime,
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    /// Indicators that had data
    pub total_signals: usize,
    pub votes: [(MacroIndicator, Option<SignalVote>); 3],
}

/// Classifies the macro regime from the current indicator readings.
#[must_use]
pub fn classify_regime(snapshot: &MacroSnapshot) -> RegimeAssessment {
    let votes = snapshot_votes(snapshot);

    let count = |wanted: SignalVote| votes.iter().filter(|(_, v)| *v == Some(wanted)).count();
    let bullish = count(SignalVote::Bullish);
    let bearish = count(SignalVote::Bearish);
    let neutral = count(SignalVote::Neutral);
    let total_signals = bullish + bearish + neutral;

    let regime = if total_signals < MIN_SIGNALS {
        MarketRegime::NoData
    } else if bullish >= 2 && bearish == 0 {
        MarketRegime::RiskOn
    } else if bearish >= 2 && bullish == 0 {
        MarketRegime::RiskOff
    } else {
        MarketRegime::Mixed
    };

    tracing::debug!(
        %regime,
        bullish,
        bearish,
        neutral,
        total_signals,
        "classified macro regime"
    );

    RegimeAssessment {
        regime,
        bullish,
        bearish,
        neutral,
        total_signals,
        votes,
    }
}

/// Histories of the macro indicators as delivered by the data layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacroSeries<'a> {
    pub vix: Option<&'a TimeSeries>,
    pub dxy: Option<&'a TimeSeries>,
    pub m2: Option<&'a TimeSeries>,
}

impl MacroSeries<'_> {
    /// Derives current readings: latest VIX level, daily DXY percent change,
    /// and monthly M2 percent change.
    #[must_use]
    pub fn snapshot(&self) -> MacroSnapshot {
        MacroSnapshot {
            vix_level: self.vix.and_then(TimeSeries::latest).map(|p| p.value),
            dxy_change_pct: self
                .dxy
                .and_then(|s| s.percent_change_over(DXY_CHANGE_DAYS)),
            m2_monthly_change_pct: self.m2.and_then(|s| s.percent_change_over(M2_CHANGE_DAYS)),
        }
    }
}
