//! Bullish/bearish voting bands for regime classification.
//!
//! These bands are separate from the correlation strength thresholds and
//! must not be mixed up with them.

use market_signal_core::{MacroIndicator, MacroSnapshot, SignalVote};

/// VIX level below which volatility supports risk assets.
pub const VIX_BULLISH_BELOW: f64 = 18.0;
/// VIX level above which volatility warns against risk assets.
pub const VIX_BEARISH_ABOVE: f64 = 25.0;
/// DXY percent change below which a weakening dollar is bullish.
pub const DXY_BULLISH_BELOW: f64 = -0.2;
/// DXY percent change above which a strengthening dollar is bearish.
pub const DXY_BEARISH_ABOVE: f64 = 0.2;
/// M2 monthly percent change above which liquidity expansion is bullish.
pub const M2_BULLISH_ABOVE: f64 = 0.5;
/// M2 monthly percent change below which liquidity contraction is bearish.
pub const M2_BEARISH_BELOW: f64 = -0.5;

/// Vote of a single indicator reading.
///
/// Returns None when the reading is missing, so the indicator does not count
/// towards the number of signals.
#[must_use]
pub fn vote(indicator: MacroIndicator, value: Option<f64>) -> Option<SignalVote> {
    let v = value.filter(|v| v.is_finite())?;
    let vote = match indicator {
        MacroIndicator::Vix if v < VIX_BULLISH_BELOW => SignalVote::Bullish,
        MacroIndicator::Vix if v > VIX_BEARISH_ABOVE => SignalVote::Bearish,
        MacroIndicator::Dxy if v < DXY_BULLISH_BELOW => SignalVote::Bullish,
        MacroIndicator::Dxy if v > DXY_BEARISH_ABOVE => SignalVote::Bearish,
        MacroIndicator::M2 if v > M2_BULLISH_ABOVE => SignalVote::Bullish,
        MacroIndicator::M2 if v < M2_BEARISH_BELOW => SignalVote::Bearish,
        _ => SignalVote::Neutral,
    };
    Some(vote)
}

/// Votes of every indicator in a snapshot, in `MacroIndicator::ALL` order.
#[must_use]
pub fn snapshot_votes(snapshot: &MacroSnapshot) -> [(MacroIndicator, Option<SignalVote>); 3] {
    MacroIndicator::ALL.map(|indicator| (indicator, vote(indicator, snapshot.get(indicator))))
}
