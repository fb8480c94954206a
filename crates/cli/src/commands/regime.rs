//! Macro regime CLI command.
//!
//! Classifies the regime from the current VIX level, DXY percent change, and
//! M2 monthly percent change, then runs change detection against the JSON
//! state file so repeated invocations behave like periodic refreshes.

use anyhow::Result;
use clap::{Args, ValueEnum};
use market_signal_core::{AppConfig, MacroIndicator, MacroSnapshot};
use market_signal_engine::{
    Describe, JsonFileRegimeStore, MacroReport, RegimeChangeDetector, SignalEngine,
};
use std::path::PathBuf;
use std::sync::Arc;

use crate::notifier::LogNotifier;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

/// Arguments for the regime command.
#[derive(Args, Debug, Clone)]
pub struct RegimeArgs {
    /// Current VIX level
    #[arg(long)]
    pub vix: Option<f64>,

    /// DXY percent change
    #[arg(long, allow_hyphen_values = true)]
    pub dxy_change: Option<f64>,

    /// M2 monthly percent change
    #[arg(long, allow_hyphen_values = true)]
    pub m2_change: Option<f64>,

    /// Regime state file (defaults to the configured path)
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Turn regime change notifications on or off
    #[arg(long, value_enum)]
    pub notifications: Option<Toggle>,

    /// Forget the tracked regime before classifying
    #[arg(long)]
    pub reset: bool,
}

impl RegimeArgs {
    fn snapshot(&self) -> MacroSnapshot {
        MacroSnapshot {
            vix_level: self.vix,
            dxy_change_pct: self.dxy_change,
            m2_monthly_change_pct: self.m2_change,
        }
    }
}

fn print_report(report: &MacroReport) {
    println!("{:<6} {:>10} {:>10} {:>12}", "Index", "Reading", "Vote", "Correlation");
    for (indicator, vote) in report.assessment.votes {
        let reading = report
            .snapshot
            .get(indicator)
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        let vote = vote.map_or("no data", |v| v.label());
        let strength = match indicator {
            MacroIndicator::Vix => report.strengths.vix,
            MacroIndicator::Dxy => report.strengths.dxy,
            MacroIndicator::M2 => report.strengths.m2,
        };
        println!(
            "{:<6} {:>10} {:>10} {:>12}",
            indicator.name(),
            reading,
            vote,
            strength.label()
        );
    }
    println!();
    println!(
        "Regime: {} ({} bullish, {} bearish, {} signals)",
        report.assessment.regime.label(),
        report.assessment.bullish,
        report.assessment.bearish,
        report.assessment.total_signals
    );
}

/// Runs the regime command.
///
/// # Errors
/// Returns an error if the configuration is invalid or an explicit state
/// update (reset, notification toggle) cannot be written.
pub async fn run_regime(args: RegimeArgs, config: &AppConfig) -> Result<()> {
    let engine = SignalEngine::from_config(config)?;
    let path = args
        .state
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.regime.state_path));
    let fresh_install = !path.exists();

    let store = Arc::new(JsonFileRegimeStore::new(&path));
    let detector = RegimeChangeDetector::new(store, Arc::new(LogNotifier));

    if fresh_install {
        detector
            .set_notifications_enabled(config.regime.notifications_enabled)
            .await?;
    }
    if args.reset {
        detector.reset().await?;
    }
    if let Some(toggle) = args.notifications {
        detector
            .set_notifications_enabled(toggle == Toggle::On)
            .await?;
    }

    let report = engine.macro_report(&args.snapshot());
    print_report(&report);

    match detector.check_regime_change(report.assessment.regime).await {
        Some(change) => println!(
            "Regime change: {} -> {}",
            change.from.label(),
            change.to.label()
        ),
        None => {
            let state = detector.state().await;
            match state.last_regime_change {
                Some(since) if state.is_tracking() => {
                    println!("No change since {}", since.format("%Y-%m-%d %H:%M UTC"));
                }
                _ => println!("Regime not tracked yet"),
            }
        }
    }

    Ok(())
}
