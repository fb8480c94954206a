//! Multi-factor risk CLI command.
//!
//! Reads normalized factor readings from a JSON array such as
//! `[{"factor": "rsi", "normalized_value": 0.62}]` and prints the composite
//! risk level with its per-factor breakdown.

use anyhow::{Context, Result};
use clap::Args;
use market_signal_core::AppConfig;
use market_signal_engine::{Describe, FactorReading, RiskComposition, SignalEngine};
use std::path::{Path, PathBuf};

/// Arguments for the risk command.
#[derive(Args, Debug, Clone)]
pub struct RiskArgs {
    /// JSON file holding an array of factor readings
    #[arg(short, long)]
    pub input: PathBuf,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn load_readings(path: &Path) -> Result<Vec<FactorReading>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let readings: Vec<FactorReading> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse factor readings in {}", path.display()))?;
    Ok(readings)
}

fn print_breakdown(composition: &RiskComposition) {
    println!(
        "{:<16} {:>10} {:>10} {:>10} {:>12}",
        "Factor", "Value", "Weight", "Effective", "Contribution"
    );
    for factor in &composition.factors {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"));
        println!(
            "{:<16} {:>10} {:>10.2} {:>10} {:>12}",
            factor.factor_type.name(),
            fmt(factor.normalized_value),
            factor.weight,
            fmt(factor.effective_weight),
            fmt(factor.contribution),
        );
    }
    println!();

    match (composition.risk_level, composition.category()) {
        (Some(level), Some(category)) => {
            println!("Composite risk: {level:.3} ({})", category.label());
        }
        _ => println!("Composite risk: unavailable (no factor data)"),
    }
}

/// Runs the risk command.
///
/// # Errors
/// Returns an error if the readings cannot be loaded, the configured weights
/// are invalid, or a reading is out of range.
pub fn run_risk(args: RiskArgs, config: &AppConfig) -> Result<()> {
    let engine = SignalEngine::from_config(config)?;
    let readings = load_readings(&args.input)?;
    let composition = engine.compose_risk(&readings)?;

    tracing::info!(
        available = composition.available_count(),
        risk_level = ?composition.risk_level,
        "composed risk"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&composition)?);
    } else {
        print_breakdown(&composition);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_signal_engine::RiskFactorType;
    use std::io::Write;

    #[test]
    fn loads_readings_with_optional_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"factor": "log_regression", "raw_value": 1.3, "normalized_value": 0.7}},
                {{"factor": "funding_rate"}}
            ]"#
        )
        .unwrap();

        let readings = load_readings(file.path()).unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].factor_type, RiskFactorType::LogRegression);
        assert_eq!(readings[0].raw_value, Some(1.3));
        assert!(!readings[1].is_available());
    }

    #[test]
    fn unknown_factor_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"factor": "hash_rate", "normalized_value": 0.5}}]"#).unwrap();
        assert!(load_readings(file.path()).is_err());
    }
}
