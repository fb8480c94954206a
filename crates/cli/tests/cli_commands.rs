//! Runs the `market-signal` binary end to end from a scratch directory.

use std::path::Path;
use std::process::{Command, Output};

fn market_signal(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_market-signal"))
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to launch market-signal")
}

#[test]
fn summary_reports_zscore_as_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("vix.csv"),
        "date,value\n2024-01-01,2\n2024-01-02,4\n2024-01-03,4\n2024-01-04,4\n\
         2024-01-05,5\n2024-01-06,5\n2024-01-07,7\n2024-01-08,9\n2024-01-09,9\n",
    )
    .unwrap();

    let output = market_signal(dir.path(), &["summary", "--input", "vix.csv", "--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["mean"], 5.0);
    assert_eq!(summary["standard_deviation"], 2.0);
    assert_eq!(summary["z_score"], 2.0);
    assert_eq!(summary["rarity"], 44);
}

#[test]
fn risk_rejects_invalid_weights_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.toml"), "[risk_weights]\nrsi = 0.9\n").unwrap();
    std::fs::write(
        dir.path().join("readings.json"),
        r#"[{"factor": "rsi", "normalized_value": 0.5}]"#,
    )
    .unwrap();

    let output = market_signal(
        dir.path(),
        &["--config", "bad.toml", "risk", "--input", "readings.json"],
    );
    assert!(!output.status.success());
}

#[test]
fn risk_without_factors_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readings.json"), r#"[{"factor": "rsi"}]"#).unwrap();

    let output = market_signal(dir.path(), &["risk", "--input", "readings.json", "--json"]);
    assert!(output.status.success());

    let composition: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(composition["risk_level"].is_null());
    assert_eq!(composition["factors"].as_array().unwrap().len(), 6);
}

#[test]
fn regime_transitions_persist_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state_arg = state.to_str().unwrap();

    let first = market_signal(
        dir.path(),
        &["regime", "--vix", "15", "--dxy-change", "-0.4", "--state", state_arg],
    );
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(!String::from_utf8_lossy(&first.stdout).contains("Regime change"));

    let second = market_signal(
        dir.path(),
        &["regime", "--vix", "31", "--dxy-change", "0.9", "--state", state_arg],
    );
    let stdout = String::from_utf8_lossy(&second.stdout);
    assert!(stdout.contains("Regime change: Risk-On -> Risk-Off"), "{stdout}");

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state).unwrap()).unwrap();
    assert_eq!(saved["last_known_regime"], "risk_off");
}

#[test]
fn profile_overlay_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("config")).unwrap();
    std::fs::write(
        dir.path().join("config/Config.strict.toml"),
        "[statistics]\nwindow_size = 1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("vix.csv"), "date,value\n2024-01-01,1\n2024-01-02,2\n").unwrap();

    let plain = market_signal(dir.path(), &["summary", "--input", "vix.csv"]);
    assert!(plain.status.success(), "{}", String::from_utf8_lossy(&plain.stderr));

    let strict = market_signal(
        dir.path(),
        &["--profile", "strict", "summary", "--input", "vix.csv"],
    );
    assert!(!strict.status.success());
}
