//! Integration tests for configuration loading and command line overrides.

use std::path::PathBuf;

use factorbench_cli::input::{build_command, config_from_arguments};
use factorbench_report::config::{load_report_config, ReportConfig};

// ---------------------------------------------------------------------------
// ReportConfig defaults & serialization
// ---------------------------------------------------------------------------

#[test]
fn report_config_default_values() {
    let cfg = ReportConfig::default();
    assert_eq!(cfg.input, PathBuf::from("benchmark-results.csv"));
    assert_eq!(cfg.output_dir, PathBuf::from("plots"));
    assert_eq!(cfg.dpi, 300);
    assert_eq!(cfg.hard_limit_n, 900);
    assert_eq!(cfg.highlight_n, vec![437, 551]);
}

#[test]
fn report_config_round_trips_json() {
    let cfg = ReportConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    let cfg2: ReportConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg.input, cfg2.input);
    assert_eq!(cfg.run_conditions, cfg2.run_conditions);
}

#[test]
fn report_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, r#"{"output_dir": "figs", "highlight_n": [221]}"#).unwrap();
    let cfg = load_report_config(&path).unwrap();
    assert_eq!(cfg.output_dir, PathBuf::from("figs"));
    assert_eq!(cfg.highlight_n, vec![221]);
    assert_eq!(cfg.dpi, 300);
}

#[test]
fn report_config_rejects_bad_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_report_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

// ---------------------------------------------------------------------------
// Argument overrides
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_keep_defaults() {
    let matches = build_command().try_get_matches_from(["factorbench"]).unwrap();
    let cfg = config_from_arguments(&matches).unwrap();
    assert_eq!(cfg.input, PathBuf::from("benchmark-results.csv"));
    assert_eq!(cfg.output_dir, PathBuf::from("plots"));
}

#[test]
fn arguments_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, r#"{"input": "a.csv", "output_dir": "from_file", "dpi": 72}"#).unwrap();

    let matches = build_command()
        .try_get_matches_from([
            "factorbench",
            path.to_str().unwrap(),
            "--output-dir",
            "from_cli",
        ])
        .unwrap();
    let cfg = config_from_arguments(&matches).unwrap();
    assert_eq!(cfg.input, PathBuf::from("a.csv"));
    assert_eq!(cfg.output_dir, PathBuf::from("from_cli"));
    assert_eq!(cfg.dpi, 72);
}

#[test]
fn dpi_below_minimum_is_rejected() {
    let result = build_command().try_get_matches_from(["factorbench", "--dpi", "5"]);
    assert!(result.is_err());
}
