//! End-to-end report runs. These rasterise text through the system
//! sans-serif font.

use std::io::Write;
use std::path::PathBuf;

use factorbench_report::config::ReportConfig;
use factorbench_report::report::generator::{
    STRATEGY_COMPARISON_FILE, SUCCESS_BY_RANGE_FILE, SUCCESS_VS_N_FILE, SUCCESS_VS_PHI_DIVISORS_FILE,
    TIME_VS_N_FILE,
};
use factorbench_report::report::ReportGenerator;

/// Width and height from the IHDR chunk of a PNG file.
fn png_dimensions(path: &std::path::Path) -> (u32, u32) {
    let bytes = std::fs::read(path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{} is not a PNG", path.display());
    let be = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
    (be(16), be(20))
}

fn setup(rows: &str) -> (tempfile::TempDir, ReportConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("benchmark-results.csv");
    let mut file = std::fs::File::create(&input).unwrap();
    writeln!(file, "N,phi,phi_divisors,strategy,success,time_ms").unwrap();
    file.write_all(rows.as_bytes()).unwrap();

    let config = ReportConfig {
        input,
        output_dir: dir.path().join("plots"),
        dpi: 50,
        ..ReportConfig::default()
    };
    (dir, config)
}

const SMOOTH_ROWS: &str = "\
15,8,4,smooth,True,100
15,8,4,smooth,True,140
437,396,18,smooth,True,4000
437,396,18,smooth,False,0
551,504,24,smooth,False,0
1000,400,15,smooth,False,0
";

#[test]
fn writes_the_four_figures() {
    let (_dir, config) = setup(SMOOTH_ROWS);
    let mut out = Vec::new();
    let written = ReportGenerator::new(config.clone()).run_to(&mut out).unwrap();

    let expected: Vec<PathBuf> = [
        SUCCESS_VS_N_FILE,
        SUCCESS_VS_PHI_DIVISORS_FILE,
        TIME_VS_N_FILE,
        SUCCESS_BY_RANGE_FILE,
    ]
    .iter()
    .map(|f| config.output_dir.join(f))
    .collect();
    assert_eq!(written, expected);
    for path in &expected {
        assert!(path.is_file(), "{} missing", path.display());
        assert_eq!(png_dimensions(path), config.figure().pixels());
    }
    assert_eq!(config.figure().pixels(), (500, 300));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Loaded 6 trials"));
    assert!(text.contains("Testing 4 unique numbers"));
    assert!(text.contains("N=437: \u{3c6}=396, 18 divisors, 50% success"));
    assert!(text.contains("COMPLETE - Ready for paper"));
    assert!(text.contains("3. Add random strategy comparison"));
}

#[test]
fn second_run_overwrites_same_files() {
    let (_dir, config) = setup(SMOOTH_ROWS);
    let generator = ReportGenerator::new(config);
    let first = generator.run_to(&mut std::io::sink()).unwrap();
    let bytes: Vec<Vec<u8>> = first.iter().map(|p| std::fs::read(p).unwrap()).collect();

    let second = generator.run_to(&mut std::io::sink()).unwrap();
    assert_eq!(first, second);
    for (path, before) in second.iter().zip(bytes) {
        assert_eq!(std::fs::read(path).unwrap(), before);
    }
}

#[test]
fn second_strategy_adds_comparison_figure() {
    let rows = format!("{}21,12,6,random,True,90\n", SMOOTH_ROWS);
    let (_dir, config) = setup(&rows);
    let written = ReportGenerator::new(config.clone()).run_to(&mut std::io::sink()).unwrap();
    assert_eq!(written.len(), 5);
    assert_eq!(written[4], config.output_dir.join(STRATEGY_COMPARISON_FILE));
}

#[test]
fn missing_input_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        input: dir.path().join("absent.csv"),
        output_dir: dir.path().join("plots"),
        ..ReportConfig::default()
    };
    let mut out = Vec::new();
    let err = ReportGenerator::new(config.clone()).run_to(&mut out).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to open trial data"));
    assert!(!config.output_dir.exists());
    assert_eq!(String::from_utf8(out).unwrap(), "Loading benchmark results...\n");
}
