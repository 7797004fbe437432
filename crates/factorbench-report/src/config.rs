use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings for a single report generation run.
///
/// Every field has a default, so an empty JSON object (or no config file at
/// all) reproduces the fixed layout: `benchmark-results.csv` in, `plots/` out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// CSV file holding one row per benchmark trial.
    pub input: PathBuf,
    /// Directory the figures are written to. Created if absent.
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub figure_width_in: f64,
    pub figure_height_in: f64,
    /// Values of N looked up in the summary as non-monotonic difficulty examples.
    pub highlight_n: Vec<u64>,
    /// Position of the vertical reference line on the success-vs-N figure.
    pub hard_limit_n: u64,
    /// Second title line of the success-vs-N figure describing the run conditions.
    pub run_conditions: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("benchmark-results.csv"),
            output_dir: PathBuf::from("plots"),
            dpi: 300,
            figure_width_in: 10.0,
            figure_height_in: 6.0,
            highlight_n: vec![437, 551],
            hard_limit_n: 900,
            run_conditions: Some("(85% noise, T\u{2082}=5ms, 200k shots/base)".to_string()),
        }
    }
}

impl ReportConfig {
    /// Figure geometry derived from the configured size and resolution.
    pub fn figure(&self) -> FigureStyle {
        FigureStyle {
            width_in: self.figure_width_in,
            height_in: self.figure_height_in,
            dpi: self.dpi,
        }
    }
}

/// Physical figure size. Pixel dimensions and font sizes scale with `dpi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureStyle {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl FigureStyle {
    pub fn pixels(&self) -> (u32, u32) {
        (self.inches(self.width_in), self.inches(self.height_in))
    }

    /// Pixel length of `inches` at the configured resolution.
    pub fn inches(&self, inches: f64) -> u32 {
        (inches * self.dpi as f64).round().max(1.0) as u32
    }

    /// Pixel height of a font given in typographic points.
    pub fn pt(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }
}

/// Load a report configuration from a JSON file.
pub fn load_report_config<P: AsRef<Path>>(path: P) -> Result<ReportConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: ReportConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}
