use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::ReportConfig;
use crate::data_handling::TrialTable;
use crate::io::load_trials;
use crate::report::plots;
use crate::report::summary::{Summary, RULE};
use crate::stats;

pub const SUCCESS_VS_N_FILE: &str = "success_vs_n.png";
pub const SUCCESS_VS_PHI_DIVISORS_FILE: &str = "success_vs_phi_divisors.png";
pub const TIME_VS_N_FILE: &str = "time_vs_n.png";
pub const SUCCESS_BY_RANGE_FILE: &str = "success_by_range.png";
pub const STRATEGY_COMPARISON_FILE: &str = "success_vs_n_by_strategy.png";

/// Drives one report run: load the trial table, write every figure, print
/// the summary.
#[derive(Debug, Clone, Default)]
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn load(&self) -> Result<TrialTable> {
        load_trials(&self.config.input)
            .with_context(|| format!("Failed to load benchmark results from {}", self.config.input.display()))
    }

    fn output_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!("Failed to create output directory: {}", self.config.output_dir.display())
        })?;
        Ok(self.config.output_dir.join(file_name))
    }

    pub fn success_rate_by_n(&self, table: &TrialTable) -> Result<PathBuf> {
        let path = self.output_path(SUCCESS_VS_N_FILE)?;
        let points = stats::success_rate_by_n(table);
        log::debug!("Plotting success rate for {} values of N", points.len());
        plots::plot_success_vs_n(
            &points,
            self.config.hard_limit_n,
            self.config.run_conditions.as_deref(),
            &self.config.figure(),
            &path,
        )?;
        Ok(path)
    }

    pub fn success_rate_by_phi_divisors(&self, table: &TrialTable) -> Result<PathBuf> {
        let path = self.output_path(SUCCESS_VS_PHI_DIVISORS_FILE)?;
        let points = stats::success_rate_by_phi_divisors(table);
        log::debug!("Plotting success rate for {} divisor counts", points.len());
        plots::plot_success_vs_phi_divisors(&points, &self.config.figure(), &path)?;
        Ok(path)
    }

    pub fn time_to_factor(&self, table: &TrialTable) -> Result<PathBuf> {
        let path = self.output_path(TIME_VS_N_FILE)?;
        let points = stats::time_to_factor_by_n(table);
        log::debug!("Plotting time to factor for {} values of N", points.len());
        plots::plot_time_vs_n(&points, &self.config.figure(), &path)?;
        Ok(path)
    }

    pub fn success_by_range(&self, table: &TrialTable) -> Result<PathBuf> {
        let path = self.output_path(SUCCESS_BY_RANGE_FILE)?;
        let ranges = stats::success_by_range(table);
        for range in &ranges {
            log::trace!("{}: {}/{}", range.range.label(), range.successes, range.count);
        }
        plots::plot_success_by_range(&ranges, &self.config.figure(), &path)?;
        Ok(path)
    }

    /// Only drawn when the table holds more than one strategy.
    pub fn strategy_comparison(&self, table: &TrialTable) -> Result<Option<PathBuf>> {
        if table.strategies().len() < 2 {
            log::debug!("Single strategy in trial data; skipping strategy comparison");
            return Ok(None);
        }
        let path = self.output_path(STRATEGY_COMPARISON_FILE)?;
        let curves = stats::success_rate_by_strategy(table);
        plots::plot_strategy_comparison(&curves, &self.config.figure(), &path)?;
        Ok(Some(path))
    }

    pub fn summary(&self, table: &TrialTable) -> Summary {
        Summary::from_table(table, &self.config.highlight_n)
    }

    /// Full run printing progress and the summary to stdout.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Full run writing progress and the summary to `out`. Returns the
    /// figures written, in order.
    pub fn run_to<W: Write>(&self, out: &mut W) -> Result<Vec<PathBuf>> {
        writeln!(out, "Loading benchmark results...")?;
        let table = self.load()?;

        writeln!(out, "\nLoaded {} trials", table.len())?;
        writeln!(out, "Testing {} unique numbers", table.unique_n_count())?;
        writeln!(out, "Strategies: {}", table.strategies().join(", "))?;

        writeln!(out, "\nGenerating plots...")?;
        let mut written = Vec::new();
        let renders: [fn(&Self, &TrialTable) -> Result<PathBuf>; 4] = [
            Self::success_rate_by_n,
            Self::success_rate_by_phi_divisors,
            Self::time_to_factor,
            Self::success_by_range,
        ];
        for render in renders {
            let path = render(self, &table)?;
            writeln!(out, "Saved: {}", path.display())?;
            written.push(path);
        }
        let compared = self.strategy_comparison(&table)?;
        if let Some(path) = &compared {
            writeln!(out, "Saved: {}", path.display())?;
            written.push(path.clone());
        }

        write!(out, "{}", self.summary(&table))?;

        writeln!(out, "\n{}", RULE)?;
        writeln!(out, "COMPLETE - Ready for paper")?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "\nNext steps:")?;
        writeln!(out, "  1. Review {}/ directory", self.config.output_dir.display())?;
        writeln!(out, "  2. Write paper sections with these figures")?;
        if compared.is_none() {
            writeln!(out, "  3. Add random strategy comparison (when random data available)")?;
        }

        log::info!("Wrote {} figures to {}", written.len(), self.config.output_dir.display());
        Ok(written)
    }
}
