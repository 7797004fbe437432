use std::fmt;

use crate::data_handling::TrialTable;
use crate::stats::{mean_success_time_s, success_by_range, RangeStats};

pub const RULE: &str = "============================================================";

/// Headline numbers quoted in the paper.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_trials: usize,
    pub total_successes: usize,
    pub ranges: Vec<RangeStats>,
    pub mean_success_time_s: f64,
    pub examples: Vec<NonMonotonicExample>,
}

/// A number whose difficulty is explained by phi(N) rather than its size.
#[derive(Debug, Clone, PartialEq)]
pub struct NonMonotonicExample {
    pub n: u64,
    pub phi: u64,
    pub phi_divisors: u32,
    pub rate: f64,
}

impl Summary {
    /// Values of `highlight_n` missing from the table are skipped.
    pub fn from_table(table: &TrialTable, highlight_n: &[u64]) -> Self {
        let examples = highlight_n
            .iter()
            .filter_map(|&n| {
                let rows: Vec<_> = table.with_n(n).collect();
                let first = rows.first()?;
                let successes = rows.iter().filter(|r| r.success).count();
                Some(NonMonotonicExample {
                    n,
                    phi: first.phi,
                    phi_divisors: first.phi_divisors,
                    rate: successes as f64 / rows.len() as f64 * 100.0,
                })
            })
            .collect();

        Self {
            total_trials: table.len(),
            total_successes: table.success_count(),
            ranges: success_by_range(table),
            mean_success_time_s: mean_success_time_s(table),
            examples,
        }
    }

    /// Overall success rate in percent. NaN for an empty table.
    pub fn overall_rate(&self) -> f64 {
        self.total_successes as f64 / self.total_trials as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SUMMARY STATISTICS FOR PAPER")?;
        writeln!(f, "{}", RULE)?;

        writeln!(f, "\nOverall:")?;
        writeln!(f, "  Trials: {}", self.total_trials)?;
        writeln!(f, "  Successes: {}", self.total_successes)?;
        writeln!(f, "  Success rate: {:.1}%", self.overall_rate())?;

        writeln!(f, "\nSuccess rate by range:")?;
        for stats in &self.ranges {
            if let Some(rate) = stats.rate() {
                writeln!(
                    f,
                    "  N \u{2208} {}: {}/{} ({:.0}%)",
                    stats.range.label(),
                    stats.successes,
                    stats.count,
                    rate
                )?;
            }
        }

        writeln!(
            f,
            "\nAverage time to factor (successful): {:.1}s",
            self.mean_success_time_s
        )?;

        writeln!(f, "\nNon-monotonic difficulty examples:")?;
        for example in &self.examples {
            writeln!(
                f,
                "  N={}: \u{3c6}={}, {} divisors, {:.0}% success",
                example.n, example.phi, example.phi_divisors, example.rate
            )?;
        }
        Ok(())
    }
}
