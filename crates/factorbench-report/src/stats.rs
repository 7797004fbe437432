//! Grouped descriptive statistics over the trial table.
//!
//! Every view here is derived on demand from a borrowed [`TrialTable`] and
//! returned in ascending key order, matching how the figures lay out their
//! x axis.
use std::collections::BTreeMap;

use statrs::statistics::Statistics;

use crate::data_handling::{TrialRecord, TrialTable};

/// Mean and sample standard deviation (n - 1 denominator).
///
/// The deviation is `None` for fewer than two values, and the mean of an empty
/// slice is NaN.
pub fn mean_std(values: &[f64]) -> (f64, Option<f64>) {
    let mean = values.mean();
    let std = if values.len() < 2 {
        None
    } else {
        Some(values.std_dev())
    };
    (mean, std)
}

fn success_values<'a, I>(records: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a TrialRecord>,
{
    records
        .into_iter()
        .map(|r| if r.success { 1.0 } else { 0.0 })
        .collect()
}

/// Success rate for one value of N, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessRatePoint {
    pub n: u64,
    pub rate: f64,
    pub std: Option<f64>,
    pub count: usize,
}

/// Group by N and compute the success rate, its spread and the group size.
pub fn success_rate_by_n(table: &TrialTable) -> Vec<SuccessRatePoint> {
    success_rate_by_n_of(table.records())
}

fn success_rate_by_n_of<'a, I>(records: I) -> Vec<SuccessRatePoint>
where
    I: IntoIterator<Item = &'a TrialRecord>,
{
    let mut groups: BTreeMap<u64, Vec<&TrialRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.n).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(n, group)| {
            let (mean, std) = mean_std(&success_values(group.iter().copied()));
            SuccessRatePoint {
                n,
                rate: mean * 100.0,
                std: std.map(|s| s * 100.0),
                count: group.len(),
            }
        })
        .collect()
}

/// Success rate curves keyed by strategy label.
pub fn success_rate_by_strategy(table: &TrialTable) -> BTreeMap<String, Vec<SuccessRatePoint>> {
    table
        .strategies()
        .into_iter()
        .map(|strategy| {
            let points = success_rate_by_n_of(
                table.records().iter().filter(|r| r.strategy == strategy),
            );
            (strategy.to_string(), points)
        })
        .collect()
}

/// Success rate for all trials sharing a divisor count of phi(N).
#[derive(Debug, Clone, PartialEq)]
pub struct DivisorPoint {
    pub phi_divisors: u32,
    pub rate: f64,
    pub mean_n: f64,
    pub count: usize,
}

pub fn success_rate_by_phi_divisors(table: &TrialTable) -> Vec<DivisorPoint> {
    let mut groups: BTreeMap<u32, Vec<&TrialRecord>> = BTreeMap::new();
    for record in table.records() {
        groups.entry(record.phi_divisors).or_default().push(record);
    }

    groups
        .into_iter()
        .map(|(phi_divisors, group)| {
            let ns: Vec<f64> = group.iter().map(|r| r.n as f64).collect();
            DivisorPoint {
                phi_divisors,
                rate: success_values(group.iter().copied()).mean() * 100.0,
                mean_n: ns.mean(),
                count: group.len(),
            }
        })
        .collect()
}

/// Time to factor N over successful trials, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimePoint {
    pub n: u64,
    pub mean_s: f64,
    pub std_s: Option<f64>,
    pub count: usize,
}

/// Only successful trials with a recorded time contribute; values of N with
/// none of those are absent from the result.
pub fn time_to_factor_by_n(table: &TrialTable) -> Vec<TimePoint> {
    let mut groups: BTreeMap<u64, Vec<f64>> = BTreeMap::new();
    for record in table.successful() {
        if let Some(seconds) = record.time_s() {
            groups.entry(record.n).or_default().push(seconds);
        }
    }

    groups
        .into_iter()
        .map(|(n, times)| {
            let (mean_s, std_s) = mean_std(&times);
            TimePoint {
                n,
                mean_s,
                std_s,
                count: times.len(),
            }
        })
        .collect()
}

/// Mean time to factor over every successful trial, in seconds. NaN when
/// nothing succeeded.
pub fn mean_success_time_s(table: &TrialTable) -> f64 {
    let times: Vec<f64> = table.successful().filter_map(|r| r.time_s()).collect();
    times.mean()
}

/// The five fixed bins of N, each half-open on the left: `(lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NRange {
    UpTo300,
    To500,
    To700,
    To900,
    To1200,
}

impl NRange {
    pub const ALL: [NRange; 5] = [
        NRange::UpTo300,
        NRange::To500,
        NRange::To700,
        NRange::To900,
        NRange::To1200,
    ];

    pub fn bounds(self) -> (u64, u64) {
        match self {
            NRange::UpTo300 => (0, 300),
            NRange::To500 => (300, 500),
            NRange::To700 => (500, 700),
            NRange::To900 => (700, 900),
            NRange::To1200 => (900, 1200),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NRange::UpTo300 => "100-300",
            NRange::To500 => "300-500",
            NRange::To700 => "500-700",
            NRange::To900 => "700-900",
            NRange::To1200 => "900-1200",
        }
    }

    /// Bin holding `n`, or `None` outside (0, 1200].
    pub fn classify(n: u64) -> Option<NRange> {
        NRange::ALL.into_iter().find(|range| range.contains(n))
    }

    pub fn contains(self, n: u64) -> bool {
        let (lo, hi) = self.bounds();
        n > lo && n <= hi
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeStats {
    pub range: NRange,
    pub successes: usize,
    pub count: usize,
}

impl RangeStats {
    /// Success rate in percent, `None` for an empty bin.
    pub fn rate(&self) -> Option<f64> {
        (self.count > 0).then(|| self.successes as f64 / self.count as f64 * 100.0)
    }
}

/// Colour class of a range bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBand {
    /// Every trial succeeded.
    Full,
    /// More than half succeeded.
    Majority,
    Minority,
}

impl RateBand {
    pub fn from_rate(rate: f64) -> Self {
        if rate == 100.0 {
            RateBand::Full
        } else if rate > 50.0 {
            RateBand::Majority
        } else {
            RateBand::Minority
        }
    }
}

/// Success counts for all five bins, in bin order. Empty bins are included.
pub fn success_by_range(table: &TrialTable) -> Vec<RangeStats> {
    let mut stats: Vec<RangeStats> = NRange::ALL
        .into_iter()
        .map(|range| RangeStats {
            range,
            successes: 0,
            count: 0,
        })
        .collect();

    for record in table.records() {
        if let Some(range) = NRange::classify(record.n) {
            let slot = &mut stats[range as usize];
            slot.count += 1;
            if record.success {
                slot.successes += 1;
            }
        }
    }

    stats
}
