//! Integration tests for the grouped views behind each figure.

use std::path::Path;

use factorbench_report::data_handling::{TrialRecord, TrialTable};
use factorbench_report::io::load_trials_from_reader;
use factorbench_report::stats::{
    mean_success_time_s, success_by_range, success_rate_by_n, success_rate_by_strategy,
    time_to_factor_by_n, NRange,
};

fn trial(n: u64, strategy: &str, success: bool, time_ms: Option<f64>) -> TrialRecord {
    TrialRecord {
        n,
        phi: n - 1,
        phi_divisors: 6,
        strategy: strategy.to_string(),
        success,
        time_ms,
    }
}

fn mixed_table() -> TrialTable {
    vec![
        trial(15, "smooth", true, Some(100.0)),
        trial(15, "smooth", true, Some(300.0)),
        trial(437, "smooth", false, Some(9000.0)),
        trial(437, "smooth", true, Some(2000.0)),
        trial(551, "random", false, None),
        trial(1100, "random", true, Some(50000.0)),
        trial(1500, "smooth", true, Some(1.0)),
    ]
    .into_iter()
    .collect()
}

// ---------------------------------------------------------------------------
// Success rate by N
// ---------------------------------------------------------------------------

#[test]
fn group_counts_sum_to_row_count() {
    let table = mixed_table();
    let total: usize = success_rate_by_n(&table).iter().map(|p| p.count).sum();
    assert_eq!(total, table.len());
}

#[test]
fn groups_are_sorted_by_n() {
    let ns: Vec<u64> = success_rate_by_n(&mixed_table()).iter().map(|p| p.n).collect();
    assert_eq!(ns, vec![15, 437, 551, 1100, 1500]);
}

#[test]
fn two_row_example_at_400() {
    let table: TrialTable = vec![
        trial(400, "smooth", true, Some(1000.0)),
        trial(400, "smooth", false, Some(0.0)),
    ]
    .into_iter()
    .collect();

    let point = &success_rate_by_n(&table)[0];
    assert_eq!(point.n, 400);
    assert_eq!(point.rate, 50.0);
    assert_eq!(point.count, 2);

    let time = &time_to_factor_by_n(&table)[0];
    assert_eq!(time.n, 400);
    assert_eq!(time.mean_s, 1.0);
}

// ---------------------------------------------------------------------------
// Time to factor
// ---------------------------------------------------------------------------

#[test]
fn failed_trials_never_contribute_time() {
    let table = mixed_table();
    let times = time_to_factor_by_n(&table);
    let at_437 = times.iter().find(|p| p.n == 437).unwrap();
    // the 9s failure is ignored
    assert_eq!(at_437.count, 1);
    assert_eq!(at_437.mean_s, 2.0);
    // 551 has no success at all
    assert!(times.iter().all(|p| p.n != 551));
    assert!(times.iter().all(|p| p.mean_s >= 0.0));
}

#[test]
fn overall_mean_time_uses_successes_only() {
    let table = mixed_table();
    let expected = (0.1 + 0.3 + 2.0 + 50.0 + 0.001) / 5.0;
    assert!((mean_success_time_s(&table) - expected).abs() < 1e-12);
}

#[test]
fn no_successes_means_no_mean_time() {
    let table: TrialTable = vec![trial(21, "smooth", false, Some(10.0))].into_iter().collect();
    assert!(time_to_factor_by_n(&table).is_empty());
    assert!(mean_success_time_s(&table).is_nan());
}

#[test]
fn nan_times_are_skipped() {
    let csv = "\
N,phi,phi_divisors,strategy,success,time_ms
15,8,4,smooth,True,NaN
15,8,4,smooth,True,100
21,12,6,smooth,True,200
";
    let table = load_trials_from_reader(csv.as_bytes(), Path::new("trials.csv")).unwrap();
    assert!((mean_success_time_s(&table) - 0.15).abs() < 1e-12);

    let times = time_to_factor_by_n(&table);
    assert_eq!(times.len(), 2);
    assert_eq!(times[0].n, 15);
    assert_eq!(times[0].count, 1);
    assert!((times[0].mean_s - 0.1).abs() < 1e-12);
    assert_eq!(times[0].std_s, None);
}

// ---------------------------------------------------------------------------
// Range bins
// ---------------------------------------------------------------------------

#[test]
fn out_of_span_numbers_are_excluded_from_ranges() {
    let stats = success_by_range(&mixed_table());
    assert_eq!(stats.len(), 5);
    let counted: usize = stats.iter().map(|s| s.count).sum();
    // N=1500 lies outside (0, 1200]
    assert_eq!(counted, 6);

    let low = &stats[NRange::UpTo300 as usize];
    assert_eq!((low.successes, low.count), (2, 2));
    assert_eq!(low.rate(), Some(100.0));

    let mid = &stats[NRange::To500 as usize];
    assert_eq!(mid.rate(), Some(50.0));

    let empty = &stats[NRange::To900 as usize];
    assert_eq!(empty.count, 0);
    assert_eq!(empty.rate(), None);
}

// ---------------------------------------------------------------------------
// Strategy comparison
// ---------------------------------------------------------------------------

#[test]
fn strategies_get_separate_curves() {
    let curves = success_rate_by_strategy(&mixed_table());
    assert_eq!(curves.len(), 2);
    let random: Vec<u64> = curves["random"].iter().map(|p| p.n).collect();
    assert_eq!(random, vec![551, 1100]);
    let smooth_total: usize = curves["smooth"].iter().map(|p| p.count).sum();
    assert_eq!(smooth_total, 5);
}
