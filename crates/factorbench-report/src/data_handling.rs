//! Trial records and the immutable table they are loaded into.
use serde::{Deserialize, Deserializer};

/// Column names every trial CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["N", "phi", "phi_divisors", "strategy", "success", "time_ms"];

/// One benchmark attempt at factoring `n`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrialRecord {
    #[serde(rename = "N")]
    pub n: u64,
    pub phi: u64,
    pub phi_divisors: u32,
    pub strategy: String,
    #[serde(deserialize_with = "deserialize_flag")]
    pub success: bool,
    /// Elapsed milliseconds. Empty cells load as `None`; a `NaN` cell loads
    /// as-is and is skipped by [`TrialRecord::time_s`].
    pub time_ms: Option<f64>,
}

impl TrialRecord {
    /// Elapsed seconds, `None` when the time is missing or not finite.
    pub fn time_s(&self) -> Option<f64> {
        self.time_ms.filter(|ms| ms.is_finite()).map(|ms| ms / 1000.0)
    }
}

/// Accepts `true`/`false` in any case as well as `1`/`0`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid boolean '{}'", raw)))
}

pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// All trials of one benchmark run, in file order.
#[derive(Debug, Clone, Default)]
pub struct TrialTable {
    records: Vec<TrialRecord>,
}

impl TrialTable {
    pub fn new(records: Vec<TrialRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.success).count()
    }

    /// Trials that factored their number.
    pub fn successful(&self) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(|r| r.success)
    }

    /// Trials for a single value of N.
    pub fn with_n(&self, n: u64) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(move |r| r.n == n)
    }

    pub fn unique_n_count(&self) -> usize {
        let mut ns: Vec<u64> = self.records.iter().map(|r| r.n).collect();
        ns.sort_unstable();
        ns.dedup();
        ns.len()
    }

    /// Distinct strategy labels in order of first appearance.
    pub fn strategies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.strategy.as_str()) {
                seen.push(record.strategy.as_str());
            }
        }
        seen
    }
}

impl FromIterator<TrialRecord> for TrialTable {
    fn from_iter<I: IntoIterator<Item = TrialRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(n: u64, strategy: &str, success: bool) -> TrialRecord {
        TrialRecord {
            n,
            phi: n - 1,
            phi_divisors: 4,
            strategy: strategy.to_string(),
            success,
            time_ms: None,
        }
    }

    #[test]
    fn flag_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("yes"), None);
    }

    #[test]
    fn strategies_keep_first_appearance_order() {
        let table: TrialTable = vec![
            trial(15, "smooth", true),
            trial(21, "random", false),
            trial(35, "smooth", true),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.strategies(), vec!["smooth", "random"]);
        assert_eq!(table.unique_n_count(), 3);
        assert_eq!(table.success_count(), 2);
    }
}
