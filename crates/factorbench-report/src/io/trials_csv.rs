//! Benchmark trial CSV reader.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;

use crate::data_handling::{TrialRecord, TrialTable, REQUIRED_COLUMNS};
use crate::error::ReportError;

/// Load the trial table from a CSV file with a header row.
pub fn load_trials<P: AsRef<Path>>(path: P) -> Result<TrialTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReportError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let table = load_trials_from_reader(BufReader::new(file), path)?;
    log::info!("Loaded {} trials from {}", table.len(), path.display());
    Ok(table)
}

/// Load the trial table from any reader. `origin` only labels error messages.
pub fn load_trials_from_reader<R: Read>(reader: R, origin: &Path) -> Result<TrialTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read header row of {}", origin.display()))?
        .clone();

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(ReportError::Schema {
            path: origin.to_path_buf(),
            missing,
        }
        .into());
    }

    let mut records = Vec::new();
    for (row_idx, result) in rdr.deserialize::<TrialRecord>().enumerate() {
        let record = result.map_err(|e| ReportError::InvalidRow {
            row: row_idx + 1,
            reason: e.to_string(),
        })?;
        warn_on_invariants(&record, row_idx + 1);
        records.push(record);
    }

    Ok(TrialTable::new(records))
}

fn missing_columns(headers: &StringRecord) -> Vec<String> {
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect()
}

// Rows are kept either way; the upstream benchmark owns these invariants.
fn warn_on_invariants(record: &TrialRecord, row: usize) {
    if record.n == 0 {
        log::warn!("Row {}: N must be positive", row);
    }
    if record.phi_divisors == 0 {
        log::warn!("Row {}: phi_divisors must be at least 1 (N={})", row, record.n);
    }
    if let Some(ms) = record.time_ms {
        if ms < 0.0 {
            log::warn!("Row {}: negative time_ms {} (N={})", row, ms, record.n);
        }
    }
}
