use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures raised while loading the trial table.
#[derive(Debug)]
pub enum ReportError {
    /// The input file could not be opened or read.
    DataAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    /// One or more expected columns are missing from the header row.
    Schema {
        path: PathBuf,
        missing: Vec<String>,
    },
    /// A data row (1-based, header excluded) could not be parsed.
    InvalidRow { row: usize, reason: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::DataAccess { path, source } => {
                write!(f, "Failed to open trial data {}: {}", path.display(), source)
            }
            ReportError::Schema { path, missing } => write!(
                f,
                "Trial data {} is missing expected column(s): {}",
                path.display(),
                missing.join(", ")
            ),
            ReportError::InvalidRow { row, reason } => {
                write!(f, "Invalid trial record at row {}: {}", row, reason)
            }
        }
    }
}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::DataAccess { source, .. } => Some(source),
            _ => None,
        }
    }
}
