//! factorbench-report: figures and summary statistics for quantum factoring
//! benchmark runs.
//!
//! The crate loads the trial CSV written by the benchmark harness into an
//! immutable [`TrialTable`](data_handling::TrialTable), derives grouped views
//! of it (success rate by N, by divisor count of phi(N), by N range, and time
//! to factor), renders each view to a PNG figure, and prints a plain-text
//! summary block for the paper.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod report;
pub mod stats;
