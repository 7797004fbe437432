pub mod trials_csv;

pub use trials_csv::{load_trials, load_trials_from_reader};
