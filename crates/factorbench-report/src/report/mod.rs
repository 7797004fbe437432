//! Figure rendering, the printed summary and the end-to-end report run.
//!
//! Figures are drawn with `plotters` into PNG files sized from
//! [`FigureStyle`](crate::config::FigureStyle); the summary is a plain value
//! whose `Display` output is what gets printed for the paper.
pub mod generator;
pub mod plots;
pub mod summary;

pub use generator::ReportGenerator;
pub use summary::Summary;
