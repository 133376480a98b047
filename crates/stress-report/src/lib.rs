//! # stress-report
//!
//! Presentation of stress test results as text, CSV and JSON.
//!
//! - [`ResultsTable`]: position and aggregate rows with one column per stress level
//! - [`summarize_results`]: worst/best stress level per aggregate
//! - [`PnlHeatmap`]: colored position x stress-level grid
//! - [`compare_scenarios`]: the same positions across several scenarios

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compare;
pub mod error;
pub mod heatmap;
pub mod summary;
pub mod table;

pub use compare::{compare_scenarios, CompareFilter, PnlSeries, ScenarioComparison};
pub use error::{ReportError, ReportResult};
pub use heatmap::{HeatmapDisplay, PnlHeatmap};
pub use summary::{summarize_results, summary_table, SummaryRow};
pub use table::{ResultsRow, ResultsTable, AGGREGATE_TYPE};
