//! Report Module
//!
//! Composes samples, classifications and formatted values into display
//! rows, and carries them to presentation and export consumers.
//!
//! # Components
//!
//! - [`rows`]: Tracked metric definitions and the row builder
//! - [`palette`]: Status colors and the branding provider seam
//! - [`table`]: The render/update/clear state machine
//! - [`terminal`]: Colored terminal container
//! - [`export`]: Overall verdict and JSON reports

pub mod error;
pub mod export;
pub mod palette;
pub mod rows;
pub mod table;
pub mod terminal;

pub use error::ReportError;
pub use export::{overall_verdict, save_report, PerformanceReport, StatusCounts};
pub use palette::{BrandingError, BrandingProvider, StatusPalette};
pub use rows::{build_rows, DisplayRow, MetricCategory, MetricKind, MetricUnit, TRACKED_METRICS};
pub use table::{MetricsTable, RowContainer, TableState};
pub use terminal::TerminalTable;
