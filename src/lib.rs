//! perfgauge - Page Performance Sampling and Threshold Classification
//!
//! Samples a page's performance timeline, judges each metric against a
//! budget and renders a PASS/WARN/FAIL verdict in stable, human-readable
//! units. Hosts are unreliable: any category the host cannot report is
//! quietly left out rather than failing the whole analysis.
//!
//! # Architecture
//!
//! The library is organized into four main modules:
//!
//! - [`instrumentation`]: The host timeline abstraction and JSON snapshots
//! - [`metrics`]: Sampling of navigation, resource, rendering and network data
//! - [`analysis`]: Classification, formatting and threshold configuration
//! - [`report`]: Display rows, the presentation state machine and export
//!
//! # Example
//!
//! ```rust,no_run
//! use perfgauge::analysis::Thresholds;
//! use perfgauge::instrumentation::load_snapshot;
//! use perfgauge::metrics::Sampler;
//! use perfgauge::report::{MetricsTable, TerminalTable};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let snapshot = load_snapshot("capture.json")?;
//!     let metrics = Sampler::new(&snapshot).collect_all();
//!
//!     let mut table = MetricsTable::new();
//!     table.render(TerminalTable::new(), Some(&metrics), &Thresholds::default())?;
//!
//!     for row in table.current_rows() {
//!         println!("{}: {} ({})", row.metric, row.formatted_actual, row.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod instrumentation;
pub mod metrics;
pub mod report;

// Re-export commonly used types
pub use analysis::{classify, Status, Thresholds};
pub use instrumentation::{InstrumentationSource, SnapshotSource};
pub use metrics::{AllMetrics, Sampler};
pub use report::{DisplayRow, MetricsTable, PerformanceReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "perfgauge";
