//! Host Instrumentation Module
//!
//! Abstracts the host's performance timeline behind a single query so
//! the sampler can run against a live host, a captured snapshot, or a
//! test fake.
//!
//! # Components
//!
//! - [`entry`]: The `PerformanceEntry` record and `EntryType`
//! - [`source`]: The `InstrumentationSource` capability trait
//! - [`snapshot`]: JSON-backed timeline captures

pub mod entry;
pub mod snapshot;
pub mod source;

pub use entry::{EntryType, PerformanceEntry};
pub use snapshot::{load_snapshot, SnapshotError, SnapshotSource};
pub use source::{InstrumentationSource, SourceError};
