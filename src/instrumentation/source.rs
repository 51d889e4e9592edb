//! Instrumentation Source Capability
//!
//! The single query the sampler needs from the host. Hosts may lack the
//! surface entirely, may not know an entry type, or may fail outright;
//! every one of those outcomes is an `Err` the sampler absorbs.

use super::entry::{EntryType, PerformanceEntry};

/// Errors a host can report when queried for entries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("Entry type '{0}' is not supported by this host")]
    Unsupported(EntryType),

    #[error("Instrumentation surface is not available")]
    Unavailable,

    #[error("Instrumentation query failed: {0}")]
    Query(String),
}

/// Read access to the host's performance timeline.
pub trait InstrumentationSource {
    /// Returns every entry of the given type, in host order.
    fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<PerformanceEntry>, SourceError>;
}

impl<T: InstrumentationSource + ?Sized> InstrumentationSource for &T {
    fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<PerformanceEntry>, SourceError> {
        (**self).entries_by_type(entry_type)
    }
}
