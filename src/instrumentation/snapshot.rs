//! Captured Timeline Snapshots
//!
//! Loads a JSON dump of a page's performance timeline and serves it
//! through [`InstrumentationSource`]. Two layouts are accepted:
//!
//! ```json
//! [ { "entryType": "navigation", ... }, { "entryType": "resource", ... } ]
//! ```
//!
//! ```json
//! {
//!   "url": "https://example.com/",
//!   "supportedEntryTypes": ["navigation", "resource", "paint"],
//!   "entries": [ ... ]
//! }
//! ```
//!
//! The first is what `JSON.stringify(performance.getEntries())` yields.
//! The second additionally records which entry types the capturing host
//! understood; queries for anything else fail with
//! [`SourceError::Unsupported`].

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use super::entry::{EntryType, PerformanceEntry};
use super::source::{InstrumentationSource, SourceError};

/// Errors raised while loading a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot JSON: {0}. Expected an entry array or a capture object.")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Entries(Vec<PerformanceEntry>),
    Capture(Capture),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Capture {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    supported_entry_types: Option<Vec<EntryType>>,
    #[serde(default)]
    entries: Vec<PerformanceEntry>,
}

/// An in-memory performance timeline.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    url: Option<String>,
    supported: Option<Vec<EntryType>>,
    entries: Vec<PerformanceEntry>,
}

impl SnapshotSource {
    /// Creates a snapshot that supports every entry type.
    pub fn from_entries(entries: Vec<PerformanceEntry>) -> Self {
        Self {
            url: None,
            supported: None,
            entries,
        }
    }

    /// Restricts the entry types this snapshot answers for.
    pub fn with_supported_types(mut self, types: Vec<EntryType>) -> Self {
        self.supported = Some(types);
        self
    }

    /// Records the page URL the snapshot was captured from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Parses a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let document: SnapshotDocument = serde_json::from_str(json)?;

        let source = match document {
            SnapshotDocument::Entries(entries) => Self::from_entries(entries),
            SnapshotDocument::Capture(capture) => Self {
                url: capture.url,
                supported: capture.supported_entry_types,
                entries: capture.entries,
            },
        };

        Ok(source)
    }

    /// Page URL, when the capture recorded one.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Total number of entries, of every type.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn supports(&self, entry_type: EntryType) -> bool {
        match &self.supported {
            Some(types) => types.contains(&entry_type),
            None => true,
        }
    }
}

impl InstrumentationSource for SnapshotSource {
    fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<PerformanceEntry>, SourceError> {
        if !self.supports(entry_type) {
            return Err(SourceError::Unsupported(entry_type));
        }

        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.entry_type == entry_type)
            .cloned()
            .collect())
    }
}

/// Loads a snapshot from a JSON file.
///
/// # Example
///
/// ```rust,no_run
/// use perfgauge::instrumentation::load_snapshot;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let snapshot = load_snapshot("capture.json")?;
///     println!("Loaded {} entries", snapshot.len());
///     Ok(())
/// }
/// ```
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<SnapshotSource, SnapshotError> {
    let path = path.as_ref();
    info!("Loading snapshot from: {}", path.display());

    let json = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.display().to_string(),
        source,
    })?;

    debug!("Snapshot content loaded ({} bytes)", json.len());

    let snapshot = SnapshotSource::from_json(&json)?;

    info!("Parsed {} timeline entries", snapshot.len());
    Ok(snapshot)
}
