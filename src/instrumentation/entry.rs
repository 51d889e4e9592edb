//! Performance Entry Model
//!
//! A flat record of one host timing entry, shaped like the JSON the
//! browser emits from `PerformanceEntry.toJSON()`.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "entryType": "resource",
//!   "name": "https://cdn.example.com/js/app.js?v=3",
//!   "initiatorType": "script",
//!   "startTime": 120.4,
//!   "requestStart": 130.0,
//!   "responseEnd": 410.7,
//!   "transferSize": 48211,
//!   "encodedBodySize": 47911
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a host timing entry.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum EntryType {
    /// Document navigation timing (one per page)
    Navigation,
    /// Sub-resource fetch timing
    Resource,
    /// First paint / first contentful paint marks
    Paint,
    /// Largest contentful paint candidates
    LargestContentfulPaint,
    /// Any entry type the engine does not read (marks, measures, ...)
    #[serde(other)]
    Other,
}

impl EntryType {
    /// Returns the host's name for this entry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Resource => "resource",
            Self::Paint => "paint",
            Self::LargestContentfulPaint => "largest-contentful-paint",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single timing entry reported by the host.
///
/// Fields that do not apply to an entry's type are left at zero, which
/// mirrors what the host reports for them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceEntry {
    pub entry_type: EntryType,

    /// URL for navigation/resource entries, mark name for paint entries
    pub name: String,

    pub start_time: f64,
    pub duration: f64,

    /// What triggered the fetch (script, link, img, fetch, ...)
    pub initiator_type: String,

    /// Bytes over the wire; zero for cross-origin entries without
    /// `Timing-Allow-Origin` and for cache hits
    pub transfer_size: u64,
    pub encoded_body_size: u64,

    pub fetch_start: f64,
    pub request_start: f64,
    pub response_start: f64,
    pub response_end: f64,
    pub dom_content_loaded_event_end: f64,
    pub load_event_end: f64,
}

impl Default for PerformanceEntry {
    fn default() -> Self {
        Self {
            entry_type: EntryType::Other,
            name: String::new(),
            start_time: 0.0,
            duration: 0.0,
            initiator_type: String::new(),
            transfer_size: 0,
            encoded_body_size: 0,
            fetch_start: 0.0,
            request_start: 0.0,
            response_start: 0.0,
            response_end: 0.0,
            dom_content_loaded_event_end: 0.0,
            load_event_end: 0.0,
        }
    }
}

impl PerformanceEntry {
    /// Creates a navigation entry from its key timestamps.
    pub fn navigation(
        fetch_start: f64,
        response_start: f64,
        dom_content_loaded_event_end: f64,
        load_event_end: f64,
    ) -> Self {
        Self {
            entry_type: EntryType::Navigation,
            name: "document".to_string(),
            fetch_start,
            response_start,
            dom_content_loaded_event_end,
            load_event_end,
            duration: load_event_end - fetch_start,
            ..Self::default()
        }
    }

    /// Creates a resource entry for a URL and initiator.
    ///
    /// # Example
    ///
    /// ```
    /// use perfgauge::instrumentation::PerformanceEntry;
    ///
    /// let entry = PerformanceEntry::resource("https://example.com/app.js", "script")
    ///     .with_sizes(48_211, 47_911)
    ///     .with_timing(130.0, 410.7);
    /// assert_eq!(entry.transfer_size, 48_211);
    /// ```
    pub fn resource(url: impl Into<String>, initiator_type: impl Into<String>) -> Self {
        Self {
            entry_type: EntryType::Resource,
            name: url.into(),
            initiator_type: initiator_type.into(),
            ..Self::default()
        }
    }

    /// Creates a paint entry (`first-paint` or `first-contentful-paint`).
    pub fn paint(name: impl Into<String>, start_time: f64) -> Self {
        Self {
            entry_type: EntryType::Paint,
            name: name.into(),
            start_time,
            ..Self::default()
        }
    }

    /// Creates a largest-contentful-paint candidate.
    pub fn largest_contentful_paint(start_time: f64) -> Self {
        Self {
            entry_type: EntryType::LargestContentfulPaint,
            start_time,
            ..Self::default()
        }
    }

    /// Sets transfer and encoded body sizes.
    pub fn with_sizes(mut self, transfer_size: u64, encoded_body_size: u64) -> Self {
        self.transfer_size = transfer_size;
        self.encoded_body_size = encoded_body_size;
        self
    }

    /// Sets request start and response end.
    pub fn with_timing(mut self, request_start: f64, response_end: f64) -> Self {
        self.request_start = request_start;
        self.response_end = response_end;
        self.duration = response_end - request_start;
        self
    }
}
