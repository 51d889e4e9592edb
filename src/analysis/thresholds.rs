//! Threshold Configuration
//!
//! User-tunable limits for the three headline metrics. Every other
//! metric is judged against a built-in limit (see
//! [`crate::report::MetricKind::threshold`]).
//!
//! # Example YAML Format
//!
//! ```yaml
//! load_time: 2500   # ms
//! ttfb: 500         # ms
//! page_size: 1500000  # bytes
//! ```
//!
//! Omitted keys keep their defaults.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Default page load budget in milliseconds.
pub const DEFAULT_LOAD_TIME_MS: f64 = 3000.0;

/// Default time-to-first-byte budget in milliseconds.
pub const DEFAULT_TTFB_MS: f64 = 600.0;

/// Default total page weight budget in bytes (2 MiB).
pub const DEFAULT_PAGE_SIZE_BYTES: f64 = 2.0 * 1024.0 * 1024.0;

/// Errors raised while loading or validating thresholds.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read thresholds file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse thresholds YAML: {0}. Check the file format.")]
    Parse(#[from] serde_yaml::Error),

    #[error("Threshold '{name}' must be a positive finite number, got {value}")]
    InvalidValue { name: &'static str, value: f64 },
}

/// Limits the headline metrics are classified against.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    /// Total page weight in bytes
    pub page_size: f64,
    /// Load event end, in milliseconds from fetch start
    pub load_time: f64,
    /// Time to first byte in milliseconds
    pub ttfb: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE_BYTES,
            load_time: DEFAULT_LOAD_TIME_MS,
            ttfb: DEFAULT_TTFB_MS,
        }
    }
}

impl Thresholds {
    /// Creates thresholds from explicit values.
    pub fn new(page_size: f64, load_time: f64, ttfb: f64) -> Self {
        Self {
            page_size,
            load_time,
            ttfb,
        }
    }

    /// Sets the page size budget.
    pub fn with_page_size(mut self, bytes: f64) -> Self {
        self.page_size = bytes;
        self
    }

    /// Sets the load time budget.
    pub fn with_load_time(mut self, ms: f64) -> Self {
        self.load_time = ms;
        self
    }

    /// Sets the TTFB budget.
    pub fn with_ttfb(mut self, ms: f64) -> Self {
        self.ttfb = ms;
        self
    }

    /// Checks that every limit is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("page_size", self.page_size),
            ("load_time", self.load_time),
            ("ttfb", self.ttfb),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { name, value });
            }
        }
        Ok(())
    }
}

/// Loads and validates thresholds from a YAML file.
pub fn load_thresholds(path: impl AsRef<Path>) -> Result<Thresholds, ConfigError> {
    let path = path.as_ref();
    info!("Loading thresholds from: {}", path.display());

    let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let thresholds: Thresholds = serde_yaml::from_str(&yaml)?;
    thresholds.validate()?;

    debug!(
        "Thresholds: load {} ms, ttfb {} ms, page size {} bytes",
        thresholds.load_time, thresholds.ttfb, thresholds.page_size
    );
    Ok(thresholds)
}
