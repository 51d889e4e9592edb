//! Analysis Module
//!
//! Pure functions that judge and describe sampled values.
//!
//! # Components
//!
//! - [`classifier`]: PASS/WARN/FAIL classification
//! - [`format`]: Time, size, count and text formatting
//! - [`thresholds`]: Threshold configuration and loading

pub mod classifier;
pub mod format;
pub mod thresholds;

pub use classifier::{classify, Status, WARN_TOLERANCE};
pub use format::{format_count, format_size, format_text, format_time};
pub use thresholds::{load_thresholds, ConfigError, Thresholds};
