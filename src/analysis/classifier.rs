//! Threshold Classification
//!
//! One tolerance rule for every metric: at or under the threshold passes,
//! up to 50% over warns, anything beyond fails.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the WARN band, as a multiple of the threshold.
pub const WARN_TOLERANCE: f64 = 1.5;

/// Health of a single metric against its threshold.
///
/// Ordered by severity, so the worst of several statuses is their `max`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Warn,
    Fail,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a value against its threshold.
///
/// Both band edges belong to the lower band: `actual == threshold` is
/// PASS and `actual == threshold * 1.5` is WARN. A NaN `actual` is FAIL.
///
/// ```
/// use perfgauge::analysis::{classify, Status};
///
/// assert_eq!(classify(1500.0, 2000.0), Status::Pass);
/// assert_eq!(classify(2500.0, 2000.0), Status::Warn);
/// assert_eq!(classify(3001.0, 2000.0), Status::Fail);
/// ```
pub fn classify(actual: f64, threshold: f64) -> Status {
    if actual <= threshold {
        Status::Pass
    } else if actual <= threshold * WARN_TOLERANCE {
        Status::Warn
    } else {
        Status::Fail
    }
}
