//! Report Export
//!
//! Bundles one analysis pass (samples, thresholds, rows and the overall
//! verdict) into a timestamped, serializable report.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::analysis::{Status, Thresholds};
use crate::metrics::AllMetrics;

use super::error::ReportError;
use super::rows::DisplayRow;

/// Returns the worst status among the rows, or PASS when there are none.
pub fn overall_verdict(rows: &[DisplayRow]) -> Status {
    rows.iter()
        .map(|row| row.status)
        .max()
        .unwrap_or(Status::Pass)
}

/// Row counts per status.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pass: usize,
    pub warn: usize,
    pub fail: usize,
}

impl StatusCounts {
    pub fn from_rows(rows: &[DisplayRow]) -> Self {
        rows.iter().fold(Self::default(), |mut counts, row| {
            match row.status {
                Status::Pass => counts.pass += 1,
                Status::Warn => counts.warn += 1,
                Status::Fail => counts.fail += 1,
            }
            counts
        })
    }
}

/// The exported result of one analysis pass.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    /// Page URL or snapshot path the metrics came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub verdict: Status,
    /// True when no category was available, so the verdict is vacuous
    pub empty: bool,
    pub counts: StatusCounts,
    pub thresholds: Thresholds,
    pub metrics: AllMetrics,
    pub rows: Vec<DisplayRow>,
}

impl PerformanceReport {
    /// Creates a report stamped with the current time.
    pub fn new(
        source: Option<String>,
        metrics: AllMetrics,
        thresholds: Thresholds,
        rows: Vec<DisplayRow>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            verdict: overall_verdict(&rows),
            empty: rows.is_empty(),
            counts: StatusCounts::from_rows(&rows),
            thresholds,
            metrics,
            rows,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// One-line summary, e.g. `Verdict: WARN (7 pass, 2 warn, 0 fail)`.
    pub fn summary(&self) -> String {
        if self.empty {
            return "Verdict: PASS (no metrics available)".to_string();
        }
        format!(
            "Verdict: {} ({} pass, {} warn, {} fail)",
            self.verdict, self.counts.pass, self.counts.warn, self.counts.fail
        )
    }
}

/// Writes a report to a file as pretty-printed JSON.
pub fn save_report(report: &PerformanceReport, path: impl AsRef<Path>) -> Result<(), ReportError> {
    let path = path.as_ref();
    let json = report.to_json()?;

    fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    info!("Report saved to: {}", path.display());
    Ok(())
}
