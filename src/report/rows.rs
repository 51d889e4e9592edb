//! Display Row Builder
//!
//! Turns a sampling pass into the ordered rows the presentation layer
//! shows: one per tracked metric whose category was available.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::format::DEFAULT_TEXT_WIDTH;
use crate::analysis::{
    classify, format_count, format_size, format_text, format_time, Status, Thresholds,
};
use crate::metrics::AllMetrics;

use super::palette::StatusPalette;

/// Built-in DOM Content Loaded budget (ms).
pub const DOM_CONTENT_LOADED_BUDGET_MS: f64 = 2000.0;
/// Built-in resource count budget.
pub const RESOURCE_COUNT_BUDGET: f64 = 50.0;
/// Built-in single resource size budget (bytes).
pub const LARGEST_RESOURCE_BUDGET_BYTES: f64 = 500.0 * 1024.0;
/// Built-in first paint budget (ms).
pub const FIRST_PAINT_BUDGET_MS: f64 = 1000.0;
/// Built-in largest contentful paint budget (ms).
pub const LCP_BUDGET_MS: f64 = 2500.0;
/// Built-in asynchronous request count budget.
pub const AJAX_COUNT_BUDGET: f64 = 20.0;
/// Built-in slowest request budget (ms).
pub const SLOWEST_REQUEST_BUDGET_MS: f64 = 1000.0;

/// The sample a metric is read from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricCategory {
    Navigation,
    Resources,
    Rendering,
    Network,
}

impl MetricCategory {
    /// Returns true if this category's sample is usable.
    pub fn is_available(&self, metrics: &AllMetrics) -> bool {
        match self {
            Self::Navigation => metrics.navigation.available,
            Self::Resources => metrics.resources.available,
            Self::Rendering => metrics.rendering.available,
            Self::Network => metrics.network.available,
        }
    }
}

/// How a metric's values are rendered.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MetricUnit {
    Time,
    Size,
    Count,
}

impl MetricUnit {
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Time => format_time(value),
            Self::Size => format_size(value),
            Self::Count => format_count(value.max(0.0).round() as u64),
        }
    }
}

/// A tracked metric.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    LoadTime,
    Ttfb,
    DomContentLoaded,
    TotalPageSize,
    ResourceCount,
    LargestResource,
    FirstPaint,
    LargestContentfulPaint,
    AjaxRequests,
    SlowestRequest,
}

/// Every tracked metric, in display order.
pub const TRACKED_METRICS: [MetricKind; 10] = [
    MetricKind::LoadTime,
    MetricKind::Ttfb,
    MetricKind::DomContentLoaded,
    MetricKind::TotalPageSize,
    MetricKind::ResourceCount,
    MetricKind::LargestResource,
    MetricKind::FirstPaint,
    MetricKind::LargestContentfulPaint,
    MetricKind::AjaxRequests,
    MetricKind::SlowestRequest,
];

impl MetricKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LoadTime => "Load Time",
            Self::Ttfb => "TTFB",
            Self::DomContentLoaded => "DOM Content Loaded",
            Self::TotalPageSize => "Total Page Size",
            Self::ResourceCount => "Resource Count",
            Self::LargestResource => "Largest Resource",
            Self::FirstPaint => "First Paint",
            Self::LargestContentfulPaint => "Largest Contentful Paint",
            Self::AjaxRequests => "AJAX Requests",
            Self::SlowestRequest => "Slowest Request",
        }
    }

    pub fn category(&self) -> MetricCategory {
        match self {
            Self::LoadTime | Self::Ttfb | Self::DomContentLoaded => MetricCategory::Navigation,
            Self::TotalPageSize | Self::ResourceCount | Self::LargestResource => {
                MetricCategory::Resources
            }
            Self::FirstPaint | Self::LargestContentfulPaint => MetricCategory::Rendering,
            Self::AjaxRequests | Self::SlowestRequest => MetricCategory::Network,
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            Self::TotalPageSize | Self::LargestResource => MetricUnit::Size,
            Self::ResourceCount | Self::AjaxRequests => MetricUnit::Count,
            _ => MetricUnit::Time,
        }
    }

    /// The sampled value.
    pub fn actual(&self, metrics: &AllMetrics) -> f64 {
        match self {
            Self::LoadTime => metrics.navigation.load_time,
            Self::Ttfb => metrics.navigation.ttfb,
            Self::DomContentLoaded => metrics.navigation.dom_content_loaded,
            Self::TotalPageSize => metrics.resources.total_size as f64,
            Self::ResourceCount => metrics.resources.resource_count as f64,
            Self::LargestResource => metrics.resources.largest_resource.size as f64,
            Self::FirstPaint => metrics.rendering.first_paint as f64,
            Self::LargestContentfulPaint => metrics.rendering.largest_contentful_paint as f64,
            Self::AjaxRequests => metrics.network.ajax_count as f64,
            Self::SlowestRequest => metrics
                .network
                .slowest_request
                .as_ref()
                .map_or(0.0, |request| request.duration),
        }
    }

    /// The limit the metric is judged against.
    pub fn threshold(&self, thresholds: &Thresholds) -> f64 {
        match self {
            Self::LoadTime => thresholds.load_time,
            Self::Ttfb => thresholds.ttfb,
            Self::TotalPageSize => thresholds.page_size,
            Self::DomContentLoaded => DOM_CONTENT_LOADED_BUDGET_MS,
            Self::ResourceCount => RESOURCE_COUNT_BUDGET,
            Self::LargestResource => LARGEST_RESOURCE_BUDGET_BYTES,
            Self::FirstPaint => FIRST_PAINT_BUDGET_MS,
            Self::LargestContentfulPaint => LCP_BUDGET_MS,
            Self::AjaxRequests => AJAX_COUNT_BUDGET,
            Self::SlowestRequest => SLOWEST_REQUEST_BUDGET_MS,
        }
    }

    /// The resource or request name shown beside the value, if any.
    pub fn detail(&self, metrics: &AllMetrics) -> Option<String> {
        match self {
            Self::LargestResource => {
                let largest = &metrics.resources.largest_resource;
                Some(format!(
                    "{} ({})",
                    format_text(&largest.name, DEFAULT_TEXT_WIDTH),
                    largest.kind
                ))
            }
            Self::SlowestRequest => metrics
                .network
                .slowest_request
                .as_ref()
                .map(|request| format_text(&request.url, DEFAULT_TEXT_WIDTH)),
            _ => None,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One rendered metric.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub metric: String,
    pub actual_value: f64,
    pub threshold_value: f64,
    pub formatted_actual: String,
    pub formatted_threshold: String,
    pub status: Status,
    pub color_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl DisplayRow {
    /// Builds the row for one metric.
    pub fn for_metric(
        kind: MetricKind,
        metrics: &AllMetrics,
        thresholds: &Thresholds,
        palette: &StatusPalette,
    ) -> Self {
        let actual = kind.actual(metrics);
        let threshold = kind.threshold(thresholds);
        let status = classify(actual, threshold);
        let unit = kind.unit();

        Self {
            metric: kind.label().to_string(),
            actual_value: actual,
            threshold_value: threshold,
            formatted_actual: unit.format(actual),
            formatted_threshold: unit.format(threshold),
            status,
            color_code: palette.color(status).to_string(),
            detail: kind.detail(metrics),
        }
    }
}

/// Builds rows for every tracked metric whose category is available.
///
/// ```
/// use perfgauge::analysis::{Status, Thresholds};
/// use perfgauge::metrics::AllMetrics;
/// use perfgauge::report::{build_rows, StatusPalette};
///
/// let mut metrics = AllMetrics::default();
/// metrics.navigation.available = true;
/// metrics.navigation.load_time = 1500.0;
///
/// let thresholds = Thresholds::default().with_load_time(2000.0);
/// let rows = build_rows(&metrics, &thresholds, &StatusPalette::fallback());
///
/// assert_eq!(rows.len(), 3);
/// assert_eq!(rows[0].formatted_actual, "1.50s");
/// assert_eq!(rows[0].status, Status::Pass);
/// ```
pub fn build_rows(
    metrics: &AllMetrics,
    thresholds: &Thresholds,
    palette: &StatusPalette,
) -> Vec<DisplayRow> {
    TRACKED_METRICS
        .iter()
        .filter(|kind| kind.category().is_available(metrics))
        .map(|kind| DisplayRow::for_metric(*kind, metrics, thresholds, palette))
        .collect()
}
