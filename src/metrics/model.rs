//! Sample Data Model
//!
//! One record per metric category. A record whose `available` flag is
//! false carries zeroed fields and produces no display rows.

use serde::{Deserialize, Serialize};

use super::heuristics::ResourceKind;

/// Why a category produced no usable sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollectionFailure {
    /// Expected absence: no surface, no entries, unsupported query.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Entries exist but describe an impossible timeline.
    #[error("invalid sample: {0}")]
    Invalid(String),
}

/// Per-category collection result.
pub type Collected<T> = Result<T, CollectionFailure>;

/// Document navigation timings, relative to `fetchStart`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NavigationSample {
    pub load_time: f64,
    pub ttfb: f64,
    pub dom_content_loaded: f64,
    pub available: bool,
}

/// The single largest resource by resolved size.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LargestResource {
    /// Last path segment of the resource URL
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
}

/// Aggregate resource weight.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSample {
    pub total_size: u64,
    pub resource_count: u64,
    pub largest_resource: LargestResource,
    pub available: bool,
}

/// Paint milestones, rounded to whole milliseconds.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderingSample {
    pub first_paint: u64,
    pub largest_contentful_paint: u64,
    pub available: bool,
}

/// The slowest asynchronous request seen.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SlowestRequest {
    /// Last path segment of the request URL
    pub url: String,
    pub duration: f64,
}

/// Asynchronous request activity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSample {
    pub ajax_count: u64,
    pub slowest_request: Option<SlowestRequest>,
    pub available: bool,
}

/// Everything one sampling pass produced.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AllMetrics {
    pub navigation: NavigationSample,
    pub resources: ResourceSample,
    pub rendering: RenderingSample,
    pub network: NetworkSample,
}

impl AllMetrics {
    /// Number of categories that produced a usable sample.
    pub fn available_categories(&self) -> usize {
        [
            self.navigation.available,
            self.resources.available,
            self.rendering.available,
            self.network.available,
        ]
        .iter()
        .filter(|available| **available)
        .count()
    }
}
