//! Metrics Sampler
//!
//! Turns raw timeline entries into the four category samples. Every
//! category is collected on its own: a failing or missing category yields
//! a zeroed, unavailable sample and never affects the other three.
//!
//! Each `collect_*` method has a `try_*` twin that exposes why a category
//! came back empty, for callers that need to tell "absent" from
//! "impossible".

use log::{debug, warn};

use crate::instrumentation::{EntryType, InstrumentationSource, PerformanceEntry, SourceError};

use super::heuristics::{is_async_request, last_path_segment, resource_kind};
use super::model::{
    AllMetrics, Collected, CollectionFailure, LargestResource, NavigationSample, NetworkSample,
    RenderingSample, ResourceSample, SlowestRequest,
};

const FIRST_PAINT: &str = "first-paint";
const FIRST_CONTENTFUL_PAINT: &str = "first-contentful-paint";

/// Samples page metrics from an instrumentation source.
///
/// # Example
///
/// ```
/// use perfgauge::instrumentation::{PerformanceEntry, SnapshotSource};
/// use perfgauge::metrics::Sampler;
///
/// let source = SnapshotSource::from_entries(vec![
///     PerformanceEntry::navigation(0.0, 120.0, 900.0, 1500.0),
/// ]);
///
/// let sampler = Sampler::new(&source);
/// let navigation = sampler.collect_navigation_metrics();
/// assert!(navigation.available);
/// assert_eq!(navigation.ttfb, 120.0);
/// ```
#[derive(Clone, Copy)]
pub struct Sampler<'a> {
    source: Option<&'a dyn InstrumentationSource>,
}

impl<'a> Sampler<'a> {
    /// Creates a sampler reading from the given source.
    pub fn new(source: &'a dyn InstrumentationSource) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Creates a sampler for a host with no instrumentation surface.
    ///
    /// Every category comes back unavailable.
    pub fn detached() -> Self {
        Self { source: None }
    }

    /// Collects all four categories independently.
    pub fn collect_all(&self) -> AllMetrics {
        let metrics = AllMetrics {
            navigation: self.collect_navigation_metrics(),
            resources: self.collect_resource_metrics(),
            rendering: self.collect_rendering_metrics(),
            network: self.monitor_network_activity(),
        };

        debug!(
            "Sampling pass complete: {}/4 categories available",
            metrics.available_categories()
        );
        metrics
    }

    /// Navigation timings, or an unavailable sample.
    pub fn collect_navigation_metrics(&self) -> NavigationSample {
        settle("navigation", self.try_collect_navigation())
    }

    /// Resource weight, or an unavailable sample.
    pub fn collect_resource_metrics(&self) -> ResourceSample {
        settle("resources", self.try_collect_resources())
    }

    /// Paint milestones, or an unavailable sample.
    pub fn collect_rendering_metrics(&self) -> RenderingSample {
        settle("rendering", self.try_collect_rendering())
    }

    /// Asynchronous request activity, or an unavailable sample.
    pub fn monitor_network_activity(&self) -> NetworkSample {
        settle("network", self.try_collect_network())
    }

    /// Reads the navigation entry.
    ///
    /// The whole sample is rejected when any derived duration would be
    /// negative; durations are never clamped.
    pub fn try_collect_navigation(&self) -> Collected<NavigationSample> {
        let entries = self.query(EntryType::Navigation)?;
        let entry = entries
            .first()
            .ok_or_else(|| CollectionFailure::Unavailable("no navigation entry".into()))?;

        let timestamps = [
            entry.fetch_start,
            entry.response_start,
            entry.dom_content_loaded_event_end,
            entry.load_event_end,
        ];
        if timestamps.iter().any(|t| !t.is_finite()) {
            return Err(CollectionFailure::Invalid(
                "navigation entry has non-finite timestamps".into(),
            ));
        }

        if entry.response_start < entry.fetch_start {
            return Err(CollectionFailure::Invalid(format!(
                "responseStart ({}) precedes fetchStart ({})",
                entry.response_start, entry.fetch_start
            )));
        }

        let sample = NavigationSample {
            load_time: entry.load_event_end - entry.fetch_start,
            ttfb: entry.response_start - entry.fetch_start,
            dom_content_loaded: entry.dom_content_loaded_event_end - entry.fetch_start,
            available: true,
        };

        if sample.load_time < 0.0 || sample.dom_content_loaded < 0.0 {
            return Err(CollectionFailure::Invalid(format!(
                "negative navigation duration (load {}, domContentLoaded {})",
                sample.load_time, sample.dom_content_loaded
            )));
        }

        Ok(sample)
    }

    /// Sums resource sizes and finds the largest resource.
    ///
    /// Cross-origin entries report a zero `transferSize`; their
    /// `encodedBodySize` is used instead.
    pub fn try_collect_resources(&self) -> Collected<ResourceSample> {
        let entries = self.query(EntryType::Resource)?;
        if entries.is_empty() {
            return Err(CollectionFailure::Unavailable("no resource entries".into()));
        }

        let mut total_size: u64 = 0;
        let mut largest: Option<(&PerformanceEntry, u64)> = None;

        for entry in &entries {
            let size = resolved_size(entry);
            total_size = total_size.saturating_add(size);

            if largest.map_or(true, |(_, best)| size > best) {
                largest = Some((entry, size));
            }
        }

        let largest_resource = largest
            .map(|(entry, size)| LargestResource {
                name: last_path_segment(&entry.name),
                size,
                kind: resource_kind(&entry.initiator_type, &entry.name),
            })
            .unwrap_or_default();

        debug!(
            "Resources: {} entries, {} bytes, largest '{}' ({} bytes)",
            entries.len(),
            total_size,
            largest_resource.name,
            largest_resource.size
        );

        Ok(ResourceSample {
            total_size,
            resource_count: entries.len() as u64,
            largest_resource,
            available: true,
        })
    }

    /// Reads first paint and largest contentful paint.
    ///
    /// A host that cannot report LCP still yields a sample, with LCP at 0.
    pub fn try_collect_rendering(&self) -> Collected<RenderingSample> {
        let paints = self.query(EntryType::Paint)?;
        if paints.is_empty() {
            return Err(CollectionFailure::Unavailable("no paint entries".into()));
        }

        let first_paint = paints
            .iter()
            .find(|entry| entry.name == FIRST_PAINT)
            .or_else(|| paints.iter().find(|entry| entry.name == FIRST_CONTENTFUL_PAINT))
            .map_or(0.0, |entry| entry.start_time);

        // Later LCP candidates supersede earlier ones.
        let lcp = match self.query(EntryType::LargestContentfulPaint) {
            Ok(candidates) => candidates.last().map_or(0.0, |entry| entry.start_time),
            Err(failure) => {
                debug!("Largest contentful paint not available: {}", failure);
                0.0
            }
        };

        Ok(RenderingSample {
            first_paint: round_ms("first paint", first_paint)?,
            largest_contentful_paint: round_ms("largest contentful paint", lcp)?,
            available: true,
        })
    }

    /// Counts asynchronous requests and finds the slowest one.
    ///
    /// Requests with a non-positive duration are counted but never chosen
    /// as the slowest.
    pub fn try_collect_network(&self) -> Collected<NetworkSample> {
        let entries = self.query(EntryType::Resource)?;
        if entries.is_empty() {
            return Err(CollectionFailure::Unavailable("no resource entries".into()));
        }

        let mut ajax_count: u64 = 0;
        let mut slowest: Option<(&PerformanceEntry, f64)> = None;

        for entry in entries
            .iter()
            .filter(|entry| is_async_request(&entry.initiator_type, &entry.name))
        {
            ajax_count += 1;

            let duration = entry.response_end - entry.request_start;
            if !duration.is_finite() || duration <= 0.0 {
                continue;
            }

            if slowest.map_or(true, |(_, best)| duration > best) {
                slowest = Some((entry, duration));
            }
        }

        let slowest_request = slowest.map(|(entry, duration)| SlowestRequest {
            url: last_path_segment(&entry.name),
            duration,
        });

        debug!("Network: {} async requests", ajax_count);

        Ok(NetworkSample {
            ajax_count,
            slowest_request,
            available: true,
        })
    }

    fn query(&self, entry_type: EntryType) -> Collected<Vec<PerformanceEntry>> {
        let source = self.source.ok_or_else(|| {
            CollectionFailure::Unavailable("no instrumentation surface".into())
        })?;

        source.entries_by_type(entry_type).map_err(|e| {
            if let SourceError::Query(_) = e {
                warn!("Failed to query {} entries: {}", entry_type, e);
            }
            CollectionFailure::Unavailable(e.to_string())
        })
    }
}

/// `transferSize` when non-zero, else `encodedBodySize`.
fn resolved_size(entry: &PerformanceEntry) -> u64 {
    if entry.transfer_size != 0 {
        entry.transfer_size
    } else {
        entry.encoded_body_size
    }
}

fn round_ms(label: &str, value: f64) -> Collected<u64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CollectionFailure::Invalid(format!(
            "{} timestamp is out of range: {}",
            label, value
        )));
    }
    Ok(value.round() as u64)
}

/// Folds a failed collection into the zeroed unavailable sample.
fn settle<T: Default>(category: &str, result: Collected<T>) -> T {
    match result {
        Ok(sample) => sample,
        Err(CollectionFailure::Unavailable(reason)) => {
            debug!("Category '{}' unavailable: {}", category, reason);
            T::default()
        }
        Err(CollectionFailure::Invalid(reason)) => {
            warn!("Discarding invalid {} sample: {}", category, reason);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrumentation::SnapshotSource;
    use crate::metrics::ResourceKind;

    /// A host whose every query throws.
    struct FailingSource;

    impl InstrumentationSource for FailingSource {
        fn entries_by_type(&self, _: EntryType) -> Result<Vec<PerformanceEntry>, SourceError> {
            Err(SourceError::Query("host exploded".into()))
        }
    }

    /// A host that only fails for one entry type.
    struct FlakySource {
        inner: SnapshotSource,
        broken: EntryType,
    }

    impl InstrumentationSource for FlakySource {
        fn entries_by_type(&self, entry_type: EntryType) -> Result<Vec<PerformanceEntry>, SourceError> {
            if entry_type == self.broken {
                return Err(SourceError::Query("boom".into()));
            }
            self.inner.entries_by_type(entry_type)
        }
    }

    fn full_page() -> SnapshotSource {
        SnapshotSource::from_entries(vec![
            PerformanceEntry::navigation(10.0, 110.0, 810.0, 1510.0),
            PerformanceEntry::resource("https://example.com/js/app.js?v=2", "script")
                .with_sizes(150_000, 149_000)
                .with_timing(20.0, 220.0),
            PerformanceEntry::resource("https://cdn.other.com/hero.webp", "img")
                .with_sizes(0, 300_000)
                .with_timing(30.0, 530.0),
            PerformanceEntry::resource("https://example.com/api/users", "fetch")
                .with_sizes(2_000, 1_800)
                .with_timing(600.0, 1_400.0),
            PerformanceEntry::paint("first-paint", 301.4),
            PerformanceEntry::paint("first-contentful-paint", 350.0),
            PerformanceEntry::largest_contentful_paint(900.2),
            PerformanceEntry::largest_contentful_paint(1_240.6),
        ])
    }

    #[test]
    fn test_collect_navigation() {
        let source = full_page();
        let sample = Sampler::new(&source).collect_navigation_metrics();

        assert!(sample.available);
        assert_eq!(sample.load_time, 1500.0);
        assert_eq!(sample.ttfb, 100.0);
        assert_eq!(sample.dom_content_loaded, 800.0);
    }

    #[test]
    fn test_navigation_negative_ttfb_is_invalid() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::navigation(
            200.0, 150.0, 900.0, 1500.0,
        )]);
        let sampler = Sampler::new(&source);

        assert!(matches!(
            sampler.try_collect_navigation(),
            Err(CollectionFailure::Invalid(_))
        ));
        assert_eq!(sampler.collect_navigation_metrics(), NavigationSample::default());
    }

    #[test]
    fn test_navigation_unfinished_load_is_invalid() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::navigation(
            10.0, 90.0, 400.0, 0.0,
        )]);
        let sample = Sampler::new(&source).collect_navigation_metrics();

        assert!(!sample.available);
        assert_eq!(sample.ttfb, 0.0);
    }

    #[test]
    fn test_navigation_non_finite_is_invalid() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::navigation(
            0.0,
            f64::NAN,
            400.0,
            900.0,
        )]);
        let result = Sampler::new(&source).try_collect_navigation();
        assert!(matches!(result, Err(CollectionFailure::Invalid(_))));
    }

    #[test]
    fn test_navigation_missing_entry() {
        let source = SnapshotSource::from_entries(vec![]);
        let result = Sampler::new(&source).try_collect_navigation();
        assert!(matches!(result, Err(CollectionFailure::Unavailable(_))));
    }

    #[test]
    fn test_collect_resources() {
        let source = full_page();
        let sample = Sampler::new(&source).collect_resource_metrics();

        assert!(sample.available);
        assert_eq!(sample.resource_count, 3);
        assert_eq!(sample.total_size, 150_000 + 300_000 + 2_000);
        assert_eq!(sample.largest_resource.name, "hero.webp");
        assert_eq!(sample.largest_resource.size, 300_000);
        assert_eq!(sample.largest_resource.kind, ResourceKind::Image);
        assert!(sample.total_size >= sample.largest_resource.size);
    }

    #[test]
    fn test_resources_empty_is_unavailable() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::paint("first-paint", 10.0)]);
        let sample = Sampler::new(&source).collect_resource_metrics();
        assert_eq!(sample, ResourceSample::default());
    }

    #[test]
    fn test_resources_extension_fallback() {
        let source = SnapshotSource::from_entries(vec![
            PerformanceEntry::resource("https://fonts.example.com/inter.woff2", "css")
                .with_sizes(90_000, 89_000),
        ]);
        let sample = Sampler::new(&source).collect_resource_metrics();
        assert_eq!(sample.largest_resource.kind, ResourceKind::Font);
        assert_eq!(sample.largest_resource.name, "inter.woff2");
    }

    #[test]
    fn test_collect_rendering() {
        let source = full_page();
        let sample = Sampler::new(&source).collect_rendering_metrics();

        assert!(sample.available);
        assert_eq!(sample.first_paint, 301);
        assert_eq!(sample.largest_contentful_paint, 1241);
    }

    #[test]
    fn test_rendering_falls_back_to_fcp() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::paint(
            "first-contentful-paint",
            412.5,
        )]);
        let sample = Sampler::new(&source).collect_rendering_metrics();

        assert!(sample.available);
        assert_eq!(sample.first_paint, 413);
        assert_eq!(sample.largest_contentful_paint, 0);
    }

    #[test]
    fn test_rendering_survives_unsupported_lcp() {
        let source = full_page().with_supported_types(vec![
            EntryType::Navigation,
            EntryType::Resource,
            EntryType::Paint,
        ]);
        let sample = Sampler::new(&source).collect_rendering_metrics();

        assert!(sample.available);
        assert_eq!(sample.first_paint, 301);
        assert_eq!(sample.largest_contentful_paint, 0);
    }

    #[test]
    fn test_rendering_survives_throwing_lcp() {
        let source = FlakySource {
            inner: full_page(),
            broken: EntryType::LargestContentfulPaint,
        };
        let sample = Sampler::new(&source).collect_rendering_metrics();
        assert!(sample.available);
        assert_eq!(sample.largest_contentful_paint, 0);
    }

    #[test]
    fn test_rendering_without_paints_is_unavailable() {
        let source = SnapshotSource::from_entries(vec![PerformanceEntry::largest_contentful_paint(
            800.0,
        )]);
        let sample = Sampler::new(&source).collect_rendering_metrics();
        assert!(!sample.available);
        assert_eq!(sample.largest_contentful_paint, 0);
    }

    #[test]
    fn test_monitor_network() {
        let source = full_page();
        let sample = Sampler::new(&source).monitor_network_activity();

        assert!(sample.available);
        assert_eq!(sample.ajax_count, 1);
        let slowest = sample.slowest_request.unwrap();
        assert_eq!(slowest.url, "users");
        assert_eq!(slowest.duration, 800.0);
    }

    #[test]
    fn test_network_counts_but_skips_non_positive_durations() {
        let source = SnapshotSource::from_entries(vec![
            PerformanceEntry::resource("https://x.com/api/cached", "xmlhttprequest")
                .with_timing(500.0, 500.0),
            PerformanceEntry::resource("https://x.com/graphql", "script").with_timing(100.0, 250.0),
            PerformanceEntry::resource("https://x.com/collect", "beacon").with_timing(0.0, 40.0),
            PerformanceEntry::resource("https://x.com/logo.png", "img").with_timing(0.0, 900.0),
        ]);
        let sample = Sampler::new(&source).monitor_network_activity();

        assert_eq!(sample.ajax_count, 3);
        let slowest = sample.slowest_request.unwrap();
        assert_eq!(slowest.url, "graphql");
        assert_eq!(slowest.duration, 150.0);
    }

    #[test]
    fn test_network_without_async_requests() {
        let source = SnapshotSource::from_entries(vec![
            PerformanceEntry::resource("https://x.com/logo.png", "img").with_timing(0.0, 90.0),
        ]);
        let sample = Sampler::new(&source).monitor_network_activity();

        assert!(sample.available);
        assert_eq!(sample.ajax_count, 0);
        assert!(sample.slowest_request.is_none());
    }

    #[test]
    fn test_failing_source_never_panics() {
        let sampler = Sampler::new(&FailingSource);
        let metrics = sampler.collect_all();

        assert_eq!(metrics, AllMetrics::default());
    }

    #[test]
    fn test_detached_sampler_is_unavailable() {
        let metrics = Sampler::detached().collect_all();
        assert_eq!(metrics.available_categories(), 0);
    }

    #[test]
    fn test_category_failures_are_isolated() {
        let source = FlakySource {
            inner: full_page(),
            broken: EntryType::Navigation,
        };
        let metrics = Sampler::new(&source).collect_all();

        assert!(!metrics.navigation.available);
        assert!(metrics.resources.available);
        assert!(metrics.rendering.available);
        assert!(metrics.network.available);
    }
}
