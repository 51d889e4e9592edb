//! Metrics Table
//!
//! Presentation state around the row builder. The table moves between
//! three states:
//!
//! - **Empty**: never rendered, or cleared
//! - **Rendered**: rows built and mounted in the container
//! - **Error**: the last render/update got malformed input; the container
//!   shows an error instead of rows
//!
//! `update` only makes sense after a `render` has handed the table a
//! container, so calling it while Empty is a usage error.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::analysis::Thresholds;
use crate::metrics::AllMetrics;

use super::error::ReportError;
use super::palette::{BrandingProvider, StatusPalette};
use super::rows::{build_rows, DisplayRow};

/// Where rendered rows end up.
pub trait RowContainer {
    /// Replaces whatever the container shows with these rows.
    fn mount(&mut self, rows: &[DisplayRow]);

    /// Replaces whatever the container shows with an error message.
    fn show_error(&mut self, message: &str);

    /// Empties the container.
    fn clear(&mut self);
}

/// Lifecycle state of a [`MetricsTable`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    Empty,
    Rendered,
    Error,
}

/// Renders metrics into a container and keeps the current rows.
///
/// # Example
///
/// ```
/// use perfgauge::analysis::Thresholds;
/// use perfgauge::metrics::AllMetrics;
/// use perfgauge::report::{MetricsTable, TableState, TerminalTable};
///
/// let mut table: MetricsTable<TerminalTable> = MetricsTable::new();
/// assert!(table.update(Some(&AllMetrics::default()), &Thresholds::default()).is_err());
///
/// table
///     .render(TerminalTable::new(), Some(&AllMetrics::default()), &Thresholds::default())
///     .unwrap();
/// assert_eq!(table.state(), TableState::Rendered);
/// ```
pub struct MetricsTable<C: RowContainer> {
    branding: Option<Box<dyn BrandingProvider>>,
    container: Option<C>,
    state: TableState,
    rows: Vec<DisplayRow>,
    last_error: Option<String>,
}

impl<C: RowContainer> MetricsTable<C> {
    /// Creates an empty table using the fallback status colors.
    pub fn new() -> Self {
        Self {
            branding: None,
            container: None,
            state: TableState::Empty,
            rows: Vec::new(),
            last_error: None,
        }
    }

    /// Sets the branding provider consulted for status colors.
    pub fn with_branding(mut self, branding: Box<dyn BrandingProvider>) -> Self {
        self.branding = Some(branding);
        self
    }

    /// Renders metrics into a container, replacing any previous container.
    ///
    /// Missing metrics or invalid thresholds move the table to the Error
    /// state and are returned as [`ReportError::MalformedInput`].
    pub fn render(
        &mut self,
        container: C,
        metrics: Option<&AllMetrics>,
        thresholds: &Thresholds,
    ) -> Result<&[DisplayRow], ReportError> {
        if let Some(mut previous) = self.container.replace(container) {
            previous.clear();
        }
        self.rebuild(metrics, thresholds)
    }

    /// Rebuilds rows from new inputs in the current container.
    ///
    /// Fails with [`ReportError::UpdateBeforeRender`] while Empty.
    pub fn update(
        &mut self,
        metrics: Option<&AllMetrics>,
        thresholds: &Thresholds,
    ) -> Result<&[DisplayRow], ReportError> {
        if self.state == TableState::Empty {
            return Err(ReportError::UpdateBeforeRender);
        }
        self.rebuild(metrics, thresholds)
    }

    /// Drops the rows and empties the container. Safe to call repeatedly.
    pub fn clear(&mut self) {
        self.rows = Vec::new();
        self.last_error = None;
        self.state = TableState::Empty;

        if let Some(container) = self.container.as_mut() {
            container.clear();
        }
    }

    /// Rows from the last successful render or update.
    pub fn current_rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// Message shown by the last failed render or update.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    fn rebuild(
        &mut self,
        metrics: Option<&AllMetrics>,
        thresholds: &Thresholds,
    ) -> Result<&[DisplayRow], ReportError> {
        let metrics = match check_input(metrics, thresholds) {
            Ok(metrics) => metrics,
            Err(message) => {
                error!("Failed to render metrics: {}", message);
                self.rows = Vec::new();
                self.state = TableState::Error;
                if let Some(container) = self.container.as_mut() {
                    container.show_error(&message);
                }
                self.last_error = Some(message.clone());
                return Err(ReportError::MalformedInput(message));
            }
        };

        let palette = StatusPalette::resolve(self.branding.as_deref());
        let rows = build_rows(metrics, thresholds, &palette);
        debug!("Built {} display rows", rows.len());

        if let Some(container) = self.container.as_mut() {
            container.mount(&rows);
        }

        self.rows = rows;
        self.last_error = None;
        self.state = TableState::Rendered;
        Ok(self.rows.as_slice())
    }
}

impl<C: RowContainer> Default for MetricsTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_input<'m>(
    metrics: Option<&'m AllMetrics>,
    thresholds: &Thresholds,
) -> Result<&'m AllMetrics, String> {
    let metrics = metrics.ok_or_else(|| "metrics are missing".to_string())?;
    thresholds.validate().map_err(|e| e.to_string())?;
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Status;
    use crate::metrics::NavigationSample;
    use crate::report::palette::BrandingError;

    /// Records every call it receives.
    #[derive(Default)]
    struct RecordingContainer {
        mounted: Vec<usize>,
        errors: Vec<String>,
        clears: usize,
    }

    impl RowContainer for RecordingContainer {
        fn mount(&mut self, rows: &[DisplayRow]) {
            self.mounted.push(rows.len());
        }

        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    struct NeonBranding;

    impl BrandingProvider for NeonBranding {
        fn color_for(&self, status: Status) -> Result<String, BrandingError> {
            Ok(match status {
                Status::Pass => "#39ff14",
                Status::Warn => "#ffff33",
                Status::Fail => "#ff073a",
            }
            .to_string())
        }
    }

    fn navigation_metrics(load_time: f64) -> AllMetrics {
        AllMetrics {
            navigation: NavigationSample {
                load_time,
                ttfb: 100.0,
                dom_content_loaded: 700.0,
                available: true,
            },
            ..AllMetrics::default()
        }
    }

    fn thresholds() -> Thresholds {
        Thresholds::default().with_load_time(2000.0)
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: MetricsTable<RecordingContainer> = MetricsTable::new();
        assert_eq!(table.state(), TableState::Empty);
        assert!(table.current_rows().is_empty());
        assert!(table.container().is_none());
    }

    #[test]
    fn test_update_before_render_fails() {
        let mut table: MetricsTable<RecordingContainer> = MetricsTable::new();
        let result = table.update(Some(&navigation_metrics(1500.0)), &thresholds());

        assert!(matches!(result, Err(ReportError::UpdateBeforeRender)));
        assert_eq!(table.state(), TableState::Empty);
    }

    #[test]
    fn test_render_then_update_replaces_rows() {
        let mut table = MetricsTable::new();

        let rows = table
            .render(
                RecordingContainer::default(),
                Some(&navigation_metrics(1500.0)),
                &thresholds(),
            )
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].status, Status::Pass);

        let rows = table
            .update(Some(&navigation_metrics(2500.0)), &thresholds())
            .unwrap();
        assert_eq!(rows[0].status, Status::Warn);
        assert_eq!(table.state(), TableState::Rendered);
        assert_eq!(table.container().unwrap().mounted, vec![3, 3]);
    }

    #[test]
    fn test_render_missing_metrics_enters_error() {
        let mut table = MetricsTable::new();
        let result = table.render(RecordingContainer::default(), None, &thresholds());

        assert!(matches!(result, Err(ReportError::MalformedInput(_))));
        assert_eq!(table.state(), TableState::Error);
        assert_eq!(table.last_error(), Some("metrics are missing"));
        assert!(table.current_rows().is_empty());
        assert_eq!(table.container().unwrap().errors.len(), 1);
    }

    #[test]
    fn test_invalid_thresholds_enter_error() {
        let mut table = MetricsTable::new();
        table
            .render(
                RecordingContainer::default(),
                Some(&navigation_metrics(1500.0)),
                &thresholds(),
            )
            .unwrap();

        let bad = thresholds().with_ttfb(-1.0);
        assert!(table.update(Some(&navigation_metrics(1500.0)), &bad).is_err());
        assert_eq!(table.state(), TableState::Error);
        assert!(table.current_rows().is_empty());
    }

    #[test]
    fn test_error_recovers_on_update() {
        let mut table = MetricsTable::new();
        let _ = table.render(RecordingContainer::default(), None, &thresholds());
        assert_eq!(table.state(), TableState::Error);

        table
            .update(Some(&navigation_metrics(1500.0)), &thresholds())
            .unwrap();
        assert_eq!(table.state(), TableState::Rendered);
        assert!(table.last_error().is_none());
        assert_eq!(table.current_rows().len(), 3);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut table = MetricsTable::new();
        table
            .render(
                RecordingContainer::default(),
                Some(&navigation_metrics(1500.0)),
                &thresholds(),
            )
            .unwrap();

        table.clear();
        table.clear();

        assert_eq!(table.state(), TableState::Empty);
        assert!(table.current_rows().is_empty());
        assert_eq!(table.container().unwrap().clears, 2);
        assert!(matches!(
            table.update(Some(&navigation_metrics(1500.0)), &thresholds()),
            Err(ReportError::UpdateBeforeRender)
        ));
    }

    #[test]
    fn test_clear_on_empty_table() {
        let mut table: MetricsTable<RecordingContainer> = MetricsTable::new();
        table.clear();
        assert_eq!(table.state(), TableState::Empty);
    }

    #[test]
    fn test_render_replaces_container() {
        let mut table = MetricsTable::new();
        table
            .render(
                RecordingContainer::default(),
                Some(&navigation_metrics(1500.0)),
                &thresholds(),
            )
            .unwrap();
        table
            .render(
                RecordingContainer::default(),
                Some(&AllMetrics::default()),
                &thresholds(),
            )
            .unwrap();

        assert_eq!(table.container().unwrap().mounted, vec![0]);
        assert!(table.current_rows().is_empty());
    }

    #[test]
    fn test_branding_colors_rows() {
        let mut table = MetricsTable::new().with_branding(Box::new(NeonBranding));
        let rows = table
            .render(
                RecordingContainer::default(),
                Some(&navigation_metrics(9000.0)),
                &thresholds(),
            )
            .unwrap();

        assert_eq!(rows[0].status, Status::Fail);
        assert_eq!(rows[0].color_code, "#ff073a");
        assert_eq!(rows[1].color_code, "#39ff14");
    }
}
