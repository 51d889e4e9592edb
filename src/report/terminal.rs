//! Terminal Row Container
//!
//! Renders rows as aligned text lines, with the status cell painted in
//! the row's color.

use colored::Colorize;

use super::rows::DisplayRow;
use super::table::RowContainer;

/// Width of the metric name column.
const LABEL_WIDTH: usize = 26;

/// Width of the value columns.
const VALUE_WIDTH: usize = 10;

/// A [`RowContainer`] that buffers terminal output.
#[derive(Debug, Clone, Default)]
pub struct TerminalTable {
    lines: Vec<String>,
}

impl TerminalTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the rendered lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the rendered output as one string.
    pub fn output(&self) -> String {
        let mut output = self.lines.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        output
    }

    fn format_row(row: &DisplayRow) -> String {
        let status = match parse_hex_color(&row.color_code) {
            Some((r, g, b)) => row.status.as_str().truecolor(r, g, b).bold().to_string(),
            None => row.status.as_str().to_string(),
        };

        let mut line = format!(
            "{:<label$} {:>value$} / {:<value$} {}",
            row.metric,
            row.formatted_actual,
            row.formatted_threshold,
            status,
            label = LABEL_WIDTH,
            value = VALUE_WIDTH,
        );

        if let Some(ref detail) = row.detail {
            line.push_str(&format!("  {}", detail));
        }
        line
    }
}

impl RowContainer for TerminalTable {
    fn mount(&mut self, rows: &[DisplayRow]) {
        self.lines.clear();

        if rows.is_empty() {
            self.lines.push("No metrics available".to_string());
            return;
        }

        self.lines.push(format!(
            "{:<label$} {:>value$} / {:<value$} {}",
            "Metric",
            "Actual",
            "Threshold",
            "Status",
            label = LABEL_WIDTH,
            value = VALUE_WIDTH,
        ));
        self.lines.extend(rows.iter().map(Self::format_row));
    }

    fn show_error(&mut self, message: &str) {
        self.lines.clear();
        self.lines.push(format!("Error: {}", message));
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Parses a `#rrggbb` color code.
fn parse_hex_color(code: &str) -> Option<(u8, u8, u8)> {
    let hex = code.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Status;

    fn sample_row() -> DisplayRow {
        DisplayRow {
            metric: "Largest Resource".to_string(),
            actual_value: 700_000.0,
            threshold_value: 512_000.0,
            formatted_actual: "683.6 KB".to_string(),
            formatted_threshold: "500.0 KB".to_string(),
            status: Status::Warn,
            color_code: "#f59e0b".to_string(),
            detail: Some("vendor.js (script)".to_string()),
        }
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex_color("#EF4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(parse_hex_color("10b981"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_mount_renders_header_and_rows() {
        let mut table = TerminalTable::new();
        table.mount(&[sample_row()]);

        assert_eq!(table.lines().len(), 2);
        assert!(table.lines()[0].starts_with("Metric"));
        let line = &table.lines()[1];
        assert!(line.starts_with("Largest Resource"));
        assert!(line.contains("683.6 KB / 500.0 KB"));
        assert!(line.contains("WARN"));
        assert!(line.ends_with("vendor.js (script)"));
    }

    #[test]
    fn test_mount_empty_rows() {
        let mut table = TerminalTable::new();
        table.mount(&[]);
        assert_eq!(table.output(), "No metrics available\n");
    }

    #[test]
    fn test_error_replaces_rows() {
        let mut table = TerminalTable::new();
        table.mount(&[sample_row()]);
        table.show_error("metrics are missing");

        assert_eq!(table.lines().len(), 1);
        assert_eq!(table.lines()[0], "Error: metrics are missing");
    }

    #[test]
    fn test_clear() {
        let mut table = TerminalTable::new();
        table.mount(&[sample_row()]);
        table.clear();
        assert!(table.output().is_empty());
    }
}
