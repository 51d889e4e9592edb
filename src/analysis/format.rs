//! Display Formatting
//!
//! Unit-stable renderings of times, sizes, counts and names.

/// Bytes per kilobyte.
pub const KB: f64 = 1024.0;

/// Bytes per megabyte.
pub const MB: f64 = 1024.0 * 1024.0;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Default maximum length for resource and request names.
pub const DEFAULT_TEXT_WIDTH: usize = 40;

/// Formats a duration in milliseconds.
///
/// ```
/// use perfgauge::analysis::format_time;
///
/// assert_eq!(format_time(999.0), "999ms");
/// assert_eq!(format_time(1000.0), "1.00s");
/// ```
pub fn format_time(ms: f64) -> String {
    if ms >= 1000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        format!("{}ms", ms.round() as i64)
    }
}

/// Formats a size in bytes as B, KB (one decimal) or MB (two decimals).
pub fn format_size(bytes: f64) -> String {
    if bytes >= MB {
        format!("{:.2} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes.round() as i64)
    }
}

/// Formats a count as a plain integer.
pub fn format_count(count: u64) -> String {
    count.to_string()
}

/// Truncates text to at most `max_len` characters.
///
/// Truncated output ends in `...` and is exactly `max_len` characters
/// long. Widths too small for the ellipsis keep the leading characters.
pub fn format_text(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_len {
        return text.to_string();
    }

    let marker_len = ELLIPSIS.chars().count();
    if max_len < marker_len {
        return text.chars().take(max_len).collect();
    }

    let mut truncated: String = text.chars().take(max_len - marker_len).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_boundaries() {
        assert_eq!(format_time(0.0), "0ms");
        assert_eq!(format_time(200.0), "200ms");
        assert_eq!(format_time(999.0), "999ms");
        assert_eq!(format_time(1000.0), "1.00s");
        assert_eq!(format_time(1500.0), "1.50s");
        assert_eq!(format_time(2000.0), "2.00s");
    }

    #[test]
    fn test_time_rounds_sub_second_values() {
        assert_eq!(format_time(412.4), "412ms");
        assert_eq!(format_time(412.6), "413ms");
    }

    #[test]
    fn test_size_boundaries() {
        assert_eq!(format_size(0.0), "0 B");
        assert_eq!(format_size(1023.0), "1023 B");
        assert_eq!(format_size(1024.0), "1.0 KB");
        assert_eq!(format_size(1_048_575.0), "1024.0 KB");
        assert_eq!(format_size(1_048_576.0), "1.00 MB");
    }

    #[test]
    fn test_size_scenario() {
        assert_eq!(format_size(2_048_000.0), "1.95 MB");
        assert_eq!(format_size(1_024_000.0), "1000.0 KB");
    }

    #[test]
    fn test_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(1_234_567), "1234567");
    }

    #[test]
    fn test_text_verbatim() {
        assert_eq!(format_text("app.js", 10), "app.js");
        assert_eq!(format_text("0123456789", 10), "0123456789");
    }

    #[test]
    fn test_text_truncated() {
        let out = format_text("very-long-bundle-name.chunk.js", 12);
        assert_eq!(out, "very-long...");
        assert_eq!(out.chars().count(), 12);
    }

    #[test]
    fn test_text_multibyte() {
        let out = format_text("ñandú-imágenes.png", 8);
        assert_eq!(out, "ñandú...");
        assert_eq!(out.chars().count(), 8);
    }

    #[test]
    fn test_text_tiny_width() {
        assert_eq!(format_text("abcdef", 2), "ab");
        assert_eq!(format_text("abcdef", 3), "...");
    }
}
