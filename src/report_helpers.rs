use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Compute the max display width of `items`, with a minimum of `min`.
/// Wide characters (CJK names, emoji) count as two columns.
pub fn max_display_width<'a>(items: impl Iterator<Item = &'a str>, min: usize) -> usize {
    items.map(UnicodeWidthStr::width).max().unwrap_or(min).max(min)
}

/// Left-align `s` in a column `width` display cells wide.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(fill))
}

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Format a Unix timestamp as `YYYY-MM-DD` (UTC).
pub fn format_date(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
