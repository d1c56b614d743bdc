//! Shared rendering utilities.
//!
//! Width calculations here count `char`s, which is exact for the names most
//! rosters contain and close enough for the rest.

use crate::ui::theme::Theme;
use std::io::{self, Write};

/// Display width of `text` in terminal cells (approximated by char count).
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates `text` to at most `width` cells, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Centers `text` within `width` cells. Left padding is the smaller half.
#[must_use]
pub fn center(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let used = text_width(&text);
    let left = width.saturating_sub(used) / 2;
    let right = width.saturating_sub(used + left);
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Writes a horizontal rule in the accent colour.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_rule<W: Write + ?Sized>(out: &mut W, theme: &Theme, cols: usize) -> io::Result<()> {
    writeln!(out, "{}{}{}", Theme::fg(theme.accent), "─".repeat(cols), theme.base())
}
