//! Header component: title on the left, progress status on the right.

use crate::ui::helpers::{text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SessionView;
use std::io::{self, Write};

const TITLE: &str = "WHO'S NEXT?";

/// Renders the title bar.
///
/// ```text
///  WHO'S NEXT?                                  done: 2/12
/// ```
pub fn render_header<W: Write + ?Sized>(out: &mut W, view: &SessionView, cols: usize) -> io::Result<()> {
    let status = truncate(&view.status, cols.saturating_sub(TITLE.len() + 2));
    let gap = cols.saturating_sub(TITLE.len() + text_width(&status) + 2);

    writeln!(
        out,
        "{}{} {}{}{} {}",
        Theme::fg(view.theme.accent),
        Theme::bold(),
        TITLE,
        view.theme.base(),
        " ".repeat(gap),
        status,
    )
}
