//! History component: one numbered row per roster slot.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SessionView;
use std::io::{self, Write};

/// Renders the draw history.
///
/// Drawn slots show the name; slots not drawn yet show a dimmed `-`.
///
/// ```text
/// 01  Bob
/// 02  Ann
/// 03  -
/// ```
pub fn render_history<W: Write + ?Sized>(out: &mut W, view: &SessionView, cols: usize) -> io::Result<()> {
    for row in &view.history {
        let name_width = cols.saturating_sub(row.number.len() + 2);
        match &row.name {
            Some(name) => writeln!(
                out,
                "{}{}{}  {}",
                Theme::fg(view.theme.accent),
                row.number,
                view.theme.base(),
                truncate(name, name_width)
            )?,
            None => writeln!(out, "{}{}  -{}", Theme::dim(), row.number, view.theme.base())?,
        }
    }
    Ok(())
}
