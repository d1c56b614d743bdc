//! Footer component: pick count, command hints and the latest notice.

use crate::app::Screen;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SessionView;
use std::io::{self, Write};

const START_KEYS: &str = "enter/draw · pick N · import [FILE] · reset · init · theme · names · quit";
const RESULT_KEYS: &str = "enter/ok: back to start · reset · init · quit";

/// Renders the footer lines.
///
/// `notice` is the most recent advisory message, if any; it is shown once and
/// then forgotten by the caller.
pub fn render_footer<W: Write + ?Sized>(
    out: &mut W,
    view: &SessionView,
    notice: Option<&str>,
    cols: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{}PICK {}{} ({}-{})",
        Theme::bold(),
        view.pick_count,
        view.theme.base(),
        view.pick_range.start(),
        view.pick_range.end()
    )?;

    let keys = match view.screen {
        Screen::Start => START_KEYS,
        Screen::Result => RESULT_KEYS,
    };
    writeln!(out, "{}{}{}", Theme::dim(), truncate(keys, cols), view.theme.base())?;

    if let Some(message) = notice {
        writeln!(
            out,
            "{}{}{}",
            Theme::fg(view.theme.accent),
            truncate(message, cols),
            view.theme.base()
        )?;
    }
    Ok(())
}
