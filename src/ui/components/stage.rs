//! Stage component: the start control or the grid of freshly drawn names.
//!
//! On the start screen the stage shows a single `[ START ]` control, dimmed
//! when no draw is possible. On the result screen it lays the current pick out
//! in [`SessionView::grid_columns`] columns, each card showing the overall draw
//! number and the name. A hint line always follows.

use crate::app::Screen;
use crate::ui::helpers::{center, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PickCard, SessionView};
use std::io::{self, Write};

/// Gap between result cards, in cells.
const CARD_GAP: usize = 2;

pub fn render_stage<W: Write + ?Sized>(out: &mut W, view: &SessionView, cols: usize) -> io::Result<()> {
    writeln!(out)?;
    match view.screen {
        Screen::Start => render_start(out, view, cols)?,
        Screen::Result => render_cards(out, view, cols)?,
    }
    writeln!(out)?;
    writeln!(out, "{}{}{}", Theme::dim(), center(&view.hint.to_string(), cols), view.theme.base())
}

fn render_start<W: Write + ?Sized>(out: &mut W, view: &SessionView, cols: usize) -> io::Result<()> {
    let style = if view.start_enabled {
        format!("{}{}", Theme::fg(view.theme.accent), Theme::bold())
    } else {
        Theme::dim().to_string()
    };
    writeln!(out, "{}{}{}", style, center("[ START ]", cols), view.theme.base())
}

fn render_cards<W: Write + ?Sized>(out: &mut W, view: &SessionView, cols: usize) -> io::Result<()> {
    let columns = view.grid_columns.max(1);
    let card_width = (cols.saturating_sub(CARD_GAP * (columns - 1)) / columns).max(8);

    for row in view.current_picks.chunks(columns) {
        let line = row
            .iter()
            .map(|card| format_card(card, card_width))
            .collect::<Vec<_>>()
            .join(&" ".repeat(CARD_GAP));
        writeln!(
            out,
            "{}{}{}{}",
            Theme::fg(view.theme.accent),
            Theme::bold(),
            line,
            view.theme.base()
        )?;
    }
    Ok(())
}

fn format_card(card: &PickCard, width: usize) -> String {
    let label = format!("{}  {}", card.number, card.name);
    center(&truncate(&label, width), width)
}
