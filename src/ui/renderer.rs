//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: `Session::compute_view` turns state into a [`SessionView`]
//! 2. **Component Rendering**: each component writes its region of the frame
//!
//! # Example
//!
//! ```rust
//! use whosnext::app::Session;
//! use whosnext::storage::MemoryStore;
//! use whosnext::ui::render_view;
//!
//! let session = Session::load(MemoryStore::new());
//! let mut frame = Vec::new();
//! render_view(&mut frame, &session.compute_view(), None, 60)?;
//! assert!(String::from_utf8_lossy(&frame).contains("done: 0/0"));
//! # Ok::<(), std::io::Error>(())
//! ```

use crate::ui::components::{render_footer, render_header, render_history, render_stage};
use crate::ui::helpers::write_rule;
use crate::ui::viewmodel::SessionView;
use std::io::{self, Write};

/// Narrowest frame the renderer lays out for.
const MIN_COLS: usize = 24;

/// Renders one full frame of `view` into `out`.
///
/// The frame is painted in the theme's base style, which stays active after
/// the frame so the prompt shares the background. Does not clear the screen;
/// the caller decides whether to.
///
/// # Errors
///
/// Propagates write failures from `out`.
pub fn render_view<W: Write + ?Sized>(
    out: &mut W,
    view: &SessionView,
    notice: Option<&str>,
    cols: usize,
) -> io::Result<()> {
    let cols = cols.max(MIN_COLS);

    write!(out, "{}", view.theme.base())?;
    render_header(out, view, cols)?;
    write_rule(out, &view.theme, cols)?;
    render_stage(out, view, cols)?;
    write_rule(out, &view.theme, cols)?;
    render_history(out, view, cols)?;
    write_rule(out, &view.theme, cols)?;
    render_footer(out, view, notice, cols)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Session;
    use crate::storage::MemoryStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn frame(session: &Session<MemoryStore, StdRng>, notice: Option<&str>) -> String {
        let mut buf = Vec::new();
        render_view(&mut buf, &session.compute_view(), notice, 60).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_session_asks_for_names() {
        let session = Session::load_with_rng(MemoryStore::new(), StdRng::seed_from_u64(1));
        let text = frame(&session, Some("Import the names list."));
        assert!(text.contains("WHO'S NEXT?"));
        assert!(text.contains("[ START ]"));
        assert!(text.contains("done: 0/0"));
        assert!(text.contains("Import the names list."));
    }

    #[test]
    fn frame_is_painted_with_theme_background() {
        use crate::ui::Theme;

        let mut session = Session::load_with_rng(MemoryStore::new(), StdRng::seed_from_u64(1));
        session.cycle_theme().unwrap();
        let theme = session.compute_view().theme;
        let text = frame(&session, None);

        assert!(text.starts_with(&theme.base()));
        assert!(text.contains(&Theme::bg(theme.background)));
        assert!(!text.contains(&format!("{}\n", Theme::reset())));
    }

    #[test]
    fn result_screen_shows_drawn_names() {
        let mut session = Session::load_with_rng(MemoryStore::new(), StdRng::seed_from_u64(1));
        session.import_roster("Ann\nBob\nCara").unwrap();
        session.set_pick_input("3").unwrap();
        session.draw().unwrap();

        let text = frame(&session, None);
        assert!(!text.contains("[ START ]"));
        for name in ["Ann", "Bob", "Cara"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("done: 3/3"));
        assert!(text.contains("finished!"));
    }
}
