//! Colour palette and ANSI escape sequence generation.
//!
//! A session cycles through a fixed palette of accent/background pairs: one step
//! on every start-up and one on every acknowledged result. The persisted
//! `themeIndex` selects the entry modulo the palette length.
//!
//! # Example
//!
//! ```rust
//! use whosnext::ui::Theme;
//!
//! let theme = Theme::for_index(0);
//! print!("{}{}WHO'S NEXT?{}", Theme::fg(theme.accent), Theme::bg(theme.background), Theme::reset());
//! ```

/// One accent/background colour pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Accent colour, used for text and highlights.
    pub accent: &'static str,
    /// Background colour.
    pub background: &'static str,
}

const fn pair(accent: &'static str, background: &'static str) -> Theme {
    Theme { accent, background }
}

/// The fixed palette, in cycling order.
pub const THEMES: [Theme; 19] = [
    pair("#c90000", "#e9e7e2"),
    pair("#e6a5bd", "#24432d"),
    pair("#e72805", "#e7dece"),
    pair("#d4ea06", "#080a58"),
    pair("#1e1e22", "#e9e7e2"),
    pair("#e92000", "#a2cfc5"),
    pair("#f494c9", "#5e0800"),
    pair("#1a0683", "#eadcc6"),
    pair("#b3d47a", "#361c00"),
    pair("#1a1c1c", "#b5c8c6"),
    pair("#3537e4", "#f5cd25"),
    pair("#e0b8c3", "#1e1936"),
    pair("#247850", "#93b0eb"),
    pair("#7b1e0f", "#b5d7f3"),
    pair("#f4ffda", "#f35a2f"),
    pair("#050205", "#f4c4ad"),
    pair("#001c4e", "#d48766"),
    pair("#161ba7", "#c9c862"),
    pair("#2e0a14", "#a0d0f0"),
];

impl Theme {
    /// Returns the palette entry for a persisted theme index.
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        THEMES[index % THEMES.len()]
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Strips `#` prefix if present, validates length, and parses hex digits.
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground colour sequence (`\x1b[38;2;r;g;bm`).
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background colour sequence (`\x1b[48;2;r;g;bm`).
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Base style for a frame: accent text on the theme background.
    ///
    /// Components end styled spans with this rather than [`Theme::reset`], so
    /// the background stays painted behind the whole frame.
    #[must_use]
    pub fn base(&self) -> String {
        format!("{}{}{}", Self::reset(), Self::fg(self.accent), Self::bg(self.background))
    }

    /// Clears all styling (colours, bold, dim).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Clears the screen and homes the cursor.
    #[must_use]
    pub const fn clear_screen() -> &'static str {
        "\u{001b}[2J\u{001b}[H"
    }
}

impl Default for Theme {
    fn default() -> Self {
        THEMES[0]
    }
}
