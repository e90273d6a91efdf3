//! Styling primitives for status line output.
//!
//! This module uses the anstyle ecosystem:
//! - anstyle for composable styles and escape rendering
//! - [`width`] for escape-aware measurement and truncation
//! - [`color`] for color parsing, depth downsampling and style resolution

pub mod color;
pub mod width;

pub use color::{ColorApplier, parse_color};
pub use width::{find_reset, strip_sgr, truncate_visible, visible_width};

// ============================================================================
// Raw SGR sequences
// ============================================================================

/// Full reset of every attribute.
pub const RESET: &str = "\x1b[0m";

/// Restore the terminal's default foreground without touching other attributes.
pub const DEFAULT_FG: &str = "\x1b[39m";

/// Restore the terminal's default background without touching other attributes.
pub const DEFAULT_BG: &str = "\x1b[49m";

/// Bold on.
pub const BOLD_ON: &str = "\x1b[1m";

/// Normal intensity (clears bold and dim).
pub const BOLD_OFF: &str = "\x1b[22m";

#[cfg(test)]
mod tests {
    use super::*;
    use anstyle::{AnsiColor, Color, Style};

    #[test]
    fn test_anstyle_renders_the_codes_we_hardcode() {
        // The Powerline composer mixes anstyle output with these literals; both
        // must agree on the SGR forms or delta tracking drifts.
        let bold = Style::new().bold();
        assert_eq!(bold.render().to_string(), BOLD_ON);
        assert_eq!(bold.render_reset().to_string(), RESET);
        assert_eq!(
            Color::Ansi(AnsiColor::Red).render_fg().to_string(),
            "\x1b[31m"
        );
    }
}
