//! Powerline layout settings.

use serde::{Deserialize, Serialize};

/// Right-pointing solid arrow from the Powerline glyph range.
pub const DEFAULT_SEPARATOR: &str = "\u{e0b0}";

/// Used when the configured theme is empty.
const DEFAULT_THEME: [(&str, &str); 4] = [
    ("bright-white", "blue"),
    ("black", "cyan"),
    ("bright-white", "magenta"),
    ("black", "green"),
];

/// One foreground/background pair of a Powerline theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub fg: String,
    pub bg: String,
}

impl ThemeColors {
    pub fn new(fg: impl Into<String>, bg: impl Into<String>) -> Self {
        Self {
            fg: fg.into(),
            bg: bg.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PowerlineConfig {
    pub enabled: bool,

    /// Glyph drawn between segments and after the last one
    pub separator: String,

    /// Glyph drawn before the first segment of each group
    pub start_cap: Option<String>,

    /// Replaces the separator after the last segment of each group
    pub end_cap: Option<String>,

    /// Pad each column to the widest item at that position across all lines
    pub auto_align: bool,

    /// Keep cycling theme colors from where the previous line stopped
    pub continue_theme_across_lines: bool,

    /// Cycled by segment index; empty means the built-in theme
    pub theme: Vec<ThemeColors>,
}

impl Default for PowerlineConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            separator: DEFAULT_SEPARATOR.to_string(),
            start_cap: None,
            end_cap: None,
            auto_align: false,
            continue_theme_across_lines: false,
            theme: Vec::new(),
        }
    }
}

impl PowerlineConfig {
    /// Theme colors `(fg, bg)` for the segment at `index`, wrapping around.
    pub fn theme_pair(&self, index: usize) -> (&str, &str) {
        if self.theme.is_empty() {
            DEFAULT_THEME[index % DEFAULT_THEME.len()]
        } else {
            let pair = &self.theme[index % self.theme.len()];
            (pair.fg.as_str(), pair.bg.as_str())
        }
    }
}
