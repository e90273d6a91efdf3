//! Status line settings.
//!
//! Settings are read once per invocation and are immutable for the rest of
//! the refresh. The file format is TOML with kebab-case keys:
//!
//! ```toml
//! color-level = "256"
//! flex-mode = "full-minus-40"
//! default-separator = " | "
//!
//! [powerline]
//! enabled = true
//! auto-align = true
//!
//! [[lines]]
//! items = [
//!   { type = "model", color = "cyan" },
//!   { type = "flex-separator" },
//!   { type = "git-branch", raw-value = true },
//! ]
//! ```

mod path;
mod theme;

use config::ConfigError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use path::{get_config_path, set_config_path};
pub use theme::{PowerlineConfig, ThemeColors};

/// Type tag that marks a flex separator rather than a widget.
pub const FLEX_SEPARATOR: &str = "flex-separator";

/// Prefix for environment overrides, e.g. `STATUSLINE__COLOR_LEVEL=none`.
const ENV_PREFIX: &str = "STATUSLINE";

/// Color depth used when emitting escape sequences.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum ColorLevel {
    /// No escape sequences at all
    #[serde(rename = "none")]
    #[strum(to_string = "none", serialize = "0")]
    None,
    /// 16-color ANSI palette
    #[serde(rename = "basic")]
    #[strum(to_string = "basic", serialize = "16", serialize = "1")]
    Basic,
    /// xterm 256-color palette
    #[default]
    #[serde(rename = "256")]
    #[strum(to_string = "256", serialize = "2")]
    Ansi256,
    /// 24-bit RGB
    #[serde(rename = "truecolor")]
    #[strum(to_string = "truecolor", serialize = "3")]
    Truecolor,
}

/// How much of the terminal width the status lines may use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
pub enum FlexMode {
    #[serde(rename = "full")]
    #[strum(serialize = "full")]
    Full,
    #[default]
    #[serde(rename = "full-minus-40")]
    #[strum(serialize = "full-minus-40")]
    FullMinus40,
    /// Full width until the context reports it is close to compacting
    #[serde(rename = "full-until-compact")]
    #[strum(serialize = "full-until-compact")]
    FullUntilCompact,
}

/// One configured entry on a line: a widget or a flex separator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WidgetItem {
    /// Widget type tag (`model`, `git-branch`, `flex-separator`, ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Show the bare value without the widget's label
    #[serde(default)]
    pub raw_value: bool,

    pub color: Option<String>,
    pub background_color: Option<String>,
    pub bold: Option<bool>,

    /// No separator or padding between this item and the one before it
    #[serde(default)]
    pub merge_previous: bool,

    /// No separator or padding between this item and the one after it
    #[serde(default)]
    pub merge_next: bool,

    /// Overrides `default-padding` for this item
    pub padding: Option<String>,

    // Widget-specific fields
    /// Text for `custom-text`
    pub text: Option<String>,
    /// Shell command for `custom-command`
    pub command: Option<String>,
    /// Timeout for `custom-command`, in milliseconds
    pub timeout_ms: Option<u64>,
    /// Keep the command's own escape sequences instead of applying item colors
    #[serde(default)]
    pub preserve_colors: bool,
}

impl WidgetItem {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn flex() -> Self {
        Self::new(FLEX_SEPARATOR)
    }

    pub fn is_flex(&self) -> bool {
        self.kind == FLEX_SEPARATOR
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn with_padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn merged_with_previous(mut self) -> Self {
        self.merge_previous = true;
        self
    }

    pub fn merged_with_next(mut self) -> Self {
        self.merge_next = true;
        self
    }

    pub fn raw(mut self) -> Self {
        self.raw_value = true;
        self
    }
}

/// An ordered row of items, rendered left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Line {
    #[serde(default)]
    pub items: Vec<WidgetItem>,
}

impl Line {
    pub fn new(items: Vec<WidgetItem>) -> Self {
        Self { items }
    }
}

/// Everything the rendering pipeline reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Settings {
    pub color_level: ColorLevel,
    pub flex_mode: FlexMode,

    /// Context usage percentage at which `full-until-compact` narrows the line
    pub compact_threshold: f64,

    pub default_separator: String,
    pub default_padding: String,

    /// Style each separator like the item before it
    pub inherit_separator_colors: bool,

    pub override_foreground_color: Option<String>,
    pub override_background_color: Option<String>,
    pub global_bold: bool,

    pub powerline: PowerlineConfig,
    pub lines: Vec<Line>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_level: ColorLevel::default(),
            flex_mode: FlexMode::default(),
            compact_threshold: 60.0,
            default_separator: " | ".to_string(),
            default_padding: String::new(),
            inherit_separator_colors: false,
            override_foreground_color: None,
            override_background_color: None,
            global_bold: false,
            powerline: PowerlineConfig::default(),
            lines: vec![Line::new(vec![
                WidgetItem::new("model"),
                WidgetItem::new("current-dir"),
                WidgetItem::new("git-branch"),
            ])],
        }
    }
}

impl Settings {
    /// Load settings from the resolved config path, with environment overrides.
    ///
    /// A missing file is not an error: defaults apply.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(get_config_path().as_deref())
    }

    pub fn load_from(path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            log::debug!("Loading settings from {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .convert_case(config::Case::Kebab),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Parse settings from a TOML string, ignoring the environment.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::Message(format!("Failed to parse TOML: {e}")))
    }
}
