//! Color parsing, depth downsampling and per-item style resolution.
//!
//! Config colors are plain strings: one of the sixteen ANSI names
//! (`red`, `bright-blue`, `gray`, ...), `ansi256:N`, or `hex:RRGGBB` /
//! `#RRGGBB`. A `bg` prefix (`bgBlue`) is accepted so settings written for
//! background slots read naturally.

use anstyle::{Ansi256Color, AnsiColor, Color, RgbColor, Style};

use crate::config::{ColorLevel, Settings, WidgetItem};

use super::find_reset;

/// xterm default RGB values for the sixteen ANSI colors, in `AnsiColor` order.
const ANSI_PALETTE: [(AnsiColor, (u8, u8, u8)); 16] = [
    (AnsiColor::Black, (0, 0, 0)),
    (AnsiColor::Red, (205, 0, 0)),
    (AnsiColor::Green, (0, 205, 0)),
    (AnsiColor::Yellow, (205, 205, 0)),
    (AnsiColor::Blue, (0, 0, 238)),
    (AnsiColor::Magenta, (205, 0, 205)),
    (AnsiColor::Cyan, (0, 205, 205)),
    (AnsiColor::White, (229, 229, 229)),
    (AnsiColor::BrightBlack, (127, 127, 127)),
    (AnsiColor::BrightRed, (255, 0, 0)),
    (AnsiColor::BrightGreen, (0, 255, 0)),
    (AnsiColor::BrightYellow, (255, 255, 0)),
    (AnsiColor::BrightBlue, (92, 92, 255)),
    (AnsiColor::BrightMagenta, (255, 0, 255)),
    (AnsiColor::BrightCyan, (0, 255, 255)),
    (AnsiColor::BrightWhite, (255, 255, 255)),
];

/// Channel levels of the xterm 6x6x6 color cube.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn named_color(name: &str) -> Option<AnsiColor> {
    let color = match name {
        "black" => AnsiColor::Black,
        "red" => AnsiColor::Red,
        "green" => AnsiColor::Green,
        "yellow" => AnsiColor::Yellow,
        "blue" => AnsiColor::Blue,
        "magenta" => AnsiColor::Magenta,
        "cyan" => AnsiColor::Cyan,
        "white" => AnsiColor::White,
        "brightblack" | "gray" | "grey" => AnsiColor::BrightBlack,
        "brightred" => AnsiColor::BrightRed,
        "brightgreen" => AnsiColor::BrightGreen,
        "brightyellow" => AnsiColor::BrightYellow,
        "brightblue" => AnsiColor::BrightBlue,
        "brightmagenta" => AnsiColor::BrightMagenta,
        "brightcyan" => AnsiColor::BrightCyan,
        "brightwhite" => AnsiColor::BrightWhite,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<RgbColor> {
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RgbColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Parse a config color string. Returns `None` for anything unrecognized.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();

    if let Some(index) = spec.strip_prefix("ansi256:") {
        return index.trim().parse::<u8>().ok().map(|i| Color::Ansi256(Ansi256Color(i)));
    }
    if let Some(hex) = spec.strip_prefix("hex:").or_else(|| spec.strip_prefix('#')) {
        return parse_hex(hex.trim()).map(Color::Rgb);
    }

    let normalized: String = spec
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    let name = normalized
        .strip_prefix("bg")
        .filter(|rest| named_color(rest).is_some())
        .unwrap_or(&normalized);
    named_color(name).map(Color::Ansi)
}

fn ansi256_to_rgb(index: u8) -> (u8, u8, u8) {
    match index {
        0..=15 => ANSI_PALETTE[index as usize].1,
        16..=231 => {
            let i = index - 16;
            (
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i % 36) / 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let v = 8 + 10 * (index - 232);
            (v, v, v)
        }
    }
}

fn rgb_to_ansi256(RgbColor(r, g, b): RgbColor) -> u8 {
    if r == g && g == b {
        return match r {
            0..8 => 16,
            249.. => 231,
            _ => 232 + ((f64::from(r) - 8.0) / 247.0 * 24.0).round() as u8,
        };
    }
    let scale = |c: u8| (f64::from(c) / 255.0 * 5.0).round() as u8;
    16 + 36 * scale(r) + 6 * scale(g) + scale(b)
}

fn nearest_ansi((r, g, b): (u8, u8, u8)) -> AnsiColor {
    let distance = |(pr, pg, pb): (u8, u8, u8)| {
        let d = |a: u8, b: u8| (i32::from(a) - i32::from(b)).pow(2);
        d(r, pr) + d(g, pg) + d(b, pb)
    };
    ANSI_PALETTE
        .iter()
        .min_by_key(|(_, rgb)| distance(*rgb))
        .map(|(color, _)| *color)
        .unwrap_or(AnsiColor::White)
}

/// Convert `color` to the richest form the configured depth can display.
pub fn downsample(color: Color, level: ColorLevel) -> Option<Color> {
    let converted = match (level, color) {
        (ColorLevel::None, _) => return None,
        (ColorLevel::Truecolor, c) => c,
        (ColorLevel::Ansi256, Color::Rgb(rgb)) => Color::Ansi256(Ansi256Color(rgb_to_ansi256(rgb))),
        (ColorLevel::Ansi256, c) => c,
        (ColorLevel::Basic, Color::Ansi(c)) => Color::Ansi(c),
        (ColorLevel::Basic, Color::Ansi256(index)) => Color::Ansi(
            index
                .into_ansi()
                .unwrap_or_else(|| nearest_ansi(ansi256_to_rgb(index.0))),
        ),
        (ColorLevel::Basic, Color::Rgb(RgbColor(r, g, b))) => Color::Ansi(nearest_ansi((r, g, b))),
    };
    Some(converted)
}

/// Resolves effective styles and emits them at the configured color depth.
///
/// Precedence per channel, highest first: the item's own color, the global
/// override, the fallback supplied by the caller (a widget default or a theme
/// color), then no color. The first level that is configured decides the
/// channel; an unparseable string at that level leaves the channel uncolored.
#[derive(Debug, Clone, Default)]
pub struct ColorApplier {
    level: ColorLevel,
    override_fg: Option<String>,
    override_bg: Option<String>,
    global_bold: bool,
}

impl ColorApplier {
    pub fn new(level: ColorLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            level: settings.color_level,
            override_fg: settings.override_foreground_color.clone(),
            override_bg: settings.override_background_color.clone(),
            global_bold: settings.global_bold,
        }
    }

    pub fn with_overrides(mut self, fg: Option<&str>, bg: Option<&str>, bold: bool) -> Self {
        self.override_fg = fg.map(str::to_string);
        self.override_bg = bg.map(str::to_string);
        self.global_bold = bold;
        self
    }

    /// Parse and downsample one color string.
    pub fn resolve(&self, spec: Option<&str>) -> Option<Color> {
        let spec = spec?;
        if self.level == ColorLevel::None {
            return None;
        }
        let Some(color) = parse_color(spec) else {
            log::debug!("Ignoring unrecognized color {spec:?}");
            return None;
        };
        downsample(color, self.level)
    }

    pub fn foreground(&self, item: &WidgetItem, fallback: Option<&str>) -> Option<Color> {
        self.resolve(
            item.color
                .as_deref()
                .or(self.override_fg.as_deref())
                .or(fallback),
        )
    }

    pub fn background(&self, item: &WidgetItem, fallback: Option<&str>) -> Option<Color> {
        self.resolve(
            item.background_color
                .as_deref()
                .or(self.override_bg.as_deref())
                .or(fallback),
        )
    }

    pub fn bold(&self, item: &WidgetItem) -> bool {
        self.level != ColorLevel::None && item.bold.unwrap_or(self.global_bold)
    }

    /// Effective style of a regular-mode item whose widget declares `widget_default`.
    pub fn item_style(&self, item: &WidgetItem, widget_default: Option<&str>) -> Style {
        let style = Style::new()
            .fg_color(self.foreground(item, widget_default))
            .bg_color(self.background(item, None));
        if self.bold(item) { style.bold() } else { style }
    }

    /// Wrap `text` in `style`. Plain styles (always the case at depth `none`)
    /// return the text untouched.
    ///
    /// A reset inside `text` is followed by `style` again, so the rest of the
    /// text keeps the item's colors.
    pub fn paint(&self, text: &str, style: Style) -> String {
        if style.is_plain() || text.is_empty() {
            return text.to_string();
        }
        let mut out = format!("{style}");
        let mut rest = text;
        while let Some((start, len)) = find_reset(rest) {
            out.push_str(&rest[..start + len]);
            rest = &rest[start + len..];
            if !rest.is_empty() {
                out.push_str(&style.render().to_string());
            }
        }
        out.push_str(rest);
        out.push_str(&format!("{style:#}"));
        out
    }
}
