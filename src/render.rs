//! The rendering pipeline.
//!
//! One refresh runs, in order:
//!
//! 1. [`resolve_width`]: usable width from the flex mode and terminal size
//! 2. [`prerender_line`]: every widget runs once; silent widgets drop out
//! 3. [`AlignmentTable::compute`]: column widths across lines (Powerline
//!    auto-align only)
//! 4. per line, [`compose_regular`] or [`PowerlineComposer::compose`], each of
//!    which expands flex markers, applies colors and truncates to the width
//!
//! Nothing here performs I/O or survives the refresh.

mod align;
mod flex;
mod powerline;
mod prerender;
mod regular;
mod width;

pub use align::AlignmentTable;
pub use flex::{FLEX_FILL, Piece, distribute, expand};
pub use powerline::PowerlineComposer;
pub use prerender::{RenderedItem, RenderedLine, Slot, prerender_line};
pub use regular::compose_regular;
pub use width::{
    COMPACT_MARGIN, DEFAULT_TERMINAL_WIDTH, detect_terminal_width, is_compacting, resolve_width,
};

use crate::config::{FlexMode, Settings};
use crate::context::RenderContext;
use crate::styling::ColorApplier;
use crate::widgets::WidgetRegistry;

/// Render every configured line for a terminal `terminal_width` columns wide.
///
/// Returns one string per configured line, without line terminators. Lines
/// whose widgets all stayed silent are empty strings.
pub fn render_lines(
    settings: &Settings,
    registry: &WidgetRegistry,
    ctx: &RenderContext,
    terminal_width: usize,
) -> Vec<String> {
    let compacting = settings.flex_mode == FlexMode::FullUntilCompact
        && is_compacting(ctx, settings.compact_threshold);
    let width = resolve_width(settings.flex_mode, terminal_width, compacting);
    log::debug!(
        "Rendering {} line(s) at width {width} ({}, terminal {terminal_width})",
        settings.lines.len(),
        settings.flex_mode
    );

    let colors = ColorApplier::from_settings(settings);
    let lines: Vec<RenderedLine<'_>> = settings
        .lines
        .iter()
        .map(|line| prerender_line(line, registry, ctx))
        .collect();

    if !settings.powerline.enabled {
        return lines
            .iter()
            .map(|line| compose_regular(line, settings, &colors, width))
            .collect();
    }

    let table = settings
        .powerline
        .auto_align
        .then(|| AlignmentTable::compute(&lines));
    let mut composer = PowerlineComposer::new(settings, &colors);
    if let Some(table) = &table {
        composer = composer.with_alignment(table);
    }

    let mut theme_index = 0;
    lines
        .iter()
        .map(|line| {
            if !settings.powerline.continue_theme_across_lines {
                theme_index = 0;
            }
            composer.compose(line, width, &mut theme_index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorLevel, Line, WidgetItem};
    use crate::styling::{strip_sgr, visible_width};
    use insta::assert_snapshot;
    use serde_json::json;

    fn text(value: &str) -> WidgetItem {
        WidgetItem::new("custom-text").with_text(value)
    }

    fn plain_settings(lines: Vec<Line>) -> Settings {
        Settings {
            color_level: ColorLevel::None,
            flex_mode: FlexMode::Full,
            lines,
            ..Settings::default()
        }
    }

    fn render(settings: &Settings, ctx: &RenderContext, width: usize) -> Vec<String> {
        render_lines(settings, &WidgetRegistry::builtin(), ctx, width)
    }

    #[test]
    fn test_regular_lines() {
        let settings = plain_settings(vec![
            Line::new(vec![text("AA"), text("BB")]),
            Line::new(vec![text("CC")]),
        ]);
        let lines = render(&settings, &RenderContext::default(), 20);
        assert_eq!(lines, ["AA | BB", "CC"]);
    }

    #[test]
    fn test_silent_widget_leaves_no_trace() {
        let settings = plain_settings(vec![Line::new(vec![
            text("AA"),
            WidgetItem::new("model"),
            text("BB"),
        ])]);
        // No model in the context
        let lines = render(&settings, &RenderContext::default(), 80);
        assert_snapshot!(lines[0], @"AA | BB");
    }

    #[test]
    fn test_all_silent_line_is_empty() {
        let settings = plain_settings(vec![
            Line::new(vec![WidgetItem::new("model"), WidgetItem::flex()]),
            Line::new(vec![text("x")]),
        ]);
        let lines = render(&settings, &RenderContext::default(), 80);
        assert_eq!(lines, ["", "x"]);
    }

    #[test]
    fn test_every_line_truncates_to_the_same_width() {
        let settings = Settings {
            flex_mode: FlexMode::FullMinus40,
            ..plain_settings(vec![
                Line::new(vec![text("0123456789"), text("abcdef")]),
                Line::new(vec![text("short")]),
            ])
        };
        let lines = render(&settings, &RenderContext::default(), 50);
        assert_eq!(lines, ["0123456789", "short"]);
    }

    #[test]
    fn test_full_until_compact() {
        let settings = Settings {
            flex_mode: FlexMode::FullUntilCompact,
            ..plain_settings(vec![Line::new(vec![text("L"), WidgetItem::flex(), text("R")])])
        };

        let relaxed = RenderContext::new(json!({"context_window": {"used_percentage": 10}}));
        assert_eq!(visible_width(&render(&settings, &relaxed, 100)[0]), 100);

        let compacting = RenderContext::new(json!({"context_window": {"used_percentage": 85}}));
        assert_eq!(visible_width(&render(&settings, &compacting, 100)[0]), 60);
    }

    #[test]
    fn test_multi_line_widget_stays_on_one_row() {
        let settings = plain_settings(vec![Line::new(vec![
            text("a\nb"),
            WidgetItem::flex(),
            text("R"),
        ])]);
        let lines = render(&settings, &RenderContext::default(), 10);
        assert!(!lines[0].contains(['\r', '\n']));
        assert!(lines[0].starts_with("a b"));
        assert_eq!(visible_width(&lines[0]), 10);
    }

    #[test]
    fn test_colored_regular_line() {
        let settings = Settings {
            color_level: ColorLevel::Basic,
            ..plain_settings(vec![Line::new(vec![text("hi"), text("there").with_color("nope")])])
        };
        let lines = render(&settings, &RenderContext::default(), 80);
        // custom-text defaults to white; an unknown color leaves the channel plain
        assert_eq!(lines[0], "\x1b[37mhi\x1b[0m | there");
    }

    #[test]
    fn test_override_foreground() {
        let settings = Settings {
            color_level: ColorLevel::Basic,
            override_foreground_color: Some("red".into()),
            ..plain_settings(vec![Line::new(vec![text("a"), text("b").with_color("green")])])
        };
        let lines = render(&settings, &RenderContext::default(), 80);
        assert_eq!(lines[0], "\x1b[31ma\x1b[0m | \x1b[32mb\x1b[0m");
    }

    #[test]
    fn test_powerline_auto_align_across_lines() {
        let mut settings = plain_settings(vec![
            Line::new(vec![text("12345"), text("x")]),
            Line::new(vec![text("123456789"), text("y")]),
        ]);
        settings.powerline.enabled = true;
        settings.powerline.auto_align = true;

        let lines = render(&settings, &RenderContext::default(), 80);
        let seams: Vec<usize> = lines
            .iter()
            .map(|line| line.chars().position(|c| c == '\u{e0b0}').unwrap())
            .collect();
        assert_eq!(seams, [9, 9]);
    }

    #[test]
    fn test_powerline_theme_restarts_each_line() {
        let mut settings = plain_settings(vec![
            Line::new(vec![text("a")]),
            Line::new(vec![text("b")]),
        ]);
        settings.color_level = ColorLevel::Basic;
        settings.powerline.enabled = true;

        let lines = render(&settings, &RenderContext::default(), 80);
        let prefix = |line: &str| line[..line.find(['a', 'b']).unwrap()].to_string();
        assert_eq!(prefix(&lines[0]), prefix(&lines[1]));

        settings.powerline.continue_theme_across_lines = true;
        let lines = render(&settings, &RenderContext::default(), 80);
        assert_ne!(prefix(&lines[0]), prefix(&lines[1]));
        assert_eq!(strip_sgr(&lines[1]), "b\u{e0b0}");
    }
}
