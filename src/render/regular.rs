//! Regular Composer: items joined by separators and padding.

use anstyle::Style;

use crate::config::Settings;
use crate::styling::{ColorApplier, truncate_visible};

use super::flex::{Piece, expand};
use super::prerender::{RenderedItem, RenderedLine, Slot};

/// Whether the join between `left` and `right` is merged (no separator and
/// no padding on either side of it).
pub(super) fn is_merged(left: &RenderedItem<'_>, right: &RenderedItem<'_>) -> bool {
    left.item.merge_next || right.item.merge_previous
}

/// Compose one line and fit it to `width` visible cells.
///
/// A line without rendered items is empty, whatever flex markers it has.
pub fn compose_regular(
    line: &RenderedLine<'_>,
    settings: &Settings,
    colors: &ColorApplier,
    width: usize,
) -> String {
    if line.is_empty() {
        return String::new();
    }
    let composed = expand(&layout(line, settings, colors), width);
    truncate_visible(&composed, width)
}

fn layout(line: &RenderedLine<'_>, settings: &Settings, colors: &ColorApplier) -> Vec<Piece> {
    let slots = &line.slots;
    let mut pieces = Vec::with_capacity(slots.len() * 2);
    let mut prev: Option<&RenderedItem<'_>> = None;
    let mut flex_since_prev = false;

    for (index, slot) in slots.iter().enumerate() {
        let item = match slot {
            Slot::Flex => {
                pieces.push(Piece::Flex);
                flex_since_prev = true;
                continue;
            }
            Slot::Item(item) => item,
        };

        // A flex marker takes the place of the separator
        let merged_left = match prev {
            Some(prev) if !flex_since_prev => {
                let merged = is_merged(prev, item);
                if !merged && !settings.default_separator.is_empty() {
                    pieces.push(separator(prev, settings, colors));
                }
                merged
            }
            _ => false,
        };
        let merged_right =
            matches!(slots.get(index + 1), Some(Slot::Item(next)) if is_merged(item, next));

        pieces.push(Piece::fixed(paint_item(
            item,
            settings,
            colors,
            merged_left,
            merged_right,
        )));
        prev = Some(item);
        flex_since_prev = false;
    }
    pieces
}

fn style_of(item: &RenderedItem<'_>, colors: &ColorApplier) -> Style {
    if item.supports_colors {
        colors.item_style(item.item, item.default_color)
    } else {
        Style::new()
    }
}

fn separator(prev: &RenderedItem<'_>, settings: &Settings, colors: &ColorApplier) -> Piece {
    let text = if settings.inherit_separator_colors {
        colors.paint(&settings.default_separator, style_of(prev, colors))
    } else {
        settings.default_separator.clone()
    };
    Piece::fixed(text)
}

fn paint_item(
    item: &RenderedItem<'_>,
    settings: &Settings,
    colors: &ColorApplier,
    merged_left: bool,
    merged_right: bool,
) -> String {
    let padding = item
        .item
        .padding
        .as_deref()
        .unwrap_or(&settings.default_padding);
    let left = if merged_left { "" } else { padding };
    let right = if merged_right { "" } else { padding };

    let style = style_of(item, colors);
    if item.supports_colors {
        colors.paint(&format!("{left}{}{right}", item.text), style)
    } else {
        // Output that carries its own escapes is left untouched
        format!("{left}{}{right}", item.text)
    }
}
