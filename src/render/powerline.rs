//! Powerline Composer.
//!
//! Each item becomes a segment drawn on a theme background, followed by a
//! separator glyph whose foreground is this segment's background and whose
//! background is the next segment's. The last segment of a group ends with a
//! terminator that transitions to the terminal's default background.
//!
//! ```text
//! [start cap] content ▶ content ▶ content [end cap or ▶]
//! ```
//!
//! Escapes are written as deltas against the tracked terminal state; no reset
//! is emitted between segments, so a seam never flashes the default colors.

use anstyle::Color;

use crate::config::{PowerlineConfig, Settings};
use crate::styling::{
    BOLD_OFF, BOLD_ON, ColorApplier, DEFAULT_BG, DEFAULT_FG, RESET, find_reset, truncate_visible,
};

use super::align::AlignmentTable;
use super::flex::{Piece, expand, fixed_width};
use super::prerender::{RenderedItem, RenderedLine, Slot};
use super::regular::is_merged;

/// Terminal attributes the composer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    bold: bool,
}

/// Output buffer that knows the terminal state it leaves behind.
struct SegmentWriter {
    out: String,
    /// `None` once content escapes have left the state unknown
    pen: Option<Pen>,
}

impl SegmentWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            pen: Some(Pen::default()),
        }
    }

    /// Emit only the attributes of `target` that differ from the current state.
    fn set(&mut self, target: Pen) {
        let current = self.pen;
        if current.is_none_or(|pen| pen.bold != target.bold) {
            self.out
                .push_str(if target.bold { BOLD_ON } else { BOLD_OFF });
        }
        if current.is_none_or(|pen| pen.fg != target.fg) {
            match target.fg {
                Some(fg) => self.out.push_str(&fg.render_fg().to_string()),
                None => self.out.push_str(DEFAULT_FG),
            }
        }
        if current.is_none_or(|pen| pen.bg != target.bg) {
            match target.bg {
                Some(bg) => self.out.push_str(&bg.render_bg().to_string()),
                None => self.out.push_str(DEFAULT_BG),
            }
        }
        self.pen = Some(target);
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Write widget content drawn with `pen`, restoring it after every reset
    /// the content contains.
    fn write_content(&mut self, text: &str, pen: Pen) {
        self.set(pen);
        let mut rest = text;
        while let Some((start, len)) = find_reset(rest) {
            self.out.push_str(&rest[..start + len]);
            self.pen = Some(Pen::default());
            self.set(pen);
            rest = &rest[start + len..];
        }
        self.out.push_str(rest);
        if rest.contains('\x1b') {
            self.pen = None;
        }
    }

    /// Leave the terminal in its default state.
    fn finish(mut self) -> String {
        if self.pen != Some(Pen::default()) {
            self.out.push_str(RESET);
        }
        self.out
    }
}

struct Segment {
    /// Content with padding and alignment fill applied
    text: String,
    pen: Pen,
    /// Continues the previous segment without a separator
    merged: bool,
}

/// Runs of segments between flex markers.
enum Block {
    Group(Vec<Segment>),
    Flex,
}

pub struct PowerlineComposer<'a> {
    config: &'a PowerlineConfig,
    default_padding: &'a str,
    colors: &'a ColorApplier,
    alignment: Option<&'a AlignmentTable>,
}

impl<'a> PowerlineComposer<'a> {
    pub fn new(settings: &'a Settings, colors: &'a ColorApplier) -> Self {
        Self {
            config: &settings.powerline,
            default_padding: &settings.default_padding,
            colors,
            alignment: None,
        }
    }

    /// Pad every segment to its column width in `table`.
    pub fn with_alignment(mut self, table: &'a AlignmentTable) -> Self {
        self.alignment = Some(table);
        self
    }

    /// Compose one line and fit it to `width` visible cells.
    ///
    /// `theme_index` is the theme position of the first segment; it is
    /// advanced past every segment that starts a new color.
    pub fn compose(
        &self,
        line: &RenderedLine<'_>,
        width: usize,
        theme_index: &mut usize,
    ) -> String {
        if line.is_empty() {
            return String::new();
        }
        let mut blocks = self.blocks(line, theme_index);

        loop {
            let pieces: Vec<Piece> = blocks
                .iter()
                .filter_map(|block| match block {
                    Block::Group(segments) if segments.is_empty() => None,
                    Block::Group(segments) => Some(Piece::fixed(self.render_group(segments))),
                    Block::Flex => Some(Piece::Flex),
                })
                .collect();

            if fixed_width(&pieces) <= width || segment_count(&blocks) <= 1 {
                // A lone segment that is still too wide gets cut cell by cell
                return truncate_visible(&expand(&pieces, width), width);
            }
            drop_last_segment(&mut blocks);
        }
    }

    fn blocks(&self, line: &RenderedLine<'_>, theme_index: &mut usize) -> Vec<Block> {
        let slots = &line.slots;
        let mut blocks = vec![Block::Group(Vec::new())];
        let mut prev: Option<&RenderedItem<'_>> = None;
        let mut theme = self.config.theme_pair(*theme_index);
        let mut column = 0;

        for (index, slot) in slots.iter().enumerate() {
            let item = match slot {
                Slot::Flex => {
                    blocks.push(Block::Flex);
                    blocks.push(Block::Group(Vec::new()));
                    prev = None;
                    continue;
                }
                Slot::Item(item) => item,
            };

            let merged = prev.is_some_and(|prev| is_merged(prev, item));
            if !merged {
                theme = self.config.theme_pair(*theme_index);
                *theme_index += 1;
            }
            let merged_right =
                matches!(slots.get(index + 1), Some(Slot::Item(next)) if is_merged(item, next));

            let segment = Segment {
                text: self.content(item, column, merged, merged_right),
                pen: self.pen(item, theme),
                merged,
            };
            if let Some(Block::Group(segments)) = blocks.last_mut() {
                segments.push(segment);
            }
            prev = Some(item);
            column += 1;
        }
        blocks
    }

    /// Item colors win over the global foreground override, which wins over
    /// the theme. The global background override does not apply here.
    fn pen(&self, item: &RenderedItem<'_>, (theme_fg, theme_bg): (&str, &str)) -> Pen {
        if !item.supports_colors {
            return Pen {
                fg: self.colors.resolve(Some(theme_fg)),
                bg: self.colors.resolve(Some(theme_bg)),
                bold: false,
            };
        }
        Pen {
            fg: self.colors.foreground(item.item, Some(theme_fg)),
            bg: self
                .colors
                .resolve(item.item.background_color.as_deref().or(Some(theme_bg))),
            bold: self.colors.bold(item.item),
        }
    }

    fn content(
        &self,
        item: &RenderedItem<'_>,
        column: usize,
        merged_left: bool,
        merged_right: bool,
    ) -> String {
        let padding = item.item.padding.as_deref().unwrap_or(self.default_padding);
        let left = if merged_left { "" } else { padding };
        let right = if merged_right { "" } else { padding };
        let fill = self
            .alignment
            .and_then(|table| table.width(column))
            .map_or(0, |target| target.saturating_sub(item.width));
        format!("{left}{}{}{right}", item.text, " ".repeat(fill))
    }

    fn render_group(&self, segments: &[Segment]) -> String {
        let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
            return String::new();
        };
        let mut writer = SegmentWriter::new();

        if let Some(cap) = self.config.start_cap.as_deref().filter(|c| !c.is_empty()) {
            writer.set(Pen {
                fg: first.pen.bg,
                ..Pen::default()
            });
            writer.push(cap);
        }

        for (index, segment) in segments.iter().enumerate() {
            if index > 0 && !segment.merged {
                writer.set(Pen {
                    fg: segments[index - 1].pen.bg,
                    bg: segment.pen.bg,
                    bold: false,
                });
                writer.push(&self.config.separator);
            }
            writer.write_content(&segment.text, segment.pen);
        }

        let terminator = self
            .config
            .end_cap
            .as_deref()
            .unwrap_or(&self.config.separator);
        writer.set(Pen {
            fg: last.pen.bg,
            ..Pen::default()
        });
        writer.push(terminator);
        writer.finish()
    }
}

fn segment_count(blocks: &[Block]) -> usize {
    blocks
        .iter()
        .map(|block| match block {
            Block::Group(segments) => segments.len(),
            Block::Flex => 0,
        })
        .sum()
}

fn drop_last_segment(blocks: &mut [Block]) {
    let last_group = blocks.iter_mut().rev().find_map(|block| match block {
        Block::Group(segments) if !segments.is_empty() => Some(segments),
        _ => None,
    });
    if let Some(segments) = last_group {
        segments.pop();
    }
}
