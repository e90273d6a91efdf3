//! Pre-Renderer: run every widget of a line once and cache its output.

use std::panic::{self, AssertUnwindSafe, catch_unwind};

use crate::config::{Line, WidgetItem};
use crate::context::RenderContext;
use crate::styling::visible_width;
use crate::widgets::{Widget, WidgetRegistry};

/// A widget's output for this refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedItem<'a> {
    pub item: &'a WidgetItem,
    /// Output text, possibly containing SGR sequences
    pub text: String,
    /// Visible cells of `text`
    pub width: usize,
    pub default_color: Option<&'static str>,
    pub supports_colors: bool,
}

impl<'a> RenderedItem<'a> {
    pub fn new(item: &'a WidgetItem, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            item,
            width: visible_width(&text),
            text,
            default_color: None,
            supports_colors: true,
        }
    }

    pub fn with_default_color(mut self, color: Option<&'static str>) -> Self {
        self.default_color = color;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Slot<'a> {
    Item(RenderedItem<'a>),
    Flex,
}

/// One line after pre-rendering: widgets without output are gone, flex
/// markers stay in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderedLine<'a> {
    pub slots: Vec<Slot<'a>>,
}

impl<'a> RenderedLine<'a> {
    pub fn new(slots: Vec<Slot<'a>>) -> Self {
        Self { slots }
    }

    /// Rendered items in order, without flex markers.
    pub fn items(&self) -> impl Iterator<Item = &RenderedItem<'a>> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Item(item) => Some(item),
            Slot::Flex => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items().next().is_none()
    }
}

/// Render every item of `line` exactly once.
pub fn prerender_line<'a>(
    line: &'a Line,
    registry: &WidgetRegistry,
    ctx: &RenderContext,
) -> RenderedLine<'a> {
    let slots = line
        .items
        .iter()
        .filter_map(|item| {
            if item.is_flex() {
                return Some(Slot::Flex);
            }
            let Some(widget) = registry.get(&item.kind) else {
                log::warn!("Unknown widget type `{}`, skipping", item.kind);
                return None;
            };
            let text = run_widget(widget, item, ctx)?;
            Some(Slot::Item(RenderedItem {
                supports_colors: widget.supports_colors(item),
                ..RenderedItem::new(item, text).with_default_color(widget.default_color())
            }))
        })
        .collect();
    RenderedLine { slots }
}

/// A widget's text, with errors, panics and blank output all mapped to `None`.
fn run_widget(widget: &dyn Widget, item: &WidgetItem, ctx: &RenderContext) -> Option<String> {
    let labeled_item;
    let item = if item.raw_value && !widget.supports_raw_value() {
        log::debug!("Widget `{}` has no raw value, ignoring raw-value", item.kind);
        labeled_item = WidgetItem {
            raw_value: false,
            ..item.clone()
        };
        &labeled_item
    } else {
        item
    };

    let result = match catch_silently(|| widget.render(item, ctx)) {
        Ok(result) => result,
        Err(_) => {
            log::warn!("Widget `{}` panicked, rendering nothing", item.kind);
            return None;
        }
    };

    let text = match result {
        Ok(Some(text)) => text,
        Ok(None) => return None,
        Err(e) => {
            log::debug!("Widget `{}` failed: {e:#}", item.kind);
            return None;
        }
    };

    let text = single_line(&text);
    (visible_width(&text) > 0).then_some(text)
}

/// Fold output onto one row: each run of line breaks becomes a single space.
fn single_line(text: &str) -> String {
    let text = text.trim_matches(['\r', '\n']);
    if !text.contains(['\r', '\n']) {
        return text.to_string();
    }
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run `f`, turning a panic into `Err` without the default hook's report on
/// stderr. The previous hook is restored afterwards.
fn catch_silently<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(hook);
    result
}
