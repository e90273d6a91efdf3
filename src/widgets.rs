//! Widgets: the producers of raw status line text.
//!
//! The rendering pipeline only talks to widgets through [`Widget`]; it never
//! interprets what they compute. Widgets are looked up by the `type` tag of a
//! [`WidgetItem`] in a flat [`WidgetRegistry`].

mod command;
mod directory;
mod git;
mod session;
mod text;

use std::collections::HashMap;

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::config::WidgetItem;
use crate::context::RenderContext;

pub use command::CustomCommand;
pub use directory::{CurrentDir, abbreviate_path};
pub use git::GitBranch;
pub use session::{Model, OutputStyle, SessionCost, SessionId, Version};
pub use text::CustomText;

/// A source of status line text.
pub trait Widget {
    /// Produce the widget's text, or `None` when there is nothing to show
    /// (not in a git repository, metric missing, ...). Errors are treated the
    /// same as `None` by the caller.
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>>;

    /// Foreground color used when neither the item nor a global override sets one.
    fn default_color(&self) -> Option<&'static str> {
        None
    }

    /// Whether `raw-value` (drop the label, show the bare value) has an effect.
    fn supports_raw_value(&self) -> bool {
        false
    }

    /// Whether the pipeline should apply item colors to this widget's output.
    ///
    /// Widgets whose output carries its own escape sequences return `false`.
    fn supports_colors(&self, _item: &WidgetItem) -> bool {
        true
    }
}

/// Built-in widget type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum WidgetKind {
    CustomText,
    CustomCommand,
    Model,
    CurrentDir,
    GitBranch,
    SessionCost,
    Version,
    OutputStyle,
    SessionId,
}

impl WidgetKind {
    pub fn tag(self) -> &'static str {
        self.into()
    }

    fn widget(self) -> Box<dyn Widget> {
        match self {
            WidgetKind::CustomText => Box::new(CustomText),
            WidgetKind::CustomCommand => Box::new(CustomCommand),
            WidgetKind::Model => Box::new(Model),
            WidgetKind::CurrentDir => Box::new(CurrentDir),
            WidgetKind::GitBranch => Box::new(GitBranch),
            WidgetKind::SessionCost => Box::new(SessionCost),
            WidgetKind::Version => Box::new(Version),
            WidgetKind::OutputStyle => Box::new(OutputStyle),
            WidgetKind::SessionId => Box::new(SessionId),
        }
    }
}

/// Widget implementations indexed by type tag.
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: HashMap<String, Box<dyn Widget>>,
}

impl WidgetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in widget.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for kind in WidgetKind::iter() {
            registry.register(kind.tag(), kind.widget());
        }
        registry
    }

    /// Add or replace the widget for `tag`.
    pub fn register(&mut self, tag: impl Into<String>, widget: Box<dyn Widget>) {
        self.widgets.insert(tag.into(), widget);
    }

    pub fn get(&self, tag: &str) -> Option<&dyn Widget> {
        self.widgets.get(tag).map(|w| w.as_ref())
    }
}

/// Prefix `value` with `label` unless the item asks for the raw value.
fn labeled(item: &WidgetItem, label: &str, value: impl std::fmt::Display) -> String {
    if item.raw_value {
        value.to_string()
    } else {
        format!("{label}{value}")
    }
}
