//! Widgets that read a single field of the render context.

use crate::config::WidgetItem;
use crate::context::RenderContext;

use super::{Widget, labeled};

/// Active model, from `model.display_name` (or `model.id`).
pub struct Model;

impl Widget for Model {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        let name = ctx
            .get_str(&["model", "display_name"])
            .or_else(|| ctx.get_str(&["model", "id"]));
        Ok(name.map(|name| labeled(item, "Model: ", name)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("cyan")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

/// Session cost in USD, from `cost.total_cost_usd`.
pub struct SessionCost;

impl Widget for SessionCost {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        let Some(cost) = ctx.get_f64(&["cost", "total_cost_usd"]) else {
            return Ok(None);
        };
        Ok(Some(labeled(item, "Cost: ", format!("${cost:.2}"))))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("green")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

/// Version of the host application, from `version`.
pub struct Version;

impl Widget for Version {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        Ok(ctx
            .get_str(&["version"])
            .map(|version| labeled(item, "Version: ", version)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("bright-black")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

/// Output style name, from `output_style.name`.
pub struct OutputStyle;

impl Widget for OutputStyle {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        Ok(ctx
            .get_str(&["output_style", "name"])
            .map(|style| labeled(item, "Style: ", style)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("white")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

/// Session identifier, from `session_id`.
pub struct SessionId;

impl Widget for SessionId {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        Ok(ctx
            .get_str(&["session_id"])
            .map(|id| labeled(item, "Session: ", id)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("bright-black")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}
