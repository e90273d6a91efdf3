use crate::config::WidgetItem;
use crate::context::RenderContext;

use super::Widget;

/// Static text from the item's `text` field.
pub struct CustomText;

impl Widget for CustomText {
    fn render(&self, item: &WidgetItem, _ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        Ok(item.text.clone().filter(|text| !text.is_empty()))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("white")
    }
}
