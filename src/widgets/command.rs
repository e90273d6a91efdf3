//! `custom-command`: the trimmed stdout of a shell command.
//!
//! The command receives the render context JSON on stdin and runs in the
//! session's working directory.

use std::time::Duration;

use anyhow::{Context, bail};

use crate::config::WidgetItem;
use crate::context::RenderContext;
use crate::shell_exec::Cmd;

use super::Widget;

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

pub struct CustomCommand;

impl Widget for CustomCommand {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        let Some(command) = item.command.as_deref().filter(|c| !c.trim().is_empty()) else {
            return Ok(None);
        };

        let timeout = item
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        let mut cmd = Cmd::shell(command).timeout(timeout).stdin(ctx.data().to_string());
        let dir = ctx.current_dir();
        if dir.is_dir() {
            cmd = cmd.current_dir(dir);
        }

        let output = cmd
            .run()
            .with_context(|| format!("Failed to run custom command `{command}`"))?;
        if !output.status.success() {
            bail!("Custom command `{command}` exited with {}", output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let text = stdout.trim_end();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("white")
    }

    fn supports_colors(&self, item: &WidgetItem) -> bool {
        !item.preserve_colors
    }
}
