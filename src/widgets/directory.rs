//! `current-dir`: the session's working directory in fish-style abbreviation.

use std::path::Path;

use crate::config::WidgetItem;
use crate::context::RenderContext;

use super::{Widget, labeled};

pub struct CurrentDir;

impl Widget for CurrentDir {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        let dir = ctx.current_dir();
        let home = etcetera::home_dir().ok();
        let formatted = abbreviate_path(&dir.display().to_string(), home.as_deref());
        Ok(Some(labeled(item, "cwd: ", formatted)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("blue")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

/// Format a directory path in fish-style (abbreviated parent directories).
///
/// Examples:
/// - `/home/user/workspace/project` -> `~/w/project`
/// - `/home/user` -> `~`
/// - `/tmp/test` -> `/t/test`
pub fn abbreviate_path(path: &str, home: Option<&Path>) -> String {
    let home = home.map(|h| h.display().to_string()).unwrap_or_default();

    // Replace home with ~, but only on a path-component boundary
    let path = match path.strip_prefix(home.as_str()) {
        Some(rest) if !home.is_empty() && (rest.is_empty() || rest.starts_with('/')) => {
            format!("~{rest}")
        }
        _ => path.to_string(),
    };

    let is_absolute = path.starts_with('/');
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();

    let Some((last, parents)) = parts.split_last() else {
        return path;
    };

    let mut result = String::new();
    if is_absolute {
        result.push('/');
    }
    for part in parents {
        match part.chars().next() {
            // Keep dotted directories readable: `.config` -> `.c`
            Some('.') => result.extend(part.chars().take(2)),
            Some(c) => result.push(c),
            None => {}
        }
        result.push('/');
    }
    result.push_str(last);
    result
}
