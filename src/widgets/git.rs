//! `git-branch`: the branch checked out in the session's directory.

use std::path::Path;
use std::time::Duration;

use crate::config::WidgetItem;
use crate::context::RenderContext;
use crate::shell_exec::Cmd;

use super::{Widget, labeled};

const GIT_TIMEOUT: Duration = Duration::from_millis(500);

pub struct GitBranch;

impl Widget for GitBranch {
    fn render(&self, item: &WidgetItem, ctx: &RenderContext) -> anyhow::Result<Option<String>> {
        let dir = ctx.current_dir();
        if !dir.is_dir() {
            return Ok(None);
        }
        Ok(current_branch(&dir)?.map(|branch| labeled(item, "⎇ ", branch)))
    }

    fn default_color(&self) -> Option<&'static str> {
        Some("magenta")
    }

    fn supports_raw_value(&self) -> bool {
        true
    }
}

fn git(dir: &Path, args: &[&str]) -> anyhow::Result<Option<String>> {
    let output = Cmd::new("git")
        .args(args.iter().copied())
        .current_dir(dir)
        .timeout(GIT_TIMEOUT)
        .run()?;
    if !output.status.success() {
        return Ok(None);
    }
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((!stdout.is_empty()).then_some(stdout))
}

/// Branch name, or the short commit hash when HEAD is detached.
/// `None` outside a repository.
fn current_branch(dir: &Path) -> anyhow::Result<Option<String>> {
    // symbolic-ref also works on an unborn branch, rev-parse covers detached HEAD
    if let Some(branch) = git(dir, &["symbolic-ref", "--short", "-q", "HEAD"])? {
        return Ok(Some(branch));
    }
    git(dir, &["rev-parse", "--short", "HEAD"])
}
