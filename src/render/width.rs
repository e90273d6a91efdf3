//! Terminal Width Resolver.

use terminal_size::{Width, terminal_size, terminal_size_of};

use crate::config::FlexMode;
use crate::context::RenderContext;

/// Used when no terminal width can be detected.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Columns given up by `full-minus-40`, and by `full-until-compact` while compacting.
pub const COMPACT_MARGIN: usize = 40;

/// Usable width for this refresh.
pub fn resolve_width(mode: FlexMode, terminal_width: usize, compacting: bool) -> usize {
    match mode {
        FlexMode::Full => terminal_width,
        FlexMode::FullMinus40 => terminal_width.saturating_sub(COMPACT_MARGIN),
        FlexMode::FullUntilCompact if compacting => terminal_width.saturating_sub(COMPACT_MARGIN),
        FlexMode::FullUntilCompact => terminal_width,
    }
}

/// Whether the context reports usage at or above `threshold` percent.
pub fn is_compacting(ctx: &RenderContext, threshold: f64) -> bool {
    ctx.context_usage_percent()
        .is_some_and(|percent| percent >= threshold)
}

/// Detect the terminal width.
///
/// Priority:
/// 1. `COLUMNS` environment variable
/// 2. Size of the terminal attached to stdout, then stderr
/// 3. The controlling terminal (`/dev/tty`), since a status line usually runs
///    with both output streams piped
/// 4. [`DEFAULT_TERMINAL_WIDTH`]
pub fn detect_terminal_width() -> usize {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|&cols| cols > 0)
    {
        log::debug!("Terminal width {width} from COLUMNS");
        return width;
    }

    let detected = terminal_size()
        .or_else(|| terminal_size_of(std::io::stderr()))
        .or_else(controlling_terminal_size);

    match detected {
        Some((Width(w), _)) if w > 0 => {
            log::debug!("Terminal width {w} detected");
            w as usize
        }
        _ => {
            log::debug!("Terminal width not detectable, using {DEFAULT_TERMINAL_WIDTH}");
            DEFAULT_TERMINAL_WIDTH
        }
    }
}

#[cfg(unix)]
fn controlling_terminal_size() -> Option<(Width, terminal_size::Height)> {
    let tty = std::fs::File::open("/dev/tty").ok()?;
    terminal_size_of(&tty)
}

#[cfg(not(unix))]
fn controlling_terminal_size() -> Option<(Width, terminal_size::Height)> {
    None
}
