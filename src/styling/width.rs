//! Escape-aware width measurement and truncation.
//!
//! Only SGR sequences (`ESC [ params m`) are treated as zero-width. Any other
//! escape-like text counts as literal characters, and every code point counts
//! as one cell.

use std::sync::LazyLock;

use regex::Regex;

use super::RESET;

static SGR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is a valid regex"));

/// Remove every SGR sequence from `s`.
pub fn strip_sgr(s: &str) -> std::borrow::Cow<'_, str> {
    SGR_PATTERN.replace_all(s, "")
}

/// Number of printable cells `s` occupies once SGR sequences are removed.
pub fn visible_width(s: &str) -> usize {
    if !s.contains('\x1b') {
        return s.chars().count();
    }
    strip_sgr(s).chars().count()
}

fn is_reset(seq: &str) -> bool {
    seq == RESET || seq == "\x1b[m"
}

/// Position and length of the first full reset in `s`.
pub fn find_reset(s: &str) -> Option<(usize, usize)> {
    [RESET, "\x1b[m"]
        .into_iter()
        .filter_map(|seq| s.find(seq).map(|pos| (pos, seq.len())))
        .min()
}

/// Cut `s` so that at most `max_width` visible cells remain.
///
/// Strings that already fit are returned unchanged, which makes the operation
/// idempotent. Escape sequences are kept only when a kept character follows
/// them, so the cut never lands inside a sequence and never leaves a dangling
/// style code at the end. If a style is still active at the cut, a reset is
/// appended. No ellipsis is added.
pub fn truncate_visible(s: &str, max_width: usize) -> String {
    if visible_width(s) <= max_width {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut width = 0;
    let mut style_open = false;
    let mut cursor = 0;

    let sequences = SGR_PATTERN
        .find_iter(s)
        .map(|m| m.range())
        .chain(std::iter::once(s.len()..s.len()));

    'scan: for range in sequences {
        for ch in s[cursor..range.start].chars() {
            if width == max_width {
                break 'scan;
            }
            out.push(ch);
            width += 1;
        }
        // Sequences after the last kept cell would style nothing
        if width == max_width || range.is_empty() {
            break;
        }
        let seq = &s[range.clone()];
        out.push_str(seq);
        style_open = !is_reset(seq);
        cursor = range.end;
    }

    if style_open {
        out.push_str(RESET);
    }
    out
}
