//! Flex Resolver.
//!
//! Composers lay a line out as a sequence of [`Piece`]s: fixed text whose
//! visible width is known, and flex markers. [`expand`] replaces every marker
//! with a run of [`FLEX_FILL`] so the line spans the available width.

use crate::styling::visible_width;

/// Filler for expanded flex markers. A non-breaking space survives the
/// trailing-whitespace trimming some hosts apply to status lines.
pub const FLEX_FILL: char = '\u{a0}';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Fixed { text: String, width: usize },
    Flex,
}

impl Piece {
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        let width = visible_width(&text);
        Piece::Fixed { text, width }
    }
}

/// Split the space left over by `fixed` cells of content across `markers`
/// flex markers.
///
/// The remainder is divided evenly; leftover cells go to the last marker.
/// Content wider than `available` leaves every marker at zero.
pub fn distribute(available: usize, fixed: usize, markers: usize) -> Vec<usize> {
    if markers == 0 {
        return Vec::new();
    }
    let remainder = available.saturating_sub(fixed);
    let share = remainder / markers;
    let mut sizes = vec![share; markers];
    if let Some(last) = sizes.last_mut() {
        *last += remainder % markers;
    }
    sizes
}

/// Total width of the fixed pieces.
pub fn fixed_width(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .map(|piece| match piece {
            Piece::Fixed { width, .. } => *width,
            Piece::Flex => 0,
        })
        .sum()
}

/// Concatenate `pieces`, expanding flex markers to fill `available` cells.
///
/// Lines without markers are concatenated as they are.
pub fn expand(pieces: &[Piece], available: usize) -> String {
    let markers = pieces.iter().filter(|p| matches!(p, Piece::Flex)).count();
    let mut sizes = distribute(available, fixed_width(pieces), markers).into_iter();

    let mut out = String::new();
    for piece in pieces {
        match piece {
            Piece::Fixed { text, .. } => out.push_str(text),
            Piece::Flex => {
                let size = sizes.next().unwrap_or(0);
                out.extend(std::iter::repeat_n(FLEX_FILL, size));
            }
        }
    }
    out
}
