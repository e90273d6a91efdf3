//! Alignment Calculator for Powerline auto-align.

use super::prerender::RenderedLine;

/// Widest item at each column position across every line of one refresh.
///
/// The column of an item is its ordinal among the rendered items of its line;
/// flex markers do not occupy a column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentTable {
    widths: Vec<usize>,
}

impl AlignmentTable {
    pub fn compute(lines: &[RenderedLine<'_>]) -> Self {
        let mut widths: Vec<usize> = Vec::new();
        for line in lines {
            for (column, item) in line.items().enumerate() {
                if column == widths.len() {
                    widths.push(item.width);
                } else {
                    widths[column] = widths[column].max(item.width);
                }
            }
        }
        Self { widths }
    }

    /// Width of `column`, if any line has an item there.
    pub fn width(&self, column: usize) -> Option<usize> {
        self.widths.get(column).copied()
    }

    pub fn columns(&self) -> usize {
        self.widths.len()
    }
}
