//! Sparse error-line overlay
//!
//! A mapping of 1-based line numbers to background colors, rendered as
//! whole-line background spans (line terminator included) so an error
//! underlines its entire line.

use std::collections::BTreeMap;

use crate::style::Color;

/// Sparse mapping of 1-based line number to overlay color
///
/// Ordered by line number; at most one entry per line, last write wins.
#[derive(Debug, Default)]
pub struct ErrorOverlay {
    lines: BTreeMap<u32, Color>,
}

impl ErrorOverlay {
    /// Create an empty overlay
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an error line, replacing any previous color for it
    pub fn set_line(&mut self, line: u32, color: Color) {
        self.lines.insert(line, color);
    }

    /// Remove an error line; absent lines are a no-op
    pub fn remove_line(&mut self, line: u32) {
        self.lines.remove(&line);
    }

    /// Remove every error line
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of registered error lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no error line is registered
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Check if any error line is registered
    pub fn has_any(&self) -> bool {
        !self.lines.is_empty()
    }

    /// The greatest registered line number, if any
    pub fn max_line(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }

    /// Color registered for a line, if any
    pub fn color_for(&self, line: u32) -> Option<Color> {
        self.lines.get(&line).copied()
    }
}

/// Byte ranges of the text's line segments, terminator included
///
/// A final unterminated line contributes a segment, and text ending in a
/// terminator contributes a trailing empty segment, so every cursor
/// position belongs to exactly one line.
pub(crate) fn line_segments(text: &str) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            segments.push((start, i + 1));
            start = i + 1;
        }
    }
    segments.push((start, text.len()));
    segments
}
