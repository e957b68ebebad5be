//! Match search, navigation and replacement
//!
//! An ad-hoc search populates the match index with every non-overlapping
//! match of a pattern, left to right. Navigation moves a cursor through the
//! index and keeps the single match-highlight span on the current match.
//! Forward navigation wraps around past the last match; backward navigation
//! clamps at the first. The asymmetry is deliberate and part of the
//! contract.

use regex::Regex;

use crate::error::Result;
use crate::style::{Color, Span};
use crate::surface::TextSurface;

/// Search operations exposed by the engine facade
pub trait Findable {
    /// Scan the whole text for `pattern`, replacing any previous match list
    fn find_matches(&mut self, pattern: &str) -> Result<&[MatchToken]>;

    /// Advance to the next match, wrapping past the last one
    fn find_next_match(&mut self) -> Option<MatchToken>;

    /// Step back to the previous match, stopping at the first one
    fn find_prev_match(&mut self) -> Option<MatchToken>;

    /// Drop the match list and its highlight
    fn clear_matches(&mut self);
}

/// Replacement operations exposed by the engine facade
pub trait Replaceable {
    /// Replace the first match of `pattern` and reinstall the text
    fn replace_first_match(&mut self, pattern: &str, replacement: &str) -> Result<()>;

    /// Replace every match of `pattern` and reinstall the text
    fn replace_all_matches(&mut self, pattern: &str, replacement: &str) -> Result<()>;
}

/// One matched range, a half-open byte span into the document text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchToken {
    pub start: usize,
    pub end: usize,
}

/// The match list and its navigation cursor
#[derive(Debug)]
pub struct MatchIndex {
    tokens: Vec<MatchToken>,
    cursor: Option<usize>,
    highlight_color: Color,
}

impl MatchIndex {
    /// Create an empty index with the default highlight color
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            cursor: None,
            highlight_color: Color::YELLOW,
        }
    }

    /// Set the color used for the current-match highlight span
    pub fn set_highlight_color(&mut self, color: Color) {
        self.highlight_color = color;
    }

    /// The current match list, left to right
    pub fn tokens(&self) -> &[MatchToken] {
        &self.tokens
    }

    /// Index of the currently selected match, if any
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Populate the index from every non-overlapping match in `text`
    ///
    /// Clears the previous list and cursor first. An empty pattern leaves
    /// the index empty rather than matching everywhere.
    pub fn find(&mut self, text: &str, pattern: &str) -> Result<&[MatchToken]> {
        self.tokens.clear();
        self.cursor = None;
        if pattern.is_empty() {
            return Ok(&self.tokens);
        }
        let regex = Regex::new(pattern)?;
        for m in regex.find_iter(text) {
            self.tokens.push(MatchToken {
                start: m.start(),
                end: m.end(),
            });
        }
        Ok(&self.tokens)
    }

    /// Advance the cursor, wrapping to the first match past the last
    pub fn next(&mut self, surface: &mut dyn TextSurface) -> Option<MatchToken> {
        if self.tokens.is_empty() {
            return None;
        }
        let next = match self.cursor {
            Some(i) if i + 1 < self.tokens.len() => i + 1,
            _ => 0,
        };
        self.cursor = Some(next);
        let token = self.tokens[next];
        self.highlight(surface, token);
        Some(token)
    }

    /// Step the cursor back, clamping at the first match
    ///
    /// Never wraps to the last match; repeated calls stay on the first.
    pub fn prev(&mut self, surface: &mut dyn TextSurface) -> Option<MatchToken> {
        if self.tokens.is_empty() {
            return None;
        }
        let prev = match self.cursor {
            Some(i) if i > 0 => i - 1,
            _ => 0,
        };
        self.cursor = Some(prev);
        let token = self.tokens[prev];
        self.highlight(surface, token);
        Some(token)
    }

    /// Remove the highlight span, reset the cursor, empty the list
    pub fn clear(&mut self, surface: &mut dyn TextSurface) {
        surface.set_match_span(None);
        self.cursor = None;
        self.tokens.clear();
    }

    /// Drop the list and cursor without touching the surface
    ///
    /// Used on wholesale text replacement, where the surface span store is
    /// reset anyway.
    pub fn invalidate(&mut self) {
        self.cursor = None;
        self.tokens.clear();
    }

    fn highlight(&self, surface: &mut dyn TextSurface, token: MatchToken) {
        surface.set_match_span(Some(Span::background(
            token.start,
            token.end,
            self.highlight_color,
        )));
    }
}

impl Default for MatchIndex {
    fn default() -> Self {
        Self::new()
    }
}
