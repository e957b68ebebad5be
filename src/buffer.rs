//! A String-backed text surface
//!
//! `EditBuffer` is the crate's own [`TextSurface`] implementation: owned
//! text, a cursor, and the two span stores. The test suite drives the
//! engine through it, and a host without its own span-capable document can
//! embed it directly.

use crate::error::{EngineError, Result};
use crate::style::Span;
use crate::surface::TextSurface;

/// An owned text buffer implementing [`TextSurface`]
#[derive(Debug, Default)]
pub struct EditBuffer {
    /// Document text
    text: String,
    /// Cursor byte offset
    cursor: usize,
    /// Syntax-derived spans, in application order
    syntax_spans: Vec<Span>,
    /// The single match-highlight span
    match_span: Option<Span>,
}

impl EditBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer with initial text, cursor at the end
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self {
            text,
            cursor,
            syntax_spans: Vec::new(),
            match_span: None,
        }
    }

    fn check_boundary(&self, offset: usize) -> Result<()> {
        if offset > self.text.len() {
            return Err(EngineError::OutOfBounds {
                offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(EngineError::NotCharBoundary(offset));
        }
        Ok(())
    }
}

impl TextSurface for EditBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn insert(&mut self, offset: usize, content: &str) -> Result<()> {
        self.check_boundary(offset)?;
        self.text.insert_str(offset, content);
        // A cursor at or past the insertion point rides along with the text
        if self.cursor >= offset {
            self.cursor += content.len();
        }
        Ok(())
    }

    fn remove(&mut self, start: usize, end: usize) -> Result<()> {
        if start > end {
            return Err(EngineError::BadSpan { start, end });
        }
        self.check_boundary(start)?;
        self.check_boundary(end)?;
        self.text.replace_range(start..end, "");
        if self.cursor >= end {
            self.cursor -= end - start;
        } else if self.cursor > start {
            self.cursor = start;
        }
        Ok(())
    }

    fn replace_text(&mut self, content: &str) {
        self.text.clear();
        self.text.push_str(content);
        self.cursor = self.text.len();
        self.syntax_spans.clear();
        self.match_span = None;
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.text.len());
    }

    fn apply_syntax_span(&mut self, span: Span) -> Result<()> {
        if span.start > span.end || span.end > self.text.len() {
            return Err(EngineError::BadSpan {
                start: span.start,
                end: span.end,
            });
        }
        self.syntax_spans.push(span);
        Ok(())
    }

    fn clear_syntax_spans(&mut self) {
        self.syntax_spans.clear();
    }

    fn syntax_spans(&self) -> &[Span] {
        &self.syntax_spans
    }

    fn set_match_span(&mut self, span: Option<Span>) {
        self.match_span = span;
    }

    fn match_span(&self) -> Option<Span> {
        self.match_span
    }
}
