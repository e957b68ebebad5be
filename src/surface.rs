//! The capability interface the engine depends on
//!
//! The engine never owns the document text; the host text-editing surface
//! does. `TextSurface` is the narrow contract the engine needs from it:
//! read the live text, mutate it, move the cursor, and manage two disjoint
//! span stores.
//!
//! Syntax-derived spans (foreground coloring and error-line backgrounds)
//! live in one collection and are cleared wholesale at the start of every
//! highlight pass. The single match-highlight span lives apart from them,
//! so a pass can never disturb it.

use crate::error::Result;
use crate::style::Span;

/// Host text surface: a mutable document plus span storage
pub trait TextSurface {
    /// The full live text
    fn text(&self) -> &str;

    /// Insert `content` at a byte offset
    ///
    /// Fails if the offset is out of bounds or not a character boundary.
    fn insert(&mut self, offset: usize, content: &str) -> Result<()>;

    /// Remove the byte range `start..end`
    fn remove(&mut self, start: usize, end: usize) -> Result<()>;

    /// Replace the entire text, dropping all spans
    fn replace_text(&mut self, content: &str);

    /// Current cursor offset
    fn cursor(&self) -> usize;

    /// Move the cursor (clamped to the text length by the implementation)
    fn set_cursor(&mut self, offset: usize);

    /// Apply a syntax-derived span
    ///
    /// Fails if the span does not fit the current text, e.g. when a pass
    /// computed it against a snapshot the host has since edited.
    fn apply_syntax_span(&mut self, span: Span) -> Result<()>;

    /// Remove every syntax-derived span
    fn clear_syntax_spans(&mut self);

    /// Currently applied syntax-derived spans, in application order
    fn syntax_spans(&self) -> &[Span];

    /// Set or clear the single match-highlight span
    fn set_match_span(&mut self, span: Option<Span>);

    /// The current match-highlight span, if any
    fn match_span(&self) -> Option<Span>;
}
