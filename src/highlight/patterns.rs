//! Ordered syntax pattern registry
//!
//! Patterns are kept in insertion order, and the highlight pass applies
//! them in that order. Later spans layer over earlier ones, so when two
//! patterns match overlapping text the one registered later wins visually.
//! That ordering is part of the public contract: callers pick precedence by
//! registration order.

use regex::Regex;

use crate::error::Result;
use crate::style::Color;

/// A compiled pattern and the color its matches are painted with
#[derive(Debug)]
pub(crate) struct PatternEntry {
    pub pattern: Regex,
    pub color: Color,
}

/// Insertion-ordered mapping of regex pattern to color
///
/// Identity is the pattern source text: re-adding an existing pattern
/// updates its color in place without changing its position.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern, or update the color of an already-registered one
    ///
    /// Fails immediately on invalid pattern syntax; nothing is deferred to
    /// highlight time.
    pub fn add(&mut self, pattern: &str, color: Color) -> Result<()> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.pattern.as_str() == pattern) {
            entry.color = color;
            return Ok(());
        }
        let pattern = Regex::new(pattern)?;
        self.entries.push(PatternEntry { pattern, color });
        Ok(())
    }

    /// Remove a pattern by its source text; absent patterns are a no-op
    pub fn remove(&mut self, pattern: &str) {
        self.entries.retain(|e| e.pattern.as_str() != pattern);
    }

    /// Replace the whole registry with the given `(pattern, color)` pairs
    ///
    /// On a compile error the registry is left cleared: the caller asked
    /// for a wholesale replacement and got a partial one at most.
    pub fn set_all<'a, I>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, Color)>,
    {
        self.entries.clear();
        for (pattern, color) in patterns {
            self.add(pattern, color)?;
        }
        Ok(())
    }

    /// Remove all patterns
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no patterns are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub(crate) fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }
}
