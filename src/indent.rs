//! Auto-indentation
//!
//! A single running counter tracks the current indentation depth in
//! columns. Configured start characters (typically opening delimiters)
//! deepen it by one tab length, end characters shallow it. When a newline
//! is inserted at the end of the document the counter is trusted as-is
//! (fast path); a newline anywhere else recomputes the depth from the text
//! preceding the insertion point, because edits behind the cursor may have
//! invalidated the running value. The recompute never overwrites the
//! counter; it only decides the indentation of that one inserted line.

use std::collections::HashSet;

/// Physical keys the indentation engine tracks besides inserted characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Space,
    Backspace,
}

/// The indentation state machine
#[derive(Debug)]
pub struct IndentationEngine {
    enabled: bool,
    tab_length: i32,
    counter: i32,
    starts: HashSet<char>,
    ends: HashSet<char>,
}

impl IndentationEngine {
    /// Create a disabled engine with an empty configuration
    pub fn new() -> Self {
        Self {
            enabled: false,
            tab_length: 0,
            counter: 0,
            starts: HashSet::new(),
            ends: HashSet::new(),
        }
    }

    /// Enable or disable auto-indentation
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if auto-indentation is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the tab length used for depth changes
    pub fn set_tab_length(&mut self, length: i32) {
        self.tab_length = length;
    }

    /// Replace the set of characters that open one indentation level
    pub fn set_starts(&mut self, characters: impl IntoIterator<Item = char>) {
        self.starts = characters.into_iter().collect();
    }

    /// Replace the set of characters that close one indentation level
    pub fn set_ends(&mut self, characters: impl IntoIterator<Item = char>) {
        self.ends = characters.into_iter().collect();
    }

    /// The running indentation counter
    pub fn counter(&self) -> i32 {
        self.counter
    }

    /// Reset the counter, as part of installing a new document
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Update the counter for a single inserted character
    pub fn on_char_inserted(&mut self, c: char) {
        if !self.enabled {
            return;
        }
        if self.starts.contains(&c) {
            self.counter += self.tab_length;
        } else if self.ends.contains(&c) {
            self.counter -= self.tab_length;
        }
    }

    /// Update the counter for a physical keypress
    ///
    /// Space deepens by a single column, backspace shallows by one but
    /// never below zero.
    pub fn on_key(&mut self, key: EditKey) {
        if !self.enabled {
            return;
        }
        match key {
            EditKey::Space => self.counter += 1,
            EditKey::Backspace => {
                if self.counter > 0 {
                    self.counter -= 1;
                }
            }
        }
    }

    /// Rewrite a newline insertion to carry its auto-indentation
    ///
    /// `dest` is the document text before the edit, which replaces the
    /// range `dest_start..dest_end` with `source`. Returns the expanded
    /// insertion text, or `None` when the insertion is not an indentation
    /// site (engine disabled, or not a newline).
    pub fn rewrite_insertion(
        &self,
        dest: &str,
        source: &str,
        dest_start: usize,
        dest_end: usize,
    ) -> Option<String> {
        if !self.enabled || !source.starts_with('\n') {
            return None;
        }

        // At the end of the document the running counter is authoritative
        if dest_end == dest.len() {
            return Some(apply_indentation(source, self.counter));
        }

        // Mid-document the counter is not trusted; recompute from the text
        // before the insertion point. Offsets that do not land on character
        // boundaries are left for the surface to reject.
        let prefix = dest.get(..dest_start)?;
        let mut indentation = self.compute_indentation(prefix);

        // De-indent when the line being opened runs straight into a
        // closing delimiter
        if let Some(next) = dest.get(dest_end..).and_then(|tail| tail.chars().next()) {
            if self.ends.contains(&next) {
                indentation -= self.tab_length;
            }
        }

        Some(apply_indentation(source, indentation))
    }

    /// Sum the depth contributions of every line in `prefix`
    ///
    /// A line whose last character opens a level contributes `+tab_length`,
    /// one whose last character closes a level contributes `-tab_length`.
    fn compute_indentation(&self, prefix: &str) -> i32 {
        prefix
            .split('\n')
            .map(|line| match line.chars().next_back() {
                Some(c) if self.starts.contains(&c) => self.tab_length,
                Some(c) if self.ends.contains(&c) => -self.tab_length,
                _ => 0,
            })
            .sum()
    }
}

impl Default for IndentationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `indentation` spaces to the inserted text; negative depth
/// renders as no spaces
fn apply_indentation(source: &str, indentation: i32) -> String {
    let mut expanded = String::from(source);
    for _ in 0..indentation.max(0) {
        expanded.push(' ');
    }
    expanded
}
