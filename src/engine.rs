//! The engine facade
//!
//! `CodeMark` is the object a host text-editing surface talks to. It owns
//! the capability handle onto the host document plus every annotation
//! component, and wires the host's change notifications into them: the
//! indentation and pair-completion engines update synchronously on every
//! edit, while the highlight pass is debounced and runs later, when the
//! host pumps `tick`.
//!
//! Hosts that let the engine mediate their edits get the full pipeline
//! from `insert` / `replace_range` / `delete_range`: the newline
//! indentation filter rewrites the inserted text, then the mutation runs
//! between the `before_change` / `after_change` notifications. Hosts that
//! mutate the document themselves call the notification methods directly
//! around each mutation, and `edit_completed` when a logical edit burst
//! ends.

use std::time::{Duration, Instant};

use regex::Regex;

use crate::error::{EngineError, Result};
use crate::highlight::{
    apply_error_overlay, apply_patterns, run_pass, ErrorOverlay, HighlightMode,
    HighlightScheduler, PatternRegistry,
};
use crate::indent::{EditKey, IndentationEngine};
use crate::language::LanguageProfile;
use crate::pairs::PairTable;
use crate::search::{Findable, MatchIndex, MatchToken, Replaceable};
use crate::style::Color;
use crate::surface::TextSurface;

/// An edit announced by `before_change`, awaiting its `after_change`
#[derive(Debug, Clone, Copy)]
struct PendingEdit {
    start: usize,
    removed: usize,
    inserted: usize,
}

/// The annotation engine facade
pub struct CodeMark<S: TextSurface> {
    surface: S,
    patterns: PatternRegistry,
    errors: ErrorOverlay,
    matches: MatchIndex,
    indent: IndentationEngine,
    pairs: PairTable,
    scheduler: HighlightScheduler,
    /// Clear the error overlay on every edit
    remove_errors_on_edit: bool,
    /// Reentrancy guard for engine-initiated mutations
    suppress: bool,
    pending_edit: Option<PendingEdit>,
}

impl<S: TextSurface> CodeMark<S> {
    /// Attach the engine to a host surface
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            patterns: PatternRegistry::new(),
            errors: ErrorOverlay::new(),
            matches: MatchIndex::new(),
            indent: IndentationEngine::new(),
            pairs: PairTable::new(),
            scheduler: HighlightScheduler::new(),
            remove_errors_on_edit: true,
            suppress: false,
            pending_edit: None,
        }
    }

    /// The host surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The host surface, mutably
    ///
    /// Direct mutations bypass the engine; follow them with the
    /// change-notification protocol to keep derived state consistent.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Detach the engine, returning the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    // ── Change-notification protocol ─────────────────────────

    /// The host is about to replace `removed` bytes at `start` with
    /// `inserted` bytes
    pub fn before_change(&mut self, start: usize, removed: usize, inserted: usize) {
        if self.suppress {
            return;
        }
        self.pending_edit = Some(PendingEdit {
            start,
            removed,
            inserted,
        });
    }

    /// The host has inserted `inserted` bytes at `start`
    ///
    /// Runs the synchronous reactions: live-mode pass scheduling, error
    /// clearing, and the single-character indentation/pair-completion
    /// updates.
    pub fn after_change(&mut self, start: usize, inserted: usize) {
        if self.suppress {
            return;
        }
        // Pair the notification with its announcement; a mismatch means the
        // host skipped a before_change
        if let Some(pending) = self.pending_edit.take() {
            if pending.start != start || pending.inserted != inserted {
                log::debug!(
                    "change notification mismatch: announced {}..+{} -> {}, got {start} -> {inserted}",
                    pending.start,
                    pending.removed,
                    pending.inserted
                );
            }
        }

        if self.scheduler.mode() == HighlightMode::Live && !self.patterns.is_empty() {
            self.scheduler.schedule_at(Instant::now());
        }

        if self.remove_errors_on_edit {
            self.errors.clear();
        }

        if !self.indent.is_enabled() && !self.pairs.is_enabled() {
            return;
        }
        if let Some(c) = self.single_inserted_char(start, inserted) {
            self.indent.on_char_inserted(c);
            if self.pairs.is_enabled() {
                if let Some(close) = self.pairs.close_for(c) {
                    self.complete_pair(close);
                }
            }
        }
    }

    /// The current burst of edits is complete
    ///
    /// In settle mode this is where the one pass per logical edit gets
    /// scheduled; in live mode it does nothing.
    pub fn edit_completed(&mut self) {
        if self.suppress {
            return;
        }
        if self.scheduler.mode() == HighlightMode::Settle {
            self.scheduler.cancel();
            if !self.patterns.is_empty() {
                self.scheduler.schedule_at(Instant::now());
            }
        }
    }

    /// A physical keypress the indentation engine tracks
    pub fn key_pressed(&mut self, key: EditKey) {
        self.indent.on_key(key);
    }

    fn single_inserted_char(&self, start: usize, inserted: usize) -> Option<char> {
        let slice = self.surface.text().get(start..start + inserted)?;
        let mut chars = slice.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Insert the close character of a just-typed pair, under suppression
    /// so the synthetic edit cannot re-enter this pipeline
    fn complete_pair(&mut self, close: char) {
        self.suppress = true;
        let at = self.surface.cursor();
        let mut utf8 = [0u8; 4];
        match self.surface.insert(at, close.encode_utf8(&mut utf8)) {
            Ok(()) => {
                if self.pairs.centers_cursor() {
                    self.surface.set_cursor(at);
                }
                // The synthetic close character counts toward indentation
                // exactly as if the user had typed it
                self.indent.on_char_inserted(close);
            }
            Err(e) => log::warn!("pair completion failed: {e}"),
        }
        self.suppress = false;
    }

    // ── Mediated edits ───────────────────────────────────────

    /// Insert text at a byte offset through the full edit pipeline
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<()> {
        self.splice(offset, offset, text)
    }

    /// Replace the byte range `start..end` through the full edit pipeline
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) -> Result<()> {
        self.splice(start, end, text)
    }

    /// Remove the byte range `start..end` through the full edit pipeline
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<()> {
        self.splice(start, end, "")
    }

    fn splice(&mut self, start: usize, end: usize, source: &str) -> Result<()> {
        if start > end {
            return Err(EngineError::BadSpan { start, end });
        }
        // The indentation filter sees the text as it is before the edit
        let rewritten = if self.suppress {
            None
        } else {
            self.indent
                .rewrite_insertion(self.surface.text(), source, start, end)
        };
        let source = rewritten.as_deref().unwrap_or(source);

        self.before_change(start, end - start, source.len());
        if start < end {
            self.surface.remove(start, end)?;
        }
        if !source.is_empty() {
            self.surface.insert(start, source)?;
        }
        self.after_change(start, source.len());
        Ok(())
    }

    /// Replace the whole document with new, highlighted text
    ///
    /// Cancels any pending pass, resets every piece of derived state
    /// (error overlay, match index, indent counter), installs the text and
    /// runs one synchronous pass under suppression. Installing empty text
    /// is a no-op.
    pub fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.scheduler.cancel();
        self.errors.clear();
        self.matches.invalidate();
        self.indent.reset();

        self.suppress = true;
        self.surface.replace_text(text);
        run_pass(&mut self.surface, &self.patterns, &self.errors);
        self.suppress = false;
    }

    // ── Pass control ─────────────────────────────────────────

    /// Run a pending due pass, if any; returns whether one ran
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Like [`tick`](Self::tick) with the clock passed in
    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.scheduler.take_due(now) {
            run_pass(&mut self.surface, &self.patterns, &self.errors);
            true
        } else {
            false
        }
    }

    /// Run a full highlight pass right now
    pub fn rehighlight(&mut self) {
        run_pass(&mut self.surface, &self.patterns, &self.errors);
    }

    /// Reapply the syntax patterns without clearing first
    pub fn rehighlight_patterns(&mut self) -> Result<()> {
        apply_patterns(&mut self.surface, &self.patterns)
    }

    /// Reapply the error overlay without clearing first
    pub fn rehighlight_errors(&mut self) -> Result<()> {
        apply_error_overlay(&mut self.surface, &self.errors)
    }

    /// Remove every syntax-derived span
    pub fn reset_highlighter(&mut self) {
        self.surface.clear_syntax_spans();
    }

    /// Cancel the pending highlight pass, if any
    pub fn cancel_highlight(&mut self) {
        self.scheduler.cancel();
    }

    /// Check if a highlight pass is pending
    pub fn highlight_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    // ── Pattern management ───────────────────────────────────

    /// Register a pattern, or recolor an existing one
    pub fn add_pattern(&mut self, pattern: &str, color: Color) -> Result<()> {
        self.patterns.add(pattern, color)
    }

    /// Unregister a pattern; absent patterns are a no-op
    pub fn remove_pattern(&mut self, pattern: &str) {
        self.patterns.remove(pattern);
    }

    /// Replace all patterns; order of the pairs is paint order
    pub fn set_patterns<'a, I>(&mut self, patterns: I) -> Result<()>
    where
        I: IntoIterator<Item = (&'a str, Color)>,
    {
        self.patterns.set_all(patterns)
    }

    /// Remove all patterns
    pub fn clear_patterns(&mut self) {
        self.patterns.clear();
    }

    /// Number of registered patterns
    pub fn patterns_len(&self) -> usize {
        self.patterns.len()
    }

    // ── Error management ─────────────────────────────────────

    /// Register an error line (1-based), replacing any previous color
    pub fn add_error_line(&mut self, line: u32, color: Color) {
        self.errors.set_line(line, color);
    }

    /// Unregister an error line; absent lines are a no-op
    pub fn remove_error_line(&mut self, line: u32) {
        self.errors.remove_line(line);
    }

    /// Remove every error line
    pub fn clear_error_lines(&mut self) {
        self.errors.clear();
    }

    /// Number of registered error lines
    pub fn errors_len(&self) -> usize {
        self.errors.len()
    }

    /// Check if any error line is registered
    pub fn has_errors(&self) -> bool {
        self.errors.has_any()
    }

    /// Enable or disable clearing the error overlay on every edit
    /// (enabled by default)
    pub fn set_remove_errors_on_edit(&mut self, remove: bool) {
        self.remove_errors_on_edit = remove;
    }

    // ── Indentation configuration ────────────────────────────

    /// Enable or disable auto-indentation
    pub fn set_auto_indentation(&mut self, enabled: bool) {
        self.indent.set_enabled(enabled);
    }

    /// Set the tab length used for indentation depth
    pub fn set_tab_length(&mut self, length: i32) {
        self.indent.set_tab_length(length);
    }

    /// Replace the indentation-start character set
    pub fn set_indentation_starts(&mut self, characters: impl IntoIterator<Item = char>) {
        self.indent.set_starts(characters);
    }

    /// Replace the indentation-end character set
    pub fn set_indentation_ends(&mut self, characters: impl IntoIterator<Item = char>) {
        self.indent.set_ends(characters);
    }

    /// The running indentation counter
    pub fn indentation_counter(&self) -> i32 {
        self.indent.counter()
    }

    // ── Pair-completion configuration ────────────────────────

    /// Enable or disable pair completion
    pub fn set_pair_complete(&mut self, enabled: bool) {
        self.pairs.set_enabled(enabled);
    }

    /// Leave the cursor between the pair instead of after the close
    pub fn set_pair_complete_center_cursor(&mut self, center: bool) {
        self.pairs.set_center_cursor(center);
    }

    /// Replace the whole pair table
    pub fn set_pair_map(&mut self, pairs: impl IntoIterator<Item = (char, char)>) {
        self.pairs.set_map(pairs);
    }

    /// Add one completion pair
    pub fn add_pair(&mut self, open: char, close: char) {
        self.pairs.add(open, close);
    }

    /// Remove the pair for an open character
    pub fn remove_pair(&mut self, open: char) {
        self.pairs.remove(open);
    }

    /// Remove all pairs
    pub fn clear_pairs(&mut self) {
        self.pairs.clear();
    }

    /// Number of registered pairs
    pub fn pairs_len(&self) -> usize {
        self.pairs.len()
    }

    // ── Scheduling configuration ─────────────────────────────

    /// Set the debounce delay for highlight passes
    pub fn set_update_delay(&mut self, delay: Duration) {
        self.scheduler.set_delay(delay);
    }

    /// The current debounce delay
    pub fn update_delay(&self) -> Duration {
        self.scheduler.delay()
    }

    /// Switch between live (per keystroke) and settle (per logical edit)
    /// scheduling
    pub fn set_highlight_mode(&mut self, mode: HighlightMode) {
        self.scheduler.set_mode(mode);
    }

    /// The current scheduling mode
    pub fn highlight_mode(&self) -> HighlightMode {
        self.scheduler.mode()
    }

    /// Set the color of the current-match highlight span
    pub fn set_matching_highlight_color(&mut self, color: Color) {
        self.matches.set_highlight_color(color);
    }

    // ── Profiles and utilities ───────────────────────────────

    /// Configure patterns, indentation sets and pairs from a profile
    pub fn apply_profile(&mut self, profile: &LanguageProfile) -> Result<()> {
        self.patterns
            .set_all(profile.patterns.iter().map(|(p, c)| (p.as_str(), *c)))?;
        self.indent.set_starts(profile.indent_starts.iter().copied());
        self.indent.set_ends(profile.indent_ends.iter().copied());
        self.pairs.set_map(profile.pairs.iter().copied());
        Ok(())
    }

    /// The current text with trailing spaces and tabs stripped per line
    pub fn text_without_trailing_spaces(&self) -> String {
        match Regex::new(r"(?m)[\t ]+$") {
            Ok(trailing) => trailing.replace_all(self.surface.text(), "").into_owned(),
            Err(_) => self.surface.text().to_owned(),
        }
    }
}

impl<S: TextSurface> Findable for CodeMark<S> {
    fn find_matches(&mut self, pattern: &str) -> Result<&[MatchToken]> {
        let text = self.surface.text().to_owned();
        self.matches.find(&text, pattern)
    }

    fn find_next_match(&mut self) -> Option<MatchToken> {
        self.matches.next(&mut self.surface)
    }

    fn find_prev_match(&mut self) -> Option<MatchToken> {
        self.matches.prev(&mut self.surface)
    }

    fn clear_matches(&mut self) {
        self.matches.clear(&mut self.surface);
    }
}

impl<S: TextSurface> Replaceable for CodeMark<S> {
    fn replace_first_match(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let regex = Regex::new(pattern)?;
        let replaced = regex.replace(self.surface.text(), replacement).into_owned();
        self.set_text(&replaced);
        Ok(())
    }

    fn replace_all_matches(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        let regex = Regex::new(pattern)?;
        let replaced = regex
            .replace_all(self.surface.text(), replacement)
            .into_owned();
        self.set_text(&replaced);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::EditBuffer;
    use pretty_assertions::assert_eq;

    fn engine() -> CodeMark<EditBuffer> {
        CodeMark::new(EditBuffer::new())
    }

    fn engine_with(text: &str) -> CodeMark<EditBuffer> {
        CodeMark::new(EditBuffer::from_text(text))
    }

    /// Effective foreground color at a position: the last foreground span
    /// covering it wins, because later spans layer on top
    fn effective_fg(surface: &EditBuffer, pos: usize) -> Option<Color> {
        surface
            .syntax_spans()
            .iter()
            .filter(|s| s.kind == crate::style::SpanKind::Foreground && s.contains(pos))
            .next_back()
            .map(|s| s.color)
    }

    fn braces(mark: &mut CodeMark<EditBuffer>) {
        mark.set_auto_indentation(true);
        mark.set_tab_length(4);
        mark.set_indentation_starts(['{']);
        mark.set_indentation_ends(['}']);
    }

    #[test]
    fn test_later_pattern_wins_overlap() {
        let mut mark = engine_with("for x");
        mark.add_pattern(r"\w+", Color::BLUE).unwrap();
        mark.add_pattern(r"for", Color::GREEN).unwrap();

        mark.rehighlight();

        // The overlapping region takes the later registration's color
        assert_eq!(effective_fg(mark.surface(), 0), Some(Color::GREEN));
        assert_eq!(effective_fg(mark.surface(), 2), Some(Color::GREEN));
        // Text only the earlier pattern matches keeps its color
        assert_eq!(effective_fg(mark.surface(), 4), Some(Color::BLUE));
    }

    #[test]
    fn test_pass_is_idempotent() {
        let mut mark = engine_with("let x = 42;");
        mark.add_pattern(r"\d+", Color::RED).unwrap();
        mark.add_pattern(r"let", Color::MAGENTA).unwrap();
        mark.add_error_line(1, Color::YELLOW);

        mark.rehighlight();
        let first: Vec<_> = mark.surface().syntax_spans().to_vec();
        mark.rehighlight();

        assert_eq!(mark.surface().syntax_spans(), &first[..]);
    }

    #[test]
    fn test_error_overlay_exact_lines() {
        let mut mark = engine_with("a\nb\nc\nd\ne\nf");
        mark.add_error_line(2, Color::RED);
        mark.add_error_line(5, Color::BLUE);

        mark.rehighlight();

        let spans = mark.surface().syntax_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].color, Color::RED);
        assert_eq!((spans[0].start, spans[0].end), (2, 4));
        assert_eq!(spans[1].color, Color::BLUE);
        assert_eq!((spans[1].start, spans[1].end), (8, 10));
    }

    #[test]
    fn test_search_wraparound_asymmetry() {
        let mut mark = engine_with("a b c");
        let found = mark.find_matches("[abc]").unwrap().to_vec();
        assert_eq!(found.len(), 3);

        let a = mark.find_next_match().unwrap();
        let b = mark.find_next_match().unwrap();
        let c = mark.find_next_match().unwrap();
        assert_eq!((a.start, b.start, c.start), (0, 2, 4));

        // next() wraps past the last match
        assert_eq!(mark.find_next_match().unwrap(), a);
        // prev() clamps at the first: it never cycles to the last
        assert_eq!(mark.find_prev_match().unwrap(), a);
        assert_eq!(mark.find_prev_match().unwrap(), a);
    }

    #[test]
    fn test_indent_fast_path_at_document_end() {
        let mut mark = engine();
        braces(&mut mark);

        mark.insert(0, "{").unwrap();
        assert_eq!(mark.indentation_counter(), 4);

        mark.insert(1, "\n").unwrap();
        assert_eq!(mark.surface().text(), "{\n    ");
    }

    #[test]
    fn test_indent_recompute_path_between_braces() {
        let mut mark = engine();
        braces(&mut mark);

        // Open block with no closer after the insertion point
        mark.set_text("{x");
        mark.insert(1, "\n").unwrap();
        assert_eq!(mark.surface().text(), "{\n    x");

        // Same block, but the next character closes it: one tab less
        let mut mark = engine();
        braces(&mut mark);
        mark.set_text("{}");
        mark.insert(1, "\n").unwrap();
        assert_eq!(mark.surface().text(), "{\n}");
    }

    #[test]
    fn test_recompute_leaves_running_counter() {
        let mut mark = engine();
        braces(&mut mark);
        mark.insert(0, "{").unwrap();
        assert_eq!(mark.indentation_counter(), 4);

        // Mid-document newline recomputes for the inserted line only
        mark.insert(1, "x").unwrap();
        mark.insert(1, "\n").unwrap();
        assert_eq!(mark.indentation_counter(), 4);
    }

    #[test]
    fn test_pair_completion_once_and_net_counter() {
        let mut mark = engine();
        braces(&mut mark);
        mark.set_pair_complete(true);
        mark.add_pair('{', '}');

        mark.insert(0, "{").unwrap();

        // Exactly one close character, no recursion
        assert_eq!(mark.surface().text(), "{}");
        // The open deepened and the synthetic close shallowed: net zero
        assert_eq!(mark.indentation_counter(), 0);
        // The suppressed synthetic edit scheduled nothing
        assert!(!mark.highlight_pending());
    }

    #[test]
    fn test_pair_completion_cursor_placement() {
        let mut mark = engine();
        mark.set_pair_complete(true);
        mark.add_pair('(', ')');

        mark.insert(0, "(").unwrap();
        assert_eq!(mark.surface().text(), "()");
        assert_eq!(mark.surface().cursor(), 2);

        let mut mark = engine();
        mark.set_pair_complete(true);
        mark.set_pair_complete_center_cursor(true);
        mark.add_pair('(', ')');

        mark.insert(0, "(").unwrap();
        assert_eq!(mark.surface().cursor(), 1);
    }

    #[test]
    fn test_replace_all_resets_errors_and_rehighlights() {
        let mut mark = engine();
        mark.add_pattern(r"\d+", Color::RED).unwrap();
        mark.set_text("err 1\nerr 2");
        mark.add_error_line(1, Color::YELLOW);
        mark.add_error_line(2, Color::YELLOW);

        mark.replace_all_matches("err", "ok").unwrap();

        assert_eq!(mark.surface().text(), "ok 1\nok 2");
        assert!(!mark.has_errors());
        // Spans are consistent with a fresh pass over the replaced text
        let spans = mark.surface().syntax_spans();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (3, 4));
        assert_eq!((spans[1].start, spans[1].end), (8, 9));
        assert!(!mark.highlight_pending());
    }

    #[test]
    fn test_replace_first_only_touches_first() {
        let mut mark = engine_with("aaa bbb aaa");
        mark.replace_first_match("aaa", "x").unwrap();
        assert_eq!(mark.surface().text(), "x bbb aaa");
    }

    #[test]
    fn test_invalid_replace_pattern_is_synchronous_error() {
        let mut mark = engine_with("abc");
        assert!(mark.replace_all_matches("[", "x").is_err());
        assert_eq!(mark.surface().text(), "abc");
    }

    #[test]
    fn test_debounced_pass_runs_once() {
        let mut mark = engine();
        mark.add_pattern(r"\d+", Color::RED).unwrap();

        mark.insert(0, "42").unwrap();
        assert!(mark.highlight_pending());

        // Nothing due before the delay has elapsed
        assert!(!mark.tick_at(Instant::now()));
        assert!(mark.surface().syntax_spans().is_empty());

        // Due after the delay, and consumed by the first tick
        let later = Instant::now() + Duration::from_millis(600);
        assert!(mark.tick_at(later));
        assert_eq!(mark.surface().syntax_spans().len(), 1);
        assert!(!mark.tick_at(later));
    }

    #[test]
    fn test_no_scheduling_without_patterns() {
        let mut mark = engine();
        mark.insert(0, "hello").unwrap();
        assert!(!mark.highlight_pending());
    }

    #[test]
    fn test_settle_mode_waits_for_edit_completed() {
        let mut mark = engine();
        mark.set_highlight_mode(HighlightMode::Settle);
        mark.add_pattern(r"\w+", Color::GREEN).unwrap();

        mark.insert(0, "word").unwrap();
        assert!(!mark.highlight_pending());

        mark.edit_completed();
        assert!(mark.highlight_pending());

        let later = Instant::now() + Duration::from_millis(600);
        assert!(mark.tick_at(later));
        assert_eq!(mark.surface().syntax_spans().len(), 1);
    }

    #[test]
    fn test_set_text_resets_derived_state() {
        let mut mark = engine();
        braces(&mut mark);
        mark.add_pattern(r"\d", Color::RED).unwrap();
        mark.set_text("1 2 3");
        mark.insert(5, "{").unwrap();
        assert_eq!(mark.indentation_counter(), 4);
        mark.add_error_line(1, Color::YELLOW);
        mark.find_matches(r"\d").unwrap();
        mark.find_next_match().unwrap();

        mark.set_text("fresh 9");

        assert!(!mark.has_errors());
        assert_eq!(mark.indentation_counter(), 0);
        assert!(mark.find_next_match().is_none());
        assert!(mark.surface().match_span().is_none());
        // The install ran one synchronous pass over the new text
        assert_eq!(mark.surface().syntax_spans().len(), 1);
        assert_eq!(mark.surface().syntax_spans()[0].start, 6);
    }

    #[test]
    fn test_set_text_empty_is_noop() {
        let mut mark = engine_with("keep me");
        mark.add_error_line(1, Color::RED);
        mark.set_text("");
        assert_eq!(mark.surface().text(), "keep me");
        assert!(mark.has_errors());
    }

    #[test]
    fn test_errors_cleared_on_edit_by_default() {
        let mut mark = engine_with("line");
        mark.add_error_line(1, Color::RED);
        mark.insert(0, "x").unwrap();
        assert!(!mark.has_errors());
    }

    #[test]
    fn test_errors_kept_when_clearing_disabled() {
        let mut mark = engine_with("line");
        mark.set_remove_errors_on_edit(false);
        mark.add_error_line(1, Color::RED);
        mark.insert(0, "x").unwrap();
        assert!(mark.has_errors());
    }

    #[test]
    fn test_host_driven_notification_protocol() {
        let mut mark = engine();
        mark.set_pair_complete(true);
        mark.add_pair('[', ']');

        // The host performs the mutation itself and fires the protocol
        mark.surface_mut().insert(0, "[").unwrap();
        mark.before_change(0, 0, 1);
        mark.after_change(0, 1);

        assert_eq!(mark.surface().text(), "[]");
    }

    #[test]
    fn test_key_tracking_through_facade() {
        let mut mark = engine();
        braces(&mut mark);
        mark.key_pressed(EditKey::Space);
        mark.key_pressed(EditKey::Space);
        mark.key_pressed(EditKey::Backspace);
        assert_eq!(mark.indentation_counter(), 1);
    }

    #[test]
    fn test_apply_profile() {
        let doc = r##"
name = "braces"
indent-starts = ["{"]
indent-ends = ["}"]

[[patterns]]
regex = '\d+'
color = 0xFF0000

[[patterns]]
regex = '[a-z]+'
color = 0x0000FF

[[pairs]]
open = "{"
close = "}"
"##;
        let profile = LanguageProfile::from_toml(doc).unwrap();

        let mut mark = engine();
        mark.apply_profile(&profile).unwrap();
        mark.set_auto_indentation(true);
        mark.set_tab_length(2);
        mark.set_pair_complete(true);

        assert_eq!(mark.patterns_len(), 2);
        assert_eq!(mark.pairs_len(), 1);

        mark.insert(0, "{").unwrap();
        assert_eq!(mark.surface().text(), "{}");
        assert_eq!(mark.indentation_counter(), 0);
    }

    #[test]
    fn test_text_without_trailing_spaces() {
        let mark = engine_with("a  \nb\t\nc");
        assert_eq!(mark.text_without_trailing_spaces(), "a\nb\nc");
    }

    #[test]
    fn test_clear_matches_via_facade() {
        let mut mark = engine_with("x y z");
        mark.find_matches("[xyz]").unwrap();
        mark.find_next_match().unwrap();
        assert!(mark.surface().match_span().is_some());

        mark.clear_matches();
        assert!(mark.surface().match_span().is_none());
        assert!(mark.find_next_match().is_none());
    }

    #[test]
    fn test_pass_never_clears_match_highlight() {
        let mut mark = engine_with("match 1");
        mark.add_pattern(r"\d", Color::RED).unwrap();
        mark.find_matches("match").unwrap();
        mark.find_next_match().unwrap();

        mark.rehighlight();
        mark.rehighlight();

        assert!(mark.surface().match_span().is_some());
    }
}
