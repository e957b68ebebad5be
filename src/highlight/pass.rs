//! The highlight pass
//!
//! One pass is a full clear-then-reapply over all derived spans: remove
//! every syntax span, repaint error-line backgrounds, repaint pattern
//! matches. There is no incremental diffing; the pass always recomputes the
//! whole span set. The match-highlight span is stored apart from syntax
//! spans and is untouched here.
//!
//! Scanning runs against a snapshot of the text while spans are applied to
//! the live surface. If the host edits between the two, span application
//! fails and the pass aborts after whatever it already painted; the next
//! scheduled pass reconciles by clearing again.

use crate::error::Result;
use crate::highlight::overlay::{line_segments, ErrorOverlay};
use crate::highlight::patterns::PatternRegistry;
use crate::style::Span;
use crate::surface::TextSurface;

/// Run a full highlight pass; failures are logged, never propagated
pub(crate) fn run_pass(
    surface: &mut dyn TextSurface,
    patterns: &PatternRegistry,
    errors: &ErrorOverlay,
) {
    if surface.text().is_empty() {
        return;
    }
    surface.clear_syntax_spans();
    let result = apply_error_overlay(surface, errors).and_then(|()| apply_patterns(surface, patterns));
    if let Err(e) = result {
        log::warn!("highlight pass aborted: {e}");
    }
}

/// Paint a background span over every registered error line
///
/// Lines are walked with a 1-based counter; the walk stops once the counter
/// passes the highest registered line, since no larger number could match.
pub fn apply_error_overlay(surface: &mut dyn TextSurface, errors: &ErrorOverlay) -> Result<()> {
    let max_line = match errors.max_line() {
        Some(max) => max,
        None => return Ok(()),
    };
    let text = surface.text().to_owned();
    let mut line_number: u32 = 1;
    for (start, end) in line_segments(&text) {
        if let Some(color) = errors.color_for(line_number) {
            surface.apply_syntax_span(Span::background(start, end, color))?;
        }
        line_number += 1;
        if line_number > max_line {
            break;
        }
    }
    Ok(())
}

/// Paint a foreground span over every match of every registered pattern
///
/// Patterns run in insertion order over the entire text, so spans from
/// later patterns layer over earlier ones.
pub fn apply_patterns(surface: &mut dyn TextSurface, patterns: &PatternRegistry) -> Result<()> {
    if patterns.is_empty() {
        return Ok(());
    }
    let text = surface.text().to_owned();
    for entry in patterns.entries() {
        for m in entry.pattern.find_iter(&text) {
            surface.apply_syntax_span(Span::foreground(m.start(), m.end(), entry.color))?;
        }
    }
    Ok(())
}
