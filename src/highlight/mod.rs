//! Highlighting module
//!
//! This module provides the derived-annotation machinery:
//! - Ordered syntax pattern registry
//! - Sparse error-line overlay
//! - Debounced pass scheduling
//! - The highlight pass itself (clear, then reapply)

mod overlay;
mod pass;
mod patterns;
mod scheduler;

pub use overlay::ErrorOverlay;
pub(crate) use pass::run_pass;
pub use pass::{apply_error_overlay, apply_patterns};
pub use patterns::PatternRegistry;
pub use scheduler::{HighlightMode, HighlightScheduler, DEFAULT_UPDATE_DELAY_MS};
