//! codemark - an embeddable text-annotation engine
//!
//! Layers five independent features over a mutable text buffer owned by a
//! host text-editing surface:
//!
//! - pattern-ordered syntax coloring
//! - sparse error-line overlays
//! - debounced re-highlighting
//! - match search, navigation and replacement
//! - auto-indentation with bracket/quote pair completion
//!
//! The host implements [`TextSurface`] (or embeds the provided
//! [`EditBuffer`]), attaches a [`CodeMark`] engine to it, routes edits
//! through the engine or fires the change-notification protocol around its
//! own mutations, and pumps [`CodeMark::tick`] from its event loop so
//! debounced highlight passes get to run.

mod buffer;
mod engine;
mod error;
mod highlight;
mod indent;
mod language;
mod pairs;
mod search;
mod style;
mod surface;

pub use buffer::EditBuffer;
pub use engine::CodeMark;
pub use error::{EngineError, Result};
pub use highlight::{ErrorOverlay, HighlightMode, HighlightScheduler, PatternRegistry, DEFAULT_UPDATE_DELAY_MS};
pub use indent::{EditKey, IndentationEngine};
pub use language::LanguageProfile;
pub use pairs::PairTable;
pub use search::{Findable, MatchIndex, MatchToken, Replaceable};
pub use style::{Color, Span, SpanKind};
pub use surface::TextSurface;
