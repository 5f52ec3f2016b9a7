//! Steno data model: strokes and the translations the formatter consumes.
//!
//! A [`Stroke`] is one chord in normalised RTF/CRE form.  A [`Translation`]
//! maps a sequence of strokes to an optional english string and carries the
//! formatter's memo of the actions it resolved to.

pub mod stroke;
pub mod translation;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use stroke::{Stroke, StrokeError};
pub use translation::Translation;
