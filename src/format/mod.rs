//! Translation formatting.
//!
//! Turns a stream of [`Translation`](crate::steno::Translation)s, including
//! undos, into the minimal keyboard edits that keep the screen in step.
//!
//! # Architecture
//!
//! ```text
//! english "{^ing}"
//!        │
//!        ▼
//! atoms::split_atoms ──▶ MetaCommand::parse / plain text
//!                              │
//!                              ▼
//!                 Resolver (Context: last action, rendered text,
//!                           placement, Orthography)
//!                              │
//!                              ▼
//!                  ActionSlot (Resolved | Pending lookahead)
//!                              │
//!                              ▼
//!         TranslationHistory ──▶ render ──▶ diff ──▶ OutputSink
//! ```
//!
//! # Quick start
//!
//! ```
//! use steno_format::config::FormatterConfig;
//! use steno_format::format::{Formatter, Orthography};
//! use steno_format::output::CaptureOutput;
//! use steno_format::steno::Translation;
//!
//! let mut formatter = Formatter::new(FormatterConfig::default(), Orthography::english());
//! let mut out = CaptureOutput::new();
//!
//! let test = Translation::from_steno(&["TEFT"], Some("test"));
//! let ing = Translation::from_steno(&["-G"], Some("{^ing}"));
//! formatter.format(&[], &[test], None, &mut out).unwrap();
//! formatter.format(&[], &[ing], None, &mut out).unwrap();
//! assert_eq!(out.text, " testing");
//! ```

pub mod action;
pub mod atoms;
pub mod context;
pub mod formatter;
pub mod history;
pub mod meta;
pub mod orthography;
pub mod render;
pub mod resolver;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use action::{Action, ActionSlot, Case, LookAhead};
pub use context::Context;
pub use formatter::Formatter;
pub use history::{HistoryEntry, TranslationHistory};
pub use meta::{MetaCommand, MetaError};
pub use orthography::{Orthography, OrthographyError, OrthographyRule};
pub use render::{diff, Effect, RenderedState, Scheduled};
pub use resolver::Resolver;
