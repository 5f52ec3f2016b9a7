//! Steno translation formatting.
//!
//! Converts a stream of steno translations (with undo) into the minimal
//! backspace / text / key-combination edits that keep the output in step.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`steno`] | strokes and translations |
//! | [`format`] | atoms, meta-commands, orthography, the formatter |
//! | [`output`] | output sinks and key-combination parsing |
//! | [`pipeline`] | the formatter on a tokio task |
//! | [`config`] | `settings.toml` |

pub mod config;
pub mod format;
pub mod output;
pub mod pipeline;
pub mod steno;
