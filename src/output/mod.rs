//! Output sinks.
//!
//! The formatter never talks to a keyboard directly.  It emits a minimal
//! sequence of [`Instruction`]s to an [`OutputSink`]:
//!
//! | Instruction | Sink method |
//! |-------------|-------------|
//! | `Backspaces(n)` | [`OutputSink::send_backspaces`] |
//! | `String(s)` | [`OutputSink::send_string`] |
//! | `KeyCombination(c)` | [`OutputSink::send_key_combination`] |
//! | `EngineCommand(c)` | [`OutputSink::send_engine_command`] |
//!
//! [`CaptureOutput`] records instructions and replays them onto a text
//! buffer; [`WriterOutput`] prints them line by line.

pub mod capture;
pub mod key_combo;
pub mod writer;

pub use capture::CaptureOutput;
pub use key_combo::{parse_key_combo, KeyComboError, KeyEvent};
pub use writer::WriterOutput;

use thiserror::Error;

// ---------------------------------------------------------------------------
// OutputError
// ---------------------------------------------------------------------------

/// Errors a sink may return.  The formatter has already updated its state
/// when one of these reaches the caller.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad key combination: {0}")]
    KeyCombo(#[from] KeyComboError),

    #[error("output rejected: {0}")]
    Rejected(String),
}

// ---------------------------------------------------------------------------
// OutputSink
// ---------------------------------------------------------------------------

/// Destination for formatter output.
pub trait OutputSink {
    fn send_backspaces(&mut self, count: usize) -> Result<(), OutputError>;
    fn send_string(&mut self, text: &str) -> Result<(), OutputError>;
    fn send_key_combination(&mut self, combo: &str) -> Result<(), OutputError>;
    fn send_engine_command(&mut self, command: &str) -> Result<(), OutputError>;
}

// ---------------------------------------------------------------------------
// Instruction
// ---------------------------------------------------------------------------

/// One output step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Backspaces(usize),
    String(String),
    KeyCombination(String),
    EngineCommand(String),
}

impl Instruction {
    /// Deliver this instruction to `sink`.
    pub fn send_to(&self, sink: &mut dyn OutputSink) -> Result<(), OutputError> {
        match self {
            Instruction::Backspaces(count) => sink.send_backspaces(*count),
            Instruction::String(text) => sink.send_string(text),
            Instruction::KeyCombination(combo) => sink.send_key_combination(combo),
            Instruction::EngineCommand(command) => sink.send_engine_command(command),
        }
    }
}
