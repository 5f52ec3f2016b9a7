//! A sink that prints each instruction on its own line.
//!
//! ```text
//! backspace 4
//! string "Rest"
//! combo control_l(c) => +control_l +c -c -control_l
//! command lookup
//! ```

use std::io::Write;

use super::key_combo::parse_key_combo;
use super::{OutputError, OutputSink};

pub struct WriterOutput<W: Write> {
    out: W,
}

impl<W: Write> WriterOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for WriterOutput<W> {
    fn send_backspaces(&mut self, count: usize) -> Result<(), OutputError> {
        writeln!(self.out, "backspace {count}")?;
        Ok(())
    }

    fn send_string(&mut self, text: &str) -> Result<(), OutputError> {
        writeln!(self.out, "string {text:?}")?;
        Ok(())
    }

    /// Expands the combination into its press (`+`) and release (`-`) events.
    fn send_key_combination(&mut self, combo: &str) -> Result<(), OutputError> {
        let events = parse_key_combo(combo)?;
        let expanded: Vec<String> = events
            .iter()
            .map(|e| format!("{}{}", if e.pressed { '+' } else { '-' }, e.key))
            .collect();
        writeln!(self.out, "combo {combo} => {}", expanded.join(" "))?;
        Ok(())
    }

    fn send_engine_command(&mut self, command: &str) -> Result<(), OutputError> {
        writeln!(self.out, "command {command}")?;
        Ok(())
    }
}
