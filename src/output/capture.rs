//! An in-memory sink.

use super::{Instruction, OutputError, OutputSink};

/// Records every instruction and keeps the text they would produce.
#[derive(Debug, Default, Clone)]
pub struct CaptureOutput {
    pub instructions: Vec<Instruction>,
    pub text: String,
}

impl CaptureOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded instructions, leaving the text in place.
    pub fn drain(&mut self) -> Vec<Instruction> {
        std::mem::take(&mut self.instructions)
    }
}

impl OutputSink for CaptureOutput {
    fn send_backspaces(&mut self, count: usize) -> Result<(), OutputError> {
        for _ in 0..count {
            self.text.pop();
        }
        self.instructions.push(Instruction::Backspaces(count));
        Ok(())
    }

    fn send_string(&mut self, text: &str) -> Result<(), OutputError> {
        self.text.push_str(text);
        self.instructions.push(Instruction::String(text.to_string()));
        Ok(())
    }

    fn send_key_combination(&mut self, combo: &str) -> Result<(), OutputError> {
        self.instructions
            .push(Instruction::KeyCombination(combo.to_string()));
        Ok(())
    }

    fn send_engine_command(&mut self, command: &str) -> Result<(), OutputError> {
        self.instructions
            .push(Instruction::EngineCommand(command.to_string()));
        Ok(())
    }
}
