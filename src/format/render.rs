//! Rendered output and the minimal edit between two renderings.
//!
//! A [`RenderedState`] is the text an action sequence produces plus the
//! key combinations and engine commands scheduled at character offsets
//! into that text.  [`diff`] turns an old and a new state into the
//! instructions that move the screen from one to the other:
//!
//! ```text
//! old  " test"            new  " Rest"
//!        └ common prefix ┘
//! Backspaces(4), String("Rest")
//! ```

use crate::output::Instruction;

use super::action::Action;

/// A non-text effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    KeyCombination(String),
    EngineCommand(String),
}

/// An effect and the character offset it fires at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub offset: usize,
    pub effect: Effect,
}

/// What the output should currently look like.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedState {
    pub text: String,
    pub schedule: Vec<Scheduled>,
}

impl RenderedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Apply one action: drop its `replace`, append its text, then queue
    /// its combination and command at the resulting offset.
    pub fn apply(&mut self, action: &Action) {
        remove_chars(&mut self.text, action.replace.chars().count());
        self.text.push_str(&action.text);
        if action.combo.is_none() && action.command.is_none() {
            return;
        }
        let offset = self.char_len();
        if let Some(combo) = &action.combo {
            self.schedule.push(Scheduled {
                offset,
                effect: Effect::KeyCombination(combo.clone()),
            });
        }
        if let Some(command) = &action.command {
            self.schedule.push(Scheduled {
                offset,
                effect: Effect::EngineCommand(command.clone()),
            });
        }
    }

    /// Drop the first `count` characters, shifting the schedule with them.
    pub fn drop_front(&mut self, count: usize) {
        let byte = self
            .text
            .char_indices()
            .nth(count)
            .map_or(self.text.len(), |(i, _)| i);
        self.text.drain(..byte);
        self.schedule.retain(|s| s.offset >= count);
        for s in &mut self.schedule {
            s.offset -= count;
        }
    }
}

/// Remove the last `count` characters of `text`.
pub fn remove_chars(text: &mut String, count: usize) {
    if count == 0 {
        return;
    }
    let cut = text
        .char_indices()
        .rev()
        .nth(count - 1)
        .map_or(0, |(i, _)| i);
    text.truncate(cut);
}

/// Number of leading characters `a` and `b` share.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Instructions turning `old` into `new`.
pub fn diff(old: &RenderedState, new: &RenderedState) -> Vec<Instruction> {
    let old_chars: Vec<char> = old.text.chars().collect();
    let new_chars: Vec<char> = new.text.chars().collect();

    let mut common = old_chars
        .iter()
        .zip(&new_chars)
        .take_while(|(a, b)| a == b)
        .count();
    let same_effects = old
        .schedule
        .iter()
        .zip(&new.schedule)
        .take_while(|(a, b)| a == b)
        .count();
    // Text after a changed effect has to be typed again after it.
    let changed = old.schedule[same_effects..]
        .iter()
        .chain(&new.schedule[same_effects..])
        .map(|s| s.offset)
        .filter(|offset| *offset < common)
        .min();
    if let Some(offset) = changed {
        common = offset;
    }

    let mut out = Vec::new();
    let erase = old_chars.len() - common;
    if erase > 0 {
        out.push(Instruction::Backspaces(erase));
    }
    let mut typed = common;
    for scheduled in &new.schedule[same_effects..] {
        if scheduled.offset < common {
            continue;
        }
        // Later actions may have erased text behind an effect.
        let offset = scheduled.offset.min(new_chars.len());
        if offset > typed {
            out.push(Instruction::String(new_chars[typed..offset].iter().collect()));
            typed = offset;
        }
        out.push(match &scheduled.effect {
            Effect::KeyCombination(combo) => Instruction::KeyCombination(combo.clone()),
            Effect::EngineCommand(command) => Instruction::EngineCommand(command.clone()),
        });
    }
    if typed < new_chars.len() {
        out.push(Instruction::String(new_chars[typed..].iter().collect()));
    }
    out
}
