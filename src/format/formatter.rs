//! The output reconciler.
//!
//! [`Formatter`] keeps the translation history and the output it believes
//! is on screen.  Every call to [`Formatter::format`] runs the same cycle:
//!
//! ```text
//! undo / do / prev
//!        │
//!        ├─ history ends with `undo`? ── no ──▶ reseed: prev as context, undo as output
//!        ├─ pop `undo`
//!        ├─ resolve each `do` against the tail of history, push it
//!        │     └─ entries pushed out of history are folded into a frozen prefix
//!        ├─ render frozen prefix + history          → new RenderedState
//!        └─ diff(old, new) → Backspaces / String / KeyCombination / EngineCommand
//! ```
//!
//! The new state replaces the old one before the sink sees any instruction,
//! so a failing sink never leaves the formatter out of step with itself.
//!
//! A lookahead ending the newest frozen entry stays undecided until the
//! entry after it is frozen too, so undoing that entry still changes it.

use crate::config::{AppConfig, FormatterConfig};
use crate::output::{Instruction, OutputError, OutputSink};
use crate::steno::Translation;

use super::action::{Action, ActionSlot};
use super::history::{HistoryEntry, TranslationHistory};
use super::orthography::{Orthography, OrthographyError};
use super::render::{common_prefix_len, diff, RenderedState};
use super::resolver::{first_literal, Resolver};

/// Past this many characters the frozen prefix is cut back to
/// [`FROZEN_KEEP`].
const FROZEN_LIMIT: usize = 1024;
const FROZEN_KEEP: usize = 512;

/// Output of translations that fell out of history.
#[derive(Debug, Clone)]
struct Frozen {
    state: RenderedState,
    last: Action,
    /// Pending lookahead of the newest frozen entry, applied after `state`.
    tail: Option<ActionSlot>,
}

impl Frozen {
    fn new(start: Action) -> Self {
        Self {
            state: RenderedState::new(),
            last: start,
            tail: None,
        }
    }

    fn is_pristine(&self) -> bool {
        self.state.text.is_empty() && self.state.schedule.is_empty() && self.tail.is_none()
    }

    fn commit(&mut self, action: &Action) {
        self.state.apply(action);
        self.last = action.clone();
    }
}

/// Turns translations into output edits.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: FormatterConfig,
    orthography: Orthography,
    history: TranslationHistory,
    frozen: Frozen,
    rendered: RenderedState,
    /// Output of a reseeded `prev`: on screen, but not produced by us.
    context: RenderedState,
}

impl Formatter {
    pub fn new(config: FormatterConfig, orthography: Orthography) -> Self {
        let start = Action::start(config.start_capitalized, config.start_attached);
        Self {
            history: TranslationHistory::new(config.undo_levels),
            frozen: Frozen::new(start),
            rendered: RenderedState::new(),
            context: RenderedState::new(),
            config,
            orthography,
        }
    }

    /// Build from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`OrthographyError`] if a configured extra rule is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, OrthographyError> {
        let orthography = config.orthography.build()?;
        Ok(Self::new(config.formatter.clone(), orthography))
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// The output this formatter has produced and believes is on screen.
    ///
    /// Output that only came from a reseeded `prev` is left out while it
    /// is still intact.
    pub fn rendered(&self) -> RenderedState {
        let mut visible = self.rendered.clone();
        let shared = common_prefix_len(&self.context.text, &visible.text);
        let effects = self
            .context
            .schedule
            .iter()
            .zip(&visible.schedule)
            .take_while(|(a, b)| a == b && a.offset <= shared)
            .count();
        visible.schedule.drain(..effects);
        visible.drop_front(shared);
        visible
    }

    /// Translations in history, oldest first, with their memos.
    pub fn history(&self) -> impl Iterator<Item = &Translation> {
        self.history.iter().map(|entry| &entry.translation)
    }

    /// The action the next translation would follow.
    pub fn last_action(&self) -> Action {
        self.render_window(None).1
    }

    /// Forget all history and rendered output.
    pub fn reset(&mut self) {
        log::debug!("format: reset");
        self.history.clear();
        self.frozen = Frozen::new(self.start_action());
        self.rendered = RenderedState::new();
        self.context = RenderedState::new();
    }

    /// Undo `undo`, apply `do_`, and send the difference to `sink`.
    ///
    /// `prev` is the translation before `undo`; it is only consulted when
    /// the history has to be rebuilt.
    ///
    /// # Errors
    ///
    /// Every instruction is offered to `sink`, even after one fails; the
    /// first error is returned.  The formatter state has already moved on
    /// when that happens.
    pub fn format(
        &mut self,
        undo: &[Translation],
        do_: &[Translation],
        prev: Option<&Translation>,
        sink: &mut dyn OutputSink,
    ) -> Result<(), OutputError> {
        let instructions = self.format_instructions(undo, do_, prev);
        let mut first_error = None;
        for instruction in &instructions {
            if let Err(e) = instruction.send_to(sink) {
                log::warn!("format: output sink failed on {instruction:?}: {e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Like [`Formatter::format`], returning the instructions instead of
    /// sending them.
    pub fn format_instructions(
        &mut self,
        undo: &[Translation],
        do_: &[Translation],
        prev: Option<&Translation>,
    ) -> Vec<Instruction> {
        let fresh = self.history.is_empty() && self.frozen.is_pristine();
        if !self.history.ends_with(undo) || (fresh && prev.is_some()) {
            self.reseed(undo, prev);
        }
        for _ in undo {
            self.history.pop();
        }
        for translation in do_ {
            let slots = self.resolve_next(translation);
            self.push(translation.clone(), slots);
        }

        let (state, _) = self.render_window(None);
        let instructions = diff(&self.rendered, &state);
        self.rendered = state;
        instructions
    }

    fn start_action(&self) -> Action {
        Action::start(self.config.start_capitalized, self.config.start_attached)
    }

    /// Rebuild history from what the caller says is on screen.  `prev`
    /// only provides context; `undo` counts as our own output.
    fn reseed(&mut self, undo: &[Translation], prev: Option<&Translation>) {
        log::debug!(
            "format: history out of step with {} undone translation(s), reseeding",
            undo.len()
        );
        self.history.clear();
        self.frozen = Frozen::new(self.start_action());
        if let Some(prev) = prev {
            self.seed(prev);
        }
        self.context = self.render_window(None).0;
        for translation in undo {
            self.seed(translation);
        }
        self.rendered = self.render_window(None).0;
    }

    fn seed(&mut self, translation: &Translation) {
        let slots = match &translation.formatting {
            Some(slots) => slots.clone(),
            None => self.resolve_next(translation),
        };
        self.push(translation.clone(), slots);
    }

    /// Resolve `translation` as the next entry after the current history.
    fn resolve_next(&self, translation: &Translation) -> Vec<ActionSlot> {
        let next = first_literal(translation);
        let (base, last) = self.render_window(Some(&next));
        Resolver::new(&self.orthography, self.config.space_placement).resolve(
            translation,
            &last,
            &base,
        )
    }

    fn push(&mut self, translation: Translation, slots: Vec<ActionSlot>) {
        let first = first_literal(&translation);
        let entry = HistoryEntry::new(translation, slots, first);
        if let Some(evicted) = self.history.push(entry) {
            self.freeze(evicted);
        }
    }

    /// Fold an entry that left history into the frozen prefix.
    fn freeze(&mut self, evicted: HistoryEntry) {
        if let Some(tail) = self.frozen.tail.take() {
            let action = tail.resolve(Some(evicted.first_literal.as_str())).clone();
            self.frozen.commit(&action);
        }
        if let Some((last, init)) = evicted.slots().split_last() {
            for slot in init {
                self.frozen.commit(slot.resolve(None));
            }
            if last.is_pending() {
                self.frozen.tail = Some(last.clone());
            } else {
                self.frozen.commit(last.resolve(None));
            }
        }

        let len = self.frozen.state.char_len();
        if len > FROZEN_LIMIT {
            let cut = len - FROZEN_KEEP;
            self.frozen.state.drop_front(cut);
            self.rendered.drop_front(cut);
            self.context.drop_front(cut);
        }
    }

    /// Render the frozen prefix plus history.  `tail_next` is the literal
    /// offered to a lookahead pending at the end of everything.
    fn render_window(&self, tail_next: Option<&str>) -> (RenderedState, Action) {
        let mut state = self.frozen.state.clone();
        let mut last = self.frozen.last.clone();
        let entries: Vec<&HistoryEntry> = self.history.iter().collect();
        if let Some(tail) = &self.frozen.tail {
            let next = match entries.first() {
                Some(following) => Some(following.first_literal.as_str()),
                None => tail_next,
            };
            let action = tail.resolve(next);
            state.apply(action);
            last = action.clone();
        }
        for (i, entry) in entries.iter().enumerate() {
            let next = match entries.get(i + 1) {
                Some(following) => Some(following.first_literal.as_str()),
                None => tail_next,
            };
            let slots = entry.slots();
            for (j, slot) in slots.iter().enumerate() {
                let following = if j + 1 == slots.len() { next } else { None };
                let action = slot.resolve(following);
                state.apply(action);
                last = action.clone();
            }
        }
        (state, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpacePlacement;
    use crate::output::CaptureOutput;

    fn t(english: &str) -> Translation {
        Translation::from_steno(&["S"], Some(english))
    }

    fn formatter() -> Formatter {
        Formatter::new(FormatterConfig::default(), Orthography::english())
    }

    #[test]
    fn first_word_with_start_flags() {
        let config = FormatterConfig {
            start_capitalized: true,
            start_attached: true,
            ..FormatterConfig::default()
        };
        let mut f = Formatter::new(config, Orthography::english());
        assert_eq!(
            f.format_instructions(&[], &[t("hello")], None),
            [Instruction::String("Hello".into())]
        );
    }

    #[test]
    fn first_word_with_defaults() {
        let mut f = formatter();
        assert_eq!(
            f.format_instructions(&[], &[t("hello")], None),
            [Instruction::String(" hello".into())]
        );
    }

    #[test]
    fn reseeds_from_memos() {
        let mut f = formatter();
        let prev = t("{-|}").with_formatting(vec![ActionSlot::Resolved(Action {
            capitalize: true,
            ..Action::default()
        })]);
        let undo = t("test").with_formatting(vec![ActionSlot::Resolved(Action {
            text: " test".into(),
            word: "test".into(),
            ..Action::default()
        })]);
        assert_eq!(
            f.format_instructions(&[undo], &[t("rest")], Some(&prev)),
            [Instruction::Backspaces(4), Instruction::String("Rest".into())]
        );
    }

    #[test]
    fn undo_restores_previous_output() {
        let mut f = formatter();
        f.format_instructions(&[], &[t("hello")], None);
        let before = f.rendered();
        f.format_instructions(&[], &[t("world")], None);
        let out = f.format_instructions(&[t("world")], &[], None);
        assert_eq!(out, [Instruction::Backspaces(6)]);
        assert_eq!(f.rendered(), before);
    }

    #[test]
    fn pending_lookahead_follows_next_translation() {
        let mut f = formatter();
        let mut out = CaptureOutput::new();
        f.format(&[], &[t("{=[aeiou]/an/a}")], None, &mut out).unwrap();
        assert_eq!(out.text, " a");
        f.format(&[], &[t("apple")], None, &mut out).unwrap();
        assert_eq!(out.text, " an apple");
        f.format(&[t("apple")], &[t("pear")], None, &mut out).unwrap();
        assert_eq!(out.text, " a pear");
    }

    #[test]
    fn history_is_bounded_and_output_kept() {
        let config = FormatterConfig {
            undo_levels: 3,
            ..FormatterConfig::default()
        };
        let mut f = Formatter::new(config, Orthography::english());
        let mut out = CaptureOutput::new();
        for word in ["one", "two", "three", "four", "five"] {
            f.format(&[], &[t(word)], None, &mut out).unwrap();
        }
        assert_eq!(f.history().count(), 3);
        assert_eq!(out.text, " one two three four five");
        assert_eq!(f.rendered().text, out.text);
    }

    #[test]
    fn suffix_reaches_into_frozen_output() {
        let config = FormatterConfig {
            undo_levels: 1,
            ..FormatterConfig::default()
        };
        let mut f = Formatter::new(config, Orthography::english());
        let mut out = CaptureOutput::new();
        f.format(&[], &[t("drive")], None, &mut out).unwrap();
        f.format(&[], &[t("{^ing}")], None, &mut out).unwrap();
        f.format(&[], &[t("{^s}")], None, &mut out).unwrap();
        assert_eq!(out.text, " drivings");
    }

    #[test]
    fn reset_forgets_everything() {
        let mut f = formatter();
        f.format_instructions(&[], &[t("hello")], None);
        f.reset();
        assert_eq!(f.history().count(), 0);
        assert_eq!(f.rendered(), RenderedState::new());
        assert_eq!(
            f.format_instructions(&[], &[t("again")], None),
            [Instruction::String(" again".into())]
        );
    }

    #[test]
    fn after_placement_moves_separator() {
        let config = FormatterConfig {
            space_placement: SpacePlacement::After,
            ..FormatterConfig::default()
        };
        let mut f = Formatter::new(config, Orthography::english());
        let mut out = CaptureOutput::new();
        f.format(&[], &[t("hello")], None, &mut out).unwrap();
        f.format(&[], &[t("{.}")], None, &mut out).unwrap();
        f.format(&[], &[t("world")], None, &mut out).unwrap();
        assert_eq!(out.text, "hello. World ");
    }

    struct FailingSink;

    impl OutputSink for FailingSink {
        fn send_backspaces(&mut self, _: usize) -> Result<(), OutputError> {
            Err(OutputError::Rejected("backspace".into()))
        }
        fn send_string(&mut self, _: &str) -> Result<(), OutputError> {
            Err(OutputError::Rejected("string".into()))
        }
        fn send_key_combination(&mut self, _: &str) -> Result<(), OutputError> {
            Err(OutputError::Rejected("combo".into()))
        }
        fn send_engine_command(&mut self, _: &str) -> Result<(), OutputError> {
            Err(OutputError::Rejected("command".into()))
        }
    }

    #[test]
    fn sink_error_after_state_update() {
        let mut f = formatter();
        let result = f.format(&[], &[t("hello")], None, &mut FailingSink);
        assert!(matches!(result, Err(OutputError::Rejected(_))));
        assert_eq!(f.rendered().text, " hello");
    }

    /// Rejects key combinations, records everything else.
    struct NoCombos(CaptureOutput);

    impl OutputSink for NoCombos {
        fn send_backspaces(&mut self, count: usize) -> Result<(), OutputError> {
            self.0.send_backspaces(count)
        }
        fn send_string(&mut self, text: &str) -> Result<(), OutputError> {
            self.0.send_string(text)
        }
        fn send_key_combination(&mut self, _: &str) -> Result<(), OutputError> {
            Err(OutputError::Rejected("combo".into()))
        }
        fn send_engine_command(&mut self, command: &str) -> Result<(), OutputError> {
            self.0.send_engine_command(command)
        }
    }

    #[test]
    fn sink_error_does_not_drop_later_instructions() {
        let mut f = formatter();
        let mut sink = NoCombos(CaptureOutput::new());
        let result = f.format(&[], &[t("{#bad}hello")], None, &mut sink);
        assert!(matches!(result, Err(OutputError::Rejected(_))));
        f.format(&[], &[t("world")], None, &mut sink).unwrap();
        assert_eq!(sink.0.text, f.rendered().text);
        assert_eq!(sink.0.text, " hello world");
    }

    #[test]
    fn lookahead_stays_open_after_its_entry_is_frozen() {
        let config = FormatterConfig {
            undo_levels: 1,
            ..FormatterConfig::default()
        };
        let mut f = Formatter::new(config, Orthography::english());
        let mut out = CaptureOutput::new();
        let article = t("{=[aeiou]/an/a}");
        f.format(&[], &[article.clone()], None, &mut out).unwrap();
        f.format(&[], &[t("apple")], Some(&article), &mut out).unwrap();
        assert_eq!(out.text, " an apple");

        f.format(&[t("apple")], &[], Some(&article), &mut out).unwrap();
        assert_eq!(out.text, " a");
        assert_eq!(f.rendered().text, " a");

        f.format(&[], &[t("pear")], Some(&article), &mut out).unwrap();
        f.format(&[], &[t("orange")], None, &mut out).unwrap();
        assert_eq!(out.text, " a pear orange");
    }

    #[test]
    fn reseeded_prev_is_not_reported_as_output() {
        let mut f = formatter();
        let before = f.rendered();
        let prev = t("hello");
        f.format_instructions(&[], &[t("world")], Some(&prev));
        assert_eq!(f.rendered().text, " world");
        f.format_instructions(&[t("world")], &[], Some(&prev));
        assert_eq!(f.rendered(), before);
    }
}
