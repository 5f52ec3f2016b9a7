//! Translation → action slots.
//!
//! Each atom of a translation is resolved against the action before it and
//! the output rendered so far.  A conditional that is followed by another
//! atom of the same translation is decided on the spot; only a conditional
//! at the very end of a translation stays pending.

use crate::config::SpacePlacement;
use crate::steno::Translation;

use super::action::{Action, ActionSlot};
use super::atoms::{atom_literal, get_meta, split_atoms, unescape_atom};
use super::context::Context;
use super::meta::MetaCommand;
use super::orthography::Orthography;
use super::render::{remove_chars, RenderedState};

/// Resolves translations for one formatter configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    orthography: &'a Orthography,
    placement: SpacePlacement,
}

/// `true` for raw steno made only of digits and hyphens, e.g. `1-9`.
fn is_numeric(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit()) && raw.chars().all(|c| c.is_ascii_digit() || c == '-')
}

/// The atoms of `english`, trimmed, with blank ones dropped.
fn trimmed_atoms(english: &str) -> Vec<&str> {
    split_atoms(english)
        .into_iter()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect()
}

/// Literal text of the first atom, offered to a pending lookahead before it.
pub fn first_literal(translation: &Translation) -> String {
    match &translation.english {
        Some(english) => trimmed_atoms(english)
            .first()
            .map(|atom| atom_literal(atom))
            .unwrap_or_default(),
        None => translation.rtfcre(),
    }
}

impl<'a> Resolver<'a> {
    pub fn new(orthography: &'a Orthography, placement: SpacePlacement) -> Self {
        Self {
            orthography,
            placement,
        }
    }

    /// Resolve every atom of `translation`.
    ///
    /// `last` is the action in effect before the translation and `rendered`
    /// the output it follows.  Never fails: malformed meta-commands render
    /// as literal text.
    pub fn resolve(
        &self,
        translation: &Translation,
        last: &Action,
        rendered: &RenderedState,
    ) -> Vec<ActionSlot> {
        let mut output = rendered.text.clone();
        let mut last = last.clone();

        let Some(english) = &translation.english else {
            let raw = translation.rtfcre();
            let ctx = Context::new(&last, &output, self.placement, self.orthography);
            let slot = if is_numeric(&raw) {
                let digits = raw.replace('-', "");
                self.apply_meta(&ctx, MetaCommand::Glue(&digits), &digits)
            } else {
                ActionSlot::Resolved(ctx.render_word(ctx.new_action(), &raw))
            };
            return vec![slot];
        };

        let atoms = trimmed_atoms(english);
        if atoms.is_empty() {
            let ctx = Context::new(&last, &output, self.placement, self.orthography);
            return vec![ActionSlot::Resolved(ctx.copy_last_action())];
        }

        let mut slots = Vec::with_capacity(atoms.len());
        for (i, atom) in atoms.iter().enumerate() {
            let slot = {
                let ctx = Context::new(&last, &output, self.placement, self.orthography);
                self.resolve_atom(&ctx, atom)
            };
            let slot = match (slot, atoms.get(i + 1)) {
                (ActionSlot::Pending(lookahead), Some(next)) => {
                    let next = atom_literal(next);
                    ActionSlot::Resolved(lookahead.resolve(Some(&next)).clone())
                }
                (slot, _) => slot,
            };
            let current = slot.resolve(None).clone();
            remove_chars(&mut output, current.replace.chars().count());
            output.push_str(&current.text);
            last = current;
            slots.push(slot);
        }
        slots
    }

    fn resolve_atom(&self, ctx: &Context<'_>, atom: &str) -> ActionSlot {
        let Some(meta) = get_meta(atom) else {
            return ActionSlot::Resolved(ctx.render_word(ctx.new_action(), &unescape_atom(atom)));
        };
        let meta = unescape_atom(meta);
        match MetaCommand::parse(&meta) {
            Some(command) => self.apply_meta(ctx, command, &meta),
            None => {
                log::debug!("format: no meta-command for {{{meta}}}, rendering it as text");
                ActionSlot::Resolved(ctx.render_word(ctx.new_action(), &meta))
            }
        }
    }

    fn apply_meta(&self, ctx: &Context<'_>, command: MetaCommand<'_>, meta: &str) -> ActionSlot {
        match command.apply(ctx) {
            Ok(slot) => slot,
            Err(e) => {
                log::debug!("format: {e}, rendering {{{meta}}} as text");
                ActionSlot::Resolved(ctx.render_word(ctx.new_action(), meta))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_with(
        ortho: &Orthography,
        english: Option<&str>,
        steno: &str,
        last: &Action,
        rendered: &str,
    ) -> Vec<Action> {
        let resolver = Resolver::new(ortho, SpacePlacement::Before);
        let translation = Translation::from_steno(&[steno], english);
        let state = RenderedState {
            text: rendered.into(),
            schedule: Vec::new(),
        };
        resolver
            .resolve(&translation, last, &state)
            .iter()
            .map(|slot| slot.resolve(None).clone())
            .collect()
    }

    fn resolve(english: Option<&str>, last: &Action, rendered: &str) -> Vec<Action> {
        resolve_with(&Orthography::english(), english, "S", last, rendered)
    }

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("1"));
        assert!(is_numeric("1-9"));
        assert!(!is_numeric("-"));
        assert!(!is_numeric("1K"));
    }

    #[test]
    fn raw_number_is_glued() {
        let actions = resolve_with(&Orthography::english(), None, "1", &Action::default(), "");
        assert_eq!(
            actions,
            [Action {
                text: " 1".into(),
                word: "1".into(),
                glue: true,
                ..Action::default()
            }]
        );
    }

    #[test]
    fn raw_hyphenated_number_drops_hyphens() {
        let actions = resolve_with(&Orthography::english(), None, "1-9", &Action::default(), "");
        assert_eq!(actions[0].text, " 19");
    }

    #[test]
    fn untranslated_steno_is_a_word() {
        let actions = resolve_with(&Orthography::english(), None, "STKPWHR", &Action::default(), "");
        assert_eq!(actions[0].text, " STKPWHR");
        assert!(!actions[0].glue);
    }

    #[test]
    fn empty_translation_copies_last_action() {
        let last = Action {
            text: " x".into(),
            word: "x".into(),
            capitalize: true,
            ..Action::default()
        };
        let actions = resolve(Some(""), &last, " x");
        assert_eq!(
            actions,
            [Action {
                word: "x".into(),
                capitalize: true,
                ..Action::default()
            }]
        );
    }

    #[test]
    fn atoms_chain_within_translation() {
        let actions = resolve(Some("{.}hello{,}world"), &Action::default(), " test");
        let texts: Vec<&str> = actions.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, [".", " Hello", ",", " world"]);
    }

    #[test]
    fn suffix_sees_earlier_atoms() {
        let actions = resolve(Some("drive{^ing}"), &Action::default(), "");
        assert_eq!(actions[1].replace, "e");
        assert_eq!(actions[1].text, "ing");
        assert_eq!(actions[1].word, "driving");
    }

    #[test]
    fn unknown_meta_is_literal() {
        let actions = resolve(Some("{not a command}"), &Action::default(), "");
        assert_eq!(actions[0].text, " not a command");
    }

    #[test]
    fn bad_mode_is_literal() {
        let actions = resolve(Some("{MODE:SIDEWAYS}"), &Action::default(), "");
        assert_eq!(actions[0].text, " MODE:SIDEWAYS");
    }

    #[test]
    fn inner_conditional_resolves_immediately() {
        let ortho = Orthography::english();
        let resolver = Resolver::new(&ortho, SpacePlacement::Before);
        let translation = Translation::from_steno(&["S"], Some("{=[aeiou]/an/a} apple"));
        let slots = resolver.resolve(&translation, &Action::default(), &RenderedState::new());
        assert!(slots.iter().all(|s| !s.is_pending()));
        assert_eq!(slots[0].resolve(None).text, " an");
        assert_eq!(slots[1].resolve(None).text, " apple");
    }

    #[test]
    fn trailing_conditional_stays_pending() {
        let ortho = Orthography::english();
        let resolver = Resolver::new(&ortho, SpacePlacement::Before);
        let translation = Translation::from_steno(&["AEU"], Some("{=[aeiou]/an/a}"));
        let slots = resolver.resolve(&translation, &Action::default(), &RenderedState::new());
        assert!(slots[0].is_pending());
    }

    #[test]
    fn first_literal_of_translation() {
        assert_eq!(
            first_literal(&Translation::from_steno(&["S"], Some(" apple pie"))),
            "apple pie"
        );
        assert_eq!(
            first_literal(&Translation::from_steno(&["S"], Some("{^ing}"))),
            "^ing"
        );
        assert_eq!(first_literal(&Translation::from_steno(&["1-9"], None)), "1-9");
        assert_eq!(first_literal(&Translation::from_steno(&["S"], Some(""))), "");
    }
}
