//! Actions: the atomic render unit produced from one atom.
//!
//! An [`Action`] describes *what to emit* (`text`, `combo`, `command`), *what
//! it supersedes* (`replace`), and the state it hands to the next action
//! (attach flags, one-shot and persistent case, separator override).
//!
//! A conditional meta-command cannot be resolved until the following atom is
//! known, so the resolver stores an [`ActionSlot`]: either a resolved action
//! or a pending [`LookAhead`] holding both candidates.

use regex::Regex;

/// The default word separator.
pub const SPACE: &str = " ";

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// Case transforms.
///
/// `Upper`, `Lower` and `Title` are the persistent modes set by
/// `{MODE:...}`; `CapFirstWord` and `LowerFirstChar` are only used by the
/// retrospective case commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    CapFirstWord,
    LowerFirstChar,
    Upper,
    Lower,
    Title,
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// One resolved render step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// Text to append after `replace` has been removed.
    pub text: String,
    /// Trailing word, fed to orthography and retrospective commands.
    pub word: String,
    /// Suffix of the previously rendered output that this action removes.
    pub replace: String,
    /// No separator between the previous output and this action.
    pub prev_attach: bool,
    /// No separator between this action and the next one.
    pub next_attach: bool,
    /// Joins without a separator to an adjacent glued action.
    pub glue: bool,
    /// Capitalize the next word.
    pub capitalize: bool,
    /// Lowercase the first letter of the next word.
    pub lower: bool,
    /// Uppercase the next word.
    pub upper: bool,
    /// Keep uppercasing text attached to this action.
    pub upper_carry: bool,
    /// Persistent case mode.
    pub case: Option<Case>,
    /// Persistent separator.
    pub space_char: String,
    /// Engine command to run.
    pub command: Option<String>,
    /// Key combination to send.
    pub combo: Option<String>,
    /// `false` disables suffix rules at this boundary.
    pub orthography: bool,
    /// `false` when a trailing attach keeps the word open for suffixing.
    pub word_is_finished: bool,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            text: String::new(),
            word: String::new(),
            replace: String::new(),
            prev_attach: false,
            next_attach: false,
            glue: false,
            capitalize: false,
            lower: false,
            upper: false,
            upper_carry: false,
            case: None,
            space_char: SPACE.to_string(),
            command: None,
            combo: None,
            orthography: true,
            word_is_finished: true,
        }
    }
}

impl Action {
    /// The synthetic start-of-buffer action.
    pub fn start(capitalized: bool, attached: bool) -> Self {
        Self {
            capitalize: capitalized,
            next_attach: attached,
            ..Self::default()
        }
    }

    /// A fresh action inheriting only the persistent fields (`case`,
    /// `space_char`) of `self`.
    pub fn new_following(&self) -> Self {
        Self {
            case: self.case,
            space_char: self.space_char.clone(),
            ..Self::default()
        }
    }

    /// A copy of `self`'s state with everything that renders cleared.
    pub fn copy_state(&self) -> Self {
        Self {
            text: String::new(),
            replace: String::new(),
            prev_attach: false,
            command: None,
            combo: None,
            ..self.clone()
        }
    }

    /// `true` when this action emits nothing at all.
    pub fn is_silent(&self) -> bool {
        self.text.is_empty()
            && self.replace.is_empty()
            && self.combo.is_none()
            && self.command.is_none()
    }
}

// ---------------------------------------------------------------------------
// LookAhead
// ---------------------------------------------------------------------------

/// A two-branch action awaiting the literal text of the next atom.
#[derive(Debug, Clone)]
pub struct LookAhead {
    pattern: Regex,
    /// Chosen when the next atom matches `pattern`.
    pub matched: Action,
    /// Chosen otherwise, and provisionally while no next atom exists.
    pub unmatched: Action,
}

impl LookAhead {
    /// `pattern` must already be anchored at the start.
    pub fn new(pattern: Regex, matched: Action, unmatched: Action) -> Self {
        Self {
            pattern,
            matched,
            unmatched,
        }
    }

    /// The anchored pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Pick a branch given the next atom's literal text, if any.
    pub fn resolve(&self, next: Option<&str>) -> &Action {
        match next {
            Some(text) if self.pattern.is_match(text) => &self.matched,
            _ => &self.unmatched,
        }
    }
}

impl PartialEq for LookAhead {
    fn eq(&self, other: &Self) -> bool {
        self.pattern.as_str() == other.pattern.as_str()
            && self.matched == other.matched
            && self.unmatched == other.unmatched
    }
}

impl Eq for LookAhead {}

// ---------------------------------------------------------------------------
// ActionSlot
// ---------------------------------------------------------------------------

/// A memoized resolver output entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionSlot {
    Resolved(Action),
    Pending(LookAhead),
}

impl ActionSlot {
    /// The action to use given the literal text following this slot.
    pub fn resolve(&self, next: Option<&str>) -> &Action {
        match self {
            ActionSlot::Resolved(action) => action,
            ActionSlot::Pending(lookahead) => lookahead.resolve(next),
        }
    }

    /// `true` while the slot still depends on a following atom.
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionSlot::Pending(_))
    }
}

impl From<Action> for ActionSlot {
    fn from(action: Action) -> Self {
        ActionSlot::Resolved(action)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored(pattern: &str) -> Regex {
        Regex::new(&format!("^(?:{pattern})")).expect("valid pattern")
    }

    #[test]
    fn default_action_has_single_space_and_orthography() {
        let action = Action::default();
        assert_eq!(action.space_char, " ");
        assert!(action.orthography);
        assert!(action.word_is_finished);
        assert!(action.is_silent());
    }

    #[test]
    fn actions_differ_on_attach() {
        let plain = Action {
            word: "test".into(),
            ..Action::default()
        };
        let attached = Action {
            next_attach: true,
            ..plain.clone()
        };
        assert_ne!(plain, attached);
    }

    #[test]
    fn copy_state_drops_rendered_fields() {
        let action = Action {
            text: "test".into(),
            word: "test".into(),
            replace: "x".into(),
            combo: Some("a".into()),
            capitalize: true,
            ..Action::default()
        };
        assert_eq!(
            action.copy_state(),
            Action {
                word: "test".into(),
                capitalize: true,
                ..Action::default()
            }
        );
    }

    #[test]
    fn new_following_keeps_only_persistent_fields() {
        let action = Action {
            word: "test".into(),
            capitalize: true,
            case: Some(Case::Upper),
            space_char: "_".into(),
            ..Action::default()
        };
        assert_eq!(
            action.new_following(),
            Action {
                case: Some(Case::Upper),
                space_char: "_".into(),
                ..Action::default()
            }
        );
    }

    #[test]
    fn lookahead_picks_branch() {
        let a = Action {
            text: " an".into(),
            ..Action::default()
        };
        let b = Action {
            text: " a".into(),
            ..Action::default()
        };
        let lookahead = LookAhead::new(anchored("[aeiou]"), a.clone(), b.clone());
        assert_eq!(lookahead.resolve(Some("apple")), &a);
        assert_eq!(lookahead.resolve(Some("pear")), &b);
        assert_eq!(lookahead.resolve(None), &b);
    }

    #[test]
    fn slot_resolution() {
        let action = Action {
            text: "x".into(),
            ..Action::default()
        };
        let slot = ActionSlot::from(action.clone());
        assert!(!slot.is_pending());
        assert_eq!(slot.resolve(None), &action);
    }
}
