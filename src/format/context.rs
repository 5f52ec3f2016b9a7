//! The read-only view handed to meta-command handlers.
//!
//! A [`Context`] holds the last resolved action, the output rendered so far
//! (for retrospective commands), the space placement and the orthography
//! table.  Handlers never see the formatter itself, so they cannot re-enter
//! it or mutate history.

use crate::config::SpacePlacement;

use super::action::Action;
use super::atoms::{apply_case, apply_space_char, capitalize_first, lower_first, rightmost_word};
use super::orthography::Orthography;

/// Everything a handler may look at while resolving one atom.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    last: &'a Action,
    rendered: &'a str,
    placement: SpacePlacement,
    orthography: &'a Orthography,
}

impl<'a> Context<'a> {
    pub fn new(
        last: &'a Action,
        rendered: &'a str,
        placement: SpacePlacement,
        orthography: &'a Orthography,
    ) -> Self {
        Self {
            last,
            rendered,
            placement,
            orthography,
        }
    }

    pub fn last_action(&self) -> &'a Action {
        self.last
    }

    /// Everything rendered before the current atom.
    pub fn rendered(&self) -> &'a str {
        self.rendered
    }

    pub fn placement(&self) -> SpacePlacement {
        self.placement
    }

    pub fn orthography(&self) -> &'a Orthography {
        self.orthography
    }

    /// A default action inheriting the persistent fields of the last one.
    pub fn new_action(&self) -> Action {
        self.last.new_following()
    }

    /// A copy of the last action's full state, minus what it rendered.
    pub fn copy_last_action(&self) -> Action {
        self.last.copy_state()
    }

    /// The last `count` characters of rendered output.
    pub fn last_text(&self, count: usize) -> &'a str {
        let total = self.rendered.chars().count();
        let skip = total.saturating_sub(count);
        match self.rendered.char_indices().nth(skip) {
            Some((start, _)) => &self.rendered[start..],
            None => "",
        }
    }

    /// The last `count` finished words of rendered output, oldest first.
    pub fn last_words(&self, count: usize) -> Vec<&'a str> {
        let words: Vec<&str> = self.rendered.split_whitespace().collect();
        let start = words.len().saturating_sub(count);
        words[start..].to_vec()
    }

    /// The last word of rendered output plus the whitespace after it.
    pub fn last_word_with_tail(&self) -> Option<(&'a str, &'a str)> {
        let word = self.last_words(1).pop()?;
        let trimmed = self.rendered.trim_end();
        Some((word, &self.rendered[trimmed.len()..]))
    }

    /// The separator the last action appended and that an attaching action
    /// must take back.  Always empty when spaces are placed before words.
    pub fn pending_separator(&self) -> &'a str {
        let sep = self.last.space_char.as_str();
        let pending = self.placement == SpacePlacement::After
            && !self.last.next_attach
            && !sep.is_empty()
            && self.last.text.ends_with(sep)
            && self.rendered.ends_with(sep);
        if pending {
            sep
        } else {
            ""
        }
    }

    /// Whether `action` joins the previous output without a separator.
    pub fn is_attached(&self, action: &Action) -> bool {
        action.prev_attach || self.last.next_attach
    }

    /// Position `rendered` relative to the previous output and store it in
    /// `action.text`, adding or taking back separators as required.
    pub fn place(&self, mut action: Action, rendered: &str) -> Action {
        let attached = self.is_attached(&action);
        match self.placement {
            SpacePlacement::Before => {
                action.text = if attached {
                    rendered.to_string()
                } else {
                    format!("{}{rendered}", action.space_char)
                };
            }
            SpacePlacement::After => {
                if attached {
                    action.replace = format!("{}{}", action.replace, self.pending_separator());
                }
                action.text = if action.next_attach {
                    rendered.to_string()
                } else {
                    format!("{rendered}{}", action.space_char)
                };
            }
        }
        action
    }

    /// Apply the one-shot transforms requested by the last action.
    ///
    /// Returns the transformed text and whether uppercase carries on.
    pub fn apply_one_shot(&self, text: &str, attached: bool) -> (String, bool) {
        let last = self.last;
        let mut text = text.to_string();
        if last.lower {
            text = lower_first(&text);
        }
        if last.capitalize {
            text = capitalize_first(&text);
        }
        let upper = last.upper || (last.upper_carry && attached);
        if upper {
            text = text.to_uppercase();
        }
        (text, upper)
    }

    /// Render a run of word text: one-shot transforms, persistent case,
    /// separator substitution, then placement.
    pub fn render_word(&self, mut action: Action, text: &str) -> Action {
        let attached = self.is_attached(&action);
        let (word_source, upper) = self.apply_one_shot(text, attached);
        let cased = apply_case(text, action.case, attached);
        let spaced = apply_space_char(&cased, &action.space_char);
        let (rendered, _) = self.apply_one_shot(&spaced, attached);

        let word = rightmost_word(&word_source);
        action.word = if action.glue && attached {
            format!("{}{word}", self.last.word)
        } else {
            word.to_string()
        };
        action.upper_carry = upper;
        self.place(action, &rendered)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
