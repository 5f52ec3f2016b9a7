//! `{^text}`, `{text^}`, `{^text^}`, `{^}` and carry capitalization.

use crate::format::action::Action;
use crate::format::atoms::{apply_case, apply_space_char, rightmost_word};
use crate::format::context::Context;

use super::{META_ATTACH_FLAG, META_CARRY_CAPITALIZATION};

/// `true` when `text` contains anything other than word characters.
fn has_word_boundary(text: &str) -> bool {
    text.chars().any(|c| !(c.is_alphanumeric() || c == '_'))
}

fn common_prefix_chars(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

pub(super) fn attach(ctx: &Context<'_>, meta: &str) -> Action {
    let mut action = ctx.new_action();
    let mut content = meta;
    let begin = match content.strip_prefix(META_ATTACH_FLAG) {
        Some(rest) => {
            content = rest;
            true
        }
        None => false,
    };
    let mut end = match content.strip_suffix(META_ATTACH_FLAG) {
        Some(rest) => {
            content = rest;
            true
        }
        None => false,
    };
    // A lone `^` attaches on both sides.
    if meta.len() == META_ATTACH_FLAG.len_utf8() {
        end = true;
    }
    action.prev_attach = begin;
    if end {
        action.next_attach = true;
        action.word_is_finished = false;
    }

    if content.is_empty() {
        return orthography_break(ctx, action);
    }
    if !begin {
        return ctx.render_word(action, content);
    }
    suffix(ctx, action, content, end)
}

/// An empty attach: joins its neighbours and stops suffix rules from
/// reaching across it.
fn orthography_break(ctx: &Context<'_>, mut action: Action) -> Action {
    let last = ctx.last_action();
    action.orthography = false;
    action.word = last.word.clone();
    action.capitalize = last.capitalize;
    action.lower = last.lower;
    action.upper = last.upper;
    action.upper_carry = last.upper_carry;
    ctx.place(action, "")
}

fn suffix(ctx: &Context<'_>, mut action: Action, content: &str, end: bool) -> Action {
    let last = ctx.last_action();
    let use_orthography = !last.word.is_empty()
        && last.orthography
        && !content.trim().is_empty()
        && (!end || has_word_boundary(content));

    let text = if use_orthography {
        let new_word = ctx.orthography().add_suffix(&last.word, content);
        let common = common_prefix_chars(&last.word, &new_word);
        let replaced = last.word.chars().count() - common;
        if replaced > 0 {
            let sep = ctx.pending_separator();
            let tail = ctx.last_text(replaced + sep.chars().count());
            action.replace = tail.strip_suffix(sep).unwrap_or(tail).to_string();
        }
        action.word = rightmost_word(&new_word).to_string();
        let mut text: String = new_word.chars().skip(common).collect();
        if last.upper_carry {
            text = text.to_uppercase();
            action.word = action.word.to_uppercase();
            action.upper_carry = true;
        }
        text
    } else {
        let (text, upper) = ctx.apply_one_shot(content, true);
        action.upper_carry = upper;
        action.word = rightmost_word(&format!("{}{text}", last.word)).to_string();
        text
    };

    let cased = apply_case(&text, action.case, true);
    let spaced = apply_space_char(&cased, &action.space_char);
    ctx.place(action, &spaced)
}

/// `{~|text}`: passes a pending capitalization through `text`.
pub(super) fn carry_capitalize(ctx: &Context<'_>, meta: &str) -> Action {
    let last = ctx.last_action();
    let mut action = ctx.new_action();
    action.capitalize = last.capitalize;

    let mut content = meta;
    let begin = match content.strip_prefix(META_ATTACH_FLAG) {
        Some(rest) => {
            content = rest;
            true
        }
        None => false,
    };
    content = content
        .strip_prefix(META_CARRY_CAPITALIZATION)
        .unwrap_or(content);
    let end = match content.strip_suffix(META_ATTACH_FLAG) {
        Some(rest) => {
            content = rest;
            true
        }
        None => false,
    };
    action.prev_attach = begin;
    if end {
        action.next_attach = true;
        action.word_is_finished = false;
    }

    if content.is_empty() && !begin && !end {
        action.word = last.word.clone();
        return action;
    }
    action.word = if ctx.is_attached(&action) {
        rightmost_word(&format!("{}{content}", last.word)).to_string()
    } else {
        rightmost_word(content).to_string()
    };
    ctx.place(action, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpacePlacement;
    use crate::format::orthography::Orthography;

    fn word(text: &str) -> Action {
        Action {
            text: format!(" {text}"),
            word: text.into(),
            ..Action::default()
        }
    }

    #[test]
    fn word_boundary() {
        assert!(has_word_boundary("-"));
        assert!(has_word_boundary("a b"));
        assert!(!has_word_boundary("ing"));
    }

    #[test]
    fn suffix_uses_orthography() {
        let ortho = Orthography::english();
        let last = word("test");
        let ctx = Context::new(&last, " test", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "^ing");
        assert_eq!(action.text, "ing");
        assert_eq!(action.word, "testing");
        assert!(action.prev_attach);
        assert_eq!(action.replace, "");
    }

    #[test]
    fn suffix_replaces_changed_tail() {
        let ortho = Orthography::english();
        let last = word("drive");
        let ctx = Context::new(&last, " drive", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "^ing");
        assert_eq!(action.replace, "e");
        assert_eq!(action.text, "ing");
        assert_eq!(action.word, "driving");
    }

    #[test]
    fn suffix_keeps_carried_uppercase_in_word() {
        let ortho = Orthography::english();
        let last = Action {
            upper_carry: true,
            ..word("TEST")
        };
        let ctx = Context::new(&last, " TEST", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "^ing");
        assert_eq!(action.text, "ING");
        assert_eq!(action.word, "TESTING");
        assert!(action.upper_carry);
    }

    #[test]
    fn attached_space_after_combo_keeps_separator() {
        let ortho = Orthography::english();
        let last = Action {
            word: "Hello.".into(),
            combo: Some("control_l(c)".into()),
            ..Action::default()
        };
        let ctx = Context::new(&last, ". Hello. ", SpacePlacement::After, &ortho);
        let action = attach(&ctx, "^ ^");
        assert_eq!(action.replace, "");
        assert_eq!(action.text, " ");
    }

    #[test]
    fn suffix_after_takes_back_separator() {
        let ortho = Orthography::english();
        let last = Action {
            text: "drive ".into(),
            word: "drive".into(),
            ..Action::default()
        };
        let ctx = Context::new(&last, "drive ", SpacePlacement::After, &ortho);
        let action = attach(&ctx, "^ing");
        assert_eq!(action.replace, "e ");
        assert_eq!(action.text, "ing ");
    }

    #[test]
    fn prefix_attaches_next_word() {
        let ortho = Orthography::english();
        let last = Action::default();
        let ctx = Context::new(&last, "", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "pre^");
        assert_eq!(action.text, " pre");
        assert!(action.next_attach);
        assert!(!action.word_is_finished);
    }

    #[test]
    fn empty_attach_breaks_orthography() {
        let ortho = Orthography::english();
        let last = Action {
            capitalize: true,
            ..word("test")
        };
        let ctx = Context::new(&last, " test", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "^");
        assert_eq!(action.text, "");
        assert!(action.prev_attach && action.next_attach);
        assert!(!action.orthography);
        assert!(action.capitalize);
        assert_eq!(action.word, "test");
    }

    #[test]
    fn infix_without_boundary_skips_orthography() {
        let ortho = Orthography::english();
        let last = word("fly");
        let ctx = Context::new(&last, " fly", SpacePlacement::Before, &ortho);
        let action = attach(&ctx, "^ing^");
        assert_eq!(action.text, "ing");
        assert_eq!(action.replace, "");
        assert!(action.next_attach);
    }

    #[test]
    fn carry_capitalize_keeps_flag() {
        let ortho = Orthography::empty();
        let last = Action {
            capitalize: true,
            ..Action::default()
        };
        let ctx = Context::new(&last, "", SpacePlacement::Before, &ortho);
        let action = carry_capitalize(&ctx, "~|\"^");
        assert_eq!(action.text, " \"");
        assert!(action.capitalize);
        assert!(action.next_attach);
    }
}
