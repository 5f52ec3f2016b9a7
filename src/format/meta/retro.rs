//! `{*!}` and `{*?}`: remove or restore the separator before the last word.

use crate::format::action::Action;
use crate::format::atoms::rightmost_word;
use crate::format::context::Context;

/// Join the last two rendered words.
pub(super) fn delete_space(ctx: &Context<'_>) -> Action {
    let mut action = ctx.copy_last_action();
    let Some((word, tail)) = ctx.last_word_with_tail() else {
        return action;
    };
    let rendered = ctx.rendered();
    let head = &rendered[..rendered.len() - tail.len() - word.len()];
    let before = head.trim_end();
    let sep = &head[before.len()..];
    if before.is_empty() || sep.is_empty() {
        return action;
    }
    action.prev_attach = true;
    action.replace = format!("{sep}{word}{tail}");
    action.text = format!("{word}{tail}");
    action.word = format!("{}{word}", rightmost_word(before));
    action
}

/// Put a separator back in front of the last action when it attached.
pub(super) fn insert_space(ctx: &Context<'_>) -> Action {
    let last = ctx.last_action();
    let mut action = ctx.copy_last_action();
    let rendered = ctx.rendered();
    if !last.prev_attach || last.text.is_empty() || !rendered.ends_with(&last.text) {
        return action;
    }
    action.replace = last.text.clone();
    action.text = format!("{}{}", last.space_char, last.text);
    action
}
