//! One-shot case for the next word, and retrospective case for the last one.

use crate::format::action::{Action, Case};
use crate::format::atoms::apply_case;
use crate::format::context::Context;

pub(super) fn capitalize_next(ctx: &Context<'_>) -> Action {
    let mut action = ctx.copy_last_action();
    action.capitalize = true;
    action.lower = false;
    action.upper = false;
    action
}

pub(super) fn lower_next(ctx: &Context<'_>) -> Action {
    let mut action = ctx.copy_last_action();
    action.capitalize = false;
    action.lower = true;
    action.upper = false;
    action
}

pub(super) fn upper_next(ctx: &Context<'_>) -> Action {
    let mut action = ctx.copy_last_action();
    action.capitalize = false;
    action.lower = false;
    action.upper = true;
    action
}

/// Rewrite the last rendered word in `case`.
pub(super) fn retro_case(ctx: &Context<'_>, case: Case) -> Action {
    let mut action = ctx.copy_last_action();
    action.prev_attach = true;
    if let Some((word, tail)) = ctx.last_word_with_tail() {
        let cased = apply_case(word, Some(case), false);
        action.replace = format!("{word}{tail}");
        action.text = format!("{cased}{tail}");
        action.word = cased;
        if case == Case::Upper {
            action.upper_carry = true;
        }
    }
    action
}
