//! `{#combo}` and `{PLOVER:command}`.

use crate::format::action::Action;
use crate::format::context::Context;

pub(super) fn key_combo(ctx: &Context<'_>, combo: &str) -> Action {
    let mut action = ctx.copy_last_action();
    action.combo = Some(combo.to_string());
    action
}

pub(super) fn engine_command(ctx: &Context<'_>, name: &str) -> Action {
    let mut action = ctx.copy_last_action();
    action.command = Some(name.to_string());
    action
}
