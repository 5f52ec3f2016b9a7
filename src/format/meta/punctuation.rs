//! `{.}` `{!}` `{?}` and `{,}` `{:}` `{;}`.

use crate::format::action::Action;
use crate::format::context::Context;

pub(super) fn stop(ctx: &Context<'_>, text: &str) -> Action {
    let mut action = ctx.new_action();
    action.prev_attach = true;
    action.capitalize = true;
    ctx.place(action, text)
}

pub(super) fn comma(ctx: &Context<'_>, text: &str) -> Action {
    let mut action = ctx.new_action();
    action.prev_attach = true;
    ctx.place(action, text)
}
