//! `{MODE:...}`: persistent case and separator.

use crate::format::action::{Action, Case, SPACE};
use crate::format::context::Context;

use super::{strip_prefix_ignore_case, MetaError};

const MODE_SET_SPACE: &str = "SET_SPACE:";

pub(super) fn mode(ctx: &Context<'_>, mode: &str) -> Result<Action, MetaError> {
    let mut action = ctx.copy_last_action();
    if let Some(space) = strip_prefix_ignore_case(mode, MODE_SET_SPACE) {
        action.space_char = space.to_string();
        return Ok(action);
    }
    match mode.to_ascii_uppercase().as_str() {
        "CAPS" => action.case = Some(Case::Upper),
        "LOWER" => action.case = Some(Case::Lower),
        "TITLE" => action.case = Some(Case::Title),
        "SNAKE" => action.space_char = "_".to_string(),
        "CAMEL" => {
            action.case = Some(Case::Title);
            action.space_char = String::new();
            action.capitalize = false;
            action.upper = false;
            action.lower = true;
        }
        "RESET" => {
            action.case = None;
            action.space_char = SPACE.to_string();
        }
        "RESET_CASE" => action.case = None,
        "RESET_SPACE" => action.space_char = SPACE.to_string(),
        _ => return Err(MetaError::UnknownMode(mode.to_string())),
    }
    Ok(action)
}
