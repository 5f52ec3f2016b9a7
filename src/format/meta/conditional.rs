//! `{=pattern/matched/unmatched}` and `{:if_next_matches:...}`.

use regex::Regex;

use crate::format::action::{Action, LookAhead};
use crate::format::context::Context;

use super::MetaError;

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';

/// Split on unescaped `/` into at most three parts, unescaping `\/` and
/// `\\`.  The third part keeps any further separators.
fn split_arguments(args: &str) -> Vec<String> {
    let mut parts = vec![String::new()];
    let mut chars = args.chars().peekable();
    while let Some(c) = chars.next() {
        let current = parts.len() - 1;
        match c {
            ESCAPE if matches!(chars.peek(), Some(&SEPARATOR) | Some(&ESCAPE)) => {
                if let Some(escaped) = chars.next() {
                    parts[current].push(escaped);
                }
            }
            SEPARATOR if parts.len() < 3 => parts.push(String::new()),
            _ => parts[current].push(c),
        }
    }
    parts
}

fn alternative(ctx: &Context<'_>, text: &str) -> Action {
    if text.is_empty() {
        ctx.copy_last_action()
    } else {
        ctx.render_word(ctx.new_action(), text)
    }
}

pub(super) fn if_next_matches(ctx: &Context<'_>, args: &str) -> Result<LookAhead, MetaError> {
    let parts = split_arguments(args);
    let [pattern, matched, unmatched] = parts.as_slice() else {
        return Err(MetaError::MalformedConditional(args.to_string()));
    };
    let regex = Regex::new(&format!("^(?:{pattern})")).map_err(|e| MetaError::InvalidPattern {
        pattern: pattern.clone(),
        reason: e.to_string(),
    })?;
    Ok(LookAhead::new(
        regex,
        alternative(ctx, matched),
        alternative(ctx, unmatched),
    ))
}
