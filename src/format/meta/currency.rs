//! `{*(fmt)}`: reformat the last word as a currency amount.

use crate::format::action::Action;
use crate::format::context::Context;

const CURRENCY_PLACEHOLDER: char = 'c';

pub(super) fn retro_currency(ctx: &Context<'_>, format: &str) -> Action {
    let mut action = ctx.copy_last_action();
    let Some((word, tail)) = ctx.last_word_with_tail() else {
        return action;
    };
    let Some(amount) = format_amount(&word.replace(',', "")) else {
        log::debug!("format: {word:?} is not a number, leaving it as is");
        return action;
    };
    let text = format.replace(CURRENCY_PLACEHOLDER, &amount);
    action.prev_attach = true;
    action.replace = format!("{word}{tail}");
    action.text = format!("{text}{tail}");
    action.word = String::new();
    action
}

/// Integers keep their digits; anything else parsing as a finite float
/// gets two decimals.  Both get thousands separators.
fn format_amount(number: &str) -> Option<String> {
    if let Ok(int) = number.parse::<i128>() {
        return Some(group_thousands(&int.to_string()));
    }
    let float = number.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(group_thousands(&format!("{float:.2}")))
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpacePlacement;
    use crate::format::orthography::Orthography;

    #[test]
    fn amounts() {
        assert_eq!(format_amount("1234").as_deref(), Some("1,234"));
        assert_eq!(format_amount("1234.5").as_deref(), Some("1,234.50"));
        assert_eq!(format_amount("-1000000").as_deref(), Some("-1,000,000"));
        assert_eq!(format_amount("12").as_deref(), Some("12"));
        assert_eq!(format_amount("abc"), None);
        assert_eq!(format_amount("inf"), None);
    }

    #[test]
    fn formats_last_word() {
        let ortho = Orthography::empty();
        let last = Action {
            text: " 1,234.5".into(),
            word: "1,234.5".into(),
            ..Action::default()
        };
        let ctx = Context::new(&last, "It costs 1,234.5", SpacePlacement::Before, &ortho);
        let action = retro_currency(&ctx, "$c");
        assert_eq!(action.replace, "1,234.5");
        assert_eq!(action.text, "$1,234.50");
        assert!(action.prev_attach);
    }

    #[test]
    fn non_numeric_word_is_left_alone() {
        let ortho = Orthography::empty();
        let last = Action::default();
        let ctx = Context::new(&last, " money", SpacePlacement::Before, &ortho);
        assert!(retro_currency(&ctx, "$c").is_silent());
    }
}
