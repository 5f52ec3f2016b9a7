//! `{&text}`: glued text joins other glued text without a separator.

use crate::format::action::Action;
use crate::format::context::Context;

pub(super) fn glue(ctx: &Context<'_>, text: &str) -> Action {
    let mut action = ctx.new_action();
    action.glue = true;
    action.prev_attach = ctx.last_action().glue;
    ctx.render_word(action, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpacePlacement;
    use crate::format::orthography::Orthography;

    #[test]
    fn glue_chains() {
        let ortho = Orthography::empty();
        let first = Action::default();
        let ctx = Context::new(&first, "", SpacePlacement::Before, &ortho);
        let one = glue(&ctx, "1");
        assert_eq!(one.text, " 1");
        assert_eq!(one.word, "1");
        assert!(one.glue);

        let ctx = Context::new(&one, " 1", SpacePlacement::Before, &ortho);
        let two = glue(&ctx, "9");
        assert_eq!(two.text, "9");
        assert_eq!(two.word, "19");
        assert!(two.prev_attach);
    }
}
