//! Meta-command registry.
//!
//! The text inside `{...}` is parsed into a closed [`MetaCommand`] enum and
//! dispatched with a single `match`.  Handlers only see a [`Context`], so
//! they produce actions and never touch formatter state.
//!
//! | Meta | Command |
//! |------|---------|
//! | `.` `!` `?` | stop, capitalizes the next word |
//! | `,` `:` `;` | comma-like punctuation |
//! | `-|` `>` `<` | capitalize / lowercase / uppercase the next word |
//! | `*-|` `*>` `*<` | the same, applied to the previous word |
//! | `*(fmt)` | retrospective currency, `c` in `fmt` is the number |
//! | `*!` `*?` | retrospective delete / insert space |
//! | `MODE:...` | persistent case and separator modes |
//! | `PLOVER:cmd` | engine command |
//! | `#combo` | key combination |
//! | `=pat/a/b`, `:if_next_matches:pat/a/b` | conditional on the next atom |
//! | `&text` | glue |
//! | `~|text` (optional `^`) | carry capitalization |
//! | `^text`, `text^` | attach |
//!
//! Anything else is not a meta-command and renders as literal text.

mod attach;
mod case;
mod command;
mod conditional;
mod currency;
mod glue;
mod mode;
mod punctuation;
mod retro;

use thiserror::Error;

use super::action::{ActionSlot, Case};
use super::context::Context;

const META_ATTACH_FLAG: char = '^';
const META_CARRY_CAPITALIZATION: &str = "~|";
const META_GLUE_FLAG: char = '&';
const META_KEY_COMBINATION: char = '#';
const META_COMMAND: &str = "PLOVER:";
const META_MODE: &str = "MODE:";
const META_IF_NEXT_MATCHES: &str = ":if_next_matches:";
const META_IF_NEXT_SHORT: char = '=';

// ---------------------------------------------------------------------------
// MetaError
// ---------------------------------------------------------------------------

/// A meta-command that was recognised but could not be applied.
///
/// Never fatal: the resolver renders the atom as literal text instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetaError {
    #[error("{0:?} is not a valid mode")]
    UnknownMode(String),

    #[error("conditional {0:?} needs a pattern and two alternatives")]
    MalformedConditional(String),

    #[error("invalid conditional pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// ---------------------------------------------------------------------------
// MetaCommand
// ---------------------------------------------------------------------------

/// Every built-in meta-command, borrowing its argument from the atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand<'a> {
    Stop(&'a str),
    Comma(&'a str),
    CapitalizeNext,
    LowerNext,
    UpperNext,
    RetroCase(Case),
    RetroCurrency(&'a str),
    RetroDeleteSpace,
    RetroInsertSpace,
    Mode(&'a str),
    EngineCommand(&'a str),
    KeyCombo(&'a str),
    IfNextMatches(&'a str),
    Glue(&'a str),
    CarryCapitalize(&'a str),
    Attach(&'a str),
}

impl<'a> MetaCommand<'a> {
    /// Look up the command for an (unescaped) meta text.
    pub fn parse(meta: &'a str) -> Option<Self> {
        let command = match meta {
            "." | "!" | "?" => MetaCommand::Stop(meta),
            "," | ":" | ";" => MetaCommand::Comma(meta),
            "-|" => MetaCommand::CapitalizeNext,
            ">" => MetaCommand::LowerNext,
            "<" => MetaCommand::UpperNext,
            "*-|" => MetaCommand::RetroCase(Case::CapFirstWord),
            "*>" => MetaCommand::RetroCase(Case::LowerFirstChar),
            "*<" => MetaCommand::RetroCase(Case::Upper),
            "*!" => MetaCommand::RetroDeleteSpace,
            "*?" => MetaCommand::RetroInsertSpace,
            _ => return Self::parse_prefixed(meta),
        };
        Some(command)
    }

    fn parse_prefixed(meta: &'a str) -> Option<Self> {
        if let Some(format) = meta
            .strip_prefix("*(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Some(MetaCommand::RetroCurrency(format));
        }
        if let Some(mode) = strip_prefix_ignore_case(meta, META_MODE) {
            return Some(MetaCommand::Mode(mode));
        }
        if let Some(command) = strip_prefix_ignore_case(meta, META_COMMAND) {
            return Some(MetaCommand::EngineCommand(command));
        }
        if let Some(combo) = meta.strip_prefix(META_KEY_COMBINATION) {
            return Some(MetaCommand::KeyCombo(combo));
        }
        if let Some(args) = meta
            .strip_prefix(META_IF_NEXT_MATCHES)
            .or_else(|| meta.strip_prefix(META_IF_NEXT_SHORT))
        {
            return Some(MetaCommand::IfNextMatches(args));
        }
        if let Some(text) = meta.strip_prefix(META_GLUE_FLAG) {
            return Some(MetaCommand::Glue(text));
        }
        let unattached = meta.strip_prefix(META_ATTACH_FLAG).unwrap_or(meta);
        if unattached.starts_with(META_CARRY_CAPITALIZATION) {
            return Some(MetaCommand::CarryCapitalize(meta));
        }
        if meta.starts_with(META_ATTACH_FLAG) || meta.ends_with(META_ATTACH_FLAG) {
            return Some(MetaCommand::Attach(meta));
        }
        None
    }

    /// Run the handler for this command.
    pub fn apply(self, ctx: &Context<'_>) -> Result<ActionSlot, MetaError> {
        let action = match self {
            MetaCommand::Stop(text) => punctuation::stop(ctx, text),
            MetaCommand::Comma(text) => punctuation::comma(ctx, text),
            MetaCommand::CapitalizeNext => case::capitalize_next(ctx),
            MetaCommand::LowerNext => case::lower_next(ctx),
            MetaCommand::UpperNext => case::upper_next(ctx),
            MetaCommand::RetroCase(case) => case::retro_case(ctx, case),
            MetaCommand::RetroCurrency(format) => currency::retro_currency(ctx, format),
            MetaCommand::RetroDeleteSpace => retro::delete_space(ctx),
            MetaCommand::RetroInsertSpace => retro::insert_space(ctx),
            MetaCommand::Mode(mode) => mode::mode(ctx, mode)?,
            MetaCommand::EngineCommand(name) => command::engine_command(ctx, name),
            MetaCommand::KeyCombo(combo) => command::key_combo(ctx, combo),
            MetaCommand::IfNextMatches(args) => {
                return conditional::if_next_matches(ctx, args).map(ActionSlot::Pending);
            }
            MetaCommand::Glue(text) => glue::glue(ctx, text),
            MetaCommand::CarryCapitalize(meta) => attach::carry_capitalize(ctx, meta),
            MetaCommand::Attach(meta) => attach::attach(ctx, meta),
        };
        Ok(ActionSlot::Resolved(action))
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
