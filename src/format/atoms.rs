//! Atom splitting and the small text transforms shared by the resolver.
//!
//! An english string is split into *atoms*: meta atoms (`{...}`) and runs of
//! plain text.  `\{` and `\}` are literal braces in either kind of atom; an
//! unescaped brace that does not open or close a meta atom is dropped.
//!
//! ```
//! use steno_format::format::atoms::split_atoms;
//!
//! assert_eq!(split_atoms("{^}hello {.} world"), ["{^}", "hello ", "{.}", " world"]);
//! ```

use super::action::Case;

const META_START: char = '{';
const META_END: char = '}';
const META_ESC_START: &str = "\\{";
const META_ESC_END: &str = "\\}";

// ---------------------------------------------------------------------------
// Splitting
// ---------------------------------------------------------------------------

/// Split `english` into atoms, preserving whitespace.
pub fn split_atoms(english: &str) -> Vec<&str> {
    let mut atoms = Vec::new();
    let mut i = 0;
    while i < english.len() {
        let rest = &english[i..];
        if rest.starts_with(META_START) {
            match meta_len(rest) {
                Some(len) => {
                    atoms.push(&rest[..len]);
                    i += len;
                }
                // Stray `{`.
                None => i += META_START.len_utf8(),
            }
        } else if rest.starts_with(META_END) {
            i += META_END.len_utf8();
        } else {
            let len = text_len(rest);
            atoms.push(&rest[..len]);
            i += len;
        }
    }
    atoms
}

/// Length of the meta atom at the start of `s`, if it is well formed.
fn meta_len(s: &str) -> Option<usize> {
    let mut j = META_START.len_utf8();
    while j < s.len() {
        let rest = &s[j..];
        if rest.starts_with(META_ESC_START) || rest.starts_with(META_ESC_END) {
            j += 2;
            continue;
        }
        let c = rest.chars().next()?;
        if c == META_END {
            return Some(j + c.len_utf8());
        }
        if c == META_START {
            return None;
        }
        j += c.len_utf8();
    }
    None
}

/// Length of the plain-text run at the start of `s`.
fn text_len(s: &str) -> usize {
    let mut j = 0;
    while j < s.len() {
        let rest = &s[j..];
        if rest.starts_with(META_ESC_START) || rest.starts_with(META_ESC_END) {
            j += 2;
            continue;
        }
        match rest.chars().next() {
            Some(c) if c == META_START || c == META_END => break,
            Some(c) => j += c.len_utf8(),
            None => break,
        }
    }
    j
}

/// The meta text inside `{...}`, or `None` for a plain atom.
pub fn get_meta(atom: &str) -> Option<&str> {
    if atom.len() >= 2 && atom.starts_with(META_START) && atom.ends_with(META_END) {
        Some(&atom[1..atom.len() - 1])
    } else {
        None
    }
}

/// Replace escaped braces with literal ones.
pub fn unescape_atom(atom: &str) -> String {
    atom.replace(META_ESC_START, "{").replace(META_ESC_END, "}")
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// The last whitespace-delimited word of `text`.
pub fn rightmost_word(text: &str) -> &str {
    text.split_whitespace().last().unwrap_or("")
}

/// Uppercase the first character only.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character only.
pub fn lower_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first letter of every word and lowercase the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            out.push(c);
            at_word_start = true;
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Apply `case` to `text`.  Title case leaves `appended` text (text glued
/// onto the previous word) untouched.
pub fn apply_case(text: &str, case: Option<Case>, appended: bool) -> String {
    match case {
        None => text.to_string(),
        Some(Case::Upper) => text.to_uppercase(),
        Some(Case::Lower) => text.to_lowercase(),
        Some(Case::Title) if appended => text.to_string(),
        Some(Case::Title) => title_case(text),
        Some(Case::CapFirstWord) => capitalize_first(text),
        Some(Case::LowerFirstChar) => lower_first(text),
    }
}

/// Substitute the separator for every space in `text`.
pub fn apply_space_char(text: &str, space_char: &str) -> String {
    if space_char == super::action::SPACE {
        text.to_string()
    } else {
        text.replace(' ', space_char)
    }
}

/// Literal text an atom presents to a pending lookahead.
pub fn atom_literal(atom: &str) -> String {
    let atom = atom.trim();
    match get_meta(atom) {
        Some(meta) => unescape_atom(meta),
        None => unescape_atom(atom),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
