//! Suffix orthography: an ordered `(pattern, replacement)` rewrite table.
//!
//! Each rule is matched against the synthetic string `"<word> ^ <suffix>"`.
//! The first rule that matches wins and its replacement (regex-crate
//! syntax, `${1}` for capture groups) becomes the new word.  When no rule
//! matches the word and suffix are simply concatenated.
//!
//! | Table | Source |
//! |-------|--------|
//! | English | [`Orthography::english`] |
//! | Spanish | [`Orthography::spanish`] |
//! | Custom  | [`Orthography::new`] (e.g. from `settings.toml`) |
//!
//! Matching is case-insensitive; captured text keeps its original case, so
//! `Equip + ed` yields `Equipped`.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

// ---------------------------------------------------------------------------
// OrthographyError
// ---------------------------------------------------------------------------

/// Errors raised while building a rule table.
#[derive(Debug, Error)]
pub enum OrthographyError {
    /// A rule pattern failed to compile.
    #[error("invalid orthography pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

// ---------------------------------------------------------------------------
// Rule tables
// ---------------------------------------------------------------------------

const ENGLISH_RULES: &[(&str, &str)] = &[
    // +ly
    (r"^(.*[aeiou]c) \^ ly$", "${1}ally"),
    (r"^(.+[aeioubmnp])le \^ ly$", "${1}ly"),
    // +ry
    (r"^(.*t)e \^ (ry|ary)$", "${1}ory"),
    (r"^(.+)m \^ tor(y|ily)$", "${1}mator${2}"),
    (r"^(.+)se \^ ar(y|ies)$", "${1}sor${2}"),
    // +cy
    (r"^(.*[naeiou])te? \^ cy$", "${1}cy"),
    // +s: sibilants
    (r"^(.*(?:s|sh|x|z|zh)) \^ s$", "${1}es"),
    // +s: soft ch, but not monarch / oligarch / patriarch
    (
        r"^(.*(?:oa|ea|i|ee|oo|au|ou|l|n|t|(?:^|[^a])r|(?:^|[^gin])ar)ch) \^ s$",
        "${1}es",
    ),
    // +s: consonant + y
    (r"^(.+[bcdfghjklmnpqrstvwxz])y \^ s$", "${1}ies"),
    // y
    (r"^(.+)ie \^ ing$", "${1}ying"),
    (r"^(.+[cdfghlmnpr])y \^ ist$", "${1}ist"),
    (r"^(.+[bcdfghjklmnpqrstvwxz])y \^ ([a-hj-xz].*)$", "${1}i${2}"),
    // +en
    (r"^(.+)te \^ en$", "${1}tten"),
    (r"^(.+[ae]) \^ e(n|ns)$", "${1}${2}"),
    // +ial
    (r"^(.+)y \^ (ial|ially)$", "${1}${2}"),
    // +if
    (r"^(.+)i \^ if(y|ying|ied|ies|ication|ications)$", "${1}if${2}"),
    // +ical
    (r"^(.+)ic \^ (ical|ically)$", "${1}${2}"),
    (r"^(.+)ology \^ ic(al|ally)$", "${1}ologic${2}"),
    (r"^(.*)ry \^ ica(l|lly|lity)$", "${1}rica${2}"),
    // +ist
    (r"^(.*[l]) \^ is(t|ts)$", "${1}is${2}"),
    // +ity
    (r"^(.*)ry \^ ity$", "${1}rity"),
    (r"^(.*)l \^ ity$", "${1}lity"),
    // +ive
    (r"^(.+)rm \^ tiv(e|ity|ities)$", "${1}rmativ${2}"),
    (r"^(.+)e \^ tiv(e|ity|ities)$", "${1}ativ${2}"),
    // +ize / +ise
    (
        r"^(.+)y \^ iz(e|es|ing|ed|er|ers|ation|ations|able|ability)$",
        "${1}iz${2}",
    ),
    (
        r"^(.+)y \^ is(e|es|ing|ed|er|ers|ation|ations|able|ability)$",
        "${1}is${2}",
    ),
    (
        r"^(.+)al \^ iz(e|ed|es|ing|er|ers|ation|ations|m|ms|able|ability|abilities)$",
        "${1}aliz${2}",
    ),
    (
        r"^(.+)al \^ is(e|ed|es|ing|er|ers|ation|ations|m|ms|able|ability|abilities)$",
        "${1}alis${2}",
    ),
    (
        r"^(.+)ar \^ iz(e|ed|es|ing|er|ers|ation|ations|m|ms)$",
        "${1}ariz${2}",
    ),
    (
        r"^(.+)ar \^ is(e|ed|es|ing|er|ers|ation|ations|m|ms)$",
        "${1}aris${2}",
    ),
    (
        r"^(.*[lmnty]) \^ iz(e|es|ing|ed|er|ers|ation|ations|m|ms|able|ability|abilities)$",
        "${1}iz${2}",
    ),
    (
        r"^(.*[lmnty]) \^ is(e|es|ing|ed|er|ers|ation|ations|m|ms|able|ability|abilities)$",
        "${1}is${2}",
    ),
    // +olog
    (r"^(.+)al \^ olog(y|ist|ists|ical|ically)$", "${1}olog${2}"),
    // +ish
    (r"^(.+)(ar|er|or) \^ ish$", "${1}${2}ish"),
    // double e
    (r"^(.+e)e \^ (e.+)$", "${1}${2}"),
    // silent e before a vowel
    (r"^(.+[bcdfghjklmnpqrstuvwxz])e \^ ([aeiouy].*)$", "${1}${2}"),
    // consonant doubling (stress on the last syllable is assumed)
    (
        r"^(.*(?:[bcdfghjklmnprstvwxyz]|qu)[aeiou])([bcdfgklmnprtvz]) \^ ([aeiouy].*)$",
        "${1}${2}${2}${3}",
    ),
];

const SPANISH_RULES: &[(&str, &str)] = &[
    // gerund + enclitic pronoun takes an accent
    (r"^(.+)ando \^ (le|me|te|la|lo|se)$", "${1}ándo${2}"),
    (r"^(.+)iendo \^ (le|me|te|la|lo|se)$", "${1}iéndo${2}"),
    // +s
    (r"^(.*(?:s|sh|x|z|zh)) \^ s$", "${1}es"),
    (
        r"^(.*(?:oa|ea|i|ee|oo|au|ou|l|n|t|(?:^|[^a])r|(?:^|[^gin])ar)ch) \^ s$",
        "${1}es",
    ),
    (r"^(.+[bcdfghjklmnpqrstvwxz])y \^ s$", "${1}ies"),
    // y
    (r"^(.+)ie \^ ing$", "${1}ying"),
    (r"^(.+[cdfghlmnpr])y \^ ist$", "${1}ist"),
    (r"^(.+[bcdfghjklmnpqrstvwxz])y \^ ([a-hj-xz].*)$", "${1}i${2}"),
    // +ial
    (r"^(.+)y \^ (ial|ially)$", "${1}${2}"),
    (r"^(.+)tor \^ (ial|ials|ially|iality|ialities)$", "${1}tor${2}"),
    // +olog
    (r"^(.+)al \^ olog(y|ist|ists|ical|ically)$", "${1}olog${2}"),
    (r"^(.+)ology \^ (ist|ists)$", "${1}olog${2}"),
    // double e
    (r"^(.+e)e \^ (e.+)$", "${1}${2}"),
    // silent e before a vowel
    (r"^(.+[bcdfghjklmnpqrstuvwxz])e \^ ([aeiouy].*)$", "${1}${2}"),
    // consonant doubling
    (
        r"^(.*(?:[bcdfghjklmnprstvwxyz]|qu)[aeiou])([bcdfgklmnprtvz]) \^ ([aeiouy].*)$",
        "${1}${2}${2}${3}",
    ),
];

// ---------------------------------------------------------------------------
// OrthographyRule
// ---------------------------------------------------------------------------

/// One compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct OrthographyRule {
    pattern: Regex,
    replacement: String,
}

impl OrthographyRule {
    /// Compile a rule.  Patterns are always matched case-insensitively.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, OrthographyError> {
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| OrthographyError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    /// The source pattern of this rule.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    fn apply(&self, candidate: &str) -> Option<String> {
        let caps = self.pattern.captures(candidate)?;
        let mut out = String::new();
        caps.expand(&self.replacement, &mut out);
        Some(out)
    }
}

// ---------------------------------------------------------------------------
// Orthography
// ---------------------------------------------------------------------------

/// An ordered, injectable suffix rule table.
#[derive(Debug, Clone, Default)]
pub struct Orthography {
    rules: Vec<OrthographyRule>,
}

impl Orthography {
    /// Build a table from `(pattern, replacement)` pairs, in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`OrthographyError::InvalidPattern`] for the first pattern
    /// that does not compile.
    pub fn new<'a, I>(rules: I) -> Result<Self, OrthographyError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = rules
            .into_iter()
            .map(|(p, r)| OrthographyRule::new(p, r))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// A table with no rules: every suffix is plainly appended.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English table.
    pub fn english() -> Self {
        Self::from_builtin("english", ENGLISH_RULES)
    }

    /// The built-in Spanish table.
    pub fn spanish() -> Self {
        Self::from_builtin("spanish", SPANISH_RULES)
    }

    fn from_builtin(name: &str, table: &[(&str, &str)]) -> Self {
        let mut rules = Vec::with_capacity(table.len());
        for (pattern, replacement) in table {
            match OrthographyRule::new(pattern, replacement) {
                Ok(rule) => rules.push(rule),
                Err(e) => log::warn!("skipping {name} orthography rule: {e}"),
            }
        }
        Self { rules }
    }

    /// Put `other`'s rules ahead of this table's rules.
    pub fn prepend(mut self, other: Orthography) -> Self {
        let mut rules = other.rules;
        rules.append(&mut self.rules);
        self.rules = rules;
        self
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` when the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Join `word` and `suffix`, applying the first matching rule.
    ///
    /// ```
    /// use steno_format::format::Orthography;
    ///
    /// let ortho = Orthography::english();
    /// assert_eq!(ortho.add_suffix("equip", "ed"), "equipped");
    /// assert_eq!(ortho.add_suffix("cherry", "s"), "cherries");
    /// assert_eq!(ortho.add_suffix("parade", "ing"), "parading");
    /// ```
    pub fn add_suffix(&self, word: &str, suffix: &str) -> String {
        let candidate = format!("{word} ^ {suffix}");
        self.rules
            .iter()
            .find_map(|rule| rule.apply(&candidate))
            .unwrap_or_else(|| format!("{word}{suffix}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
