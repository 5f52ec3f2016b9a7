//! English stenotype strokes.
//!
//! Keys are written with a hyphen on the side of the keyboard they belong
//! to (`S-` on the left, `-S` on the right).  [`Stroke::from_keys`] sorts
//! and deduplicates them, applies the number bar and renders RTF/CRE:
//!
//! ```
//! use steno_format::steno::Stroke;
//!
//! assert_eq!(Stroke::from_keys(&["-T", "S-", "T-"]).unwrap().rtfcre(), "ST-T");
//! assert_eq!(Stroke::from_keys(&["#", "S-", "-T"]).unwrap().rtfcre(), "1-9");
//! ```

use std::fmt;

use thiserror::Error;

/// Every key in steno order.
pub const KEYS: [&str; 23] = [
    "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*", "-E", "-U", "-F", "-R", "-P",
    "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
];

const NUMBER_KEY: &str = "#";
const UNDO_STROKE: &str = "*";

/// Keys that become digits when the number bar is held.
const NUMBERS: [(&str, &str); 10] = [
    ("S-", "1-"),
    ("T-", "2-"),
    ("P-", "3-"),
    ("H-", "4-"),
    ("A-", "5-"),
    ("O-", "0-"),
    ("-F", "-6"),
    ("-P", "-7"),
    ("-L", "-8"),
    ("-T", "-9"),
];

/// Keys that separate the two banks, making an explicit hyphen redundant.
const IMPLICIT_HYPHEN_KEYS: [&str; 5] = ["A-", "O-", "5-", "0-", "*"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StrokeError {
    #[error("unknown steno key {0:?}")]
    UnknownKey(String),
}

/// One chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stroke {
    keys: Vec<String>,
    rtfcre: String,
    is_correction: bool,
}

impl Stroke {
    /// Build a stroke from unordered keys.
    pub fn from_keys<S: AsRef<str>>(keys: &[S]) -> Result<Self, StrokeError> {
        let mut ordered: Vec<(usize, &str)> = Vec::with_capacity(keys.len());
        for key in keys {
            let key = key.as_ref();
            let position = KEYS
                .iter()
                .position(|k| *k == key)
                .ok_or_else(|| StrokeError::UnknownKey(key.to_string()))?;
            ordered.push((position, KEYS[position]));
        }
        ordered.sort_unstable_by_key(|(position, _)| *position);
        ordered.dedup();

        let mut keys: Vec<&str> = ordered.into_iter().map(|(_, key)| key).collect();
        if keys.contains(&NUMBER_KEY) {
            let mut numeral = false;
            for key in keys.iter_mut() {
                if let Some((_, digit)) = NUMBERS.iter().find(|(k, _)| *k == *key) {
                    *key = *digit;
                    numeral = true;
                }
            }
            if numeral {
                keys.retain(|k| *k != NUMBER_KEY);
            }
        }

        let rtfcre = to_rtfcre(&keys);
        Ok(Self {
            is_correction: rtfcre == UNDO_STROKE,
            keys: keys.into_iter().map(str::to_string).collect(),
            rtfcre,
        })
    }

    /// Wrap an already normalised RTF/CRE string.
    pub fn from_steno(steno: &str) -> Self {
        Self {
            keys: Vec::new(),
            rtfcre: steno.to_string(),
            is_correction: steno == UNDO_STROKE,
        }
    }

    /// Ordered keys, empty when built with [`Stroke::from_steno`].
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn rtfcre(&self) -> &str {
        &self.rtfcre
    }

    /// `true` for the undo stroke.
    pub fn is_correction(&self) -> bool {
        self.is_correction
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rtfcre)
    }
}

fn to_rtfcre(keys: &[&str]) -> String {
    let mut out = String::new();
    let mut hyphen_found = false;
    for key in keys {
        if IMPLICIT_HYPHEN_KEYS.contains(key) || *key == "-E" || *key == "-U" {
            hyphen_found = true;
        }
        if let Some(left) = key.strip_suffix('-') {
            out.push_str(left);
        } else if let Some(right) = key.strip_prefix('-') {
            if !hyphen_found {
                out.push('-');
                hyphen_found = true;
            }
            out.push_str(right);
        } else {
            out.push_str(key);
        }
    }
    out
}
