//! Translations: strokes mapped to an optional english string.

use crate::format::ActionSlot;

use super::stroke::Stroke;

const STROKE_DELIMITER: &str = "/";

/// A dictionary match, as handed to the formatter.
///
/// `formatting` is the formatter's memo of the action slots this
/// translation resolved to.  It is ignored by equality.
#[derive(Debug, Clone)]
pub struct Translation {
    pub strokes: Vec<Stroke>,
    pub english: Option<String>,
    pub is_correction: bool,
    pub formatting: Option<Vec<ActionSlot>>,
}

impl Translation {
    pub fn new(strokes: Vec<Stroke>, english: Option<String>) -> Self {
        let is_correction = strokes.iter().any(Stroke::is_correction);
        Self {
            strokes,
            english,
            is_correction,
            formatting: None,
        }
    }

    /// Build from RTF/CRE strokes, e.g. `Translation::from_steno(&["TEFT"], Some("test"))`.
    pub fn from_steno(strokes: &[&str], english: Option<&str>) -> Self {
        Self::new(
            strokes.iter().map(|s| Stroke::from_steno(s)).collect(),
            english.map(str::to_string),
        )
    }

    /// Attach a precomputed memo.
    pub fn with_formatting(mut self, formatting: Vec<ActionSlot>) -> Self {
        self.formatting = Some(formatting);
        self
    }

    /// Strokes joined with `/`.
    pub fn rtfcre(&self) -> String {
        self.strokes
            .iter()
            .map(Stroke::rtfcre)
            .collect::<Vec<_>>()
            .join(STROKE_DELIMITER)
    }
}

impl PartialEq for Translation {
    fn eq(&self, other: &Self) -> bool {
        self.strokes == other.strokes && self.english == other.english
    }
}

impl Eq for Translation {}
