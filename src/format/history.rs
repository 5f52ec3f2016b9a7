//! Bounded history of formatted translations.
//!
//! Entries keep the translation (with its action memo filled in) and the
//! literal text of its first atom, which is what a pending lookahead on the
//! entry before it needs to pick a branch.

use std::collections::VecDeque;

use crate::steno::Translation;

use super::action::ActionSlot;

/// One formatted translation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub translation: Translation,
    pub first_literal: String,
}

impl HistoryEntry {
    pub fn new(translation: Translation, slots: Vec<ActionSlot>, first_literal: String) -> Self {
        Self {
            translation: translation.with_formatting(slots),
            first_literal,
        }
    }

    /// The memoized action slots.
    pub fn slots(&self) -> &[ActionSlot] {
        self.translation.formatting.as_deref().unwrap_or(&[])
    }
}

/// Most recent translations, oldest first.
#[derive(Debug, Clone)]
pub struct TranslationHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl TranslationHistory {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append `entry`; returns the entry pushed out of the front, if any.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front()
        } else {
            None
        }
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn front(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Whether the newest entries are exactly `tail`, compared without memos.
    pub fn ends_with(&self, tail: &[Translation]) -> bool {
        if tail.len() > self.entries.len() {
            return false;
        }
        let skip = self.entries.len() - tail.len();
        self.entries
            .iter()
            .skip(skip)
            .zip(tail)
            .all(|(entry, t)| entry.translation == *t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(english: &str) -> HistoryEntry {
        HistoryEntry::new(
            Translation::from_steno(&["S"], Some(english)),
            Vec::new(),
            english.to_string(),
        )
    }

    fn t(english: &str) -> Translation {
        Translation::from_steno(&["S"], Some(english))
    }

    #[test]
    fn push_evicts_oldest() {
        let mut history = TranslationHistory::new(2);
        assert!(history.push(entry("a")).is_none());
        assert!(history.push(entry("b")).is_none());
        let evicted = history.push(entry("c")).expect("evicted");
        assert_eq!(evicted.first_literal, "a");
        assert_eq!(history.len(), 2);
        assert_eq!(history.front().map(|e| e.first_literal.as_str()), Some("b"));
    }

    #[test]
    fn ends_with_compares_tail() {
        let mut history = TranslationHistory::new(10);
        history.push(entry("a"));
        history.push(entry("b"));
        assert!(history.ends_with(&[]));
        assert!(history.ends_with(&[t("b")]));
        assert!(history.ends_with(&[t("a"), t("b")]));
        assert!(!history.ends_with(&[t("a")]));
        assert!(!history.ends_with(&[t("x"), t("a"), t("b")]));
    }

    #[test]
    fn zero_capacity_keeps_one() {
        let mut history = TranslationHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.push(entry("a"));
        assert!(history.push(entry("b")).is_some());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn entry_exposes_memo() {
        let e = entry("a");
        assert!(e.slots().is_empty());
        assert!(e.translation.formatting.is_some());
    }
}
