//! Per-question answer capture.
//!
//! `AnswerStore` maps question index → selected option index. Absence of
//! a key means "unanswered"; setting overwrites; clearing is no-op safe.
//! The store is backed by a `BTreeMap` so iteration order, and with it
//! the serialized form of a snapshot, is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mutable answer state for an in-progress attempt.
///
/// Bounds checking lives in the attempt state machine, which holds the
/// definition; the store itself only records indices.
#[derive(Debug, Clone, Default)]
pub struct AnswerStore {
    selected: BTreeMap<usize, usize>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the selected option for a question.
    pub fn set(&mut self, question: usize, option: usize) {
        self.selected.insert(question, option);
    }

    /// Remove the answer for a question. No-op if none was set.
    pub fn clear(&mut self, question: usize) {
        self.selected.remove(&question);
    }

    /// The stored option index, or `None` when unanswered.
    pub fn get(&self, question: usize) -> Option<usize> {
        self.selected.get(&question).copied()
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.selected.contains_key(&question)
    }

    /// Number of distinct questions with a stored answer. Used for
    /// progress display and the palette; scoring re-derives everything
    /// from the snapshot instead.
    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    /// Freeze the current answers into an immutable copy for scoring.
    pub fn snapshot(&self) -> AnswerSnapshot {
        AnswerSnapshot {
            selected: self.selected.clone(),
        }
    }
}

/// An immutable copy of the answer store, taken at submission time.
///
/// This is what the scorer consumes and what the submission payload
/// carries as its `answers` field; once taken, later store mutation (of
/// which there is none after submission anyway) cannot leak into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSnapshot {
    selected: BTreeMap<usize, usize>,
}

impl AnswerSnapshot {
    /// The selected option for a question, or `None` when unanswered.
    pub fn get(&self, question: usize) -> Option<usize> {
        self.selected.get(&question).copied()
    }

    pub fn is_answered(&self, question: usize) -> bool {
        self.selected.contains_key(&question)
    }

    /// Number of answered questions.
    pub fn answered_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate `(question, selected option)` pairs in question order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.selected.iter().map(|(&q, &o)| (q, o))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_by_default() {
        let store = AnswerStore::new();
        assert_eq!(store.get(0), None);
        assert_eq!(store.answered_count(), 0);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn set_overwrites_prior_answer() {
        let mut store = AnswerStore::new();
        store.set(2, 1);
        store.set(2, 3);
        assert_eq!(store.get(2), Some(3));
        assert_eq!(store.answered_count(), 1);
    }

    #[test]
    fn clear_is_noop_safe() {
        let mut store = AnswerStore::new();
        store.clear(5);
        store.set(5, 0);
        store.clear(5);
        store.clear(5);
        assert_eq!(store.get(5), None);
        assert_eq!(store.answered_count(), 0);
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = AnswerStore::new();
        store.set(0, 1);
        let snapshot = store.snapshot();

        store.set(0, 0);
        store.set(1, 2);

        assert_eq!(snapshot.get(0), Some(1));
        assert_eq!(snapshot.get(1), None);
        assert_eq!(snapshot.answered_count(), 1);
    }

    #[test]
    fn snapshot_serializes_as_a_plain_map() {
        let mut store = AnswerStore::new();
        store.set(0, 2);
        store.set(3, 1);
        let json = serde_json::to_string(&store.snapshot()).unwrap();
        assert_eq!(json, r#"{"0":2,"3":1}"#);

        let back: AnswerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store.snapshot());
    }

    #[test]
    fn iteration_is_in_question_order() {
        let mut store = AnswerStore::new();
        store.set(7, 0);
        store.set(1, 1);
        store.set(4, 2);
        let order: Vec<usize> = store.snapshot().iter().map(|(q, _)| q).collect();
        assert_eq!(order, vec![1, 4, 7]);
    }
}
