//! Navigation palette projection.
//!
//! The palette is a read-only view derived from the answer state and the
//! current-question pointer: it holds no state of its own, is recomputed
//! on every read, and never drives a transition.

use serde::Serialize;

/// Display status of one question cell in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// The question the user is currently on. Takes precedence over
    /// `Answered` at the pointer position.
    Current,
    /// An answer is stored for this question.
    Answered,
    /// No answer stored.
    Unanswered,
}

/// Project per-question statuses for `question_count` questions.
///
/// `is_answered` reports whether a question has a stored answer;
/// `current` is the pointer position, or `None` once the attempt has
/// left `InProgress`.
pub fn palette<F>(question_count: usize, is_answered: F, current: Option<usize>) -> Vec<QuestionStatus>
where
    F: Fn(usize) -> bool,
{
    (0..question_count)
        .map(|index| {
            if current == Some(index) {
                QuestionStatus::Current
            } else if is_answered(index) {
                QuestionStatus::Answered
            } else {
                QuestionStatus::Unanswered
            }
        })
        .collect()
}
