//! Engine error types.
//!
//! Every error here is local, synchronous, and recoverable by the caller:
//! the engine surfaces a typed failure and leaves its state unchanged.
//! The double-submit race is deliberately *not* represented; a second
//! `submit()` is a benign no-op, not a failure.

use thiserror::Error;

/// Errors surfaced by attempt-lifecycle operations.
#[derive(Debug, Error)]
pub enum AttemptError {
    /// A mutating operation was called outside its valid state, e.g.
    /// `begin()` twice or `answer()` after submission.
    #[error("cannot {action} while attempt is {state}")]
    InvalidStateTransition {
        action: &'static str,
        state: &'static str,
    },

    /// A question index outside `[0, question_count)`.
    #[error("question index {index} out of range ({count} questions)")]
    InvalidQuestionIndex { index: usize, count: usize },

    /// An option index outside the question's option list.
    #[error("option index {index} out of range for question {question} ({count} options)")]
    InvalidOptionIndex {
        question: usize,
        index: usize,
        count: usize,
    },

    /// `Clock::start` was called on a clock that is already running.
    #[error("clock is already running")]
    ClockAlreadyRunning,
}

/// Violations of the test-definition invariants, caught at load time.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// A test must have at least one question.
    #[error("test definition has no questions")]
    NoQuestions,

    /// Duration must be a positive number of seconds.
    #[error("test duration must be greater than zero")]
    ZeroDuration,

    /// Every question needs at least two options.
    #[error("question {question} has {count} options, need at least 2")]
    TooFewOptions { question: usize, count: usize },

    /// The correct-answer index must land inside the option list.
    #[error("question {question}: correct option {index} out of range ({count} options)")]
    CorrectOptionOutOfRange {
        question: usize,
        index: usize,
        count: usize,
    },

    /// Marks default to 1 and may never be zero.
    #[error("question {question} has zero marks")]
    ZeroMarks { question: usize },

    /// The payload was not a valid definition document.
    #[error("failed to decode test definition: {0}")]
    Decode(String),
}
