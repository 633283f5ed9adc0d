//! Attempt results and the submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerSnapshot;

/// The outcome of a scored attempt.
///
/// Created exactly once, at the transition to `Submitted`, and immutable
/// afterward. Derives `Eq` so determinism ("same inputs, same result")
/// is directly assertable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    /// Questions answered with the correct option.
    pub correct_count: usize,
    /// Questions answered with a wrong option.
    pub wrong_count: usize,
    /// Questions with no stored answer.
    pub unanswered_count: usize,
    /// Sum of marks across all questions.
    pub total_marks: u32,
    /// Sum of marks for correctly-answered questions.
    pub obtained_marks: u32,
    /// `round(obtained / total × 100)`; 0 when `total` is 0.
    pub percentage: u32,
    /// Whether the attempt met the pass rule.
    pub passed: bool,
}

/// The attempt record reported to the portal after submission.
///
/// This is the body of the fire-and-forget POST; the engine itself never
/// retries or guarantees delivery. The id and timestamp are stamped here,
/// outside the scoring path, so scoring stays replayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Identifier for this attempt.
    pub attempt_id: Uuid,
    /// The test this attempt belongs to.
    pub test_id: String,
    pub obtained_marks: u32,
    pub percentage: u32,
    pub passed: bool,
    /// The frozen answers, keyed by question index.
    pub answers: AnswerSnapshot,
    /// When the attempt was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Build the submission record for a finished attempt.
    pub fn new(test_id: &str, result: &AttemptResult, answers: AnswerSnapshot) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            test_id: test_id.to_string(),
            obtained_marks: result.obtained_marks,
            percentage: result.percentage,
            passed: result.passed,
            answers,
            submitted_at: Utc::now(),
        }
    }
}
