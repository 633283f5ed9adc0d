//! Deterministic attempt scoring.
//!
//! `score` is a pure function from (definition, answer snapshot) to an
//! [`AttemptResult`]: no side effects, no clock, no randomness. Calling
//! it twice with the same inputs yields identical results, which is what
//! makes attempts replayable for audits.

use crate::answers::AnswerSnapshot;
use crate::model::TestDefinition;
use crate::results::AttemptResult;

/// Pass threshold applied when a definition carries no `passing_marks`.
pub const DEFAULT_PASS_PERCENT: u32 = 40;

/// Tunable scoring defaults.
///
/// The portal's historical behavior (pass at 40% when no absolute marks
/// threshold is configured) is kept as a policy value rather than a
/// literal inside the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Percentage needed to pass when `passing_marks` is absent.
    pub pass_percent: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            pass_percent: DEFAULT_PASS_PERCENT,
        }
    }
}

/// Score an attempt under the default policy.
pub fn score(definition: &TestDefinition, answers: &AnswerSnapshot) -> AttemptResult {
    score_with_policy(definition, answers, ScoringPolicy::default())
}

/// Score an attempt.
///
/// Per question: no stored answer counts as unanswered; a stored answer
/// equal to the correct index adds the question's marks; anything else is
/// wrong with no penalty. `passed` compares obtained marks against
/// `passing_marks` when the definition sets one, and against the policy's
/// percentage threshold otherwise.
pub fn score_with_policy(
    definition: &TestDefinition,
    answers: &AnswerSnapshot,
    policy: ScoringPolicy,
) -> AttemptResult {
    let mut correct_count = 0usize;
    let mut wrong_count = 0usize;
    let mut unanswered_count = 0usize;
    let mut total_marks = 0u32;
    let mut obtained_marks = 0u32;

    for (index, question) in definition.questions.iter().enumerate() {
        total_marks += question.marks;
        match answers.get(index) {
            None => unanswered_count += 1,
            Some(selected) if selected == question.correct_option_index => {
                correct_count += 1;
                obtained_marks += question.marks;
            }
            Some(_) => wrong_count += 1,
        }
    }

    let percentage = if total_marks == 0 {
        0
    } else {
        (f64::from(obtained_marks) / f64::from(total_marks) * 100.0).round() as u32
    };

    let passed = match definition.passing_marks {
        Some(threshold) => obtained_marks >= threshold,
        None => percentage >= policy.pass_percent,
    };

    AttemptResult {
        correct_count,
        wrong_count,
        unanswered_count,
        total_marks,
        obtained_marks,
        percentage,
        passed,
    }
}
