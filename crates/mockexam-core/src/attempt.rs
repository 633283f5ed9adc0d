//! Attempt state machine.
//!
//! `Attempt` orchestrates one user's run through a test definition:
//! `NotStarted` → `InProgress` → `Submitted`, with no transition out of
//! the terminal state. It owns the clock and the answer store, and it is
//! the only component allowed to invoke the scorer: exactly once per
//! attempt, whether submission comes from the user or from clock expiry.

use std::sync::Arc;

use crate::answers::{AnswerSnapshot, AnswerStore};
use crate::clock::{Clock, ClockEvent};
use crate::error::{AttemptError, DefinitionError};
use crate::model::TestDefinition;
use crate::palette::{palette, QuestionStatus};
use crate::results::{AttemptResult, Submission};
use crate::scoring::{score_with_policy, ScoringPolicy};

/// Read-only view of where an attempt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptPhase {
    NotStarted,
    InProgress,
    Submitted,
}

impl AttemptPhase {
    /// Lowercase label used in error messages and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            AttemptPhase::NotStarted => "not started",
            AttemptPhase::InProgress => "in progress",
            AttemptPhase::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for AttemptPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

enum AttemptState {
    NotStarted,
    InProgress {
        current: usize,
        clock: Clock,
        answers: AnswerStore,
    },
    Submitted {
        result: AttemptResult,
        snapshot: AnswerSnapshot,
    },
}

/// One user's run through a test definition.
pub struct Attempt {
    definition: Arc<TestDefinition>,
    policy: ScoringPolicy,
    state: AttemptState,
}

impl Attempt {
    /// Create an attempt over a validated definition.
    ///
    /// The definition is shared, not copied; the caller keeps its handle.
    pub fn new(definition: Arc<TestDefinition>) -> Result<Self, DefinitionError> {
        definition.validate()?;
        Ok(Self {
            definition,
            policy: ScoringPolicy::default(),
            state: AttemptState::NotStarted,
        })
    }

    /// Override the pass policy applied at scoring time.
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start the attempt: empty answers, pointer at question 0, clock
    /// running from the definition's duration.
    pub fn begin(&mut self) -> Result<(), AttemptError> {
        let phase = self.phase();
        if !matches!(self.state, AttemptState::NotStarted) {
            return Err(AttemptError::InvalidStateTransition {
                action: "begin",
                state: phase.label(),
            });
        }

        let mut clock = Clock::new();
        clock.start(self.definition.duration_seconds)?;
        tracing::debug!(
            test = %self.definition.id,
            duration_seconds = self.definition.duration_seconds,
            questions = self.definition.question_count(),
            "attempt started"
        );
        self.state = AttemptState::InProgress {
            current: 0,
            clock,
            answers: AnswerStore::new(),
        };
        Ok(())
    }

    /// Move the current-question pointer. Any direction, any distance.
    pub fn go_to(&mut self, index: usize) -> Result<(), AttemptError> {
        let phase = self.phase();
        let count = self.definition.question_count();
        let AttemptState::InProgress { current, .. } = &mut self.state else {
            return Err(AttemptError::InvalidStateTransition {
                action: "navigate",
                state: phase.label(),
            });
        };
        if index >= count {
            return Err(AttemptError::InvalidQuestionIndex { index, count });
        }
        *current = index;
        Ok(())
    }

    /// Record the selected option for a question. Overwrites any prior
    /// answer; repeating the same call is harmless.
    pub fn answer(&mut self, question: usize, option: usize) -> Result<(), AttemptError> {
        let phase = self.phase();
        let count = self.definition.question_count();
        let AttemptState::InProgress { answers, .. } = &mut self.state else {
            return Err(AttemptError::InvalidStateTransition {
                action: "answer",
                state: phase.label(),
            });
        };
        if question >= count {
            return Err(AttemptError::InvalidQuestionIndex {
                index: question,
                count,
            });
        }
        let option_count = self.definition.questions[question].options.len();
        if option >= option_count {
            return Err(AttemptError::InvalidOptionIndex {
                question,
                index: option,
                count: option_count,
            });
        }
        answers.set(question, option);
        tracing::debug!(question, option, "answer recorded");
        Ok(())
    }

    /// Remove the stored answer for a question. No-op if none is set.
    pub fn clear_answer(&mut self, question: usize) -> Result<(), AttemptError> {
        let phase = self.phase();
        let count = self.definition.question_count();
        let AttemptState::InProgress { answers, .. } = &mut self.state else {
            return Err(AttemptError::InvalidStateTransition {
                action: "clear answer",
                state: phase.label(),
            });
        };
        if question >= count {
            return Err(AttemptError::InvalidQuestionIndex {
                index: question,
                count,
            });
        }
        answers.clear(question);
        Ok(())
    }

    /// Advance the attempt clock by one second.
    ///
    /// On expiry this performs the one authoritative auto-submit and
    /// returns the result. Ticks arriving outside `InProgress` (a timer
    /// callback firing after manual submission) are silent no-ops: the
    /// clock was stopped at submission, so terminal state cannot be
    /// revived.
    pub fn tick(&mut self) -> Option<&AttemptResult> {
        let expired = match &mut self.state {
            AttemptState::InProgress { clock, .. } => {
                matches!(clock.tick(), Some(ClockEvent::Expired))
            }
            _ => false,
        };
        if !expired {
            return None;
        }
        tracing::info!(test = %self.definition.id, "time expired, auto-submitting");
        self.submit().ok()
    }

    /// Submit the attempt. The single gate to the terminal state.
    ///
    /// Idempotent under the logical race: if the user submits in the same
    /// processing window as clock expiry, the first call through scores
    /// the attempt and the second returns the already-computed result,
    /// with no second scoring pass and no error. Submitting before
    /// `begin()` is an `InvalidStateTransition`.
    pub fn submit(&mut self) -> Result<&AttemptResult, AttemptError> {
        if matches!(self.state, AttemptState::NotStarted) {
            return Err(AttemptError::InvalidStateTransition {
                action: "submit",
                state: AttemptPhase::NotStarted.label(),
            });
        }

        if let AttemptState::InProgress { clock, answers, .. } = &mut self.state {
            clock.stop();
            let snapshot = answers.snapshot();
            let result = score_with_policy(&self.definition, &snapshot, self.policy);
            tracing::info!(
                test = %self.definition.id,
                obtained = result.obtained_marks,
                total = result.total_marks,
                percentage = result.percentage,
                passed = result.passed,
                "attempt submitted"
            );
            self.state = AttemptState::Submitted { result, snapshot };
        }

        match &self.state {
            AttemptState::Submitted { result, .. } => Ok(result),
            _ => unreachable!("submit always lands in Submitted"),
        }
    }

    pub fn phase(&self) -> AttemptPhase {
        match self.state {
            AttemptState::NotStarted => AttemptPhase::NotStarted,
            AttemptState::InProgress { .. } => AttemptPhase::InProgress,
            AttemptState::Submitted { .. } => AttemptPhase::Submitted,
        }
    }

    pub fn definition(&self) -> &TestDefinition {
        &self.definition
    }

    /// The current-question pointer, while in progress.
    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            AttemptState::InProgress { current, .. } => Some(*current),
            _ => None,
        }
    }

    /// Seconds left on the clock, while in progress.
    pub fn remaining_seconds(&self) -> Option<u32> {
        match &self.state {
            AttemptState::InProgress { clock, .. } => Some(clock.remaining_seconds()),
            _ => None,
        }
    }

    /// The stored answer for a question, live or frozen.
    pub fn answer_for(&self, question: usize) -> Option<usize> {
        match &self.state {
            AttemptState::NotStarted => None,
            AttemptState::InProgress { answers, .. } => answers.get(question),
            AttemptState::Submitted { snapshot, .. } => snapshot.get(question),
        }
    }

    /// How many questions have a stored answer.
    pub fn answered_count(&self) -> usize {
        match &self.state {
            AttemptState::NotStarted => 0,
            AttemptState::InProgress { answers, .. } => answers.answered_count(),
            AttemptState::Submitted { snapshot, .. } => snapshot.answered_count(),
        }
    }

    /// The computed result, once submitted.
    pub fn result(&self) -> Option<&AttemptResult> {
        match &self.state {
            AttemptState::Submitted { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The frozen answers, once submitted.
    pub fn snapshot(&self) -> Option<&AnswerSnapshot> {
        match &self.state {
            AttemptState::Submitted { snapshot, .. } => Some(snapshot),
            _ => None,
        }
    }

    /// Per-question palette statuses, recomputed on every call.
    ///
    /// Empty before `begin()`; after submission the statuses derive from
    /// the frozen snapshot and no cell reports `Current`.
    pub fn palette(&self) -> Vec<QuestionStatus> {
        let count = self.definition.question_count();
        match &self.state {
            AttemptState::NotStarted => Vec::new(),
            AttemptState::InProgress {
                current, answers, ..
            } => palette(count, |i| answers.is_answered(i), Some(*current)),
            AttemptState::Submitted { snapshot, .. } => {
                palette(count, |i| snapshot.is_answered(i), None)
            }
        }
    }

    /// Build the portal submission record for a finished attempt.
    pub fn submission(&self) -> Option<Submission> {
        match &self.state {
            AttemptState::Submitted { result, snapshot } => Some(Submission::new(
                &self.definition.id,
                result,
                snapshot.clone(),
            )),
            _ => None,
        }
    }
}
