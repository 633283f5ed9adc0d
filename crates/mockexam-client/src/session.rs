//! Attempt session host.
//!
//! An attempt is a single logical timeline: the countdown tick and the
//! user's actions are both ordinary events dispatched onto one event
//! loop, so the auto-submit race is decided by event order, never by
//! parallel mutation. This module realizes that host as a tokio task
//! owning the `Attempt`, with a 1-second interval for the clock and an
//! mpsc channel for user commands, multiplexed through `select!`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mockexam_core::attempt::Attempt;
use mockexam_core::error::DefinitionError;
use mockexam_core::model::TestDefinition;
use mockexam_core::results::AttemptResult;
use mockexam_core::traits::SubmissionSink;

/// User actions dispatched onto the attempt timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Move the current-question pointer.
    GoTo(usize),
    /// Select an option for a question.
    Answer { question: usize, option: usize },
    /// Clear the stored answer for a question.
    ClearAnswer(usize),
    /// Submit the attempt now.
    Submit,
}

/// Handle to a running attempt session.
///
/// Dropping the handle's command side does not cancel the attempt; the
/// clock keeps running and expiry still auto-submits. `finish` resolves
/// once the attempt reaches its terminal state by either path.
pub struct AttemptSession {
    commands: mpsc::Sender<SessionCommand>,
    handle: JoinHandle<Result<AttemptResult>>,
}

impl AttemptSession {
    /// Validate the definition, start the attempt, and spawn its host
    /// task. The optional sink receives the submission record after the
    /// terminal state; delivery failure is logged, not retried.
    pub fn start(
        definition: TestDefinition,
        sink: Option<Arc<dyn SubmissionSink>>,
    ) -> Result<Self, DefinitionError> {
        let attempt = Attempt::new(Arc::new(definition))?;
        let (commands, receiver) = mpsc::channel(32);
        let handle = tokio::spawn(run_attempt(attempt, sink, receiver));
        Ok(Self { commands, handle })
    }

    /// Dispatch a command onto the attempt timeline.
    ///
    /// Commands arriving after the attempt has ended are dropped; the
    /// engine side already defends against stale calls, this just saves
    /// the round trip.
    pub async fn send(&self, command: SessionCommand) {
        if self.commands.send(command).await.is_err() {
            tracing::debug!(?command, "session already finished, command dropped");
        }
    }

    /// Wait for the attempt to reach its terminal state and return the
    /// result. Callers who want to end early send
    /// [`SessionCommand::Submit`] first.
    pub async fn finish(self) -> Result<AttemptResult> {
        drop(self.commands);
        self.handle.await.context("attempt session task failed")?
    }
}

async fn run_attempt(
    mut attempt: Attempt,
    sink: Option<Arc<dyn SubmissionSink>>,
    mut commands: mpsc::Receiver<SessionCommand>,
) -> Result<AttemptResult> {
    attempt.begin()?;

    // First tick one full period out; tokio intervals otherwise fire
    // immediately, which would shave a second off the attempt.
    let period = Duration::from_secs(1);
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    let mut commands_open = true;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if attempt.tick().is_some() {
                    break;
                }
            }
            command = commands.recv(), if commands_open => match command {
                Some(SessionCommand::GoTo(index)) => {
                    if let Err(e) = attempt.go_to(index) {
                        tracing::warn!(error = %e, "navigation rejected");
                    }
                }
                Some(SessionCommand::Answer { question, option }) => {
                    if let Err(e) = attempt.answer(question, option) {
                        tracing::warn!(error = %e, "answer rejected");
                    }
                }
                Some(SessionCommand::ClearAnswer(question)) => {
                    if let Err(e) = attempt.clear_answer(question) {
                        tracing::warn!(error = %e, "clear rejected");
                    }
                }
                Some(SessionCommand::Submit) => {
                    attempt.submit()?;
                    break;
                }
                // Command side hung up: no more user input, but the
                // attempt runs on until the clock expires.
                None => commands_open = false,
            }
        }
    }

    let result = attempt
        .result()
        .cloned()
        .context("attempt ended without a result")?;

    if let Some(sink) = sink {
        if let Some(submission) = attempt.submission() {
            if let Err(e) = sink.submit(&submission).await {
                tracing::warn!(error = %e, sink = sink.name(), "failed to report submission");
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingSink;
    use mockexam_core::model::Question;

    fn definition(duration_seconds: u32) -> TestDefinition {
        TestDefinition {
            id: "session-test".into(),
            title: "Session Test".into(),
            duration_seconds,
            passing_marks: None,
            questions: vec![
                Question {
                    text: "first".into(),
                    options: vec!["a".into(), "b".into()],
                    correct_option_index: 0,
                    marks: 1,
                    explanation: None,
                },
                Question {
                    text: "second".into(),
                    options: vec!["a".into(), "b".into()],
                    correct_option_index: 1,
                    marks: 1,
                    explanation: None,
                },
            ],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn user_submit_ends_the_session() {
        let sink = Arc::new(RecordingSink::new());
        let session = AttemptSession::start(definition(600), Some(sink.clone())).unwrap();

        session
            .send(SessionCommand::Answer {
                question: 0,
                option: 0,
            })
            .await;
        session
            .send(SessionCommand::Answer {
                question: 1,
                option: 1,
            })
            .await;
        session.send(SessionCommand::Submit).await;

        let result = session.finish().await.unwrap();
        assert_eq!(result.correct_count, 2);
        assert!(result.passed);

        let submissions = sink.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].test_id, "session-test");
        assert_eq!(submissions[0].obtained_marks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_auto_submits_without_user_action() {
        let sink = Arc::new(RecordingSink::new());
        let session = AttemptSession::start(definition(2), Some(sink.clone())).unwrap();

        session
            .send(SessionCommand::Answer {
                question: 0,
                option: 0,
            })
            .await;

        tokio::time::advance(Duration::from_secs(3)).await;

        let result = session.finish().await.unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.unanswered_count, 1);
        assert_eq!(sink.submissions().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_racing_expiry_reports_once() {
        let sink = Arc::new(RecordingSink::new());
        let session = AttemptSession::start(definition(1), Some(sink.clone())).unwrap();

        // Submit lands in the same processing window as the expiry tick.
        session.send(SessionCommand::Submit).await;
        tokio::time::advance(Duration::from_secs(2)).await;

        let result = session.finish().await.unwrap();
        assert_eq!(result.unanswered_count, 2);
        assert_eq!(sink.submissions().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_commands_do_not_kill_the_session() {
        let session = AttemptSession::start(definition(600), None).unwrap();

        session.send(SessionCommand::GoTo(99)).await;
        session
            .send(SessionCommand::Answer {
                question: 0,
                option: 9,
            })
            .await;
        session
            .send(SessionCommand::Answer {
                question: 1,
                option: 1,
            })
            .await;
        session.send(SessionCommand::Submit).await;

        let result = session.finish().await.unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.wrong_count, 0);
        assert_eq!(result.unanswered_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn delivery_failure_still_returns_the_result() {
        let sink = Arc::new(RecordingSink::failing("portal down"));
        let session = AttemptSession::start(definition(600), Some(sink.clone())).unwrap();

        session.send(SessionCommand::Submit).await;
        let result = session.finish().await.unwrap();
        assert_eq!(result.unanswered_count, 2);
        assert!(sink.submissions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_leaves_the_clock_running() {
        let sink = Arc::new(RecordingSink::new());
        let session = AttemptSession::start(definition(3), Some(sink.clone())).unwrap();

        // No commands at all: finish drops the command side and waits
        // for expiry to auto-submit.
        let result = session.finish().await.unwrap();
        assert_eq!(result.unanswered_count, 2);
        assert_eq!(sink.submissions().len(), 1);
    }
}
