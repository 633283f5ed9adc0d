//! Quick attempt example — minimal programmatic usage of mockexam.
//!
//! Runs a short mock test against an in-memory source, answers a couple
//! of questions, submits, and prints the scored result.
//!
//! ```bash
//! cargo run --example quick_attempt
//! ```

use std::sync::Arc;

use mockexam_client::mock::{MockTestSource, RecordingSink};
use mockexam_client::{AttemptSession, SessionCommand};
use mockexam_core::model::{Question, TestDefinition};
use mockexam_core::traits::TestSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let definition = TestDefinition {
        id: "rust-warmup".into(),
        title: "Rust Warmup".into(),
        duration_seconds: 120,
        passing_marks: None,
        questions: vec![
            Question {
                text: "Which keyword introduces an immutable binding?".into(),
                options: vec!["var".into(), "let".into(), "const fn".into()],
                correct_option_index: 1,
                marks: 1,
                explanation: Some("`let` binds; add `mut` for mutability.".into()),
            },
            Question {
                text: "What does `Option::None` represent?".into(),
                options: vec!["an error".into(), "absence of a value".into()],
                correct_option_index: 1,
                marks: 2,
                explanation: None,
            },
            Question {
                text: "Which trait powers `println!(\"{}\", x)`?".into(),
                options: vec!["Debug".into(), "Display".into()],
                correct_option_index: 1,
                marks: 1,
                explanation: None,
            },
        ],
    };

    // Fetch through the source seam, exactly as a portal client would.
    let source = MockTestSource::with_definition(definition);
    let definition = source.fetch_test("rust-warmup").await?;
    println!(
        "Loaded test: {} ({} questions, {} seconds)",
        definition.title,
        definition.question_count(),
        definition.duration_seconds
    );

    let sink = Arc::new(RecordingSink::new());
    let session = AttemptSession::start(definition, Some(sink.clone()))?;

    // Answer out of order, change one answer, skip the last question.
    session
        .send(SessionCommand::Answer {
            question: 1,
            option: 1,
        })
        .await;
    session.send(SessionCommand::GoTo(0)).await;
    session
        .send(SessionCommand::Answer {
            question: 0,
            option: 0,
        })
        .await;
    session
        .send(SessionCommand::Answer {
            question: 0,
            option: 1,
        })
        .await;
    session.send(SessionCommand::Submit).await;

    let result = session.finish().await?;
    println!("\nAttempt complete!");
    println!(
        "  Correct: {}  Wrong: {}  Unanswered: {}",
        result.correct_count, result.wrong_count, result.unanswered_count
    );
    println!(
        "  Marks: {}/{} ({}%) — {}",
        result.obtained_marks,
        result.total_marks,
        result.percentage,
        if result.passed { "passed" } else { "failed" }
    );

    for submission in sink.submissions() {
        println!("  Reported attempt {} to the sink", submission.attempt_id);
    }

    Ok(())
}
