//! Mock collaborators for testing without a portal.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mockexam_core::model::TestDefinition;
use mockexam_core::results::Submission;
use mockexam_core::traits::{SubmissionSink, TestSource};

/// A test source serving canned definitions from memory.
pub struct MockTestSource {
    /// Definitions keyed by slug.
    definitions: HashMap<String, TestDefinition>,
    /// Number of fetches made.
    call_count: AtomicU32,
}

impl MockTestSource {
    pub fn new(definitions: HashMap<String, TestDefinition>) -> Self {
        Self {
            definitions,
            call_count: AtomicU32::new(0),
        }
    }

    /// A source with a single definition, addressable by its own id.
    pub fn with_definition(definition: TestDefinition) -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(definition.id.clone(), definition);
        Self::new(definitions)
    }

    /// Get the number of fetches made against this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TestSource for MockTestSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_test(&self, slug: &str) -> anyhow::Result<TestDefinition> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.definitions
            .get(slug)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no mock definition for slug: {slug}"))
    }
}

/// A sink that records every submission it receives.
#[derive(Default)]
pub struct RecordingSink {
    submissions: Mutex<Vec<Submission>>,
    /// When set, `submit` fails with this message.
    failure: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose `submit` always fails, for delivery-failure tests.
    pub fn failing(message: &str) -> Self {
        Self {
            submissions: Mutex::new(Vec::new()),
            failure: Some(message.to_string()),
        }
    }

    /// Submissions received so far.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn submit(&self, submission: &Submission) -> anyhow::Result<()> {
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockexam_core::answers::AnswerStore;
    use mockexam_core::model::Question;
    use mockexam_core::results::AttemptResult;

    fn sample_definition() -> TestDefinition {
        TestDefinition {
            id: "sample".into(),
            title: "Sample".into(),
            duration_seconds: 60,
            passing_marks: None,
            questions: vec![Question {
                text: "q".into(),
                options: vec!["a".into(), "b".into()],
                correct_option_index: 0,
                marks: 1,
                explanation: None,
            }],
        }
    }

    #[tokio::test]
    async fn serves_definition_and_counts_calls() {
        let source = MockTestSource::with_definition(sample_definition());
        let definition = source.fetch_test("sample").await.unwrap();
        assert_eq!(definition.id, "sample");
        assert!(source.fetch_test("other").await.is_err());
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn records_submissions() {
        let sink = RecordingSink::new();
        let result = AttemptResult {
            correct_count: 1,
            wrong_count: 0,
            unanswered_count: 0,
            total_marks: 1,
            obtained_marks: 1,
            percentage: 100,
            passed: true,
        };
        let submission = Submission::new("sample", &result, AnswerStore::new().snapshot());

        sink.submit(&submission).await.unwrap();
        let seen = sink.submissions();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].test_id, "sample");
    }

    #[tokio::test]
    async fn failing_sink_fails() {
        let sink = RecordingSink::failing("portal down");
        let result = AttemptResult {
            correct_count: 0,
            wrong_count: 0,
            unanswered_count: 1,
            total_marks: 1,
            obtained_marks: 0,
            percentage: 0,
            passed: false,
        };
        let submission = Submission::new("sample", &result, AnswerStore::new().snapshot());

        let err = sink.submit(&submission).await.unwrap_err();
        assert!(err.to_string().contains("portal down"));
        assert!(sink.submissions().is_empty());
    }
}
