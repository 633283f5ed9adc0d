//! Collaborator seams for fetching definitions and reporting attempts.
//!
//! The engine consumes a test definition and optionally hands a finished
//! submission to a persistence collaborator; it never fetches, stores,
//! retries, or guarantees delivery itself. These async traits are
//! implemented by the `mockexam-client` crate.

use async_trait::async_trait;

use crate::model::TestDefinition;
use crate::results::Submission;

/// Source of test definitions, looked up by slug or id.
#[async_trait]
pub trait TestSource: Send + Sync {
    /// Human-readable source name (e.g. "portal").
    fn name(&self) -> &str;

    /// Fetch and validate the definition for one test.
    async fn fetch_test(&self, slug: &str) -> anyhow::Result<TestDefinition>;
}

/// Destination for finished attempt records.
///
/// Delivery is fire-and-forget from the engine's point of view: a failed
/// submit is the caller's problem to log or queue, never the engine's.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Human-readable sink name.
    fn name(&self) -> &str;

    /// Report one submission.
    async fn submit(&self, submission: &Submission) -> anyhow::Result<()>;
}
