//! Core data model types for mockexam.
//!
//! A `TestDefinition` is the immutable input to an attempt: it is fetched
//! once from the portal, validated, and then only ever read. Question
//! order is significant; a question's index is its identity for the
//! duration of an attempt.

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;

/// A complete mock-test definition as served by the portal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    /// Unique identifier (slug or database id).
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Attempt duration in seconds.
    pub duration_seconds: u32,
    /// Absolute marks needed to pass. When absent, the percentage
    /// threshold from `ScoringPolicy` applies instead.
    #[serde(default)]
    pub passing_marks: Option<u32>,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Answer options, in presentation order. At least two.
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_option_index: usize,
    /// Marks awarded for a correct answer.
    #[serde(default = "default_marks")]
    pub marks: u32,
    /// Optional explanation shown on the review screen.
    #[serde(default)]
    pub explanation: Option<String>,
}

fn default_marks() -> u32 {
    1
}

impl TestDefinition {
    /// Check every definition invariant, returning the first violation.
    ///
    /// Invariants: at least one question, a positive duration, per
    /// question at least two options, a correct index that lands inside
    /// `options`, and marks of at least 1.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.questions.is_empty() {
            return Err(DefinitionError::NoQuestions);
        }
        if self.duration_seconds == 0 {
            return Err(DefinitionError::ZeroDuration);
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.len() < 2 {
                return Err(DefinitionError::TooFewOptions {
                    question: index,
                    count: question.options.len(),
                });
            }
            if question.correct_option_index >= question.options.len() {
                return Err(DefinitionError::CorrectOptionOutOfRange {
                    question: index,
                    index: question.correct_option_index,
                    count: question.options.len(),
                });
            }
            if question.marks == 0 {
                return Err(DefinitionError::ZeroMarks { question: index });
            }
        }
        Ok(())
    }

    /// Decode a definition from the portal's JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, DefinitionError> {
        let definition: TestDefinition =
            serde_json::from_str(json).map_err(|e| DefinitionError::Decode(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Sum of marks across all questions.
    pub fn total_marks(&self) -> u32 {
        self.questions.iter().map(|q| q.marks).sum()
    }

    /// Number of questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}
