//! Per-question review projection with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mockexam_core::answers::AnswerSnapshot;
use mockexam_core::model::TestDefinition;
use mockexam_core::results::AttemptResult;

/// How one question turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    Correct,
    Wrong,
    Unanswered,
}

/// Review detail for a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRow {
    /// Question index within the test.
    pub index: usize,
    /// The question text.
    pub text: String,
    /// All options, in presentation order.
    pub options: Vec<String>,
    /// The option the user selected, if any.
    pub selected_option: Option<usize>,
    /// The correct option.
    pub correct_option: usize,
    /// Marks this question was worth.
    pub marks: u32,
    /// Marks actually awarded (the full `marks` or 0).
    pub marks_awarded: u32,
    pub verdict: ReviewVerdict,
    /// Explanation from the definition, if the author provided one.
    pub explanation: Option<String>,
}

/// A complete review of one finished attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    /// The test this review belongs to.
    pub test_id: String,
    /// Test title, for display.
    pub title: String,
    /// When the review was generated.
    pub generated_at: DateTime<Utc>,
    /// The attempt's scored result.
    pub result: AttemptResult,
    /// One row per question, in question order.
    pub rows: Vec<ReviewRow>,
}

impl ReviewReport {
    /// Project a finished attempt into review rows.
    ///
    /// Works from the frozen snapshot and the already-computed result;
    /// nothing here rescores the attempt.
    pub fn build(
        definition: &TestDefinition,
        answers: &AnswerSnapshot,
        result: &AttemptResult,
    ) -> Self {
        let rows = definition
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let selected_option = answers.get(index);
                let verdict = match selected_option {
                    None => ReviewVerdict::Unanswered,
                    Some(selected) if selected == question.correct_option_index => {
                        ReviewVerdict::Correct
                    }
                    Some(_) => ReviewVerdict::Wrong,
                };
                let marks_awarded = if verdict == ReviewVerdict::Correct {
                    question.marks
                } else {
                    0
                };
                ReviewRow {
                    index,
                    text: question.text.clone(),
                    options: question.options.clone(),
                    selected_option,
                    correct_option: question.correct_option_index,
                    marks: question.marks,
                    marks_awarded,
                    verdict,
                    explanation: question.explanation.clone(),
                }
            })
            .collect();

        Self {
            test_id: definition.id.clone(),
            title: definition.title.clone(),
            generated_at: Utc::now(),
            result: result.clone(),
            rows,
        }
    }

    /// Format the review as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.title));
        md.push_str(&format!(
            "**Score:** {}/{} ({}%) — {}\n\n",
            self.result.obtained_marks,
            self.result.total_marks,
            self.result.percentage,
            if self.result.passed { "passed" } else { "failed" }
        ));
        md.push_str(&format!(
            "{} correct, {} wrong, {} unanswered\n\n",
            self.result.correct_count, self.result.wrong_count, self.result.unanswered_count
        ));

        md.push_str("| # | Question | Your answer | Correct answer | Marks |\n");
        md.push_str("|---|----------|-------------|----------------|-------|\n");
        for row in &self.rows {
            let selected = match row.selected_option {
                Some(option) => row.options[option].as_str(),
                None => "—",
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {}/{} |\n",
                row.index + 1,
                row.text,
                selected,
                row.options[row.correct_option],
                row.marks_awarded,
                row.marks
            ));
        }

        md
    }

    /// Save the review as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize review")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write review to {}", path.display()))?;
        Ok(())
    }

    /// Load a review from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read review from {}", path.display()))?;
        let review: ReviewReport =
            serde_json::from_str(&content).context("failed to parse review JSON")?;
        Ok(review)
    }
}
