//! HTML review page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, suitable
//! for emailing or archiving an attempt review.

use std::path::Path;

use anyhow::{Context, Result};

use crate::review::{ReviewReport, ReviewVerdict};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML review page from a review report.
pub fn generate_html(review: &ReviewReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>Review — {}</title>\n",
        html_escape(&review.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&review.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {}</p>\n",
        review.rows.len(),
        review.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Score summary
    let verdict_class = if review.result.passed { "pass" } else { "fail" };
    html.push_str("<section class=\"summary\">\n");
    html.push_str(&format!(
        "<p class=\"score {verdict_class}\">{}/{} marks ({}%) — {}</p>\n",
        review.result.obtained_marks,
        review.result.total_marks,
        review.result.percentage,
        if review.result.passed {
            "Passed"
        } else {
            "Failed"
        }
    ));
    html.push_str(&format!(
        "<p>{} correct, {} wrong, {} unanswered</p>\n",
        review.result.correct_count, review.result.wrong_count, review.result.unanswered_count
    ));
    html.push_str("</section>\n");

    // Per-question review
    html.push_str("<section class=\"questions\">\n");
    for row in &review.rows {
        let verdict = match row.verdict {
            ReviewVerdict::Correct => "correct",
            ReviewVerdict::Wrong => "wrong",
            ReviewVerdict::Unanswered => "unanswered",
        };
        html.push_str(&format!("<article class=\"question {verdict}\">\n"));
        html.push_str(&format!(
            "<h2>Q{}. {} <span class=\"marks\">{}/{}</span></h2>\n",
            row.index + 1,
            html_escape(&row.text),
            row.marks_awarded,
            row.marks
        ));
        html.push_str("<ol class=\"options\">\n");
        for (i, option) in row.options.iter().enumerate() {
            let mut classes = Vec::new();
            if i == row.correct_option {
                classes.push("right");
            }
            if row.selected_option == Some(i) {
                classes.push("chosen");
            }
            html.push_str(&format!(
                "<li class=\"{}\">{}</li>\n",
                classes.join(" "),
                html_escape(option)
            ));
        }
        html.push_str("</ol>\n");
        if let Some(explanation) = &row.explanation {
            html.push_str(&format!(
                "<p class=\"explanation\">{}</p>\n",
                html_escape(explanation)
            ));
        }
        html.push_str("</article>\n");
    }
    html.push_str("</section>\n");

    html.push_str("</body>\n</html>\n");
    html
}

/// Generate and write the HTML review page to a file.
pub fn write_html(review: &ReviewReport, path: &Path) -> Result<()> {
    let html = generate_html(review);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write review page to {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 48rem; color: #1a1a1a; }
header .meta { color: #666; }
.summary .score { font-size: 1.3rem; font-weight: 600; }
.summary .score.pass { color: #15803d; }
.summary .score.fail { color: #b91c1c; }
.question { border: 1px solid #ddd; border-radius: 6px; padding: 0.5rem 1rem; margin: 1rem 0; }
.question.correct { border-left: 4px solid #15803d; }
.question.wrong { border-left: 4px solid #b91c1c; }
.question.unanswered { border-left: 4px solid #a3a3a3; }
.question h2 { font-size: 1rem; }
.question .marks { float: right; color: #666; font-weight: 400; }
.options li.right { color: #15803d; font-weight: 600; }
.options li.chosen { text-decoration: underline; }
.explanation { background: #f5f5f5; padding: 0.5rem; border-radius: 4px; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use mockexam_core::answers::AnswerStore;
    use mockexam_core::model::{Question, TestDefinition};
    use mockexam_core::scoring::score;

    fn review() -> ReviewReport {
        let definition = TestDefinition {
            id: "html-test".into(),
            title: "HTML <Test> & Friends".into(),
            duration_seconds: 60,
            passing_marks: None,
            questions: vec![
                Question {
                    text: "Is 1 < 2?".into(),
                    options: vec!["yes".into(), "no".into()],
                    correct_option_index: 0,
                    marks: 1,
                    explanation: Some("Numbers & ordering.".into()),
                },
                Question {
                    text: "Pick b".into(),
                    options: vec!["a".into(), "b".into()],
                    correct_option_index: 1,
                    marks: 1,
                    explanation: None,
                },
            ],
        };
        let mut store = AnswerStore::new();
        store.set(0, 0);
        let snapshot = store.snapshot();
        let result = score(&definition, &snapshot);
        ReviewReport::build(&definition, &snapshot, &result)
    }

    #[test]
    fn escapes_markup_in_content() {
        let html = generate_html(&review());
        assert!(html.contains("HTML &lt;Test&gt; &amp; Friends"));
        assert!(html.contains("Is 1 &lt; 2?"));
        assert!(!html.contains("<Test>"));
    }

    #[test]
    fn marks_chosen_and_correct_options() {
        let html = generate_html(&review());
        assert!(html.contains("class=\"right chosen\""));
        assert!(html.contains("class=\"question correct\""));
        assert!(html.contains("class=\"question unanswered\""));
    }

    #[test]
    fn writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("review.html");
        write_html(&review(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<!DOCTYPE html>"));
        assert!(content.contains("1/2 marks (50%)"));
    }
}
