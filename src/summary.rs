//! Plain-text rendering for the command line: database previews and the
//! results history.

use std::fmt::Write;

use crate::models::{Question, TestResult};

/// Render the first `count` questions the way they appear in the source
/// markdown, numbered from 1.
pub fn preview(questions: &[Question], count: usize) -> String {
    let mut out = String::new();
    for (index, question) in questions.iter().take(count).enumerate() {
        let _ = writeln!(out, "Question {}", index + 1);
        let _ = writeln!(out, "  Q: {}", question.question);
        for option in &question.options {
            let _ = writeln!(out, "  - {}. {}", option.letter, option.text);
        }
        let _ = writeln!(out, "  Correct Answer: {}", question.correct_answer);
        out.push('\n');
    }
    out
}

/// One row per result, newest first as given.
pub fn results_table(results: &[TestResult]) -> String {
    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<19}  {:>7}  {:>10}  Status",
        "Name", "Date", "Score", "Percentage"
    );
    for result in results {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<19}  {:>7}  {:>10}  {}",
            result.name,
            result.date,
            format!("{}/{}", result.score, result.total),
            format!("{}%", result.percentage),
            if result.passed() { "PASS" } else { "FAIL" },
        );
    }
    out
}

/// The incorrectly answered questions of one result.
pub fn result_details(result: &TestResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} - {} ({}%)",
        result.name, result.date, result.percentage
    );
    let _ = writeln!(out, "  Score: {}/{}", result.score, result.total);

    if result.wrong_questions.is_empty() {
        let _ = writeln!(out, "  No incorrect answers.");
        return out;
    }

    let _ = writeln!(out, "  Questions answered incorrectly:");
    for (index, wrong) in result.wrong_questions.iter().enumerate() {
        let answer = wrong
            .user_answer
            .map_or_else(|| "none".to_string(), |letter| letter.to_string());
        let _ = writeln!(out, "  {}. {}", index + 1, wrong.question);
        let _ = writeln!(out, "     Your answer: {}", answer);
        let _ = writeln!(out, "     Correct answer: {}", wrong.correct_answer);
    }
    out
}
