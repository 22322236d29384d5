use serde::{Deserialize, Serialize};

use super::{AnswerOption, Letter};

/// Outcome of one finished test, persisted under the results directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`. Sorts chronologically as a string.
    pub date: String,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub wrong_questions: Vec<WrongAnswer>,
}

/// A question the test taker got wrong or left unanswered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrongAnswer {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub user_answer: Option<Letter>,
    pub correct_answer: Letter,
}

impl TestResult {
    pub fn passed(&self) -> bool {
        self.percentage >= crate::PASS_PERCENTAGE
    }
}

/// Percentage rounded to two decimals; zero questions score 0%.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = score as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
