mod question;
mod result;

pub use question::{AnswerOption, Letter, Question};
pub use result::{percentage, TestResult, WrongAnswer};

/// Which screen the quiz session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
