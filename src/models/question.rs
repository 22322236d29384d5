use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Option letter. Only A through D are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Letter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            other => Err(format!("not an option letter: {other}")),
        }
    }
}

/// One lettered answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub letter: Letter,
    pub text: String,
}

/// A multiple-choice question as stored in the question database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    /// Document order, not sorted by letter.
    pub options: Vec<AnswerOption>,
    /// Not checked against `options`.
    pub correct_answer: Letter,
}

impl Question {
    pub fn is_correct(&self, answer: Option<Letter>) -> bool {
        answer == Some(self.correct_answer)
    }

    pub fn option(&self, letter: Letter) -> Option<&AnswerOption> {
        self.options.iter().find(|opt| opt.letter == letter)
    }
}
