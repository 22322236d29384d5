//! Markdown parser for multiple-choice question files.
//!
//! # Format
//! ```markdown
//! 1. What is S3?
//! - A. A compute service
//! - B. A storage service
//! Correct answer: B
//!
//! 2. Which service runs containers?
//! - A. ECS
//! - B. SQS
//! Correct answer: A
//! ```
//!
//! A new block starts before every line that begins with `<digits>.`, wherever
//! it appears, so a numbered sentence inside option text also opens a block.
//! Blocks that do not yield a stem, at least two options and an answer are
//! dropped without an error.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{AnswerOption, Letter, Question};

/// Fewest options a question needs to be kept.
pub(crate) const MIN_OPTIONS: usize = 2;
const ANSWER_MARKER: &str = "Correct answer:";

static BLOCK_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());
static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*(.*)").unwrap());
static OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^- ([A-D])\.\s*(.*)").unwrap());
static ANSWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Correct answer:\s*([A-D])").unwrap());

/// Parse one markdown document into questions, in document order.
pub fn parse_questions(content: &str) -> Vec<Question> {
    let blocks = split_blocks(content);
    let total = blocks.len();

    let questions: Vec<Question> = blocks.iter().filter_map(|block| parse_block(block)).collect();

    if questions.len() < total {
        debug!(
            kept = questions.len(),
            dropped = total - questions.len(),
            "skipped malformed question blocks"
        );
    }
    questions
}

/// Split before every line that starts with a question marker. The marker
/// line opens its block; the very first line never causes a split.
fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        if idx > 0 && BLOCK_START.is_match(line) {
            blocks.push(current.join("\n"));
            current.clear();
        }
        current.push(line);
    }
    blocks.push(current.join("\n"));

    blocks.retain(|block| !block.trim().is_empty());
    blocks
}

fn parse_block(block: &str) -> Option<Question> {
    let mut lines = block.trim().split('\n');

    let header = lines.next()?;
    let stem = HEADER.captures(header)?.get(1)?.as_str().trim();

    let mut builder = QuestionBuilder::new(stem);
    for line in lines {
        match classify(line.trim()) {
            LineKind::Option(option) => builder.options.push(option),
            LineKind::Answer(letter) => builder.answer = Some(letter),
            LineKind::Other => {}
        }
    }
    builder.build()
}

enum LineKind {
    Option(AnswerOption),
    Answer(Letter),
    Other,
}

fn classify(line: &str) -> LineKind {
    if line.starts_with("- ") {
        return parse_option(line).map_or(LineKind::Other, LineKind::Option);
    }
    if line.contains(ANSWER_MARKER) {
        return parse_answer(line).map_or(LineKind::Other, LineKind::Answer);
    }
    LineKind::Other
}

fn parse_option(line: &str) -> Option<AnswerOption> {
    let caps = OPTION.captures(line)?;
    let letter = caps.get(1)?.as_str().parse().ok()?;
    let text = caps.get(2)?.as_str().trim().to_string();
    Some(AnswerOption { letter, text })
}

fn parse_answer(line: &str) -> Option<Letter> {
    ANSWER.captures(line)?.get(1)?.as_str().parse().ok()
}

struct QuestionBuilder {
    stem: String,
    options: Vec<AnswerOption>,
    answer: Option<Letter>,
}

impl QuestionBuilder {
    fn new(stem: &str) -> Self {
        Self {
            stem: stem.to_string(),
            options: Vec::new(),
            answer: None,
        }
    }

    fn build(self) -> Option<Question> {
        if self.stem.is_empty() || self.options.len() < MIN_OPTIONS {
            return None;
        }
        Some(Question {
            question: self.stem,
            options: self.options,
            correct_answer: self.answer?,
        })
    }
}
