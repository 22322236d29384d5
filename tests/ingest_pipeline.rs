use std::fs;

use indoc::indoc;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use quiz_aggregator::{
    ingest_files, ingest_sources, parse_questions, AnswerOption, Letter, Question, QuestionStore,
    Silent,
};
use tempfile::TempDir;

const S3_SET: &str = indoc! {"
    1. What is S3?
    - A. A compute service
    - B. A storage service
    Correct answer: B
"};

const MIXED_SET: &str = indoc! {"
    # Week 3 practice

    1. Which service is serverless compute?
    - A. Lambda
    - B. EBS
    - C. Glacier
    - D. VPC
    Correct answer: A

    2. Broken question without answer
    - A. one
    - B. two

    3. Which store is **object** based?
    - A. EFS
    - B. S3
    Correct answer: B
"};

#[test]
fn s3_example_produces_documented_json() {
    let questions = parse_questions(S3_SET);
    let json = serde_json::to_value(&questions).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{
            "question": "What is S3?",
            "options": [
                {"letter": "A", "text": "A compute service"},
                {"letter": "B", "text": "A storage service"}
            ],
            "correct_answer": "B"
        }])
    );
}

#[test]
fn malformed_blocks_are_skipped_between_good_ones() {
    let stems: Vec<String> = parse_questions(MIXED_SET)
        .into_iter()
        .map(|q| q.question)
        .collect();
    assert_eq!(
        stems,
        vec![
            "Which service is serverless compute?",
            "Which store is **object** based?"
        ]
    );
}

#[test]
fn files_to_database_end_to_end() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("week1.md");
    let second = dir.path().join("week3.md");
    fs::write(&first, S3_SET).unwrap();
    fs::write(&second, MIXED_SET).unwrap();

    let questions = ingest_files(&[&first, &second], &mut Silent).unwrap();
    let store = QuestionStore::new(dir.path().join("data/questions_db.json"));
    store.save(&questions).unwrap();

    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.load().unwrap(), questions);
    assert_eq!(store.load().unwrap()[0].question, "What is S3?");

    // A second run replaces rather than appends.
    let rerun = ingest_files(&[&first], &mut Silent).unwrap();
    store.save(&rerun).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn failed_run_leaves_existing_database_untouched() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.md");
    fs::write(&good, S3_SET).unwrap();
    let store = QuestionStore::new(dir.path().join("db.json"));
    store
        .save(&ingest_files(&[&good], &mut Silent).unwrap())
        .unwrap();

    let missing = dir.path().join("missing.md");
    assert!(ingest_files(&[&good, &missing], &mut Silent).is_err());
    assert_eq!(store.count().unwrap(), 1);
}

fn letter() -> impl Strategy<Value = Letter> {
    prop::sample::select(Letter::ALL.to_vec())
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ?]{0,20}[a-zA-Z?]"
}

fn question() -> impl Strategy<Value = Question> {
    (
        text(),
        prop::collection::vec((letter(), text()), 2..5),
        letter(),
    )
        .prop_map(|(stem, options, correct_answer)| Question {
            question: stem,
            options: options
                .into_iter()
                .map(|(letter, text)| AnswerOption { letter, text })
                .collect(),
            correct_answer,
        })
}

fn to_markdown(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, q.question));
        for opt in &q.options {
            out.push_str(&format!("- {}. {}\n", opt.letter, opt.text));
        }
        out.push_str(&format!("Correct answer: {}\n\n", q.correct_answer));
    }
    out
}

proptest! {
    #[test]
    fn well_formed_blocks_parse_back(questions in prop::collection::vec(question(), 0..6)) {
        prop_assert_eq!(parse_questions(&to_markdown(&questions)), questions);
    }

    #[test]
    fn parsing_files_concatenates(
        first in prop::collection::vec(question(), 0..4),
        second in prop::collection::vec(question(), 0..4),
    ) {
        let a = to_markdown(&first);
        let b = to_markdown(&second);

        let mut expected = parse_questions(&a);
        expected.extend(parse_questions(&b));
        prop_assert_eq!(ingest_sources([a.as_str(), b.as_str()]), expected);
    }

    #[test]
    fn json_round_trip(questions in prop::collection::vec(question(), 0..6)) {
        let json = serde_json::to_string_pretty(&questions).unwrap();
        let back: Vec<Question> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, questions);
    }
}
