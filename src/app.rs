use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::models::{percentage, AppState, Letter, Question, TestResult, WrongAnswer};

/// A single test taker working through a random sample of the database.
pub struct App {
    pub state: AppState,
    pool: Vec<Question>,
    test_size: usize,
    name_input: String,
    name_error: Option<String>,
    questions: Vec<Question>,
    current_question_index: usize,
    selected_option: usize,
    answers: Vec<Option<Letter>>,
    result_scroll: usize,
    saved: Option<Result<PathBuf, String>>,
}

impl App {
    /// `pool` is the whole question database; each test draws `test_size`
    /// questions from it (or all of them when the pool is smaller).
    ///
    /// Questions with fewer than two options cannot be answered and are left
    /// out of the pool.
    pub fn new(pool: Vec<Question>, test_size: usize) -> Self {
        let total = pool.len();
        let pool: Vec<Question> = pool
            .into_iter()
            .filter(|q| q.options.len() >= crate::parser::MIN_OPTIONS)
            .collect();
        if pool.len() < total {
            warn!(
                skipped = total - pool.len(),
                "skipped questions with too few options"
            );
        }

        Self {
            state: AppState::Welcome,
            pool,
            test_size,
            name_input: String::new(),
            name_error: None,
            questions: Vec::new(),
            current_question_index: 0,
            selected_option: 0,
            answers: Vec::new(),
            result_scroll: 0,
            saved: None,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn test_size(&self) -> usize {
        self.test_size.min(self.pool.len())
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn name_error(&self) -> Option<&str> {
        self.name_error.as_deref()
    }

    pub fn push_name_char(&mut self, c: char) {
        self.name_input.push(c);
        self.name_error = None;
    }

    pub fn pop_name_char(&mut self) {
        self.name_input.pop();
    }

    /// Draw a fresh test. Returns false, leaving the app on the welcome
    /// screen, when no name was entered or there is nothing to ask.
    pub fn start_test<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.name_input.trim().is_empty() {
            self.name_error = Some("Enter your name to start".to_string());
            return false;
        }
        if self.pool.is_empty() {
            self.name_error = Some("The question database is empty".to_string());
            return false;
        }
        if self.test_size() == 0 {
            self.name_error = Some("The test size must be at least 1".to_string());
            return false;
        }

        self.questions = self
            .pool
            .choose_multiple(rng, self.test_size())
            .cloned()
            .collect();
        self.answers = vec![None; self.questions.len()];
        self.current_question_index = 0;
        self.selected_option = 0;
        self.result_scroll = 0;
        self.saved = None;
        self.name_error = None;
        self.state = AppState::Quiz;
        true
    }

    pub fn user_name(&self) -> &str {
        self.name_input.trim()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_question_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_question_number() == self.total_questions()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn current_answer(&self) -> Option<Letter> {
        self.answers[self.current_question_index]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<Letter>] {
        &self.answers
    }

    fn option_count(&self) -> usize {
        self.current_question().options.len()
    }

    pub fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % self.option_count();
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        self.selected_option = (self.selected_option + count - 1) % count;
    }

    /// Record the highlighted option as the answer to the current question.
    pub fn choose_option(&mut self) {
        let letter = self.current_question().options[self.selected_option].letter;
        self.answers[self.current_question_index] = Some(letter);
    }

    /// Record the highlighted option, then move on or finish the test.
    pub fn answer_and_advance(&mut self) {
        self.choose_option();
        if self.is_last_question() {
            self.submit();
        } else {
            self.next_question();
        }
    }

    /// Move forward; only allowed once the current question has an answer.
    pub fn next_question(&mut self) -> bool {
        if self.current_answer().is_none() || self.is_last_question() {
            return false;
        }
        self.current_question_index += 1;
        self.sync_cursor();
        true
    }

    pub fn previous_question(&mut self) -> bool {
        if self.current_question_index == 0 {
            return false;
        }
        self.current_question_index -= 1;
        self.sync_cursor();
        true
    }

    /// Finish the test from the last question once it is answered.
    pub fn submit(&mut self) -> bool {
        if !self.is_last_question() || self.current_answer().is_none() {
            return false;
        }
        self.state = AppState::Result;
        true
    }

    /// Abandon the running test without recording a result.
    pub fn quit_test(&mut self) {
        self.state = AppState::Welcome;
        self.questions.clear();
        self.answers.clear();
        self.current_question_index = 0;
        self.selected_option = 0;
    }

    // Put the cursor on the recorded answer when revisiting a question.
    fn sync_cursor(&mut self) {
        let answer = self.current_answer();
        self.selected_option = answer
            .and_then(|letter| {
                self.current_question()
                    .options
                    .iter()
                    .position(|opt| opt.letter == letter)
            })
            .unwrap_or(0);
    }

    pub fn calculate_score(&self) -> usize {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| question.is_correct(**answer))
            .count()
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.calculate_score(), self.total_questions())
    }

    pub fn passed(&self) -> bool {
        self.percentage() >= crate::PASS_PERCENTAGE
    }

    pub fn wrong_answers(&self) -> Vec<WrongAnswer> {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| !question.is_correct(**answer))
            .map(|(answer, question)| WrongAnswer {
                question: question.question.clone(),
                options: question.options.clone(),
                user_answer: *answer,
                correct_answer: question.correct_answer,
            })
            .collect()
    }

    /// The persisted form of the finished test, stamped with `date`.
    pub fn outcome(&self, date: String) -> TestResult {
        let score = self.calculate_score();
        let total = self.total_questions();
        TestResult {
            name: self.user_name().to_string(),
            date,
            score,
            total,
            percentage: percentage(score, total),
            wrong_questions: self.wrong_answers(),
        }
    }

    pub fn needs_save(&self) -> bool {
        self.state == AppState::Result && self.saved.is_none()
    }

    pub fn record_save(&mut self, outcome: Result<PathBuf, String>) {
        self.saved = Some(outcome);
    }

    pub fn saved_path(&self) -> Option<&Path> {
        self.saved.as_ref()?.as_ref().ok().map(PathBuf::as_path)
    }

    pub fn save_error(&self) -> Option<&str> {
        self.saved.as_ref()?.as_ref().err().map(String::as_str)
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn scroll_results_down(&mut self) {
        self.result_scroll = self.result_scroll.saturating_add(1);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Back to the welcome screen, keeping the entered name.
    pub fn restart(&mut self) {
        self.quit_test();
        self.result_scroll = 0;
        self.saved = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerOption;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(stem: &str, correct: Letter) -> Question {
        Question {
            question: stem.to_string(),
            options: Letter::ALL
                .iter()
                .map(|&letter| AnswerOption {
                    letter,
                    text: format!("{stem} {letter}"),
                })
                .collect(),
            correct_answer: correct,
        }
    }

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| question(&format!("q{i}"), Letter::ALL[i % 4]))
            .collect()
    }

    fn started(pool: Vec<Question>, size: usize) -> App {
        let mut app = App::new(pool, size);
        for c in "Robin".chars() {
            app.push_name_char(c);
        }
        assert!(app.start_test(&mut StdRng::seed_from_u64(7)));
        app
    }

    // Answer the current question correctly or with a wrong letter.
    fn answer(app: &mut App, correct: bool) {
        let target = app.current_question().correct_answer;
        let options = &app.current_question().options;
        let index = options
            .iter()
            .position(|o| (o.letter == target) == correct)
            .unwrap();
        while app.selected_option() != index {
            app.select_next_option();
        }
        app.answer_and_advance();
    }

    #[test]
    fn start_requires_a_name() {
        let mut app = App::new(pool(3), 40);
        app.push_name_char(' ');
        assert!(!app.start_test(&mut StdRng::seed_from_u64(1)));
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.name_error().is_some());
    }

    #[test]
    fn start_refuses_empty_pool() {
        let mut app = App::new(Vec::new(), 40);
        app.push_name_char('x');
        assert!(!app.start_test(&mut StdRng::seed_from_u64(1)));
    }

    #[test]
    fn start_refuses_zero_test_size() {
        let mut app = App::new(pool(1), 0);
        app.push_name_char('x');
        assert!(!app.start_test(&mut StdRng::seed_from_u64(1)));
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.total_questions(), 0);
        assert!(app.name_error().is_some());
    }

    #[test]
    fn questions_without_enough_options_are_left_out() {
        let stored: Vec<Question> = serde_json::from_str(
            r#"[
                {"question": "Q", "options": [], "correct_answer": "A"},
                {"question": "R", "options": [{"letter": "A", "text": "a"}], "correct_answer": "A"}
            ]"#,
        )
        .unwrap();
        let mut mixed = stored;
        mixed.push(question("ok", Letter::B));

        let mut app = App::new(mixed, 40);
        assert_eq!(app.pool_size(), 1);

        app.push_name_char('x');
        assert!(app.start_test(&mut StdRng::seed_from_u64(1)));
        app.select_next_option();
        app.choose_option();
        assert_eq!(app.current_question().question, "ok");
        assert_eq!(app.current_answer(), Some(Letter::B));
    }

    #[test]
    fn empty_options_only_pool_cannot_start() {
        let stored: Vec<Question> =
            serde_json::from_str(r#"[{"question": "Q", "options": [], "correct_answer": "A"}]"#)
                .unwrap();
        let mut app = App::new(stored, 40);
        app.push_name_char('x');
        assert!(!app.start_test(&mut StdRng::seed_from_u64(1)));
        assert_eq!(app.state, AppState::Welcome);
    }

    #[test]
    fn sample_is_capped_and_distinct() {
        let app = started(pool(100), 40);
        assert_eq!(app.total_questions(), 40);

        let mut stems: Vec<&str> = app.questions().iter().map(|q| q.question.as_str()).collect();
        stems.sort();
        stems.dedup();
        assert_eq!(stems.len(), 40);

        let small = started(pool(5), 40);
        assert_eq!(small.total_questions(), 5);
    }

    #[test]
    fn cannot_skip_unanswered_question() {
        let mut app = started(pool(3), 3);
        assert!(!app.next_question());
        assert!(!app.previous_question());

        app.choose_option();
        assert!(app.next_question());
        assert_eq!(app.current_question_number(), 2);
    }

    #[test]
    fn previous_restores_recorded_answer_cursor() {
        let mut app = App::new(vec![question("a", Letter::C), question("b", Letter::A)], 2);
        app.push_name_char('z');
        app.start_test(&mut StdRng::seed_from_u64(3));

        app.select_next_option();
        app.select_next_option();
        app.answer_and_advance();
        assert_eq!(app.selected_option(), 0);

        assert!(app.previous_question());
        assert_eq!(app.selected_option(), 2);
    }

    #[test]
    fn option_cursor_wraps() {
        let mut app = started(pool(1), 1);
        app.select_previous_option();
        assert_eq!(app.selected_option(), 3);
        app.select_next_option();
        assert_eq!(app.selected_option(), 0);
    }

    #[test]
    fn scoring_and_pass_threshold() {
        let mut app = started(pool(10), 10);
        for i in 0..10 {
            answer(&mut app, i < 7);
        }

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.calculate_score(), 7);
        assert_eq!(app.percentage(), 70.0);
        assert!(app.passed());
        assert_eq!(app.wrong_answers().len(), 3);

        let outcome = app.outcome("2026-10-18 12:00:00".to_string());
        assert_eq!(outcome.name, "Robin");
        assert_eq!(outcome.score, 7);
        assert_eq!(outcome.total, 10);
        assert!(outcome.wrong_questions.iter().all(|w| w.user_answer.is_some()));
    }

    #[test]
    fn failing_test() {
        let mut app = started(pool(3), 3);
        for _ in 0..3 {
            answer(&mut app, false);
        }
        assert_eq!(app.calculate_score(), 0);
        assert!(!app.passed());
    }

    #[test]
    fn submit_only_from_answered_last_question() {
        let mut app = started(pool(2), 2);
        assert!(!app.submit());
        app.answer_and_advance();
        assert!(!app.submit());
        app.choose_option();
        assert!(app.submit());
        assert_eq!(app.state, AppState::Result);
    }

    #[test]
    fn save_bookkeeping() {
        let mut app = started(pool(1), 1);
        app.answer_and_advance();
        assert!(app.needs_save());

        app.record_save(Ok(PathBuf::from("results/test_x.json")));
        assert!(!app.needs_save());
        assert_eq!(app.saved_path(), Some(Path::new("results/test_x.json")));
        assert_eq!(app.save_error(), None);
    }

    #[test]
    fn quit_and_restart_return_to_welcome() {
        let mut app = started(pool(4), 4);
        app.answer_and_advance();
        app.quit_test();
        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.total_questions(), 0);
        assert_eq!(app.user_name(), "Robin");

        assert!(app.start_test(&mut StdRng::seed_from_u64(9)));
        assert_eq!(app.answers().iter().filter(|a| a.is_some()).count(), 0);
        app.restart();
        assert_eq!(app.state, AppState::Welcome);
    }
}
