//! # quiz-aggregator
//!
//! Builds a multiple-choice question database from markdown files and runs
//! untimed practice tests against it in the terminal.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_aggregator::{ingest_files, QuestionStore, Quiz, QuizError, ResultStore, Silent};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Parse markdown files into one question database
//!     let questions = ingest_files(&["set1.md", "set2.md"], &mut Silent)?;
//!     let store = QuestionStore::new("data/questions_db.json");
//!     store.save(&questions)?;
//!
//!     // Take a 40 question test in the terminal
//!     Quiz::from_store(&store, 40, ResultStore::default())?.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod ingest;
mod models;
mod parser;
pub mod summary;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use data::{
    result_file_name, QuestionStore, ResultStore, StoreError, DEFAULT_DB_PATH,
    DEFAULT_RESULTS_DIR,
};
pub use ingest::{ingest_files, ingest_sources, IngestError, IngestObserver, Silent};
pub use models::{
    percentage, AnswerOption, AppState, Letter, Question, TestResult, WrongAnswer,
};
pub use parser::parse_questions;

/// Number of questions drawn for one test.
pub const DEFAULT_TEST_SIZE: usize = 40;

/// Minimum percentage that counts as a pass.
pub const PASS_PERCENTAGE: f64 = 70.0;

/// Number of records shown by the ingestion preview.
pub const PREVIEW_COUNT: usize = 3;

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    results: ResultStore,
}

impl Quiz {
    /// Create a quiz drawing `test_size` questions per test from `questions`.
    pub fn new(questions: Vec<Question>, test_size: usize, results: ResultStore) -> Self {
        Self {
            app: App::new(questions, test_size),
            results,
        }
    }

    /// Load the question pool from a database file.
    pub fn from_store(
        store: &QuestionStore,
        test_size: usize,
        results: ResultStore,
    ) -> Result<Self, QuizError> {
        let questions = store.load()?;
        Ok(Self::new(questions, test_size, results))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits. Each finished test is saved to the result store.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut session = terminal::TerminalSession::enter()?;
        run_event_loop(session.terminal(), &mut self.app, &self.results)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
    results: &ResultStore,
) -> Result<(), QuizError> {
    let mut rng = rand::thread_rng();

    loop {
        if app.needs_save() {
            save_outcome(app, results);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code, &mut rng) {
                break;
            }
        }
    }

    Ok(())
}

fn save_outcome(app: &mut App, results: &ResultStore) {
    let date = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let outcome = results
        .save(&app.outcome(date))
        .map_err(|err| err.to_string());
    if let Err(err) = &outcome {
        tracing::error!(error = %err, "failed to save test result");
    }
    app.record_save(outcome);
}

/// Returns true if the app should exit.
fn handle_input<R: rand::Rng + ?Sized>(app: &mut App, key: KeyCode, rng: &mut R) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key, rng),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input<R: rand::Rng + ?Sized>(app: &mut App, key: KeyCode, rng: &mut R) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_test(rng);
            false
        }
        KeyCode::Char(c) => {
            app.push_name_char(c);
            false
        }
        KeyCode::Backspace => {
            app.pop_name_char();
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.answer_and_advance(),
        KeyCode::Right | KeyCode::Char('n') => {
            app.next_question();
        }
        KeyCode::Left | KeyCode::Char('p') => {
            app.previous_question();
        }
        KeyCode::Char('s') => {
            app.submit();
        }
        KeyCode::Esc => app.quit_test(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}
