use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use quiz_aggregator::{
    ingest_files, summary, IngestObserver, QuestionStore, Quiz, ResultStore, DEFAULT_DB_PATH,
    DEFAULT_RESULTS_DIR, DEFAULT_TEST_SIZE, PREVIEW_COUNT,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Number of past results shown with `results --detailed`.
const DETAILED_RESULTS: usize = 5;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Question database file
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse markdown files and rebuild the question database
    Ingest {
        /// Markdown files, processed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the first few parsed questions
        #[arg(long)]
        preview: bool,
    },

    /// Report whether the question database exists and how many questions it holds
    Status,

    /// Delete the question database
    Clear,

    /// Take a practice test in the terminal
    Quiz {
        /// Questions per test
        #[arg(long, default_value_t = DEFAULT_TEST_SIZE, value_parser = parse_test_size)]
        size: usize,

        /// Directory where test results are saved
        #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
        results_dir: PathBuf,
    },

    /// List previous test results, newest first
    Results {
        /// Directory where test results are saved
        #[arg(long, default_value = DEFAULT_RESULTS_DIR)]
        results_dir: PathBuf,

        /// Show the incorrect answers of the most recent results
        #[arg(long)]
        detailed: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn parse_test_size(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(size) => Ok(size),
        Err(e) => Err(e.to_string()),
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let store = QuestionStore::new(&cli.db);

    match cli.command {
        Command::Ingest { files, preview } => ingest(&store, &files, preview),
        Command::Status => status(&store),
        Command::Clear => {
            store.clear()?;
            println!("Deleted {}", store.path().display());
            Ok(())
        }
        Command::Quiz { size, results_dir } => {
            if !store.exists() {
                anyhow::bail!(
                    "no question database found at {}; run `ingest` first",
                    store.path().display()
                );
            }
            let quiz = Quiz::from_store(&store, size, ResultStore::new(results_dir))?;
            info!(questions = quiz.app().pool_size(), "starting quiz");
            quiz.run()?;
            Ok(())
        }
        Command::Results {
            results_dir,
            detailed,
        } => results(&ResultStore::new(results_dir), detailed),
    }
}

fn ingest(store: &QuestionStore, files: &[PathBuf], preview: bool) -> Result<()> {
    let mut progress = ProgressReporter::new(files.len());
    let questions = ingest_files(files, &mut progress)?;

    progress.bar.set_message("saving question database...");
    store
        .save(&questions)
        .with_context(|| format!("could not write {}", store.path().display()))?;
    progress.bar.finish_with_message("complete");

    println!(
        "Processed {} questions from {} files into {}",
        questions.len(),
        files.len(),
        store.path().display()
    );

    if preview {
        println!();
        print!("{}", summary::preview(&questions, PREVIEW_COUNT));
    }
    Ok(())
}

fn status(store: &QuestionStore) -> Result<()> {
    if !store.exists() {
        println!("No question database at {}", store.path().display());
        return Ok(());
    }
    let count = store.count()?;
    println!("Question database {} is ready", store.path().display());
    println!("Total questions: {}", count);
    Ok(())
}

fn results(store: &ResultStore, detailed: bool) -> Result<()> {
    let results = store.load_all()?;
    if results.is_empty() {
        println!("No previous test results found in {}", store.dir().display());
        return Ok(());
    }

    print!("{}", summary::results_table(&results));
    if detailed {
        for result in results.iter().take(DETAILED_RESULTS) {
            println!();
            print!("{}", summary::result_details(result));
        }
    }
    Ok(())
}

/// Progress bar fed by ingestion callbacks.
struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{prefix:.bold.cyan} [{bar:30.blue/dim}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        bar.set_prefix("ingest");
        Self { bar }
    }
}

impl IngestObserver for ProgressReporter {
    fn file_started(&mut self, _index: usize, _total: usize, path: &Path) {
        self.bar.set_message(format!("processing {}...", path.display()));
    }

    fn file_finished(&mut self, path: &Path, questions: usize) {
        info!(path = %path.display(), questions, "file processed");
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_size_must_be_positive() {
        assert!(Cli::try_parse_from(["quiz-aggregator", "quiz", "--size", "0"]).is_err());
        let cli = Cli::try_parse_from(["quiz-aggregator", "quiz", "--size", "5"]).unwrap();
        assert!(matches!(cli.command, Command::Quiz { size: 5, .. }));
    }
}
