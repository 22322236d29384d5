//! Turning a list of markdown files into one flat question list.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::Question;
use crate::parser::parse_questions;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Receives progress callbacks while files are ingested.
pub trait IngestObserver {
    /// Called before file `index` (0-based) of `total` is read.
    fn file_started(&mut self, _index: usize, _total: usize, _path: &Path) {}

    /// Called after a file was parsed.
    fn file_finished(&mut self, _path: &Path, _questions: usize) {}
}

/// Observer that ignores every event.
pub struct Silent;

impl IngestObserver for Silent {}

/// Read and parse every file in order, concatenating the results.
///
/// Any unreadable or non UTF-8 file aborts the whole run.
pub fn ingest_files<P, O>(paths: &[P], observer: &mut O) -> Result<Vec<Question>, IngestError>
where
    P: AsRef<Path>,
    O: IngestObserver + ?Sized,
{
    let mut all = Vec::new();

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        observer.file_started(index, paths.len(), path);

        let content = fs::read_to_string(path).map_err(|source| IngestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let questions = parse_questions(&content);
        debug!(path = %path.display(), count = questions.len(), "parsed file");

        observer.file_finished(path, questions.len());
        all.extend(questions);
    }

    Ok(all)
}

/// In-memory counterpart of [`ingest_files`].
pub fn ingest_sources<'a, I>(sources: I) -> Vec<Question>
where
    I: IntoIterator<Item = &'a str>,
{
    sources.into_iter().flat_map(parse_questions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const FIRST: &str = "1. One\n- A. a\n- B. b\nCorrect answer: A\n";
    const SECOND: &str = "1. Two\n- A. a\n- B. b\nCorrect answer: B\n\n2. Three\n- A. a\n- B. b\nCorrect answer: A\n";

    #[derive(Default)]
    struct Recorder {
        started: Vec<(usize, usize)>,
        finished: Vec<usize>,
    }

    impl IngestObserver for Recorder {
        fn file_started(&mut self, index: usize, total: usize, _path: &Path) {
            self.started.push((index, total));
        }

        fn file_finished(&mut self, _path: &Path, questions: usize) {
            self.finished.push(questions);
        }
    }

    #[test]
    fn files_are_concatenated_in_selection_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.md");
        let b = dir.path().join("b.md");
        fs::write(&a, FIRST).unwrap();
        fs::write(&b, SECOND).unwrap();

        let mut recorder = Recorder::default();
        let questions = ingest_files(&[&b, &a], &mut recorder).unwrap();

        let stems: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(stems, vec!["Two", "Three", "One"]);
        assert_eq!(recorder.started, vec![(0, 2), (1, 2)]);
        assert_eq!(recorder.finished, vec![2, 1]);
    }

    #[test]
    fn duplicates_across_files_are_kept() {
        let questions = ingest_sources([FIRST, FIRST]);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0], questions[1]);
    }

    #[test]
    fn invalid_utf8_aborts_the_run() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        fs::write(&good, FIRST).unwrap();
        fs::write(&bad, [0xff, 0xfe, 0x31, 0x2e]).unwrap();

        let err = ingest_files(&[good, bad.clone()], &mut Silent).unwrap_err();
        let IngestError::Read { path, .. } = err;
        assert_eq!(path, bad);
    }

    #[test]
    fn no_files_yield_no_questions() {
        let paths: [PathBuf; 0] = [];
        assert!(ingest_files(&paths, &mut Silent).unwrap().is_empty());
    }
}
