use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{read_json, write_json, StoreError};
use crate::models::Question;

pub const DEFAULT_DB_PATH: &str = "data/questions_db.json";

/// Handle to the question database file.
///
/// The database is always rewritten as a whole; there is no merge with what
/// was stored before.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    path: PathBuf,
}

impl QuestionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the database with `questions`.
    pub fn save(&self, questions: &[Question]) -> Result<(), StoreError> {
        write_json(&self.path, questions)?;
        info!(path = %self.path.display(), count = questions.len(), "wrote question database");
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<Question>, StoreError> {
        if !self.exists() {
            return Err(StoreError::NotFound {
                path: self.path.clone(),
            });
        }
        read_json(&self.path)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        self.load().map(|questions| questions.len())
    }

    /// Delete the database file.
    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "deleted question database");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

impl Default for QuestionStore {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
