use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::{read_json, write_json, StoreError};
use crate::models::TestResult;

pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Directory of saved test results, one JSON file per test.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a result and return the path of the written file.
    pub fn save(&self, result: &TestResult) -> Result<PathBuf, StoreError> {
        let path = self.dir.join(result_file_name(&result.date));
        write_json(&path, result)?;
        info!(path = %path.display(), score = result.score, total = result.total, "saved test result");
        Ok(path)
    }

    /// All saved results, newest first. A missing directory means no results.
    pub fn load_all(&self) -> Result<Vec<TestResult>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut results = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
                continue;
            };
            if name.starts_with("test_") && name.ends_with(".json") {
                results.push(read_json::<TestResult>(&entry.path())?);
            }
        }

        results.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(results)
    }
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::new(DEFAULT_RESULTS_DIR)
    }
}

/// `2026-10-18 09:30:00` becomes `test_2026-10-18_09-30-00.json`.
pub fn result_file_name(date: &str) -> String {
    format!("test_{}.json", date.replace(':', "-").replace(' ', "_"))
}
