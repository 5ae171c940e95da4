use std::path::PathBuf;

use code_count_core::{Aggregator, CountTable, Remainder};
use serde::Serialize;

use crate::error::EngineError;

/// Classification outcome for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub language: String,
    pub is_test: bool,
    pub counts: CountTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remainder: Option<Remainder>,
}

/// Everything one run produced.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Classified files in walk order.
    pub files: Vec<FileReport>,
    /// Files skipped because of an error (non-strict runs only).
    pub errors: Vec<(PathBuf, EngineError)>,
    pub totals: Aggregator,
}

impl RunResult {
    /// Files whose text was not fully classified.
    pub fn desynced(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|report| report.remainder.is_some())
    }
}
