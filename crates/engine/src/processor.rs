use crate::error::{EngineError, Result};
use crate::stats::FileReport;
use code_count_core::{Classification, RuleTable, classify};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// バイナリ判定に使う先頭バイト数
const BINARY_SNIFF_LEN: usize = 8 * 1024;

/// A routed file waiting to be classified.
#[derive(Debug, Clone)]
pub struct FileJob {
    pub path: PathBuf,
    pub language: String,
    pub table: Arc<RuleTable>,
    pub is_test: bool,
}

/// Reads and classifies one file. Binary files yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`EngineError::FileRead`] if the file cannot be read.
pub fn process_file(job: &FileJob) -> Result<Option<FileReport>> {
    let bytes = std::fs::read(&job.path).map_err(|e| EngineError::FileRead {
        path: job.path.clone(),
        source: e,
    })?;

    if is_binary(&bytes) {
        log::debug!("Skipping binary file {}", job.path.display());
        return Ok(None);
    }

    // Use lossy conversion to support non-UTF8 text files (mostly)
    let decoded = String::from_utf8_lossy(&bytes);
    let text = normalize_newlines(&decoded);
    let result = classify(&text, &job.table);
    warn_incomplete(&job.path, job.table.name(), &result);
    log::info!("{} -> {}", job.path.display(), result.counts.total);

    Ok(Some(FileReport {
        path: job.path.clone(),
        language: job.language.clone(),
        is_test: job.is_test,
        counts: result.counts,
        remainder: result.remainder,
    }))
}

/// Logs a partial or inconsistent classification; returns whether it did.
fn warn_incomplete(path: &Path, family: &str, result: &Classification) -> bool {
    if let Some(remainder) = &result.remainder {
        log::warn!(
            "{}:{}: no {family} rule matches {:?}",
            path.display(),
            remainder.line,
            remainder.excerpt
        );
        true
    } else if !result.is_consistent() {
        log::warn!(
            "{}: {} lines but {} classified",
            path.display(),
            result.lines,
            result.accounted
        );
        true
    } else {
        false
    }
}

fn is_binary(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    bytecount::count(head, 0) > 0
}

/// `\r\n` と単独の `\r` を `\n` に統一する
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
