use std::path::PathBuf;

use code_count_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid settings file '{path}': {message}")]
    Settings { path: PathBuf, message: String },

    #[error("Unknown line kind '{kind}' in family '{family}'")]
    UnknownLineKind { family: String, kind: String },

    #[error("Unknown language family: {0}")]
    UnknownFamily(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] CoreError),

    #[error("Could not classify '{path}' past line {line}")]
    Desync { path: PathBuf, line: usize },

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
