use alloc::string::String;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Unknown line kind: {0}")]
    UnknownLineKind(String),

    #[error("Unknown language family: {0}")]
    UnknownFamily(String),

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),

    #[error(
        "Classified {classified} lines for '{language}' but the file only has {total} lines"
    )]
    OverCounted {
        language: String,
        classified: usize,
        total: usize,
    },
}

pub type Result<T> = core::result::Result<T, CoreError>;
