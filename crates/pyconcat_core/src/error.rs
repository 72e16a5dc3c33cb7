use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while validating inputs or reading a single source file.
///
/// `InvalidRoot` and `MissingEntry` are fatal for a run. The per-file
/// variants are recovered by the walker, which keeps the file but stops
/// looking for imports in it.
#[derive(Debug, Error)]
pub enum ConcatError {
    #[error("The project root folder '{}' does not exist or is not a directory.", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("The script '{}' does not exist or is not a file.", path.display())]
    MissingEntry { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },

    #[error("Syntax error in {} at line {line}", path.display())]
    Parse { path: PathBuf, line: usize },

    #[error("Failed to load the Python grammar: {0}")]
    Grammar(String),
}

impl ConcatError {
    /// Bad command-line input: the run stops before anything is written
    pub fn is_usage_error(&self) -> bool {
        matches!(self, ConcatError::InvalidRoot { .. } | ConcatError::MissingEntry { .. })
    }

    /// Per-file failures the walker logs and skips
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConcatError::Read { .. } | ConcatError::Decode { .. } | ConcatError::Parse { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConcatError>;
