//! Error types for wob-output.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// The output location exists but is a file.
    #[error("output path {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Create `dir` (and parents) if missing; refuse a path that names a file.
pub(crate) fn ensure_dir(dir: &std::path::Path) -> OutputResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::NotADirectory(dir.to_path_buf()));
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}
