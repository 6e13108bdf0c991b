//! Driver errors.

use std::io;
use std::path::PathBuf;

use cc2dx_lexer::InvariantViolation;

/// A file could not be converted, or a backup operation failed.
///
/// Every variant names the file involved.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("cannot back up {}: {source}", path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("cannot restore {} from its backup: {source}", path.display())]
    Restore { path: PathBuf, source: io::Error },

    #[error("cannot remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("translation of {} aborted: {source}", path.display())]
    Translate {
        path: PathBuf,
        source: InvariantViolation,
    },
}

impl DriverError {
    /// The file the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DriverError::Read { path, .. }
            | DriverError::Write { path, .. }
            | DriverError::Backup { path, .. }
            | DriverError::Restore { path, .. }
            | DriverError::Remove { path, .. }
            | DriverError::Translate { path, .. } => path,
        }
    }
}
