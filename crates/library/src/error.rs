//! Error types for library scanning.

use std::path::PathBuf;

/// Errors produced while scanning a games folder.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// The folder is missing, not a directory, or cannot be listed.
    ///
    /// Recoverable: the caller surfaces a notice and keeps running.
    #[error("cannot access folder {}: {source}", path.display())]
    FolderInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LibraryError {
    pub fn inaccessible(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FolderInaccessible {
            path: path.into(),
            source,
        }
    }
}
