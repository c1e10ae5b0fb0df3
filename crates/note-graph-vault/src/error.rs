//! Error types for vault operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors that can occur while opening or scanning a vault.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The vault root does not exist or is not a directory.
    #[error("No vault directory found at {path}")]
    VaultNotFound { path: PathBuf },

    /// A file inside the vault has a path that is not valid UTF-8.
    #[error("Non-UTF-8 path inside vault: {path}")]
    NonUtf8Path { path: PathBuf },

    /// IO error while walking or reading notes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error surfaced by the directory walker.
    #[error("Failed to walk vault: {0}")]
    Walk(#[from] walkdir::Error),
}
