//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The catalog has no directory for this leaf.
    #[error("Leaf '{name}' not found in catalog")]
    LeafNotInCatalog { name: String },

    /// The project has no directory for this leaf.
    #[error("Leaf '{name}' is not installed")]
    LeafNotInstalled { name: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The install ledger exists but cannot be parsed.
    #[error("Install ledger at {path} is corrupt: {reason}")]
    LedgerCorrupt { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Filesystem store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::LeafNotInCatalog { name } => vec![
                format!("No directory named '{}' in the catalog", name),
                "Try: leafkit list to see available leafs".into(),
                "Or point at another catalog with --catalog".into(),
            ],
            Self::LeafNotInstalled { name } => vec![
                format!("Install it first: leafkit add {}", name),
                "Try: leafkit list --installed".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::LedgerCorrupt { path, .. } => vec![
                format!("Fix or delete {}", path.display()),
                "Installed leafs are detected from the source tree, not the ledger".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::LeafNotInCatalog { .. } | Self::LeafNotInstalled { .. } => {
                ErrorCategory::NotFound
            }
            Self::FilesystemError { .. }
            | Self::LedgerCorrupt { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
