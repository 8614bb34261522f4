//! Unified error handling for leafkit Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for leafkit Core operations.
///
/// Most "not found" situations are not errors in this crate: they surface as
/// `None`, `false` or empty lists. This type covers the remaining failures.
#[derive(Debug, Error, Clone)]
pub enum LeafkitError {
    /// Errors from the domain layer (business rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl LeafkitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Dependency => ErrorCategory::Dependency,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Dependency,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type LeafkitResult<T> = Result<T, LeafkitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cycle_error_is_dependency_category() {
        let err: LeafkitError = DomainError::DependencyCycle {
            cycle: "leaf-a -> leaf-b -> leaf-a".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Dependency);
        assert!(err.suggestions().iter().any(|s| s.contains("leaf-a")));
    }

    #[test]
    fn filesystem_error_is_internal() {
        let err: LeafkitError = ApplicationError::FilesystemError {
            path: PathBuf::from("/tmp/x"),
            reason: "denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }

    #[test]
    fn invalid_name_is_validation_category() {
        let err: LeafkitError = DomainError::InvalidLeafName {
            name: "../x".into(),
            reason: "path separators".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
