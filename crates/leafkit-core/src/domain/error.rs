// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (results are passed around between services)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid leaf name '{name}': {reason}")]
    InvalidLeafName { name: String, reason: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Dependency Errors
    // ========================================================================
    #[error("Dependency cycle detected: {cycle}")]
    DependencyCycle { cycle: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidLeafName { name, reason } => vec![
                format!("'{}' is not a valid leaf name: {}", name, reason),
                "Leaf names are single directory names, e.g. leaf-auth".into(),
            ],
            Self::InvalidManifest(msg) => vec![
                "Check the leaf's leaf.json".into(),
                format!("Details: {}", msg),
            ],
            Self::DependencyCycle { cycle } => vec![
                format!("These leafs depend on each other: {}", cycle),
                "Remove one of the dependencies from a leaf.json".into(),
                "Or pass --allow-cycles to install in a best-effort order".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidLeafName { .. }
            | Self::InvalidManifest(_)
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::DependencyCycle { .. } => ErrorCategory::Dependency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Dependency,
}
