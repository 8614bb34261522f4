//! Application layer for leafkit.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (catalog, manifests, requirements,
//!   resolution, updates, installation)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. Graph walks and version ordering live in
//! `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    DependencyResolver, InstallPolicy, InstallService, LeafCatalog, LeafManager, LedgerStore,
    ManifestStore, ProjectInspector, RequirementChecker, UpdateTracker,
};

// Re-export port traits (for adapter implementation)
pub use ports::{FileMaterializer, Filesystem};

pub use error::ApplicationError;
