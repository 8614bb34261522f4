// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for leafkit.
//!
//! This module contains pure logic with no filesystem access. Reading
//! manifests, listing directories and copying trees are handled via ports
//! (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable entities**: Manifests are loaded fresh and never mutated
//! - **Graph logic is pure**: [`resolution`] walks an abstract
//!   [`DependencySource`]
//
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod layout;
pub mod resolution;
pub mod value_objects;
pub mod version;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    BlockedLeaf, ConfigSnippet, EnvVar, InstallLedger, InstallOutcome, InstallRecord,
    InstallReport, InstalledLeafState, LeafManifest, LeafUpdateInfo, ManifestLookup, Requirement,
    RequirementCheckResult,
};

pub use error::{DomainError, ErrorCategory};
pub use layout::LeafLayout;
pub use resolution::{DependencySource, Resolution};
pub use validation::DomainValidator;
pub use value_objects::{LeafName, RequirementKind};
pub use version::Version;

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// A catalog held as manifests, nothing installed.
    struct Manifests(HashMap<LeafName, LeafManifest>);

    impl DependencySource for Manifests {
        fn dependencies_of(&self, leaf: &LeafName) -> Vec<LeafName> {
            self.0
                .get(leaf)
                .map(|m| m.dependency_names().0)
                .unwrap_or_default()
        }

        fn is_installed(&self, _leaf: &LeafName) -> bool {
            false
        }
    }

    #[test]
    fn manifests_drive_resolution() {
        let a = LeafManifest::new("leaf-a", "1.0.0");
        let b = LeafManifest::new("leaf-b", "1.0.0")
            .with_dependency("leaf-a")
            .with_dependency("leaf-a");

        let catalog = Manifests(
            [a, b]
                .into_iter()
                .map(|m| (LeafName::parse(m.name.clone()).unwrap(), m))
                .collect(),
        );
        let target = LeafName::parse("leaf-b").unwrap();

        let missing = resolution::missing_dependencies(&target, &catalog);
        assert_eq!(missing, vec![LeafName::parse("leaf-a").unwrap()]);

        let order: Vec<String> = resolution::resolve(&target, &catalog)
            .order
            .into_iter()
            .map(LeafName::into_string)
            .collect();
        assert_eq!(order, ["leaf-a", "leaf-b"]);
    }

    #[test]
    fn manifest_version_orders_numerically() {
        let installed = LeafManifest::new("leaf-a", "1.9.0");
        let catalog = LeafManifest::new("leaf-a", "v1.10.0");
        assert!(catalog.version().is_newer_than(&installed.version()));
    }
}
