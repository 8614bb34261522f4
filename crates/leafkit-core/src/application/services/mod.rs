//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "what does leaf-auth need" or "install
//! leaf-auth and everything it depends on".
//!
//! Every operation that touches a project takes the project root as an
//! argument; no service reads the process working directory.

pub mod catalog;
pub mod inspector;
pub mod install_service;
pub mod ledger;
pub mod manager;
pub mod manifest_store;
pub mod requirements;
pub mod resolver;
pub mod updates;

pub use catalog::LeafCatalog;
pub use inspector::ProjectInspector;
pub use install_service::{InstallPolicy, InstallService};
pub use ledger::LedgerStore;
pub use manager::LeafManager;
pub use manifest_store::ManifestStore;
pub use requirements::RequirementChecker;
pub use resolver::DependencyResolver;
pub use updates::UpdateTracker;
