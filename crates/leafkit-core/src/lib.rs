//! leafkit Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the leaf plugin
//! system: discovering optional feature modules ("leafs") in a catalog,
//! resolving their dependencies, checking their requirements against a host
//! project, and materialising them into that project.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           leafkit-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (LeafManager, DependencyResolver,      │
//! │   InstallService, UpdateTracker, ...)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Driven: Filesystem, Materializer)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    leafkit-adapters (Infrastructure)    │
//! │   (LocalFilesystem, MemoryFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (LeafManifest, Version, resolution walk)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::{path::Path, sync::Arc};
//! use leafkit_core::{application::LeafManager, domain::{LeafLayout, LeafName}};
//!
//! # fn demo(fs: Arc<dyn leafkit_core::application::ports::Filesystem>,
//! #         copier: Arc<dyn leafkit_core::application::ports::FileMaterializer>) {
//! let manager = LeafManager::new(fs, copier, "./catalog", LeafLayout::default());
//! let auth = LeafName::parse("leaf-auth").unwrap();
//!
//! let order = manager.resolver().install_order(&auth, Path::new("./my-app"));
//! for leaf in &order {
//!     let outcome = manager.installer().install(leaf, Path::new("./my-app"));
//!     assert!(outcome.success);
//! }
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        DependencyResolver, InstallPolicy, InstallService, LeafCatalog, LeafManager, LedgerStore,
        ManifestStore, ProjectInspector, RequirementChecker, UpdateTracker,
        ports::{FileMaterializer, Filesystem},
    };
    pub use crate::domain::{
        InstallOutcome, InstallRecord, InstallReport, InstalledLeafState, LeafLayout, LeafManifest,
        LeafName, LeafUpdateInfo, ManifestLookup, Requirement, RequirementCheckResult,
        RequirementKind, Resolution, Version,
    };
    pub use crate::error::{LeafkitError, LeafkitResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
