pub mod manifest;
pub mod record;
pub mod state;

pub use crate::domain::DomainError;
pub use manifest::{ConfigSnippet, EnvVar, LeafManifest, ManifestLookup, Requirement};
pub use record::{InstallLedger, InstallRecord};
pub use state::{
    BlockedLeaf, InstallOutcome, InstallReport, InstalledLeafState, LeafUpdateInfo,
    RequirementCheckResult,
};
