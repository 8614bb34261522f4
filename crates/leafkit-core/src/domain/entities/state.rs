//! Derived, never-persisted views over a project: check results, installed
//! state, update availability and install outcomes.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{InstallRecord, LeafManifest, LeafName, Requirement};

/// Outcome of evaluating one [`Requirement`] against a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementCheckResult {
    pub satisfied: bool,
    pub requirement: Requirement,
    /// First location that satisfied the requirement.
    pub found_path: Option<PathBuf>,
}

impl RequirementCheckResult {
    pub fn satisfied(requirement: Requirement, found_path: PathBuf) -> Self {
        Self {
            satisfied: true,
            requirement,
            found_path: Some(found_path),
        }
    }

    pub fn unsatisfied(requirement: Requirement) -> Self {
        Self {
            satisfied: false,
            requirement,
            found_path: None,
        }
    }
}

/// What the project tree says about one leaf right now.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledLeafState {
    pub name: LeafName,
    pub path: PathBuf,
    /// The leaf directory exists.
    pub installed: bool,
    /// The manifest copied into the project at install time.
    pub manifest: Option<LeafManifest>,
    /// The ledger entry written at install time.
    pub record: Option<InstallRecord>,
}

impl InstalledLeafState {
    /// Installed and carrying a readable manifest.
    pub fn is_recognized(&self) -> bool {
        self.installed && self.manifest.is_some()
    }

    pub fn version(&self) -> Option<&str> {
        self.manifest.as_ref().map(|m| m.version.as_str())
    }
}

/// Installed vs. catalog version of one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafUpdateInfo {
    pub name: LeafName,
    pub installed_version: String,
    pub available_version: String,
    pub has_update: bool,
}

/// Result of materialising one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallOutcome {
    pub name: LeafName,
    pub success: bool,
    pub destination: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Nothing was done because nothing needed doing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,
}

impl InstallOutcome {
    pub fn installed(name: LeafName, destination: PathBuf) -> Self {
        Self {
            name,
            success: true,
            destination,
            error: None,
            skipped: false,
        }
    }

    pub fn failed(name: LeafName, destination: PathBuf, error: impl Into<String>) -> Self {
        Self {
            name,
            success: false,
            destination,
            error: Some(error.into()),
            skipped: false,
        }
    }

    pub fn skipped(name: LeafName, destination: PathBuf) -> Self {
        Self {
            name,
            success: true,
            destination,
            error: None,
            skipped: true,
        }
    }
}

/// Requirements still missing for a leaf in an install plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedLeaf {
    pub name: LeafName,
    pub missing: Vec<RequirementCheckResult>,
}

/// Everything that happened during a dependency-aware installation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    /// The order that was computed, dependencies first.
    pub order: Vec<LeafName>,
    /// Cycles found while resolving; empty unless cycles were allowed.
    pub cycles: Vec<Vec<LeafName>>,
    pub outcomes: Vec<InstallOutcome>,
    /// Set when installation stopped on unmet requirements.
    pub blocked: Option<BlockedLeaf>,
}

impl InstallReport {
    /// Every planned leaf was installed.
    pub fn is_complete(&self) -> bool {
        self.blocked.is_none()
            && self.outcomes.len() == self.order.len()
            && self.outcomes.iter().all(|o| o.success)
    }

    pub fn first_failure(&self) -> Option<&InstallOutcome> {
        self.outcomes.iter().find(|o| !o.success)
    }
}
