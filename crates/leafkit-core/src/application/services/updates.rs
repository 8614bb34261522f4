//! Update Tracker - installed copy vs. catalog.

use std::path::Path;

use tracing::{debug, instrument};

use crate::application::services::{ManifestStore, ProjectInspector};
use crate::domain::{LeafName, LeafUpdateInfo};

#[derive(Clone)]
pub struct UpdateTracker {
    manifests: ManifestStore,
    inspector: ProjectInspector,
}

impl UpdateTracker {
    pub fn new(manifests: ManifestStore, inspector: ProjectInspector) -> Self {
        Self {
            manifests,
            inspector,
        }
    }

    /// `None` when either the installed or the catalog manifest is unreadable.
    pub fn check_update(&self, name: &LeafName, project: &Path) -> Option<LeafUpdateInfo> {
        let installed = self.manifests.read_installed_manifest(name, project)?;
        let available = self.manifests.read_catalog_manifest(name)?;

        let has_update = available.version().is_newer_than(&installed.version());
        debug!(
            leaf = %name,
            installed = %installed.version,
            available = %available.version,
            has_update,
            "Update checked"
        );

        Some(LeafUpdateInfo {
            name: name.clone(),
            installed_version: installed.version,
            available_version: available.version,
            has_update,
        })
    }

    /// One entry per recognized installed leaf that is still in the catalog.
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn check_all_updates(&self, project: &Path) -> Vec<LeafUpdateInfo> {
        self.inspector
            .installed_leafs(project)
            .iter()
            .filter_map(|state| self.check_update(&state.name, project))
            .collect()
    }

    pub fn leafs_with_updates(&self, project: &Path) -> Vec<LeafUpdateInfo> {
        self.check_all_updates(project)
            .into_iter()
            .filter(|info| info.has_update)
            .collect()
    }
}
