//! Installed-state reader.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::ports::Filesystem;
use crate::application::services::{LedgerStore, ManifestStore};
use crate::domain::{InstalledLeafState, LeafLayout, LeafName};

/// Answers "what is in this project right now" from the project tree.
///
/// A leaf is installed when `<project>/src/<leaf>` is a directory. It is
/// *recognized* when that directory also carries a readable manifest.
#[derive(Clone)]
pub struct ProjectInspector {
    fs: Arc<dyn Filesystem>,
    manifests: ManifestStore,
    ledger: LedgerStore,
    layout: LeafLayout,
}

impl ProjectInspector {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        manifests: ManifestStore,
        ledger: LedgerStore,
        layout: LeafLayout,
    ) -> Self {
        Self {
            fs,
            manifests,
            ledger,
            layout,
        }
    }

    pub fn is_installed(&self, name: &LeafName, project: &Path) -> bool {
        self.fs.is_dir(&self.layout.installed_dir(project, name))
    }

    /// Every leaf directory under the source root, manifest or not, sorted.
    #[instrument(skip_all, fields(project = %project.display()))]
    pub fn installed_names(&self, project: &Path) -> Vec<LeafName> {
        let source = self.layout.source_root(project);
        if !self.fs.is_dir(&source) {
            debug!("Project has no source root");
            return Vec::new();
        }

        let entries = match self.fs.read_dir_names(&source) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Source root cannot be listed");
                return Vec::new();
            }
        };

        let mut names: Vec<LeafName> = entries
            .into_iter()
            .filter(|name| self.layout.is_leaf_dir_name(name))
            .filter_map(|name| LeafName::parse(name).ok())
            .collect();
        names.sort();
        names
    }

    /// Installed leafs that carry a readable manifest, sorted by name.
    pub fn installed_leafs(&self, project: &Path) -> Vec<InstalledLeafState> {
        self.installed_names(project)
            .into_iter()
            .map(|name| self.state(&name, project))
            .filter(InstalledLeafState::is_recognized)
            .collect()
    }

    /// Current state of one leaf, whether installed or not.
    pub fn state(&self, name: &LeafName, project: &Path) -> InstalledLeafState {
        let installed = self.is_installed(name, project);
        let manifest = if installed {
            self.manifests.read_installed_manifest(name, project)
        } else {
            None
        };

        InstalledLeafState {
            name: name.clone(),
            path: self.layout.installed_dir(project, name),
            installed,
            manifest,
            record: self.ledger.get(project, name),
        }
    }
}
