//! Manifest Store - reads `leaf.json` from the catalog or a project.
//!
//! Nothing here fails. A leaf without a readable manifest can still be
//! copied, so callers get a [`ManifestLookup`] (or an `Option` through the
//! thin `read_*` adapters) and decide for themselves.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::ports::Filesystem;
use crate::domain::{DomainValidator, LeafLayout, LeafManifest, LeafName, ManifestLookup};

#[derive(Clone)]
pub struct ManifestStore {
    fs: Arc<dyn Filesystem>,
    catalog_root: PathBuf,
    layout: LeafLayout,
}

impl ManifestStore {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        catalog_root: impl Into<PathBuf>,
        layout: LeafLayout,
    ) -> Self {
        Self {
            fs,
            catalog_root: catalog_root.into(),
            layout,
        }
    }

    /// The canonical manifest, from `<catalog>/<name>/leaf.json`.
    pub fn lookup_catalog(&self, name: &LeafName) -> ManifestLookup {
        let path = self
            .catalog_root
            .join(name.as_str())
            .join(&self.layout.manifest_file);
        self.lookup(&path)
    }

    /// The copy made at install time, from `<project>/src/<name>/leaf.json`.
    pub fn lookup_installed(&self, name: &LeafName, project: &Path) -> ManifestLookup {
        let path = self
            .layout
            .installed_dir(project, name)
            .join(&self.layout.manifest_file);
        self.lookup(&path)
    }

    pub fn read_catalog_manifest(&self, name: &LeafName) -> Option<LeafManifest> {
        self.lookup_catalog(name).into_option()
    }

    pub fn read_installed_manifest(&self, name: &LeafName, project: &Path) -> Option<LeafManifest> {
        self.lookup_installed(name, project).into_option()
    }

    fn lookup(&self, path: &Path) -> ManifestLookup {
        if !self.fs.is_file(path) {
            debug!(path = %path.display(), "No manifest");
            return ManifestLookup::NotFound;
        }

        let parsed = self
            .fs
            .read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| LeafManifest::from_json(&raw).map_err(|e| e.to_string()))
            .and_then(|manifest| {
                DomainValidator::validate_manifest(&manifest)
                    .map(|()| manifest)
                    .map_err(|e| e.to_string())
            });

        match parsed {
            Ok(manifest) => {
                debug!(path = %path.display(), name = %manifest.name, "Manifest loaded");
                ManifestLookup::Found(manifest)
            }
            Err(detail) => {
                warn!(path = %path.display(), %detail, "Malformed manifest ignored");
                ManifestLookup::Malformed {
                    path: path.to_path_buf(),
                    detail,
                }
            }
        }
    }
}
