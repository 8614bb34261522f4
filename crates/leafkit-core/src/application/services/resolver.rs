//! Dependency Resolver - feeds the catalog and project into the domain walk.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::application::services::{ManifestStore, ProjectInspector};
use crate::domain::{DependencySource, LeafName, Resolution, resolution};
use crate::error::LeafkitResult;

#[derive(Clone)]
pub struct DependencyResolver {
    manifests: ManifestStore,
    inspector: ProjectInspector,
}

impl DependencyResolver {
    pub fn new(manifests: ManifestStore, inspector: ProjectInspector) -> Self {
        Self {
            manifests,
            inspector,
        }
    }

    /// Every leaf `name` transitively needs that `project` does not have yet.
    /// Never contains `name` itself.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn missing_dependencies(&self, name: &LeafName, project: &Path) -> Vec<LeafName> {
        let missing = resolution::missing_dependencies(name, &self.graph(project));
        debug!(count = missing.len(), "Missing dependencies computed");
        missing
    }

    /// Install order for `name`: dependencies first, installed leafs left
    /// out. Cycles are tolerated; see [`resolve`](Self::resolve) to see them.
    pub fn install_order(&self, name: &LeafName, project: &Path) -> Vec<LeafName> {
        self.resolve(name, project).order
    }

    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn resolve(&self, name: &LeafName, project: &Path) -> Resolution {
        let resolution = resolution::resolve(name, &self.graph(project));
        for cycle in &resolution.cycles {
            warn!(cycle = %resolution::format_cycle(cycle), "Dependency cycle");
        }
        resolution
    }

    /// Like [`install_order`](Self::install_order), but a cycle is an error.
    pub fn install_order_strict(
        &self,
        name: &LeafName,
        project: &Path,
    ) -> LeafkitResult<Vec<LeafName>> {
        Ok(self.resolve(name, project).into_strict()?)
    }

    fn graph<'a>(&'a self, project: &'a Path) -> ProjectGraph<'a> {
        ProjectGraph {
            manifests: &self.manifests,
            inspector: &self.inspector,
            project,
        }
    }
}

/// Catalog manifests give the edges, the project decides what is installed.
struct ProjectGraph<'a> {
    manifests: &'a ManifestStore,
    inspector: &'a ProjectInspector,
    project: &'a Path,
}

impl DependencySource for ProjectGraph<'_> {
    fn dependencies_of(&self, leaf: &LeafName) -> Vec<LeafName> {
        let Some(manifest) = self.manifests.read_catalog_manifest(leaf) else {
            return Vec::new();
        };

        let (valid, invalid) = manifest.dependency_names();
        for raw in invalid {
            warn!(%leaf, dependency = %raw, "Skipping invalid dependency name");
        }
        valid
    }

    fn is_installed(&self, leaf: &LeafName) -> bool {
        self.inspector.is_installed(leaf, self.project)
    }
}
