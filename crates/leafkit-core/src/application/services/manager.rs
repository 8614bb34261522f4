//! One handle over every service, wired to the same ports.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    ports::{FileMaterializer, Filesystem},
    services::{
        DependencyResolver, InstallService, LeafCatalog, LedgerStore, ManifestStore,
        ProjectInspector, RequirementChecker, UpdateTracker,
    },
};
use crate::domain::LeafLayout;

/// Facade used by the CLI.
///
/// All services share one filesystem, one catalog root and one layout, so
/// they always agree on where things are.
#[derive(Clone)]
pub struct LeafManager {
    catalog: LeafCatalog,
    manifests: ManifestStore,
    ledger: LedgerStore,
    inspector: ProjectInspector,
    requirements: RequirementChecker,
    resolver: DependencyResolver,
    updates: UpdateTracker,
    installer: InstallService,
    layout: LeafLayout,
}

impl LeafManager {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        materializer: Arc<dyn FileMaterializer>,
        catalog_root: impl Into<PathBuf>,
        layout: LeafLayout,
    ) -> Self {
        let catalog_root = catalog_root.into();
        let catalog = LeafCatalog::new(fs.clone(), catalog_root.clone(), layout.clone());
        let manifests = ManifestStore::new(fs.clone(), catalog_root.clone(), layout.clone());
        let ledger = LedgerStore::new(fs.clone(), layout.clone());
        let inspector =
            ProjectInspector::new(fs.clone(), manifests.clone(), ledger.clone(), layout.clone());

        Self {
            requirements: RequirementChecker::new(
                fs.clone(),
                manifests.clone(),
                inspector.clone(),
                layout.clone(),
            ),
            resolver: DependencyResolver::new(manifests.clone(), inspector.clone()),
            updates: UpdateTracker::new(manifests.clone(), inspector.clone()),
            installer: InstallService::new(fs, materializer, catalog_root, layout.clone()),
            catalog,
            manifests,
            ledger,
            inspector,
            layout,
        }
    }

    pub fn catalog(&self) -> &LeafCatalog {
        &self.catalog
    }

    pub fn manifests(&self) -> &ManifestStore {
        &self.manifests
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn inspector(&self) -> &ProjectInspector {
        &self.inspector
    }

    pub fn requirements(&self) -> &RequirementChecker {
        &self.requirements
    }

    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    pub fn updates(&self) -> &UpdateTracker {
        &self.updates
    }

    pub fn installer(&self) -> &InstallService {
        &self.installer
    }

    pub fn layout(&self) -> &LeafLayout {
        &self.layout
    }
}
