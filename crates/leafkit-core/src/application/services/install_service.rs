//! Install Service - the only writer of project trees.
//!
//! Single-leaf operations:
//! 1. `install`: wipe any previous copy, then materialise the catalog tree
//! 2. `remove`: delete the leaf directory
//! 3. `update`: re-install when the catalog is newer
//!
//! `install_with_dependencies` sequences these along the resolved order,
//! after the requirement gate has passed for the whole plan.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileMaterializer, Filesystem},
        services::{
            DependencyResolver, LeafCatalog, LedgerStore, ManifestStore, ProjectInspector,
            RequirementChecker, UpdateTracker,
        },
    },
    domain::{
        BlockedLeaf, DomainError, InstallOutcome, InstallRecord, InstallReport, LeafLayout,
        LeafName, resolution,
    },
    error::LeafkitResult,
};

/// How strict [`InstallService::install_with_dependencies`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallPolicy {
    /// Install along a partial order even when the graph has cycles.
    pub allow_cycles: bool,
    /// Refuse to start while any planned leaf has unmet requirements.
    pub enforce_requirements: bool,
}

impl Default for InstallPolicy {
    fn default() -> Self {
        Self {
            allow_cycles: false,
            enforce_requirements: true,
        }
    }
}

#[derive(Clone)]
pub struct InstallService {
    fs: Arc<dyn Filesystem>,
    materializer: Arc<dyn FileMaterializer>,
    catalog: LeafCatalog,
    manifests: ManifestStore,
    inspector: ProjectInspector,
    ledger: LedgerStore,
    resolver: DependencyResolver,
    checker: RequirementChecker,
    updates: UpdateTracker,
    layout: LeafLayout,
}

impl InstallService {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        materializer: Arc<dyn FileMaterializer>,
        catalog_root: impl Into<PathBuf>,
        layout: LeafLayout,
    ) -> Self {
        let catalog_root = catalog_root.into();
        let catalog = LeafCatalog::new(fs.clone(), catalog_root.clone(), layout.clone());
        let manifests = ManifestStore::new(fs.clone(), catalog_root, layout.clone());
        let ledger = LedgerStore::new(fs.clone(), layout.clone());
        let inspector =
            ProjectInspector::new(fs.clone(), manifests.clone(), ledger.clone(), layout.clone());

        Self {
            resolver: DependencyResolver::new(manifests.clone(), inspector.clone()),
            checker: RequirementChecker::new(
                fs.clone(),
                manifests.clone(),
                inspector.clone(),
                layout.clone(),
            ),
            updates: UpdateTracker::new(manifests.clone(), inspector.clone()),
            fs,
            materializer,
            catalog,
            manifests,
            inspector,
            ledger,
            layout,
        }
    }

    /// Copy one leaf from the catalog into `<project>/src/<name>`.
    ///
    /// An existing copy is deleted first, so the result never mixes old and
    /// new files. Failures are reported in the outcome, never as `Err`.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn install(&self, name: &LeafName, project: &Path) -> InstallOutcome {
        let destination = self.layout.installed_dir(project, name);

        if !self.catalog.exists(name) {
            let err = ApplicationError::LeafNotInCatalog {
                name: name.to_string(),
            };
            warn!("{}", err);
            return InstallOutcome::failed(name.clone(), destination, err.to_string());
        }

        if let Err(e) = self.materialize(&self.catalog.leaf_dir(name), &destination) {
            warn!(error = %e, "Install failed");
            return InstallOutcome::failed(name.clone(), destination, e.to_string());
        }

        let version = self
            .manifests
            .read_catalog_manifest(name)
            .map(|m| m.version)
            .unwrap_or_default();
        info!(version = %version, destination = %destination.display(), "Leaf installed");

        if let Err(e) = self
            .ledger
            .record(project, InstallRecord::new(name.clone(), version))
        {
            warn!(error = %e, "Install ledger not updated");
        }

        InstallOutcome::installed(name.clone(), destination)
    }

    fn materialize(&self, source: &Path, destination: &Path) -> LeafkitResult<()> {
        if self.fs.is_dir(destination) {
            info!("Removing previous copy");
            self.fs.remove_dir_all(destination)?;
        } else if self.fs.exists(destination) {
            info!("Removing stray file in place of the leaf directory");
            self.fs.remove_file(destination)?;
        }
        if let Some(parent) = destination.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.materializer.copy_tree(source, destination)
    }

    /// Delete the leaf's directory. `Ok(false)` when there was nothing to
    /// delete, in which case the project is not touched at all.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn remove(&self, name: &LeafName, project: &Path) -> LeafkitResult<bool> {
        let destination = self.layout.installed_dir(project, name);
        if !self.fs.is_dir(&destination) {
            return Ok(false);
        }

        self.fs.remove_dir_all(&destination)?;
        info!("Leaf removed");

        if let Err(e) = self.ledger.forget(project, name) {
            warn!(error = %e, "Install ledger not updated");
        }
        Ok(true)
    }

    /// Re-install `name` when the catalog carries a newer version.
    ///
    /// A leaf that is up to date, or whose versions cannot be compared, is
    /// left as is and reported as skipped.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn update(&self, name: &LeafName, project: &Path) -> InstallOutcome {
        let destination = self.layout.installed_dir(project, name);
        if !self.inspector.is_installed(name, project) {
            let err = ApplicationError::LeafNotInstalled {
                name: name.to_string(),
            };
            return InstallOutcome::failed(name.clone(), destination, err.to_string());
        }

        match self.updates.check_update(name, project) {
            Some(info) if info.has_update => {
                info!(
                    from = %info.installed_version,
                    to = %info.available_version,
                    "Updating leaf"
                );
                self.install(name, project)
            }
            _ => InstallOutcome::skipped(name.clone(), destination),
        }
    }

    /// Install `name` and everything it needs, dependencies first.
    pub fn install_with_dependencies(
        &self,
        name: &LeafName,
        project: &Path,
        policy: InstallPolicy,
    ) -> LeafkitResult<InstallReport> {
        self.install_with_progress(name, project, policy, |_, _| {})
    }

    /// [`install_with_dependencies`](Self::install_with_dependencies),
    /// calling `progress(leaf, index)` before each leaf is copied.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn install_with_progress<F>(
        &self,
        name: &LeafName,
        project: &Path,
        policy: InstallPolicy,
        mut progress: F,
    ) -> LeafkitResult<InstallReport>
    where
        F: FnMut(&LeafName, usize),
    {
        if !self.catalog.exists(name) {
            return Err(ApplicationError::LeafNotInCatalog {
                name: name.to_string(),
            }
            .into());
        }

        let resolved = self.resolver.resolve(name, project);
        match resolved.cycles.first() {
            Some(cycle) if !policy.allow_cycles => {
                return Err(DomainError::DependencyCycle {
                    cycle: resolution::format_cycle(cycle),
                }
                .into());
            }
            _ => {}
        }

        if let Some(absent) = resolved.order.iter().find(|leaf| !self.catalog.exists(leaf)) {
            return Err(ApplicationError::LeafNotInCatalog {
                name: absent.to_string(),
            }
            .into());
        }

        let mut report = InstallReport {
            order: resolved.order,
            cycles: resolved.cycles,
            ..Default::default()
        };

        if policy.enforce_requirements {
            report.blocked = self.first_blocked(&report.order, project);
            if let Some(blocked) = &report.blocked {
                warn!(blocked = %blocked.name, missing = blocked.missing.len(), "Requirements unmet");
                return Ok(report);
            }
        }

        info!(count = report.order.len(), "Installing");
        for (index, leaf) in report.order.iter().enumerate() {
            progress(leaf, index);
            let outcome = self.install(leaf, project);
            let failed = !outcome.success;
            report.outcomes.push(outcome);
            if failed {
                break;
            }
        }

        Ok(report)
    }

    /// First leaf in `order` with requirements that neither the project nor
    /// an earlier leaf in `order` satisfies.
    fn first_blocked(&self, order: &[LeafName], project: &Path) -> Option<BlockedLeaf> {
        let mut planned: Vec<PathBuf> = Vec::with_capacity(order.len());
        for leaf in order {
            let missing = self.checker.check_missing_planned(leaf, project, &planned);
            if !missing.is_empty() {
                return Some(BlockedLeaf {
                    name: leaf.clone(),
                    missing,
                });
            }
            planned.push(self.catalog.leaf_dir(leaf));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{MockFs, MockMaterializer};

    fn leaf(name: &str) -> LeafName {
        LeafName::parse(name).unwrap()
    }

    /// A catalog holding `leaf-a` (no manifest) and an empty project.
    fn fs_with_catalog_leaf() -> MockFs {
        let mut fs = MockFs::new();
        fs.expect_is_dir()
            .returning(|p| p == Path::new("/catalog/leaf-a"));
        fs.expect_is_file().returning(|_| false);
        fs.expect_exists().returning(|_| false);
        fs
    }

    #[test]
    fn copy_failure_is_an_outcome_not_an_error() {
        let mut fs = fs_with_catalog_leaf();
        fs.expect_create_dir_all().returning(|_| Ok(()));

        let mut copier = MockMaterializer::new();
        copier.expect_copy_tree().times(1).returning(|_, dst| {
            Err(ApplicationError::FilesystemError {
                path: dst.to_path_buf(),
                reason: "Failed to copy: disk full".into(),
            }
            .into())
        });

        let service = InstallService::new(
            Arc::new(fs),
            Arc::new(copier),
            "/catalog",
            LeafLayout::default(),
        );
        let outcome = service.install(&leaf("leaf-a"), Path::new("/app"));

        assert!(!outcome.success);
        assert_eq!(outcome.destination, PathBuf::from("/app/src/leaf-a"));
        assert!(outcome.error.unwrap().contains("disk full"));
    }

    #[test]
    fn ledger_failure_does_not_fail_install() {
        let mut fs = fs_with_catalog_leaf();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|p, _| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });

        let mut copier = MockMaterializer::new();
        copier
            .expect_copy_tree()
            .withf(|src, dst| {
                src.to_path_buf() == PathBuf::from("/catalog/leaf-a")
                    && dst.to_path_buf() == PathBuf::from("/app/src/leaf-a")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = InstallService::new(
            Arc::new(fs),
            Arc::new(copier),
            "/catalog",
            LeafLayout::default(),
        );
        assert!(service.install(&leaf("leaf-a"), Path::new("/app")).success);
    }

    #[test]
    fn stray_file_at_destination_is_replaced() {
        let mut fs = MockFs::new();
        fs.expect_is_dir()
            .returning(|p| p == Path::new("/catalog/leaf-a"));
        fs.expect_is_file()
            .returning(|p| p == Path::new("/app/src/leaf-a"));
        fs.expect_exists()
            .returning(|p| p == Path::new("/app/src/leaf-a"));
        fs.expect_remove_dir_all().never();
        fs.expect_remove_file()
            .withf(|p| p == Path::new("/app/src/leaf-a"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut copier = MockMaterializer::new();
        copier.expect_copy_tree().times(1).returning(|_, _| Ok(()));

        let service = InstallService::new(
            Arc::new(fs),
            Arc::new(copier),
            "/catalog",
            LeafLayout::default(),
        );
        let outcome = service.install(&leaf("leaf-a"), Path::new("/app"));

        assert!(outcome.success, "{:?}", outcome.error);
    }

    #[test]
    fn unknown_leaf_is_not_copied() {
        let mut copier = MockMaterializer::new();
        copier.expect_copy_tree().never();

        let service = InstallService::new(
            Arc::new(fs_with_catalog_leaf()),
            Arc::new(copier),
            "/catalog",
            LeafLayout::default(),
        );
        let outcome = service.install(&leaf("leaf-zzz"), Path::new("/app"));
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("not found in catalog"));
    }

    #[test]
    fn failing_delete_is_returned() {
        let mut fs = MockFs::new();
        fs.expect_is_dir().returning(|_| true);
        fs.expect_remove_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "busy".into(),
            }
            .into())
        });

        let service = InstallService::new(
            Arc::new(fs),
            Arc::new(MockMaterializer::new()),
            "/catalog",
            LeafLayout::default(),
        );
        assert!(service.remove(&leaf("leaf-a"), Path::new("/app")).is_err());
    }

    #[test]
    fn default_policy_is_strict() {
        let policy = InstallPolicy::default();
        assert!(!policy.allow_cycles);
        assert!(policy.enforce_requirements);
    }
}
