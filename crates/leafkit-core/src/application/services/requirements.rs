//! Requirement Checker - does the host project have what a leaf expects?
//!
//! A requirement with an explicit `path` is checked there and nowhere else.
//! Otherwise candidates are tried in a fixed order and the first hit wins:
//!
//! | kind        | candidates                                                         |
//! |-------------|--------------------------------------------------------------------|
//! | `model`     | `src/models/<n>.ts`, `src/models/<n>.js`, `src/model/<n>.ts`, ...  |
//! |             | then `src/<leaf>/models/<n>.{ts,js}` for every installed leaf      |
//! | `file`      | `src/<n>`, then `<n>`                                              |
//! | `directory` | `src/<n>`, then `<n>`                                              |
//!
//! A candidate matches when anything exists there; the entry type is not
//! checked for any kind.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ports::Filesystem;
use crate::application::services::{ManifestStore, ProjectInspector};
use crate::domain::{LeafLayout, LeafName, Requirement, RequirementCheckResult, RequirementKind};

#[derive(Clone)]
pub struct RequirementChecker {
    fs: Arc<dyn Filesystem>,
    manifests: ManifestStore,
    inspector: ProjectInspector,
    layout: LeafLayout,
}

impl RequirementChecker {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        manifests: ManifestStore,
        inspector: ProjectInspector,
        layout: LeafLayout,
    ) -> Self {
        Self {
            fs,
            manifests,
            inspector,
            layout,
        }
    }

    /// Where `requirement` is looked for, in search order.
    pub fn candidate_paths(&self, requirement: &Requirement, project: &Path) -> Vec<PathBuf> {
        if let Some(explicit) = &requirement.path {
            return vec![project.join(explicit)];
        }

        let source = self.layout.source_root(project);
        match requirement.kind {
            RequirementKind::Model => {
                let mut candidates: Vec<PathBuf> = self
                    .layout
                    .model_dirs
                    .iter()
                    .flat_map(|dir| self.layout.model_files(&source.join(dir), &requirement.name))
                    .collect();

                for leaf in self.inspector.installed_names(project) {
                    let models = self
                        .layout
                        .installed_dir(project, &leaf)
                        .join(&self.layout.leaf_models_dir);
                    candidates.extend(self.layout.model_files(&models, &requirement.name));
                }
                candidates
            }
            RequirementKind::File | RequirementKind::Directory => {
                vec![source.join(&requirement.name), project.join(&requirement.name)]
            }
        }
    }

    pub fn check(&self, requirement: &Requirement, project: &Path) -> RequirementCheckResult {
        self.check_with(requirement, project, &[])
    }

    /// Every requirement the catalog manifest of `name` declares. No manifest
    /// means no requirements.
    #[instrument(skip_all, fields(leaf = %name, project = %project.display()))]
    pub fn check_all(&self, name: &LeafName, project: &Path) -> Vec<RequirementCheckResult> {
        let Some(manifest) = self.manifests.read_catalog_manifest(name) else {
            return Vec::new();
        };

        manifest
            .requirements
            .into_iter()
            .map(|req| {
                let result = self.check(&req, project);
                debug!(
                    kind = %result.requirement.kind,
                    requirement = %result.requirement.name,
                    satisfied = result.satisfied,
                    "Requirement checked"
                );
                result
            })
            .collect()
    }

    /// The unsatisfied subset of [`check_all`](Self::check_all).
    pub fn check_missing(&self, name: &LeafName, project: &Path) -> Vec<RequirementCheckResult> {
        self.check_all(name, project)
            .into_iter()
            .filter(|r| !r.satisfied)
            .collect()
    }

    /// Like [`check_missing`](Self::check_missing), but models shipped by the
    /// `planned` leafs (catalog directories about to be installed) count as
    /// present.
    pub fn check_missing_planned(
        &self,
        name: &LeafName,
        project: &Path,
        planned: &[PathBuf],
    ) -> Vec<RequirementCheckResult> {
        let Some(manifest) = self.manifests.read_catalog_manifest(name) else {
            return Vec::new();
        };

        manifest
            .requirements
            .into_iter()
            .map(|req| self.check_with(&req, project, planned))
            .filter(|r| !r.satisfied)
            .collect()
    }

    fn check_with(
        &self,
        requirement: &Requirement,
        project: &Path,
        planned: &[PathBuf],
    ) -> RequirementCheckResult {
        let mut candidates = self.candidate_paths(requirement, project);
        if requirement.path.is_none() && requirement.kind == RequirementKind::Model {
            for leaf_dir in planned {
                let models = leaf_dir.join(&self.layout.leaf_models_dir);
                candidates.extend(self.layout.model_files(&models, &requirement.name));
            }
        }

        match candidates.into_iter().find(|path| self.fs.exists(path)) {
            Some(found) => RequirementCheckResult::satisfied(requirement.clone(), found),
            None => RequirementCheckResult::unsatisfied(requirement.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::LedgerStore;
    use crate::application::services::test_support::MockFs;

    /// Checker over a mock in which only `present` exists, as a file.
    fn checker_with_file(present: &'static str) -> RequirementChecker {
        let mut fs = MockFs::new();
        // No source root, so no installed leafs.
        fs.expect_is_dir().returning(|_| false);
        fs.expect_is_file()
            .returning(move |p| p == Path::new(present));
        fs.expect_exists()
            .returning(move |p| p == Path::new(present));

        let fs: Arc<dyn Filesystem> = Arc::new(fs);
        let layout = LeafLayout::default();
        let manifests = ManifestStore::new(fs.clone(), "/catalog", layout.clone());
        let inspector = ProjectInspector::new(
            fs.clone(),
            manifests.clone(),
            LedgerStore::new(fs.clone(), layout.clone()),
            layout.clone(),
        );
        RequirementChecker::new(fs, manifests, inspector, layout)
    }

    #[test]
    fn model_candidates_follow_dirs_then_extensions() {
        let checker = checker_with_file("/nowhere");
        let candidates = checker.candidate_paths(&Requirement::model("User"), Path::new("/app"));
        assert_eq!(
            candidates,
            [
                "/app/src/models/User.ts",
                "/app/src/models/User.js",
                "/app/src/model/User.ts",
                "/app/src/model/User.js",
            ]
            .map(PathBuf::from)
        );
    }

    #[test]
    fn alternate_model_dir_satisfies() {
        let checker = checker_with_file("/app/src/model/User.js");
        let result = checker.check(&Requirement::model("User"), Path::new("/app"));
        assert!(result.satisfied);
        assert_eq!(
            result.found_path.as_deref(),
            Some(Path::new("/app/src/model/User.js"))
        );
    }

    #[test]
    fn explicit_path_is_the_only_candidate() {
        let checker = checker_with_file("/app/src/config/auth.json");
        let req = Requirement::file("auth.json").at("config/auth.json");

        assert_eq!(
            checker.candidate_paths(&req, Path::new("/app")),
            vec![PathBuf::from("/app/config/auth.json")]
        );
        assert!(!checker.check(&req, Path::new("/app")).satisfied);
    }

    #[test]
    fn file_falls_back_to_project_root() {
        let checker = checker_with_file("/app/tsconfig.json");
        let result = checker.check(&Requirement::file("tsconfig.json"), Path::new("/app"));
        assert_eq!(
            result.found_path.as_deref(),
            Some(Path::new("/app/tsconfig.json"))
        );
    }

    #[test]
    fn a_file_satisfies_a_directory_requirement() {
        let checker = checker_with_file("/app/src/public");
        let result = checker.check(&Requirement::directory("public"), Path::new("/app"));
        assert!(result.satisfied);
        assert_eq!(result.found_path.as_deref(), Some(Path::new("/app/src/public")));
    }

    #[test]
    fn planned_leaf_models_count() {
        let checker = checker_with_file("/catalog/leaf-users/models/User.ts");
        let req = Requirement::model("User");

        assert!(!checker.check(&req, Path::new("/app")).satisfied);
        let planned = [PathBuf::from("/catalog/leaf-users")];
        let result = checker.check_with(&req, Path::new("/app"), &planned);
        assert!(result.satisfied);
    }
}
