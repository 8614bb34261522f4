//! Path conventions shared by the catalog and project trees.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::LeafName;

/// Where things live, on both sides of an installation.
///
/// ```text
/// <catalog>/                       <project>/
/// ├── leaf-auth/                   ├── .leafkit/installed.json
/// │   ├── leaf.json                └── src/
/// │   └── models/User.ts               ├── models/Account.ts
/// └── leaf-mail/                       └── leaf-auth/       (installed copy)
///     └── leaf.json                        ├── leaf.json
///                                          └── models/User.ts
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafLayout {
    /// Required directory-name prefix that marks a directory as a leaf.
    pub prefix: String,
    /// Manifest file name at the root of every leaf directory.
    pub manifest_file: String,
    /// The project's source root, relative to the project root.
    pub source_dir: PathBuf,
    /// Model directories under the source root, searched in order.
    pub model_dirs: Vec<PathBuf>,
    /// Model file extensions, without the dot, tried in order.
    pub model_extensions: Vec<String>,
    /// Model directory inside an installed leaf.
    pub leaf_models_dir: PathBuf,
    /// Install ledger, relative to the project root.
    pub ledger_path: PathBuf,
}

impl Default for LeafLayout {
    fn default() -> Self {
        Self {
            prefix: "leaf-".into(),
            manifest_file: "leaf.json".into(),
            source_dir: PathBuf::from("src"),
            model_dirs: vec![PathBuf::from("models"), PathBuf::from("model")],
            model_extensions: vec!["ts".into(), "js".into()],
            leaf_models_dir: PathBuf::from("models"),
            ledger_path: PathBuf::from(".leafkit").join("installed.json"),
        }
    }
}

impl LeafLayout {
    /// Whether a directory name follows the leaf naming convention.
    pub fn is_leaf_dir_name(&self, name: &str) -> bool {
        name.starts_with(&self.prefix) && name.len() > self.prefix.len()
    }

    pub fn source_root(&self, project: &Path) -> PathBuf {
        project.join(&self.source_dir)
    }

    /// Where `leaf` is (or would be) materialised inside `project`.
    pub fn installed_dir(&self, project: &Path, leaf: &LeafName) -> PathBuf {
        self.source_root(project).join(leaf.as_str())
    }

    pub fn ledger_file(&self, project: &Path) -> PathBuf {
        project.join(&self.ledger_path)
    }

    /// `<dir>/<name>.<ext>` for every configured model extension.
    pub fn model_files(&self, dir: &Path, name: &str) -> Vec<PathBuf> {
        self.model_extensions
            .iter()
            .map(|ext| dir.join(format!("{name}.{ext}")))
            .collect()
    }
}
