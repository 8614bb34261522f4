//! Leaf Catalog - what can be installed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::ports::Filesystem;
use crate::domain::{LeafLayout, LeafName};

/// Read-only view of the catalog root.
///
/// Every sub-directory whose name carries the layout prefix is a leaf. A
/// missing catalog is not an error: it simply offers nothing.
#[derive(Clone)]
pub struct LeafCatalog {
    fs: Arc<dyn Filesystem>,
    root: PathBuf,
    layout: LeafLayout,
}

impl LeafCatalog {
    pub fn new(fs: Arc<dyn Filesystem>, root: impl Into<PathBuf>, layout: LeafLayout) -> Self {
        Self {
            fs,
            root: root.into(),
            layout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Leaf names in the catalog, sorted ascending.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn list_available(&self) -> Vec<LeafName> {
        if !self.fs.is_dir(&self.root) {
            warn!("Catalog root does not exist");
            return Vec::new();
        }

        let entries = match self.fs.read_dir_names(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Catalog root cannot be listed");
                return Vec::new();
            }
        };

        let mut leafs: Vec<LeafName> = entries
            .into_iter()
            .filter(|name| self.layout.is_leaf_dir_name(name))
            .filter_map(|name| LeafName::parse(name).ok())
            .collect();
        leafs.sort();

        debug!(count = leafs.len(), "Catalog listed");
        leafs
    }

    /// The leaf has a directory in the catalog.
    pub fn exists(&self, name: &LeafName) -> bool {
        self.fs.is_dir(&self.leaf_dir(name))
    }

    pub fn leaf_dir(&self, name: &LeafName) -> PathBuf {
        self.root.join(name.as_str())
    }
}
