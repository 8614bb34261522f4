//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use leafkit_core::{
    application::{
        ApplicationError,
        ports::{FileMaterializer, Filesystem},
    },
    error::LeafkitResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep one handle for
/// assertions and give another to the services.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn add_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Add a file and all its parent directories (testing helper).
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) -> &Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.add_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Add a directory and all its parents (testing helper).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.add_dir_all(path.as_ref());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    fn read(&self) -> LeafkitResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }

    fn write(&self) -> LeafkitResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(path: &Path, operation: &str, what: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {} does not exist", operation, what),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path))
            .unwrap_or(false)
    }

    fn read_to_string(&self, path: &Path) -> LeafkitResult<String> {
        let inner = self.read()?;
        match inner.files.get(path) {
            Some(content) => Ok(content.clone()),
            None => Err(missing(path, "read file", "file").into()),
        }
    }

    fn read_dir_names(&self, path: &Path) -> LeafkitResult<Vec<String>> {
        let inner = self.read()?;
        if !inner.directories.contains(path) {
            return Err(missing(path, "list directory", "directory").into());
        }

        Ok(inner
            .directories
            .iter()
            .filter(|dir| dir.parent() == Some(path))
            .filter_map(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> LeafkitResult<()> {
        self.write()?.add_dir_all(path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> LeafkitResult<()> {
        let mut inner = self.write()?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(missing(path, "write file", "parent directory").into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> LeafkitResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(path) {
            return Err(missing(path, "remove directory", "directory").into());
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> LeafkitResult<()> {
        match self.write()?.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(missing(path, "remove file", "file").into()),
        }
    }
}

impl FileMaterializer for MemoryFilesystem {
    fn copy_tree(&self, src: &Path, dst: &Path) -> LeafkitResult<()> {
        let mut inner = self.write()?;
        if !inner.directories.contains(src) {
            return Err(missing(src, "copy", "source directory").into());
        }

        let directories: Vec<PathBuf> = inner
            .directories
            .iter()
            .filter_map(|p| p.strip_prefix(src).ok())
            .map(|relative| dst.join(relative))
            .collect();
        let files: Vec<(PathBuf, String)> = inner
            .files
            .iter()
            .filter_map(|(p, content)| {
                p.strip_prefix(src)
                    .ok()
                    .map(|relative| (dst.join(relative), content.clone()))
            })
            .collect();

        inner.add_dir_all(dst);
        for dir in directories {
            inner.add_dir_all(&dir);
        }
        for (path, content) in files {
            inner.files.insert(path, content);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_tree_copies_everything_under_source() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/catalog/leaf-a/leaf.json", "{}")
            .add_file("/catalog/leaf-a/.hidden", "h")
            .add_file("/catalog/leaf-a/models/User.ts", "u")
            .add_dir("/catalog/leaf-a/empty")
            .add_file("/catalog/leaf-ab/other.txt", "not mine");

        fs.copy_tree(Path::new("/catalog/leaf-a"), Path::new("/app/src/leaf-a"))
            .unwrap();

        assert!(fs.is_file(Path::new("/app/src/leaf-a/.hidden")));
        assert!(fs.is_dir(Path::new("/app/src/leaf-a/empty")));
        assert_eq!(
            fs.read_file(Path::new("/app/src/leaf-a/models/User.ts")),
            Some("u".to_string())
        );
        assert!(!fs.exists(Path::new("/app/src/leaf-a/other.txt")));
    }

    #[test]
    fn remove_dir_all_drops_subtree_only() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/app/src/leaf-a/models/User.ts", "u")
            .add_file("/app/src/leaf-b/leaf.json", "{}");

        fs.remove_dir_all(Path::new("/app/src/leaf-a")).unwrap();

        assert!(!fs.exists(Path::new("/app/src/leaf-a")));
        assert!(!fs.exists(Path::new("/app/src/leaf-a/models")));
        assert!(fs.is_file(Path::new("/app/src/leaf-b/leaf.json")));
        assert!(fs.remove_dir_all(Path::new("/app/src/leaf-a")).is_err());
    }

    #[test]
    fn remove_file_leaves_directories_alone() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/app/src/leaf-a", "stray").add_dir("/app/src/leaf-b");

        fs.remove_file(Path::new("/app/src/leaf-a")).unwrap();

        assert!(!fs.exists(Path::new("/app/src/leaf-a")));
        assert!(fs.is_dir(Path::new("/app/src")));
        assert!(fs.remove_file(Path::new("/app/src/leaf-b")).is_err());
        assert!(fs.is_dir(Path::new("/app/src/leaf-b")));
    }

    #[test]
    fn read_dir_names_lists_direct_child_directories() {
        let fs = MemoryFilesystem::new();
        fs.add_dir("/catalog/leaf-a/models")
            .add_dir("/catalog/leaf-b")
            .add_file("/catalog/README.md", "");

        let mut names = fs.read_dir_names(Path::new("/catalog")).unwrap();
        names.sort();
        assert_eq!(names, ["leaf-a", "leaf-b"]);
        assert!(fs.read_dir_names(Path::new("/nowhere")).is_err());
    }

    #[test]
    fn write_file_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/a/b.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/a")).unwrap();
        fs.write_file(Path::new("/a/b.txt"), "x").unwrap();
        assert_eq!(fs.list_files(), vec![PathBuf::from("/a/b.txt")]);
    }
}
