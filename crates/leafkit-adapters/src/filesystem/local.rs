//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use leafkit_core::{
    application::{
        ApplicationError,
        ports::{FileMaterializer, Filesystem},
    },
    error::{LeafkitError, LeafkitResult},
};
use tracing::debug;
use walkdir::WalkDir;

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> LeafkitResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_dir_names(&self, path: &Path) -> LeafkitResult<Vec<String>> {
        let entries = std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            // Follows symlinks, so a linked leaf counts as a directory.
            if !entry.path().is_dir() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn create_dir_all(&self, path: &Path) -> LeafkitResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> LeafkitResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn remove_dir_all(&self, path: &Path) -> LeafkitResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> LeafkitResult<()> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

impl FileMaterializer for LocalFilesystem {
    fn copy_tree(&self, src: &Path, dst: &Path) -> LeafkitResult<()> {
        if !src.is_dir() {
            return Err(ApplicationError::FilesystemError {
                path: src.to_path_buf(),
                reason: "Failed to copy: source is not a directory".into(),
            }
            .into());
        }

        let mut copied = 0usize;
        for walk_entry in WalkDir::new(src).follow_links(true) {
            let entry = walk_entry.map_err(|e| {
                let path = e.path().unwrap_or(src).to_path_buf();
                let reason = format!("Failed to walk: {}", e);
                LeafkitError::from(ApplicationError::FilesystemError { path, reason })
            })?;

            let relative = entry
                .path()
                .strip_prefix(src)
                .map_err(|e| map_io_error(entry.path(), io::Error::other(e), "copy"))?;
            let target = dst.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)
                    .map_err(|e| map_io_error(&target, e, "create directory"))?;
            } else {
                std::fs::copy(entry.path(), &target)
                    .map_err(|e| map_io_error(&target, e, "copy file"))?;
                copied += 1;
            }
        }

        debug!(src = %src.display(), dst = %dst.display(), files = copied, "Tree copied");
        Ok(())
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> LeafkitError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
