//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `leafkit-adapters` crate provides implementations.

use std::path::Path;

use crate::error::LeafkitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `leafkit_adapters::filesystem::LocalFilesystem` (production)
/// - `leafkit_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Queries (`exists`, `is_dir`, `is_file`) never fail; an unreadable path
///   simply does not exist as far as callers are concerned
/// - Paths are used as given; callers join them onto an explicit root
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> LeafkitResult<String>;

    /// Names of the immediate child directories of `path`, unsorted.
    fn read_dir_names(&self, path: &Path) -> LeafkitResult<Vec<String>>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> LeafkitResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> LeafkitResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> LeafkitResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> LeafkitResult<()>;
}

/// Port for copying a directory tree.
///
/// Copies every entry under `src` into `dst`, hidden ones included, creating
/// directories as needed and overwriting same-named files. Entries already
/// in `dst` but absent from `src` are left alone.
pub trait FileMaterializer: Send + Sync {
    fn copy_tree(&self, src: &Path, dst: &Path) -> LeafkitResult<()>;
}
