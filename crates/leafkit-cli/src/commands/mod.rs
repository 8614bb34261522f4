//! Command handlers, one module per subcommand.
//!
//! Handlers that touch a project receive a [`Context`]: the wired
//! [`LeafManager`], the project root and the output sink.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use leafkit_adapters::LocalFilesystem;
use leafkit_core::domain::{DomainError, LeafName, Requirement};
use leafkit_core::prelude::LeafManager;

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod add;
pub mod check;
pub mod completions;
pub mod config;
pub mod deps;
pub mod info;
pub mod init;
pub mod list;
pub mod outdated;
pub mod remove;
pub mod update;

/// Everything a project command needs.
pub struct Context {
    pub manager: LeafManager,
    pub project: PathBuf,
    pub config: AppConfig,
    pub output: OutputManager,
}

impl Context {
    pub fn new(
        manager: LeafManager,
        project: impl Into<PathBuf>,
        config: AppConfig,
        output: OutputManager,
    ) -> Self {
        Self {
            manager,
            project: project.into(),
            config,
            output,
        }
    }

    /// Wire the services to the local disk, honouring `--catalog`.
    pub fn local(global: &GlobalArgs, config: AppConfig, output: OutputManager) -> Self {
        let fs = Arc::new(LocalFilesystem::new());
        let catalog_root = config.catalog_root(global.catalog.as_deref());
        tracing::debug!(
            catalog = %catalog_root.display(),
            project = %global.project.display(),
            "Using local filesystem"
        );
        let manager = LeafManager::new(fs.clone(), fs, catalog_root, config.layout.clone());
        Self::new(manager, global.project.clone(), config, output)
    }

    pub fn project(&self) -> &Path {
        &self.project
    }
}

/// Parse a leaf argument, keeping name problems apart from other errors.
pub fn parse_leaf(raw: &str) -> CliResult<LeafName> {
    LeafName::parse(raw).map_err(|e| match e {
        DomainError::InvalidLeafName { name, reason } => CliError::InvalidLeafName { name, reason },
        other => CliError::Core(other.into()),
    })
}

/// One-line description of a requirement, e.g. `model User` or
/// `file config.json (at config/app.json)`.
pub fn describe_requirement(requirement: &Requirement) -> String {
    match &requirement.path {
        Some(path) => format!(
            "{} {} (at {})",
            requirement.kind,
            requirement.name,
            path.display()
        ),
        None => format!("{} {}", requirement.kind, requirement.name),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A [`Context`] over an in-memory tree: catalog at `/catalog`, project
    //! at `/app`.

    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};
    use leafkit_adapters::MemoryFilesystem;
    use leafkit_core::domain::LeafLayout;

    pub const CATALOG: &str = "/catalog";
    pub const PROJECT: &str = "/app";

    pub fn context(fs: &MemoryFilesystem) -> Context {
        let shared = Arc::new(fs.clone());
        let manager = LeafManager::new(shared.clone(), shared, CATALOG, LeafLayout::default());
        let args = GlobalArgs {
            quiet: true,
            output_format: OutputFormat::Plain,
            ..GlobalArgs::for_tests()
        };
        let config = AppConfig::default();
        let output = OutputManager::new(&args, &config);
        Context::new(manager, PROJECT, config, output)
    }

    /// A catalog leaf with a manifest.
    pub fn catalog_leaf(fs: &MemoryFilesystem, name: &str, manifest: &str) {
        fs.add_file(format!("{CATALOG}/{name}/leaf.json"), manifest);
    }

    /// An installed copy with a manifest.
    pub fn installed_leaf(fs: &MemoryFilesystem, name: &str, manifest: &str) {
        fs.add_file(format!("{PROJECT}/src/{name}/leaf.json"), manifest);
    }
}
