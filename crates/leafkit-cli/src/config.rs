//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the [`LeafLayout`]
//! and the catalog root taken from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--catalog`, `--no-color`; applied at the call-site)
//! 2. Environment variables, `LEAFKIT_` prefix, `__` between sections
//!    (`LEAFKIT_CATALOG__ROOT=/srv/leafs`)
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use leafkit_core::domain::LeafLayout;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "LEAFKIT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where leafs are discovered.
    pub catalog: CatalogConfig,
    /// Naming and path conventions on both sides of an install.
    pub layout: LeafLayout,
    /// Dependency planning.
    pub resolver: ResolverConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog directory; relative paths resolve against the working directory.
    pub root: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("leafs"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Install cyclic dependency sets in best-effort order instead of refusing.
    pub allow_cycles: bool,
    /// Refuse installs whose requirements the project does not meet.
    pub enforce_requirements: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            allow_cycles: false,
            enforce_requirements: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `LEAFKIT_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_layered(config_file, true, Self::environment())
    }

    /// Like [`load`](Self::load), but a missing `config_file` falls back to
    /// defaults. For commands that create or locate the file.
    pub fn load_lenient(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_layered(config_file, false, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn load_layered(
        config_file: Option<&Path>,
        explicit_required: bool,
        env: Environment,
    ) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), explicit_required),
            None => (Self::config_path(), false),
        };

        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise default config")?;

        Config::builder()
            .add_source(defaults)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// The file `init` writes and `config path` reports: the `--config`
    /// value when given, else the default location.
    pub fn resolve_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.leafkit.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "leafkit", "leafkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".leafkit.toml"))
    }

    /// Catalog root after applying the `--catalog` override.
    pub fn catalog_root(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .unwrap_or_else(|| self.catalog.root.clone())
    }
}
