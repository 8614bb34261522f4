//! `leafkit init`: write a configuration file with the defaults.

use std::path::Path;

use crate::{
    cli::{GlobalArgs, InitArgs},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, global: &GlobalArgs, output: &OutputManager) -> CliResult<()> {
    let path = AppConfig::resolve_path(global.config.as_deref());
    if write_default(&path, args.force)? {
        output.success(&format!("Configuration created at {}", path.display()))?;
    } else {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
    }
    Ok(())
}

/// `Ok(false)` when the file exists and `force` is off.
fn write_default(path: &Path, force: bool) -> CliResult<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let toml = toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    tracing::info!(path = %path.display(), "Config written");
    Ok(true)
}
