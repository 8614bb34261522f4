//! `leafkit config`: inspect the effective configuration.

use serde_json::Value;

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: ConfigCommands,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(config, &key)?;
            if output.format() == OutputFormat::Json {
                output.json(&value)?;
            } else {
                output.print(&render(&value))?;
            }
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                return output.json(config);
            }
            let serialised = toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(
                &AppConfig::resolve_path(global.config.as_deref())
                    .display()
                    .to_string(),
            )?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

/// Look up a dotted key such as `resolver.allow_cycles`.
fn get_config_value(config: &AppConfig, key: &str) -> CliResult<Value> {
    let root = serde_json::to_value(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })?;

    key.split('.')
        .try_fold(&root, |node, part| node.get(part))
        .cloned()
        .ok_or_else(|| CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        })
}

/// Strings bare, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_nested_keys() {
        let cfg = AppConfig::default();
        assert_eq!(render(&get_config_value(&cfg, "catalog.root").unwrap()), "leafs");
        assert_eq!(
            render(&get_config_value(&cfg, "resolver.allow_cycles").unwrap()),
            "false"
        );
        assert_eq!(render(&get_config_value(&cfg, "layout.prefix").unwrap()), "leaf-");
    }

    #[test]
    fn get_section_renders_json() {
        let cfg = AppConfig::default();
        let value = get_config_value(&cfg, "output").unwrap();
        assert_eq!(value["format"], "auto");
        assert!(render(&value).starts_with('{'));
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        let err = get_config_value(&cfg, "does.not.exist").unwrap_err();
        assert!(matches!(err, CliError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 4);
    }
}
