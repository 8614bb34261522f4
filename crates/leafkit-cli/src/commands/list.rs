//! Implementation of the `leafkit list` command.

use chrono::Local;
use serde::Serialize;

use leafkit_core::domain::ManifestLookup;

use super::Context;
use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    error::CliResult,
};

/// One catalog entry as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRow {
    pub name: String,
    pub version: Option<String>,
    pub description: String,
    pub installed: bool,
    /// The manifest exists but could not be read.
    pub malformed: bool,
}

/// One installed leaf as shown by `list --installed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledRow {
    pub name: String,
    pub version: Option<String>,
    pub path: String,
    pub installed_at: Option<String>,
}

pub fn execute(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let format = if ctx.output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    if args.installed {
        render_installed(&installed_rows(ctx), format, ctx)
    } else {
        render_catalog(&catalog_rows(ctx), format, ctx)
    }
}

pub fn catalog_rows(ctx: &Context) -> Vec<CatalogRow> {
    let manager = &ctx.manager;
    manager
        .catalog()
        .list_available()
        .into_iter()
        .map(|name| {
            let lookup = manager.manifests().lookup_catalog(&name);
            let (version, description) = match lookup.as_found() {
                Some(m) => (Some(m.version.clone()), m.description.clone()),
                None => (None, String::new()),
            };
            CatalogRow {
                installed: manager.inspector().is_installed(&name, ctx.project()),
                malformed: matches!(lookup, ManifestLookup::Malformed { .. }),
                name: name.into_string(),
                version,
                description,
            }
        })
        .collect()
}

pub fn installed_rows(ctx: &Context) -> Vec<InstalledRow> {
    let manager = &ctx.manager;
    manager
        .inspector()
        .installed_names(ctx.project())
        .iter()
        .map(|name| {
            let state = manager.inspector().state(name, ctx.project());
            InstalledRow {
                name: state.name.to_string(),
                version: state.version().map(str::to_string),
                path: state.path.display().to_string(),
                installed_at: state
                    .record
                    .map(|r| r.installed_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
            }
        })
        .collect()
}

fn render_catalog(rows: &[CatalogRow], format: ListFormat, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;
    match format {
        ListFormat::Json => output.json(rows)?,
        ListFormat::List => {
            for row in rows {
                output.print(&row.name)?;
            }
        }
        ListFormat::Table => {
            if rows.is_empty() {
                output.warning(&format!(
                    "No leafs found in {}",
                    ctx.manager.catalog().root().display()
                ))?;
                return Ok(());
            }
            output.header("Available Leafs:")?;
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in rows {
                let version = match (&row.version, row.malformed) {
                    (_, true) => "invalid manifest".to_string(),
                    (Some(v), false) => v.clone(),
                    (None, false) => "-".to_string(),
                };
                let marker = if row.installed { " [installed]" } else { "" };
                output.print(&format!(
                    "  {:<width$}  {:<10}{}  {}",
                    row.name, version, marker, row.description
                ))?;
            }
        }
    }
    Ok(())
}

fn render_installed(rows: &[InstalledRow], format: ListFormat, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;
    match format {
        ListFormat::Json => output.json(rows)?,
        ListFormat::List => {
            for row in rows {
                output.print(&row.name)?;
            }
        }
        ListFormat::Table => {
            if rows.is_empty() {
                output.info(&format!(
                    "No leafs installed in {}",
                    ctx.project().display()
                ))?;
                return Ok(());
            }
            output.header("Installed Leafs:")?;
            let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
            for row in rows {
                let version = row.version.as_deref().unwrap_or("unknown");
                let when = row
                    .installed_at
                    .as_deref()
                    .map(|t| format!("  (installed {t})"))
                    .unwrap_or_default();
                output.print(&format!("  {:<width$}  {}{}", row.name, version, when))?;
            }
        }
    }
    Ok(())
}
