//! `leafkit info`: a leaf's manifest and installation state.

use serde::Serialize;

use leafkit_core::domain::{InstallRecord, LeafManifest, ManifestLookup};

use super::{Context, describe_requirement, parse_leaf};
use crate::{
    cli::{LeafArgs, OutputFormat},
    error::{CliError, CliResult, not_in_catalog},
};

#[derive(Debug, Serialize)]
struct LeafInfo<'a> {
    manifest: &'a LeafManifest,
    /// Manifest came from the installed copy, the catalog has none.
    from_project: bool,
    installed_version: Option<String>,
    record: Option<InstallRecord>,
}

pub fn execute(args: LeafArgs, ctx: &Context) -> CliResult<()> {
    let name = parse_leaf(&args.leaf)?;
    let manager = &ctx.manager;

    let (manifest, from_project) = match manager.manifests().lookup_catalog(&name) {
        ManifestLookup::Found(manifest) => (manifest, false),
        ManifestLookup::Malformed { path, detail } => {
            return Err(CliError::InvalidInput {
                message: format!("{} has an unreadable manifest at {}: {}", name, path.display(), detail),
                source: None,
            });
        }
        ManifestLookup::NotFound => match manager.manifests().read_installed_manifest(&name, ctx.project()) {
            Some(manifest) => (manifest, true),
            None if manager.catalog().exists(&name) => {
                ctx.output.warning(&format!("{name} has no {}", manager.layout().manifest_file))?;
                return Ok(());
            }
            None => return Err(not_in_catalog(name.as_str())),
        },
    };

    let state = manager.inspector().state(&name, ctx.project());
    let info = LeafInfo {
        manifest: &manifest,
        from_project,
        installed_version: state.version().map(str::to_string),
        record: state.record.clone(),
    };

    if ctx.output.format() == OutputFormat::Json {
        return ctx.output.json(&info);
    }
    render(&info, ctx)
}

fn render(info: &LeafInfo<'_>, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;
    let m = info.manifest;

    output.header(&format!("{} {}", m.name, m.version))?;
    if !m.description.is_empty() {
        output.print(&format!("  {}", m.description))?;
    }
    if let Some(author) = &m.author {
        output.detail(&format!("  by {author}"))?;
    }
    if info.from_project {
        output.warning("Not in the catalog; showing the installed copy")?;
    }

    match (&info.installed_version, &info.record) {
        (Some(version), Some(record)) => output.success(&format!(
            "Installed: {} (on {})",
            version,
            record.installed_at.format("%Y-%m-%d")
        ))?,
        (Some(version), None) => output.success(&format!("Installed: {version}"))?,
        (None, _) => output.info("Not installed")?,
    }

    if !m.dependencies.is_empty() {
        output.header("\nDependencies:")?;
        for dep in &m.dependencies {
            output.print(&format!("  • {dep}"))?;
        }
    }

    if !m.requirements.is_empty() {
        output.header("\nRequirements:")?;
        for req in &m.requirements {
            output.print(&format!("  • {}", describe_requirement(req)))?;
            if !req.description.is_empty() {
                output.detail(&format!("      {}", req.description))?;
            }
        }
    }

    if !m.npm_dependencies.is_empty() {
        output.header("\nPackages:")?;
        for (package, version) in &m.npm_dependencies {
            output.print(&format!("  • {package}@{version}"))?;
        }
    }

    if !m.env.is_empty() {
        output.header("\nEnvironment:")?;
        for var in &m.env {
            let flag = if var.required { " (required)" } else { "" };
            output.print(&format!("  {}{}", var.key, flag))?;
            if !var.description.is_empty() {
                output.detail(&format!("      {}", var.description))?;
            }
            if let Some(default) = &var.default {
                output.detail(&format!("      default: {default}"))?;
            } else if !var.example.is_empty() {
                output.detail(&format!("      e.g. {}", var.example))?;
            }
        }
    }

    if let Some(config) = &m.config {
        output.header("\nConfiguration:")?;
        if !config.import.is_empty() {
            output.print(&format!("  {}", config.import))?;
        }
        for line in config.example.lines() {
            output.print(&format!("  {line}"))?;
        }
    }

    let provided = [
        ("models", m.models.len()),
        ("routes", m.routes.len()),
        ("services", m.services.len()),
        ("commands", m.commands.len()),
    ];
    let provided: Vec<String> = provided
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(what, n)| format!("{n} {what}"))
        .collect();
    if !provided.is_empty() {
        output.detail(&format!("\nProvides {}", provided.join(", ")))?;
    }

    Ok(())
}
