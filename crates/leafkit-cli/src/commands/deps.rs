//! `leafkit deps`: what installing a leaf would pull in.

use serde::Serialize;

use leafkit_core::domain::{LeafName, resolution::format_cycle};

use super::{Context, parse_leaf};
use crate::{
    cli::{LeafArgs, OutputFormat},
    error::{CliResult, not_in_catalog},
};

/// The dependency picture for one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyPlan {
    pub leaf: LeafName,
    /// As written in the manifest, deduplicated.
    pub declared: Vec<String>,
    /// Transitive dependencies not yet installed.
    pub missing: Vec<LeafName>,
    /// Missing dependencies the catalog does not have either.
    pub unavailable: Vec<LeafName>,
    /// Install order, dependencies first, ending with the leaf itself
    /// unless it is already installed.
    pub order: Vec<LeafName>,
    pub cycles: Vec<String>,
}

pub fn plan(leaf: &LeafName, ctx: &Context) -> DependencyPlan {
    let manager = &ctx.manager;
    let mut declared: Vec<String> = Vec::new();
    if let Some(manifest) = manager.manifests().read_catalog_manifest(leaf) {
        for dep in manifest.dependencies {
            if !declared.contains(&dep) {
                declared.push(dep);
            }
        }
    }

    let missing = manager.resolver().missing_dependencies(leaf, ctx.project());
    let unavailable = missing
        .iter()
        .filter(|dep| !manager.catalog().exists(dep))
        .cloned()
        .collect();
    let resolution = manager.resolver().resolve(leaf, ctx.project());

    DependencyPlan {
        leaf: leaf.clone(),
        declared,
        missing,
        unavailable,
        cycles: resolution.cycles.iter().map(|c| format_cycle(c)).collect(),
        order: resolution.order,
    }
}

pub fn execute(args: LeafArgs, ctx: &Context) -> CliResult<()> {
    let name = parse_leaf(&args.leaf)?;
    if !ctx.manager.catalog().exists(&name) {
        return Err(not_in_catalog(name.as_str()));
    }

    let plan = plan(&name, ctx);
    if ctx.output.format() == OutputFormat::Json {
        return ctx.output.json(&plan);
    }

    let output = &ctx.output;
    output.header(&format!("Dependencies of {name}:"))?;
    if plan.declared.is_empty() {
        output.print("  (none)")?;
    }
    for dep in &plan.declared {
        let installed = LeafName::parse(dep.as_str())
            .map(|d| ctx.manager.inspector().is_installed(&d, ctx.project()))
            .unwrap_or(false);
        let marker = if installed { " [installed]" } else { "" };
        output.print(&format!("  • {dep}{marker}"))?;
    }

    if !plan.missing.is_empty() {
        let names: Vec<&str> = plan.missing.iter().map(LeafName::as_str).collect();
        output.info(&format!("Not yet installed: {}", names.join(", ")))?;
    }
    for dep in &plan.unavailable {
        output.error(&format!("{dep} is not in the catalog"))?;
    }
    for cycle in &plan.cycles {
        output.warning(&format!("Dependency cycle: {cycle}"))?;
    }

    if plan.order.is_empty() {
        output.success(&format!("{name} and its dependencies are installed"))?;
    } else {
        let order: Vec<&str> = plan.order.iter().map(LeafName::as_str).collect();
        output.header("\nInstall order:")?;
        output.print(&format!("  {}", order.join(" \u{2192} ")))?;
    }
    Ok(())
}
