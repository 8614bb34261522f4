//! `leafkit add`: install a leaf and everything it depends on.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use leafkit_core::domain::{InstallReport, LeafName, resolution::format_cycle};
use leafkit_core::prelude::{InstallPolicy, RequirementCheckResult};

use super::{Context, describe_requirement, parse_leaf};
use crate::{
    cli::{AddArgs, OutputFormat},
    error::{CliError, CliResult, not_in_catalog},
    prompt::{self, Prompter},
};

pub fn execute(args: AddArgs, ctx: &Context) -> CliResult<()> {
    let prompter = prompt::prompter(args.yes || args.dry_run);
    run(args, ctx, prompter.as_ref())
}

pub fn run(args: AddArgs, ctx: &Context, prompter: &dyn Prompter) -> CliResult<()> {
    let name = parse_leaf(&args.leaf)?;
    let manager = &ctx.manager;
    let output = &ctx.output;

    if !manager.catalog().exists(&name) {
        return Err(not_in_catalog(name.as_str()));
    }

    let policy = InstallPolicy {
        allow_cycles: args.allow_cycles || ctx.config.resolver.allow_cycles,
        enforce_requirements: !args.skip_checks && ctx.config.resolver.enforce_requirements,
    };
    debug!(?policy, "Install policy");

    let resolution = manager.resolver().resolve(&name, ctx.project());
    if resolution.order.is_empty() {
        output.info(&format!(
            "{name} is already installed; use `leafkit update {name}` for newer versions"
        ))?;
        return Ok(());
    }

    let order: Vec<&str> = resolution.order.iter().map(LeafName::as_str).collect();
    output.header(&format!("Installing into {}:", ctx.project().display()))?;
    output.print(&format!("  {}", order.join(" \u{2192} ")))?;
    for cycle in &resolution.cycles {
        output.warning(&format!("Dependency cycle: {}", format_cycle(cycle)))?;
    }

    if args.dry_run {
        let mut plan = dry_run_plan(&resolution.order, policy, ctx);
        plan.cycles = resolution.cycles.iter().map(|c| format_cycle(c)).collect();
        return print_dry_run(&plan, ctx);
    }

    let question = if order.len() == 1 {
        format!("Install {name}?")
    } else {
        format!("Install {} leafs?", order.len())
    };
    prompt::require(prompter, &question)?;

    let bar = output.progress(order.len() as u64);
    let result = manager.installer().install_with_progress(
        &name,
        ctx.project(),
        policy,
        |leaf, index| {
            bar.set_position(index as u64);
            bar.set_message(format!("Installing {leaf}"));
        },
    );
    bar.finish_and_clear();

    let report = result?;
    if ctx.output.format() == OutputFormat::Json {
        ctx.output.json(&report)?;
    }
    summarize(&report, ctx)
}

/// What `add --dry-run` reports.
#[derive(Debug, Serialize)]
struct DryRunPlan {
    steps: Vec<DryRunStep>,
    cycles: Vec<String>,
    /// The install would stop at the first step with missing requirements.
    would_refuse: bool,
}

#[derive(Debug, Serialize)]
struct DryRunStep {
    leaf: LeafName,
    destination: PathBuf,
    missing: Vec<String>,
}

/// Requirement gaps per leaf in install order. Models shipped by earlier
/// steps count as present, as they do for the real install.
fn dry_run_plan(order: &[LeafName], policy: InstallPolicy, ctx: &Context) -> DryRunPlan {
    let manager = &ctx.manager;

    let mut planned: Vec<PathBuf> = Vec::with_capacity(order.len());
    let mut steps = Vec::with_capacity(order.len());
    for leaf in order {
        let missing = manager
            .requirements()
            .check_missing_planned(leaf, ctx.project(), &planned);
        steps.push(DryRunStep {
            leaf: leaf.clone(),
            destination: manager.layout().installed_dir(ctx.project(), leaf),
            missing: describe_missing(&missing),
        });
        planned.push(manager.catalog().leaf_dir(leaf));
    }

    let blocked = steps.iter().any(|s| !s.missing.is_empty());
    DryRunPlan {
        steps,
        cycles: Vec::new(),
        would_refuse: blocked && policy.enforce_requirements,
    }
}

fn print_dry_run(plan: &DryRunPlan, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;
    if output.format() == OutputFormat::Json {
        return output.json(plan);
    }

    for step in &plan.steps {
        if step.missing.is_empty() {
            output.success(&format!("{} \u{2192} {}", step.leaf, step.destination.display()))?;
        } else {
            output.error(&format!("{} is missing {}", step.leaf, step.missing.join(", ")))?;
        }
    }

    if plan.would_refuse {
        output.warning("Dry run: the install would be refused until requirements are met")?;
    } else {
        output.info("Dry run: nothing was copied")?;
    }
    Ok(())
}

fn describe_missing(missing: &[RequirementCheckResult]) -> Vec<String> {
    missing
        .iter()
        .map(|r| describe_requirement(&r.requirement))
        .collect()
}

/// Turn an install report into output, or the error it amounts to.
fn summarize(report: &InstallReport, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;

    if let Some(blocked) = &report.blocked {
        return Err(CliError::RequirementsUnmet {
            leaf: blocked.name.to_string(),
            missing: describe_missing(&blocked.missing),
        });
    }

    for outcome in report.outcomes.iter().filter(|o| o.success) {
        output.success(&format!(
            "Installed {} at {}",
            outcome.name,
            outcome.destination.display()
        ))?;
    }

    if let Some(failure) = report.first_failure() {
        return Err(CliError::InstallFailed {
            leaf: failure.name.to_string(),
            reason: failure
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".into()),
        });
    }

    info!(count = report.outcomes.len(), "Install complete");
    post_install_notes(report, ctx)
}

/// Environment variables and wiring snippets the new leafs ask for.
fn post_install_notes(report: &InstallReport, ctx: &Context) -> CliResult<()> {
    let output = &ctx.output;
    for outcome in &report.outcomes {
        let Some(manifest) = ctx
            .manager
            .manifests()
            .read_installed_manifest(&outcome.name, ctx.project())
        else {
            continue;
        };

        let required: Vec<String> = manifest
            .required_env()
            .map(|var| {
                if var.example.is_empty() {
                    format!("{}=", var.key)
                } else {
                    format!("{}={}", var.key, var.example)
                }
            })
            .collect();
        if !required.is_empty() {
            output.header(&format!("\n{} needs these environment variables:", outcome.name))?;
            for line in required {
                output.print(&format!("  {line}"))?;
            }
        }

        if let Some(config) = &manifest.config {
            output.header(&format!("\nWire {} into your app:", outcome.name))?;
            if !config.import.is_empty() {
                output.print(&format!("  {}", config.import))?;
            }
            for line in config.example.lines() {
                output.print(&format!("  {line}"))?;
            }
        }
    }
    Ok(())
}
