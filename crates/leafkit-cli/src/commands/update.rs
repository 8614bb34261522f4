//! `leafkit update`: re-install leafs whose catalog version is newer.

use tracing::info;

use leafkit_core::domain::{InstallOutcome, LeafName};

use super::{Context, parse_leaf};
use crate::{
    cli::{OutputFormat, UpdateArgs},
    error::{CliError, CliResult, not_installed},
    prompt::{self, Prompter},
};

pub fn execute(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let prompter = prompt::prompter(args.yes);
    run(args, ctx, prompter.as_ref())
}

pub fn run(args: UpdateArgs, ctx: &Context, prompter: &dyn Prompter) -> CliResult<()> {
    let manager = &ctx.manager;
    let output = &ctx.output;

    let targets: Vec<LeafName> = match &args.leaf {
        Some(raw) => {
            let name = parse_leaf(raw)?;
            if !manager.inspector().is_installed(&name, ctx.project()) {
                return Err(not_installed(name.as_str()));
            }
            match manager.updates().check_update(&name, ctx.project()) {
                Some(info) if info.has_update => vec![name],
                Some(info) => {
                    output.success(&format!("{name} is up to date ({})", info.installed_version))?;
                    return Ok(());
                }
                None => {
                    output.warning(&format!(
                        "Cannot compare versions of {name}: manifest missing in the project or the catalog"
                    ))?;
                    return Ok(());
                }
            }
        }
        None => manager
            .updates()
            .leafs_with_updates(ctx.project())
            .into_iter()
            .map(|info| info.name)
            .collect(),
    };

    if targets.is_empty() {
        output.success("All installed leafs are up to date")?;
        return Ok(());
    }

    let names: Vec<&str> = targets.iter().map(LeafName::as_str).collect();
    output.header("Updates:")?;
    output.print(&format!("  {}", names.join(", ")))?;
    let question = if targets.len() == 1 {
        format!("Update {}?", targets[0])
    } else {
        format!("Update {} leafs?", targets.len())
    };
    prompt::require(prompter, &question)?;

    let bar = output.progress(targets.len() as u64);
    let mut outcomes: Vec<InstallOutcome> = Vec::with_capacity(targets.len());
    for (index, name) in targets.iter().enumerate() {
        bar.set_position(index as u64);
        bar.set_message(format!("Updating {name}"));
        outcomes.push(manager.installer().update(name, ctx.project()));
    }
    bar.finish_and_clear();

    if ctx.output.format() == OutputFormat::Json {
        ctx.output.json(&outcomes)?;
    }

    for outcome in &outcomes {
        if outcome.skipped {
            output.info(&format!("{} is already current", outcome.name))?;
        } else if outcome.success {
            output.success(&format!("Updated {}", outcome.name))?;
        }
    }

    // Every leaf is attempted; the first failure decides the exit code.
    if let Some(failure) = outcomes.iter().find(|o| !o.success) {
        return Err(CliError::InstallFailed {
            leaf: failure.name.to_string(),
            reason: failure
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".into()),
        });
    }

    info!(count = outcomes.len(), "Update complete");
    Ok(())
}
