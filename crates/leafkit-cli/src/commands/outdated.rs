//! `leafkit outdated`: installed leafs with a newer catalog version.

use leafkit_core::domain::LeafUpdateInfo;

use super::Context;
use crate::{
    cli::{ListFormat, OutdatedArgs, OutputFormat},
    error::CliResult,
};

pub fn execute(args: OutdatedArgs, ctx: &Context) -> CliResult<()> {
    let updates = ctx.manager.updates();
    let rows: Vec<LeafUpdateInfo> = if args.all {
        updates.check_all_updates(ctx.project())
    } else {
        updates.leafs_with_updates(ctx.project())
    };

    let format = if ctx.output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    let output = &ctx.output;
    match format {
        ListFormat::Json => output.json(&rows)?,
        ListFormat::List => {
            for row in rows.iter().filter(|r| r.has_update) {
                output.print(row.name.as_str())?;
            }
        }
        ListFormat::Table => {
            if rows.iter().all(|r| !r.has_update) && !args.all {
                output.success("All installed leafs are up to date")?;
                return Ok(());
            }
            output.header("Installed Leafs:")?;
            let width = rows.iter().map(|r| r.name.as_str().len()).max().unwrap_or(0);
            for row in &rows {
                let line = format!(
                    "  {:<width$}  {} \u{2192} {}",
                    row.name.as_str(),
                    row.installed_version,
                    row.available_version
                );
                if row.has_update {
                    output.warning(&line)?;
                } else {
                    output.print(&format!(
                        "  {:<width$}  {} (current)",
                        row.name.as_str(),
                        row.installed_version
                    ))?;
                }
            }
            let pending = rows.iter().filter(|r| r.has_update).count();
            if pending > 0 {
                output.info(&format!("{pending} update(s) available; run `leafkit update`"))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog_leaf, context, installed_leaf};
    use leafkit_adapters::MemoryFilesystem;

    #[test]
    fn reports_only_newer_catalog_versions() {
        let fs = MemoryFilesystem::new();
        catalog_leaf(&fs, "leaf-a", r#"{ "name": "leaf-a", "version": "1.2.0" }"#);
        installed_leaf(&fs, "leaf-a", r#"{ "name": "leaf-a", "version": "1.0.0" }"#);
        catalog_leaf(&fs, "leaf-b", r#"{ "name": "leaf-b", "version": "1.0.0" }"#);
        installed_leaf(&fs, "leaf-b", r#"{ "name": "leaf-b", "version": "2.0.0" }"#);

        let ctx = context(&fs);
        let pending = ctx.manager.updates().leafs_with_updates(ctx.project());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name.as_str(), "leaf-a");

        for all in [false, true] {
            for format in [ListFormat::Table, ListFormat::List, ListFormat::Json] {
                assert!(execute(OutdatedArgs { all, format }, &ctx).is_ok());
            }
        }
    }
}
