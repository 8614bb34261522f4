//! `leafkit check`: does the project provide what a leaf needs?

use std::path::PathBuf;

use serde::Serialize;

use leafkit_core::domain::RequirementCheckResult;

use super::{Context, describe_requirement, parse_leaf};
use crate::{
    cli::{LeafArgs, OutputFormat},
    error::{CliResult, not_in_catalog},
};

#[derive(Debug, Serialize)]
struct CheckRow {
    #[serde(flatten)]
    result: RequirementCheckResult,
    /// Only filled in for unmet requirements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    searched: Vec<PathBuf>,
}

pub fn execute(args: LeafArgs, ctx: &Context) -> CliResult<()> {
    let name = parse_leaf(&args.leaf)?;
    let manager = &ctx.manager;
    if !manager.catalog().exists(&name) {
        return Err(not_in_catalog(name.as_str()));
    }

    let rows: Vec<CheckRow> = manager
        .requirements()
        .check_all(&name, ctx.project())
        .into_iter()
        .map(|result| {
            let searched = if result.satisfied {
                Vec::new()
            } else {
                manager
                    .requirements()
                    .candidate_paths(&result.requirement, ctx.project())
            };
            CheckRow { result, searched }
        })
        .collect();

    if ctx.output.format() == OutputFormat::Json {
        return ctx.output.json(&rows);
    }

    let output = &ctx.output;
    if rows.is_empty() {
        output.success(&format!("{name} has no requirements"))?;
        return Ok(());
    }

    output.header(&format!("Requirements of {name}:"))?;
    for row in &rows {
        let req = &row.result.requirement;
        match &row.result.found_path {
            Some(found) => {
                output.success(&describe_requirement(req))?;
                output.detail(&format!("    found at {}", found.display()))?;
            }
            None => {
                output.error(&describe_requirement(req))?;
                for path in &row.searched {
                    output.detail(&format!("    looked in {}", path.display()))?;
                }
                if let Some(hint) = &req.hint {
                    output.info(&format!("  {hint}"))?;
                }
            }
        }
    }

    let missing = rows.iter().filter(|r| !r.result.satisfied).count();
    if missing == 0 {
        output.success(&format!("All {} requirement(s) met", rows.len()))?;
    } else {
        output.warning(&format!(
            "{missing} of {} requirement(s) missing; `leafkit add {name}` will refuse until they exist",
            rows.len()
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{catalog_leaf, context};
    use leafkit_adapters::MemoryFilesystem;

    #[test]
    fn missing_catalog_leaf_is_not_found() {
        let fs = MemoryFilesystem::new();
        let err = execute(LeafArgs { leaf: "leaf-x".into() }, &context(&fs)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unmet_requirements_still_succeed() {
        let fs = MemoryFilesystem::new();
        catalog_leaf(
            &fs,
            "leaf-auth",
            r#"{ "name": "leaf-auth", "version": "1.0.0",
                 "requirements": [{ "type": "model", "name": "User", "hint": "Create src/models/User.ts" }] }"#,
        );
        assert!(execute(LeafArgs { leaf: "leaf-auth".into() }, &context(&fs)).is_ok());
    }

    #[test]
    fn check_rows_serialise_searched_paths_for_unmet_only() {
        let fs = MemoryFilesystem::new();
        catalog_leaf(
            &fs,
            "leaf-auth",
            r#"{ "name": "leaf-auth", "version": "1.0.0",
                 "requirements": [
                    { "type": "model", "name": "User" },
                    { "type": "file", "name": "app.json" }
                 ] }"#,
        );
        fs.add_file("/app/src/models/User.ts", "");
        let ctx = context(&fs);
        let results = ctx
            .manager
            .requirements()
            .check_all(&parse_leaf("leaf-auth").unwrap(), ctx.project());
        assert!(results[0].satisfied);
        assert!(!results[1].satisfied);

        let row = CheckRow {
            searched: ctx
                .manager
                .requirements()
                .candidate_paths(&results[1].requirement, ctx.project()),
            result: results[1].clone(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["satisfied"], false);
        assert_eq!(json["searched"][0], "/app/src/app.json");
    }
}
