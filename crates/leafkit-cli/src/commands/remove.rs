//! `leafkit remove`: delete an installed leaf from the project.

use leafkit_core::domain::LeafName;

use super::{Context, parse_leaf};
use crate::{
    cli::RemoveArgs,
    error::{CliResult, not_installed},
    prompt::{self, Prompter},
};

pub fn execute(args: RemoveArgs, ctx: &Context) -> CliResult<()> {
    let prompter = prompt::prompter(args.yes);
    run(args, ctx, prompter.as_ref())
}

pub fn run(args: RemoveArgs, ctx: &Context, prompter: &dyn Prompter) -> CliResult<()> {
    let name = parse_leaf(&args.leaf)?;
    let manager = &ctx.manager;
    let output = &ctx.output;

    if !manager.inspector().is_installed(&name, ctx.project()) {
        return Err(not_installed(name.as_str()));
    }

    let dependents = dependents_of(&name, ctx);
    if !dependents.is_empty() {
        let names: Vec<&str> = dependents.iter().map(LeafName::as_str).collect();
        output.warning(&format!("{} depend(s) on {name}", names.join(", ")))?;
    }

    let path = manager.layout().installed_dir(ctx.project(), &name);
    prompt::require(prompter, &format!("Delete {}?", path.display()))?;

    if manager.installer().remove(&name, ctx.project())? {
        output.success(&format!("Removed {name}"))?;
    } else {
        // Vanished between the check and the delete.
        output.info(&format!("{name} was not installed"))?;
    }
    Ok(())
}

/// Installed leafs whose manifest lists `name` as a dependency.
fn dependents_of(name: &LeafName, ctx: &Context) -> Vec<LeafName> {
    ctx.manager
        .inspector()
        .installed_leafs(ctx.project())
        .into_iter()
        .filter(|state| state.name != *name)
        .filter(|state| {
            state
                .manifest
                .as_ref()
                .is_some_and(|m| m.dependencies.iter().any(|d| d == name.as_str()))
        })
        .map(|state| state.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, installed_leaf};
    use crate::error::CliError;
    use crate::prompt::{AssumeYes, MockPrompter};
    use leafkit_adapters::MemoryFilesystem;
    use leafkit_core::application::ports::Filesystem;
    use std::path::Path;

    fn args(leaf: &str) -> RemoveArgs {
        RemoveArgs {
            leaf: leaf.into(),
            yes: true,
        }
    }

    #[test]
    fn removes_only_the_leaf_directory() {
        let fs = MemoryFilesystem::new();
        installed_leaf(&fs, "leaf-auth", r#"{ "name": "leaf-auth", "version": "1.0.0" }"#);
        fs.add_file("/app/src/models/User.ts", "");

        run(args("leaf-auth"), &context(&fs), &AssumeYes).unwrap();
        assert!(!fs.exists(Path::new("/app/src/leaf-auth")));
        assert!(fs.is_file(Path::new("/app/src/models/User.ts")));
    }

    #[test]
    fn absent_leaf_is_not_found_and_tree_untouched() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/app/src/models/User.ts", "");
        let before = fs.list_files();

        let err = run(args("leaf-auth"), &context(&fs), &AssumeYes).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert_eq!(fs.list_files(), before);
    }

    #[test]
    fn declining_keeps_the_leaf() {
        let fs = MemoryFilesystem::new();
        installed_leaf(&fs, "leaf-auth", r#"{ "name": "leaf-auth", "version": "1.0.0" }"#);

        let mut prompter = MockPrompter::new();
        prompter
            .expect_confirm()
            .withf(|q| q.contains("/app/src/leaf-auth"))
            .returning(|_| Ok(false));

        let err = run(
            RemoveArgs {
                leaf: "leaf-auth".into(),
                yes: false,
            },
            &context(&fs),
            &prompter,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Cancelled));
        assert!(fs.is_dir(Path::new("/app/src/leaf-auth")));
    }

    #[test]
    fn dependents_are_found_from_installed_manifests() {
        let fs = MemoryFilesystem::new();
        installed_leaf(&fs, "leaf-session", r#"{ "name": "leaf-session", "version": "1.0.0" }"#);
        installed_leaf(
            &fs,
            "leaf-auth",
            r#"{ "name": "leaf-auth", "version": "1.0.0", "dependencies": ["leaf-session"] }"#,
        );

        let ctx = context(&fs);
        let session = LeafName::parse("leaf-session").unwrap();
        assert_eq!(
            dependents_of(&session, &ctx),
            [LeafName::parse("leaf-auth").unwrap()]
        );
    }
}
