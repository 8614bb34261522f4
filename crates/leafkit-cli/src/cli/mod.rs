//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "leafkit",
    bin_name = "leafkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f343} Add optional feature leafs to a project",
    long_about = "leafkit discovers leafs in a catalog directory, resolves their \
                  dependencies, checks what they need from the host project and \
                  copies them into it.",
    after_help = "EXAMPLES:\n\
        \x20 leafkit list --catalog ./leafs\n\
        \x20 leafkit check leaf-auth --project ./my-app\n\
        \x20 leafkit add leaf-auth --dry-run\n\
        \x20 leafkit outdated --format json\n\
        \x20 leafkit completions bash > /usr/share/bash-completion/completions/leafkit",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List catalog or installed leafs.
    #[command(
        visible_alias = "ls",
        about = "List available or installed leafs",
        after_help = "EXAMPLES:\n\
            \x20 leafkit list\n\
            \x20 leafkit list --installed\n\
            \x20 leafkit list --format json"
    )]
    List(ListArgs),

    /// Show a leaf's manifest.
    #[command(
        about = "Show details about a leaf",
        after_help = "EXAMPLES:\n\
            \x20 leafkit info leaf-auth"
    )]
    Info(LeafArgs),

    /// Check a leaf's requirements against the project.
    #[command(
        about = "Check whether the project meets a leaf's requirements",
        after_help = "EXAMPLES:\n\
            \x20 leafkit check leaf-auth\n\
            \x20 leafkit check leaf-auth --project ../api"
    )]
    Check(LeafArgs),

    /// Show a leaf's dependency plan.
    #[command(
        about = "Show missing dependencies and install order",
        after_help = "EXAMPLES:\n\
            \x20 leafkit deps leaf-billing"
    )]
    Deps(LeafArgs),

    /// Install a leaf and its dependencies.
    #[command(
        visible_alias = "install",
        about = "Install a leaf together with its dependencies",
        after_help = "EXAMPLES:\n\
            \x20 leafkit add leaf-auth\n\
            \x20 leafkit add leaf-auth --dry-run\n\
            \x20 leafkit add leaf-billing --yes --allow-cycles"
    )]
    Add(AddArgs),

    /// Remove an installed leaf.
    #[command(
        visible_alias = "rm",
        about = "Remove an installed leaf",
        after_help = "EXAMPLES:\n\
            \x20 leafkit remove leaf-auth --yes"
    )]
    Remove(RemoveArgs),

    /// Report installed leafs with a newer catalog version.
    #[command(
        about = "List installed leafs that have updates",
        after_help = "EXAMPLES:\n\
            \x20 leafkit outdated\n\
            \x20 leafkit outdated --format json"
    )]
    Outdated(OutdatedArgs),

    /// Re-install leafs whose catalog version is newer.
    #[command(
        visible_alias = "up",
        about = "Update one or all installed leafs",
        after_help = "EXAMPLES:\n\
            \x20 leafkit update\n\
            \x20 leafkit update leaf-auth --yes"
    )]
    Update(UpdateArgs),

    /// Initialise a leafkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 leafkit init\n\
            \x20 leafkit init --force\n\
            \x20 leafkit --config ./leafkit.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 leafkit completions bash > ~/.local/share/bash-completion/completions/leafkit\n\
            \x20 leafkit completions zsh  > ~/.zfunc/_leafkit\n\
            \x20 leafkit completions fish > ~/.config/fish/completions/leafkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the leafkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 leafkit config get catalog.root\n\
            \x20 leafkit config list\n\
            \x20 leafkit config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// A single leaf, by directory name.
#[derive(Debug, Args)]
pub struct LeafArgs {
    /// Leaf directory name, e.g. `leaf-auth`.
    #[arg(value_name = "LEAF", help = "Leaf name")]
    pub leaf: String,
}

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `leafkit list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// List what the project has installed instead of the catalog.
    #[arg(short = 'i', long = "installed", help = "List installed leafs")]
    pub installed: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `leafkit add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Leaf to install.
    #[arg(value_name = "LEAF", help = "Leaf name")]
    pub leaf: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Install without asking")]
    pub yes: bool,

    /// Show the plan without copying anything.
    #[arg(long = "dry-run", help = "Show what would be installed")]
    pub dry_run: bool,

    /// Install in a best-effort order even if the dependencies form a cycle.
    #[arg(long = "allow-cycles", help = "Do not refuse cyclic dependencies")]
    pub allow_cycles: bool,

    /// Install even when the project lacks required models or files.
    #[arg(long = "skip-checks", help = "Skip the requirement check")]
    pub skip_checks: bool,
}

// ── remove ────────────────────────────────────────────────────────────────────

/// Arguments for `leafkit remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// Leaf to remove.
    #[arg(value_name = "LEAF", help = "Leaf name")]
    pub leaf: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Remove without asking")]
    pub yes: bool,
}

// ── outdated ──────────────────────────────────────────────────────────────────

/// Arguments for `leafkit outdated`.
#[derive(Debug, Args)]
pub struct OutdatedArgs {
    /// Include leafs that are already current.
    #[arg(short = 'a', long = "all", help = "Show every installed leaf")]
    pub all: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `leafkit update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Leaf to update; every outdated leaf when omitted.
    #[arg(value_name = "LEAF", help = "Leaf name (default: all outdated)")]
    pub leaf: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Update without asking")]
    pub yes: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `leafkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `leafkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `leafkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `catalog.root`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
