//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `-v`, `-q`,
//! `--catalog` and `--project` are available on any invocation without
//! repetition.

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`).  Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (installs and removals)
    -vv     - Debug level (manifest lookups, requirement checks)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Leaf catalog directory; overrides `catalog.root` from the config.
    #[arg(
        long = "catalog",
        global = true,
        value_name = "DIR",
        help = "Directory holding the available leafs"
    )]
    pub catalog: Option<PathBuf>,

    /// Root of the host project leafs are installed into.
    #[arg(
        short = 'p',
        long = "project",
        global = true,
        value_name = "DIR",
        default_value = ".",
        help = "Host project directory"
    )]
    pub project: PathBuf,

    /// Append JSON log lines to this file, on top of stderr logging.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Also write logs to FILE (JSON lines)"
    )]
    pub log_file: Option<PathBuf>,

    /// Machine-readable output format.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON output.
    Json,
}

#[cfg(test)]
impl GlobalArgs {
    /// Quiet-free, colour-free defaults for unit tests.
    pub(crate) fn for_tests() -> Self {
        Self {
            verbose: 0,
            quiet: false,
            no_color: true,
            config: None,
            catalog: None,
            project: PathBuf::from("."),
            log_file: None,
            output_format: OutputFormat::Plain,
        }
    }
}
