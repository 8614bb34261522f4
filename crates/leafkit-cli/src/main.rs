//! # leafkit
//!
//! Installs optional feature "leafs" from a catalog directory into a
//! project's source tree.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Initialise the tracing subscriber (logging).
//! 3. Load configuration (defaults, file, `LEAFKIT_*` env).
//! 4. Build the [`OutputManager`].
//! 5. Dispatch to the command handler.
//! 6. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                 |
//! |------|-------------------------|
//! |  0   | Success                 |
//! |  1   | Internal / system error |
//! |  2   | User / input error      |
//! |  3   | Leaf not found          |
//! |  4   | Configuration error     |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands, ConfigCommands},
    commands::Context,
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod prompt;

fn main() -> ExitCode {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and exit 0.
            let _ = e.print();
            return ExitCode::from(if e.use_stderr() { 2 } else { 0 });
        }
    };
    let verbose = cli.global.verbose > 0;

    // ── 2. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e:#}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        project = %cli.global.project.display(),
        "CLI started"
    );

    // ── 3. Load configuration ─────────────────────────────────────────────
    let config_file = cli.global.config.as_deref();
    let loaded = if config_may_be_missing(&cli.command) {
        AppConfig::load_lenient(config_file)
    } else {
        AppConfig::load(config_file)
    };
    let config = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            return handle_error(
                CliError::ConfigError {
                    message: format!("{e:#}"),
                    source: Some(e.into()),
                },
                verbose,
            );
        }
    };

    // ── 4. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 5. Dispatch + 6. Error handling ──────────────────────────────────
    match run(cli, config, output) {
        Ok(()) => {
            info!("leafkit completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let global = cli.global;
    let project = |config: AppConfig, output: OutputManager| Context::local(&global, config, output);
    match cli.command {
        Commands::Init(cmd) => commands::init::execute(cmd, &global, &output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, &global, &config, &output),
        Commands::List(cmd) => commands::list::execute(cmd, &project(config, output)),
        Commands::Info(cmd) => commands::info::execute(cmd, &project(config, output)),
        Commands::Check(cmd) => commands::check::execute(cmd, &project(config, output)),
        Commands::Deps(cmd) => commands::deps::execute(cmd, &project(config, output)),
        Commands::Add(cmd) => commands::add::execute(cmd, &project(config, output)),
        Commands::Remove(cmd) => commands::remove::execute(cmd, &project(config, output)),
        Commands::Outdated(cmd) => commands::outdated::execute(cmd, &project(config, output)),
        Commands::Update(cmd) => commands::update::execute(cmd, &project(config, output)),
    }
}

/// `init` creates the config file and `config path` only names it, so
/// neither needs an explicit `--config` file to exist yet.
fn config_may_be_missing(command: &Commands) -> bool {
    matches!(
        command,
        Commands::Init(_) | Commands::Config(ConfigCommands::Path)
    )
}

/// Translate a `CliError` into a user message and an appropriate exit code.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    // stderr, so the message survives a redirected stdout.
    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_version_matches_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn only_init_and_config_path_tolerate_a_missing_config_file() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).unwrap().command;

        assert!(config_may_be_missing(&parse(&["leafkit", "init"])));
        assert!(config_may_be_missing(&parse(&["leafkit", "config", "path"])));
        assert!(!config_may_be_missing(&parse(&["leafkit", "config", "list"])));
        assert!(!config_may_be_missing(&parse(&["leafkit", "list"])));
    }

    #[test]
    fn cli_has_author() {
        let cmd = Cli::command();
        assert!(cmd.get_author().is_some());
    }
}
