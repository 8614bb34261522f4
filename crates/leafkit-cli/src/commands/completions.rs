//! Shell completion generation.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};
use crate::error::CliResult;

const BIN_NAME: &str = "leafkit";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    write_completions(args.shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    match shell {
        Shell::Bash => emit(shells::Bash, out),
        Shell::Zsh => emit(shells::Zsh, out),
        Shell::Fish => emit(shells::Fish, out),
        Shell::PowerShell => emit(shells::PowerShell, out),
        Shell::Elvish => emit(shells::Elvish, out),
    }
    Ok(())
}

fn emit<G: Generator>(generator: G, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    generate(generator, &mut cmd, BIN_NAME, out);
}
