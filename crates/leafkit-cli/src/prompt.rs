//! Yes/no confirmation before commands that change the project.

use crate::error::{CliError, CliResult};

/// Asks the user to confirm an action.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    /// `Ok(true)` to proceed, `Ok(false)` when the user declines.
    fn confirm(&self, prompt: &str) -> CliResult<bool>;
}

/// Answers yes without asking; used for `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, prompt: &str) -> CliResult<bool> {
        tracing::debug!(prompt, "Confirmation skipped (--yes)");
        Ok(true)
    }
}

/// Interactive prompt on the controlling terminal.
///
/// Refuses rather than guessing when stderr is not a terminal.
#[cfg(feature = "interactive")]
pub struct DialoguerPrompter {
    term: console::Term,
}

#[cfg(feature = "interactive")]
impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            term: console::Term::stderr(),
        }
    }
}

#[cfg(feature = "interactive")]
impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str) -> CliResult<bool> {
        use dialoguer::{Confirm, theme::ColorfulTheme};

        if !self.term.is_term() {
            return Err(CliError::ConfirmationRequired {
                prompt: prompt.to_string(),
            });
        }

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact_on(&self.term)
            .map_err(|e| CliError::IoError {
                message: "Failed to read confirmation".into(),
                source: std::io::Error::other(e.to_string()),
            })
    }
}

/// Stand-in when the binary is built without the `interactive` feature.
#[cfg(not(feature = "interactive"))]
pub struct NonInteractive;

#[cfg(not(feature = "interactive"))]
impl Prompter for NonInteractive {
    fn confirm(&self, _prompt: &str) -> CliResult<bool> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}

/// The prompter for a command: `--yes` never asks.
pub fn prompter(assume_yes: bool) -> Box<dyn Prompter> {
    if assume_yes {
        return Box::new(AssumeYes);
    }

    #[cfg(feature = "interactive")]
    {
        Box::new(DialoguerPrompter::new())
    }
    #[cfg(not(feature = "interactive"))]
    {
        Box::new(NonInteractive)
    }
}

/// Confirm or bail out with [`CliError::Cancelled`].
pub fn require(prompter: &dyn Prompter, prompt: &str) -> CliResult<()> {
    if prompter.confirm(prompt)? {
        Ok(())
    } else {
        Err(CliError::Cancelled)
    }
}
