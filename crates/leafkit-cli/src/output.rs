//! Output management and formatting.

use std::io::{self, IsTerminal};
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // An explicit flag beats the config file; Auto then resolves to Human
        // (TTY) or Plain (piped/redirected).
        let requested = match args.output_format {
            OutputFormat::Auto => parse_format(&config.output.format).unwrap_or(OutputFormat::Auto),
            explicit => explicit,
        };
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }
    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`.  *Not* suppressed in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Dimmed secondary line, e.g. a path under a heading.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.muted() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty JSON on stdout.  Written even in quiet mode so pipes stay
    /// parseable.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> CliResult<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(|e| CliError::InvalidInput {
            message: format!("Failed to serialise output: {e}"),
            source: Some(Box::new(e)),
        })?;
        self.term.write_line(&rendered)?;
        Ok(())
    }

    /// Progress bar over `len` steps.  Hidden when quiet or when stderr is
    /// not a terminal, so piped output stays clean.
    pub fn progress(&self, len: u64) -> ProgressBar {
        if self.muted() || !io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        let template = if self.no_color {
            "{pos}/{len} {wide_msg}"
        } else {
            "{spinner:.green} [{bar:24.cyan/blue}] {pos}/{len} {wide_msg}"
        };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }

    /// Human-oriented lines are dropped when quiet or when stdout carries JSON.
    fn muted(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

fn parse_format(raw: &str) -> Option<OutputFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Some(OutputFormat::Human),
        "plain" => Some(OutputFormat::Plain),
        "json" => Some(OutputFormat::Json),
        "auto" | "" => Some(OutputFormat::Auto),
        _ => None,
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
