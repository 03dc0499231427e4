//! User-facing messages and diagnostic logging.
//!
//! Confirmation and warning lines are written to stderr through `colored`,
//! filtered by a global [`Verbosity`]. Diagnostic events use `tracing`;
//! [`init_logging`] installs a subscriber whose level follows the same
//! verbosity; `RUST_LOG` can refine it only in verbose mode.

use colored::Colorize;
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet = 0,
    /// Confirmations and per-file progress.
    Normal = 1,
    /// Also debug diagnostics.
    Verbose = 2,
}

impl Verbosity {
    /// Pick a level from the `--quiet` / `--verbose` flags; quiet wins.
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Set the verbosity and install the `tracing` subscriber.
///
/// `RUST_LOG` is only consulted at [`Verbosity::Verbose`]; the other levels
/// use a fixed filter. Safe to call more than once; later calls keep the
/// first subscriber.
pub fn init_logging(level: Verbosity) {
    set_verbosity(level);

    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    let directive = log_directive(level, rust_log);
    let filter = tracing_subscriber::EnvFilter::try_new(&directive)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn log_directive(level: Verbosity, rust_log: Option<String>) -> String {
    match rust_log {
        Some(directive) if level == Verbosity::Verbose && !directive.trim().is_empty() => {
            directive
        }
        _ => level.filter_directive().to_string(),
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.green());
}

/// Prints an error message in bold red (always shown).
pub fn error(message: &str) {
    eprintln!("{}", message.red().bold());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Prints a git-style action line with a dimmed verb (respects quiet mode).
pub fn action(verb: &str, message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{} {}", verb.dimmed().bold(), message);
}

/// Confirm that an artifact was written.
pub fn saved(artifact: &str, path: &Path) {
    success(&format!("{artifact} saved to {}", path.display()));
}
