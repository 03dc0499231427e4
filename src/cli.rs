//! Command-line interface definitions for the two projpack stages.
//!
//! Both binaries run without arguments: every path is derived from the
//! directory holding the executable. The flags below only override that
//! derivation or tune output. The definitions are shared with xtask for man
//! page generation.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use crate::output::Verbosity;
use clap::{Args, Parser};
use std::path::PathBuf;

/// Flags shared by both stages.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Directory treated as the script directory (default: the executable's directory)
    #[arg(long, value_name = "DIR")]
    pub script_dir: Option<PathBuf>,

    /// Show debug diagnostics
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommonArgs {
    #[must_use]
    pub const fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

/// Scan stage: listings and manifest.
#[derive(Parser, Debug)]
#[command(
    name = "projpack-scan",
    version = crate::VERSION,
    about = "Scan the project tree and write listings plus the include manifest",
    long_about = "Walks the parent of the script directory, classifies every entry against \
                  exclusions-config.json and writes the full listing, the abbreviated listing \
                  and project-pack.json under ai-supp/"
)]
pub struct ScanCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Exclusion config file (default: <script dir>/exclusions-config.json)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Record excluded directories but do not descend into them
    #[arg(long)]
    pub prune_excluded: bool,

    /// Walk with an explicit stack instead of recursion
    #[arg(long)]
    pub iterative: bool,
}

/// Archive stage: tarball of included files.
#[derive(Parser, Debug)]
#[command(
    name = "projpack-archive",
    version = crate::VERSION,
    about = "Archive every file the manifest marks for inclusion",
    long_about = "Reads ai-supp/project-pack.json and writes \
                  ai-supp/for-ai/project-key-files.tar.gz, skipping files that no longer exist"
)]
pub struct ArchiveCli {
    #[command(flatten)]
    pub common: CommonArgs,
}
