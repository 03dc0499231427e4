#![warn(missing_docs)]

//! # projpack - curated project snapshots
//!
//! projpack walks a project tree, decides for every entry whether it belongs
//! in a snapshot, and hands the result to a second stage that packs the
//! chosen files into one archive. The typical consumer is an AI assistant or
//! a packaging pipeline that should see the code, not the build output.
//!
//! ## Stages
//!
//! 1. **Scan** ([`commands::scan`]): load [`config::ExclusionRules`], walk
//!    the tree with [`scanner::scan`] and write three artifacts:
//!    - a full listing of every entry,
//!    - an abbreviated listing of relevant entries only,
//!    - the [`manifest::Manifest`] mapping each path to an include flag.
//! 2. **Archive** ([`commands::archive`]): reload the manifest and pack every
//!    included file that still exists with [`archive::build_archive`].
//!
//! The stages run as separate processes and share nothing but the manifest
//! file.
//!
//! ## Layout
//!
//! Paths derive from the script directory (the directory holding the
//! executable). The scanned root is its parent, and artifacts land under
//! `<root>/ai-supp/`:
//!
//! ```text
//! <root>/
//! ├── <script dir>/exclusions-config.json
//! └── ai-supp/
//!     ├── project-structure-generated.md
//!     ├── project-pack.json
//!     └── for-ai/
//!         ├── project-structure-abbreviated.md
//!         └── project-key-files.tar.gz
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use projpack::config::ExclusionRules;
//! use projpack::scanner::{ScanOptions, scan};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let rules = ExclusionRules::new(["node_modules", ".git"], [".DS_Store"]);
//! let output = scan(Path::new("."), &rules, ScanOptions::default())?;
//! println!("{}", output.abbreviated.render());
//! # Ok(())
//! # }
//! ```

/// Archive builder consuming a manifest.
pub mod archive;

/// Per-entry include and relevance decisions.
pub mod classify;

/// Command-line interface definitions shared by the binaries and xtask.
pub mod cli;

/// Stage entry points used by the binaries.
pub mod commands;

/// Exclusion rule loading and validation.
pub mod config;

/// Error taxonomy for both stages.
pub mod error;

/// Persisted path to include-decision mapping.
pub mod manifest;

/// Coloured user messages and logging setup.
pub mod output;

/// Tree walker producing listings and the manifest.
pub mod scanner;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub use error::PackError;

/// Current version of the projpack binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output directory name, relative to the scanned root.
pub const OUTPUT_DIR: &str = "ai-supp";

/// Subdirectory of [`OUTPUT_DIR`] holding the AI-facing artifacts.
pub const FOR_AI_DIR: &str = "for-ai";

/// File name of the full listing inside [`OUTPUT_DIR`].
pub const FULL_LISTING_FILE: &str = "project-structure-generated.md";

/// File name of the abbreviated listing inside [`FOR_AI_DIR`].
pub const ABBREVIATED_LISTING_FILE: &str = "project-structure-abbreviated.md";

/// Resolved locations for one run.
///
/// # Examples
///
/// ```
/// use projpack::PackContext;
/// use std::path::Path;
///
/// # fn main() -> anyhow::Result<()> {
/// let ctx = PackContext::from_script_dir("/work/app/projects".into())?;
/// assert_eq!(ctx.root, Path::new("/work/app"));
/// assert_eq!(ctx.manifest_path(), Path::new("/work/app/ai-supp/project-pack.json"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackContext {
    /// Directory holding the executable (or the override).
    pub script_dir: PathBuf,

    /// Directory that is scanned; parent of `script_dir`.
    pub root: PathBuf,
}

impl PackContext {
    /// Resolve the context from an optional script directory override,
    /// falling back to the running executable's directory.
    ///
    /// # Errors
    /// Returns an error if the executable path cannot be determined or the
    /// script directory has no parent.
    pub fn resolve(script_dir: Option<PathBuf>) -> Result<Self> {
        match script_dir {
            Some(dir) => Self::from_script_dir(dir),
            None => Self::from_current_exe(),
        }
    }

    /// Derive the context from the running executable's location.
    ///
    /// # Errors
    /// Returns an error if the executable path cannot be determined or has
    /// no grandparent directory.
    pub fn from_current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("Could not locate the running executable")?;
        let script_dir = exe
            .parent()
            .with_context(|| format!("Executable has no parent directory: {}", exe.display()))?;
        Self::from_script_dir(script_dir.to_path_buf())
    }

    /// Derive the context from an explicit script directory.
    ///
    /// Relative paths are made absolute against the current directory.
    ///
    /// # Errors
    /// Returns an error if the directory has no parent.
    pub fn from_script_dir(script_dir: PathBuf) -> Result<Self> {
        let script_dir = std::path::absolute(&script_dir).with_context(|| {
            format!("Could not resolve script directory: {}", script_dir.display())
        })?;
        let root = script_dir
            .parent()
            .with_context(|| {
                format!(
                    "Script directory has no parent to scan: {}",
                    script_dir.display()
                )
            })?
            .to_path_buf();

        Ok(Self { script_dir, root })
    }

    /// `<root>/ai-supp`
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    /// `<root>/ai-supp/for-ai`
    #[must_use]
    pub fn for_ai_dir(&self) -> PathBuf {
        self.output_dir().join(FOR_AI_DIR)
    }

    /// `<script dir>/exclusions-config.json`
    #[must_use]
    pub fn default_config_path(&self) -> PathBuf {
        self.script_dir.join(config::DEFAULT_CONFIG_FILE)
    }

    /// Full listing destination.
    #[must_use]
    pub fn full_listing_path(&self) -> PathBuf {
        self.output_dir().join(FULL_LISTING_FILE)
    }

    /// Abbreviated listing destination.
    #[must_use]
    pub fn abbreviated_listing_path(&self) -> PathBuf {
        self.for_ai_dir().join(ABBREVIATED_LISTING_FILE)
    }

    /// Manifest location shared by both stages.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_dir().join(manifest::MANIFEST_FILE)
    }

    /// Archive destination.
    #[must_use]
    pub fn archive_path(&self) -> PathBuf {
        self.for_ai_dir().join(archive::ARCHIVE_FILE)
    }

    /// Ensures the output directory and its `for-ai` subdirectory exist.
    ///
    /// # Errors
    /// Returns an error if the directories cannot be created.
    pub fn ensure_output_dirs(&self) -> Result<()> {
        let for_ai = self.for_ai_dir();
        std::fs::create_dir_all(&for_ai).map_err(|e| PackError::file_system(&for_ai, e))?;
        Ok(())
    }
}
