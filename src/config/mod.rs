//! Exclusion rules loaded from the project's configuration file.
//!
//! The configuration document carries two optional lists:
//!
//! ```json
//! {
//!     "excluded_directories": ["node_modules", ".git"],
//!     "excluded_files": [".DS_Store"]
//! }
//! ```
//!
//! A missing list means "exclude nothing of that kind". JSON is the default
//! format; files ending in `.toml` are read as TOML with the same keys.

pub mod parser;
pub mod validator;

use crate::error::PackError;
use crate::output;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Default configuration file name, looked up in the script directory.
pub const DEFAULT_CONFIG_FILE: &str = "exclusions-config.json";

/// Serialization format of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document (default)
    Json,
    /// TOML document
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension, defaulting to JSON
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Directory and file names excluded from the archive.
///
/// Immutable once loaded; rules match bare entry names exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRules {
    #[serde(default)]
    excluded_directories: HashSet<String>,
    #[serde(default)]
    excluded_files: HashSet<String>,
}

impl ExclusionRules {
    /// Build rules from explicit name lists
    pub fn new<D, F>(directories: D, files: F) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            excluded_directories: directories.into_iter().map(Into::into).collect(),
            excluded_files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Load rules from a configuration file, printing validation warnings
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Config`] if the file does not exist, cannot be
    /// read, or is not a structured document with the expected shape.
    pub fn load(path: &Path) -> Result<Self, PackError> {
        let parsed = parser::parse_rules_file(path)?;

        for warning in validator::RulesValidator::new().validate(&parsed) {
            output::warning(&format!("{}: {warning}", path.display()));
        }

        Ok(parsed.rules)
    }

    /// Parse rules from in-memory content
    ///
    /// # Errors
    ///
    /// Returns [`PackError::Config`] if `content` is malformed.
    pub fn from_str_with_format(content: &str, format: ConfigFormat) -> Result<Self, PackError> {
        parser::parse_rules_str(content, format, Path::new("<memory>")).map(|parsed| parsed.rules)
    }

    /// Whether a directory with this name is excluded
    #[must_use]
    pub fn excludes_directory(&self, name: &str) -> bool {
        self.excluded_directories.contains(name)
    }

    /// Whether a file with this name is excluded by an explicit rule
    #[must_use]
    pub fn excludes_file(&self, name: &str) -> bool {
        self.excluded_files.contains(name)
    }

    /// Configured directory names
    #[must_use]
    pub const fn excluded_directories(&self) -> &HashSet<String> {
        &self.excluded_directories
    }

    /// Configured file names
    #[must_use]
    pub const fn excluded_files(&self) -> &HashSet<String> {
        &self.excluded_files
    }

    /// Check if no rules are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.excluded_directories.is_empty() && self.excluded_files.is_empty()
    }
}
