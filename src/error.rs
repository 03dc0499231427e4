use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Categorized failures of the scan and archive stages
#[derive(Debug)]
pub enum PackError {
    /// Exclusion configuration missing, unreadable or malformed
    Config {
        /// Configuration file that was being loaded
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },
    /// A directory could not be listed or an artifact could not be written
    FileSystem {
        /// Path the failing operation touched
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A manifest-listed file no longer exists, or cannot be opened, at
    /// archive time
    MissingSourceFile {
        /// Absolute path that was expected on disk
        path: PathBuf,
    },
    /// The manifest could not be parsed
    ManifestCorrupt {
        /// Manifest file that was being loaded
        path: PathBuf,
        /// Human-readable cause
        reason: String,
    },
}

impl PackError {
    /// Build a configuration error for `path`
    pub fn config(path: &Path, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Wrap an I/O error that happened while touching `path`
    pub fn file_system(path: &Path, source: io::Error) -> Self {
        Self::FileSystem {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Build a corrupt-manifest error for `path`
    pub fn manifest_corrupt(path: &Path, reason: impl Into<String>) -> Self {
        Self::ManifestCorrupt {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Whether the run may continue after this error
    ///
    /// Only a missing source file during archiving is recovered locally;
    /// everything else aborts the stage.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MissingSourceFile { .. })
    }

    /// Get a short description of the error type
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config { .. } => "Configuration Error",
            Self::FileSystem { .. } => "File System Error",
            Self::MissingSourceFile { .. } => "Missing Source File",
            Self::ManifestCorrupt { .. } => "Corrupt Manifest",
        }
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { path, reason } => {
                write!(f, "{}: {} ({reason})", self.error_type(), path.display())
            }
            Self::FileSystem { path, source } => {
                write!(f, "{}: {} ({source})", self.error_type(), path.display())
            }
            Self::MissingSourceFile { path } => {
                write!(
                    f,
                    "{}: {} does not exist and will not be included",
                    self.error_type(),
                    path.display()
                )
            }
            Self::ManifestCorrupt { path, reason } => {
                write!(f, "{}: {} ({reason})", self.error_type(), path.display())
            }
        }
    }
}

impl std::error::Error for PackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}
