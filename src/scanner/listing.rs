//! Markdown bullet listings of the scanned tree.

use crate::error::PackError;
use std::path::Path;

/// Heading of the full listing document
pub const FULL_LISTING_TITLE: &str = "# Full Project Structure";

/// Heading of the abbreviated listing document
pub const ABBREVIATED_LISTING_TITLE: &str = "# Abbreviated Project Structure (For AI Context)";

/// Indented bullet lines, one per entry, mirroring tree depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeListing {
    title: &'static str,
    lines: Vec<String>,
}

impl TreeListing {
    /// Create an empty listing rendered under `title`
    #[must_use]
    pub const fn new(title: &'static str) -> Self {
        Self {
            title,
            lines: Vec::new(),
        }
    }

    /// Append the line for one entry; directories get a trailing `/`
    pub fn push(&mut self, depth: usize, name: &str, is_dir: bool) {
        let marker = if is_dir { "/" } else { "" };
        self.lines
            .push(format!("{}- {name}{marker}", "  ".repeat(depth)));
    }

    /// Bullet lines without the heading
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render heading, blank line and the bullet lines
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.title, self.lines.join("\n"))
    }

    /// Write the rendered listing to `path`
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileSystem`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PackError> {
        std::fs::write(path, self.render()).map_err(|e| PackError::file_system(path, e))
    }
}
