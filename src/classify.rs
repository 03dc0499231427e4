//! Per-entry decisions made while walking the tree.
//!
//! Two independent axes are computed for every entry:
//!
//! - [`should_include`]: the hard exclude. Decides archive membership and is
//!   monotonic downward (an excluded directory excludes its whole subtree).
//! - [`is_relevant`]: the soft filter. Decides whether the entry appears in
//!   the abbreviated listing and never looks at exclusion state.
//!
//! Both are pure functions of their arguments.

use crate::config::ExclusionRules;

/// File suffixes of compiled artifacts that are always excluded
pub const COMPILED_ARTIFACT_SUFFIXES: &[&str] = &[".pyc", ".class"];

/// File names kept in the abbreviated listing regardless of extension
pub const IMPORTANT_FILE_NAMES: &[&str] = &[
    "Dockerfile",
    ".gitignore",
    ".env",
    "package.json",
    "README.md",
];

/// Source-like file suffixes kept in the abbreviated listing
pub const SOURCE_EXTENSIONS: &[&str] = &[".py", ".js", ".ts", ".html", ".css"];

/// Decide whether an entry belongs in the archive.
///
/// Returns `false` unconditionally when `parent_excluded` is set, without
/// looking at `name`. Directories are excluded by exact name match against
/// the configured directory rules; files by exact name match against the
/// configured file rules or by a [`COMPILED_ARTIFACT_SUFFIXES`] suffix.
#[must_use]
pub fn should_include(
    name: &str,
    is_dir: bool,
    parent_excluded: bool,
    rules: &ExclusionRules,
) -> bool {
    if parent_excluded {
        return false;
    }

    if is_dir {
        return !rules.excludes_directory(name);
    }

    !(rules.excludes_file(name) || has_suffix(name, COMPILED_ARTIFACT_SUFFIXES))
}

/// Decide whether an entry appears in the abbreviated listing.
///
/// Directories are always relevant so the listing can show the path down to
/// relevant leaves.
#[must_use]
pub fn is_relevant(name: &str, is_dir: bool) -> bool {
    if is_dir {
        return true;
    }

    IMPORTANT_FILE_NAMES.contains(&name) || has_suffix(name, SOURCE_EXTENSIONS)
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| name.ends_with(suffix))
}
