//! Tree walker producing the full listing, the abbreviated listing and the
//! manifest in a single depth-first pass.
//!
//! Children of every directory are visited in name order, so two scans of an
//! unchanged tree produce byte-identical artifacts. Exclusion is inherited:
//! the walker passes `!included` of a directory down as `parent_excluded` for
//! its children, which makes every descendant of an excluded directory
//! excluded as well.
//!
//! By default the walker descends into excluded directories too, so the
//! manifest records every reachable path. [`ScanOptions::prune_excluded`]
//! trades that completeness for speed on large excluded trees.

/// Markdown bullet listings.
pub mod listing;

/// Recursive and explicit-stack traversal strategies.
pub mod walk;

use crate::classify::{is_relevant, should_include};
use crate::config::ExclusionRules;
use crate::error::PackError;
use crate::manifest::{EntryType, Manifest, ManifestEntry};
use std::io;
use std::path::Path;
use tracing::{Level, debug, span};

pub use listing::{ABBREVIATED_LISTING_TITLE, FULL_LISTING_TITLE, TreeListing};

/// One filesystem item seen during the scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Entry name (last path component)
    pub name: String,
    /// Path relative to the scan root, native separators
    pub relative_path: String,
    /// Whether the entry is a directory (symlinks are not followed)
    pub is_dir: bool,
    /// Nesting level; children of the root are at depth 0
    pub depth: usize,
    /// Hard include decision
    pub included: bool,
    /// Soft relevance decision for the abbreviated listing
    pub relevant: bool,
}

/// How the walker keeps track of pending directories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkStrategy {
    /// Plain recursion over `read_dir`
    #[default]
    Recursive,
    /// Explicit stack (walkdir); safe for very deep trees
    Iterative,
}

/// Tunables for a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Traversal strategy; both produce identical output
    pub strategy: WalkStrategy,
    /// Record excluded directories but skip their subtrees entirely
    pub prune_excluded: bool,
}

/// Everything produced by one scan
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Every visited entry in traversal order
    pub entries: Vec<TreeEntry>,
    /// Listing of every entry
    pub full: TreeListing,
    /// Listing of relevant entries only
    pub abbreviated: TreeListing,
    /// Path to include decision for every entry
    pub manifest: Manifest,
}

impl ScanOutput {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            full: TreeListing::new(FULL_LISTING_TITLE),
            abbreviated: TreeListing::new(ABBREVIATED_LISTING_TITLE),
            manifest: Manifest::new(),
        }
    }

    /// Classify one child and append it to all three outputs.
    ///
    /// Returns the computed include decision.
    fn record(
        &mut self,
        rules: &ExclusionRules,
        name: String,
        relative_path: String,
        is_dir: bool,
        depth: usize,
        parent_excluded: bool,
    ) -> bool {
        let included = should_include(&name, is_dir, parent_excluded, rules);
        let relevant = is_relevant(&name, is_dir);

        self.full.push(depth, &name, is_dir);
        if relevant {
            self.abbreviated.push(depth, &name, is_dir);
        }

        let entry_type = if is_dir {
            EntryType::Directory
        } else {
            EntryType::File
        };
        self.manifest.insert(
            relative_path.clone(),
            ManifestEntry {
                entry_type,
                include: included,
            },
        );

        self.entries.push(TreeEntry {
            name,
            relative_path,
            is_dir,
            depth,
            included,
            relevant,
        });

        included
    }

    /// Number of entries marked for inclusion
    #[must_use]
    pub fn included_count(&self) -> usize {
        self.entries.iter().filter(|e| e.included).count()
    }
}

/// Scan `root` and classify every entry below it
///
/// # Errors
///
/// Returns [`PackError::FileSystem`] if `root` is not a directory or any
/// directory below it cannot be listed. No partial output is returned.
pub fn scan(
    root: &Path,
    rules: &ExclusionRules,
    options: ScanOptions,
) -> Result<ScanOutput, PackError> {
    let span = span!(Level::DEBUG, "scan", root = %root.display());
    let _guard = span.enter();

    if !root.is_dir() {
        return Err(PackError::file_system(
            root,
            io::Error::new(io::ErrorKind::NotADirectory, "scan root is not a directory"),
        ));
    }

    let mut output = ScanOutput::new();
    match options.strategy {
        WalkStrategy::Recursive => walk::walk_recursive(root, rules, options, &mut output)?,
        WalkStrategy::Iterative => walk::walk_iterative(root, rules, options, &mut output)?,
    }

    debug!(
        entries = output.entries.len(),
        included = output.included_count(),
        "Scan complete"
    );
    Ok(output)
}
