use super::{ScanOptions, ScanOutput};
use crate::config::ExclusionRules;
use crate::error::PackError;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Depth-first walk using call-stack recursion
///
/// # Errors
///
/// Returns [`PackError::FileSystem`] on the first directory that cannot be
/// listed.
pub fn walk_recursive(
    root: &Path,
    rules: &ExclusionRules,
    options: ScanOptions,
    output: &mut ScanOutput,
) -> Result<(), PackError> {
    visit_dir(root, Path::new(""), 0, false, rules, options, output)
}

fn visit_dir(
    dir: &Path,
    relative: &Path,
    depth: usize,
    parent_excluded: bool,
    rules: &ExclusionRules,
    options: ScanOptions,
    output: &mut ScanOutput,
) -> Result<(), PackError> {
    let mut children = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(|e| PackError::file_system(dir, e))?;
    children.sort_by_key(fs::DirEntry::file_name);

    debug!(dir = %relative.display(), children = children.len(), "Listing directory");

    for child in children {
        let path = child.path();
        let is_dir = child
            .file_type()
            .map_err(|e| PackError::file_system(&path, e))?
            .is_dir();

        let file_name = child.file_name();
        let child_relative = relative.join(&file_name);
        let included = output.record(
            rules,
            entry_name(&file_name, &path),
            path_key(&child_relative),
            is_dir,
            depth,
            parent_excluded,
        );

        if is_dir && (included || !options.prune_excluded) {
            visit_dir(
                &path,
                &child_relative,
                depth + 1,
                !included,
                rules,
                options,
                output,
            )?;
        }
    }

    Ok(())
}

/// Depth-first walk with an explicit stack
///
/// Produces exactly the same output as [`walk_recursive`]; walkdir keeps the
/// pending directories on the heap, and the exclusion state of the current
/// ancestors is kept in `excluded`, indexed by depth.
///
/// # Errors
///
/// Returns [`PackError::FileSystem`] on the first directory that cannot be
/// listed.
pub fn walk_iterative(
    root: &Path,
    rules: &ExclusionRules,
    options: ScanOptions,
    output: &mut ScanOutput,
) -> Result<(), PackError> {
    let mut excluded: Vec<bool> = Vec::new();
    let mut entries = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = entries.next() {
        let entry = next.map_err(|e| walk_error(root, e))?;

        // walkdir depth 1 is a child of the root
        let depth = entry.depth() - 1;
        excluded.truncate(depth);
        let parent_excluded = excluded.last().copied().unwrap_or(false);

        let path = entry.path();
        let is_dir = entry.file_type().is_dir();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let included = output.record(
            rules,
            entry_name(entry.file_name(), path),
            path_key(relative),
            is_dir,
            depth,
            parent_excluded,
        );

        if is_dir {
            if included || !options.prune_excluded {
                excluded.push(!included);
            } else {
                entries.skip_current_dir();
            }
        }
    }

    Ok(())
}

fn walk_error(root: &Path, err: walkdir::Error) -> PackError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other(message));
    PackError::file_system(&path, source)
}

fn entry_name(name: &OsStr, path: &Path) -> String {
    name.to_str().map_or_else(
        || {
            warn!(path = %path.display(), "Entry name is not valid UTF-8, recording lossily");
            name.to_string_lossy().into_owned()
        },
        str::to_owned,
    )
}

fn path_key(relative: &Path) -> String {
    relative.to_string_lossy().into_owned()
}
