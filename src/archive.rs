//! Archive of the files a manifest marks for inclusion.
//!
//! Only `type = "file"`, `include = true` entries become members, stored
//! under their manifest key. Directory entries are never materialized, so an
//! excluded directory and a directory without included children look the
//! same inside the archive.
//!
//! The manifest may be older than the tree it describes. Files that vanished
//! since the scan, or can no longer be opened, are skipped with a warning
//! instead of failing the run. The archive itself lives below the scanned
//! root and is never packed into itself.

use crate::error::PackError;
use crate::manifest::Manifest;
use crate::output;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};

/// File name of the archive inside the `for-ai` output directory
pub const ARCHIVE_FILE: &str = "project-key-files.tar.gz";

/// Outcome of one archive run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Manifest keys written as archive members, in manifest order
    pub added: Vec<String>,
    /// Absolute paths listed for inclusion but absent at read time
    pub missing: Vec<PathBuf>,
    /// Manifest keys naming the archive being written
    pub skipped_output: Vec<String>,
}

/// Write a gzip-compressed tar of every included, still-existing file
///
/// # Errors
///
/// Returns [`PackError::FileSystem`] if the output cannot be created or
/// written. Source files that cannot be found or opened are reported in
/// [`ArchiveReport::missing`] instead.
pub fn build_archive(
    root: &Path,
    manifest: &Manifest,
    output_path: &Path,
) -> Result<ArchiveReport, PackError> {
    let span = span!(Level::DEBUG, "build_archive", output = %output_path.display());
    let _guard = span.enter();

    let file = File::create(output_path).map_err(|e| PackError::file_system(output_path, e))?;
    let identity =
        OutputIdentity::of(output_path).map_err(|e| PackError::file_system(output_path, e))?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    let mut report = ArchiveReport::default();

    for key in manifest.included_files() {
        let source = root.join(key);

        if identity.matches(&source) {
            debug!(path = %source.display(), "Skipping the archive being written");
            output::warning(&format!(
                "Warning: {} is the archive being written and will not be included",
                source.display()
            ));
            report.skipped_output.push(key.to_string());
            continue;
        }

        match append_member(&mut builder, &source, key) {
            Ok(()) => {
                output::action("Including", key);
                report.added.push(key.to_string());
            }
            Err(err) if err.is_recoverable() => {
                debug!(path = %source.display(), "Skipping missing source file");
                output::warning(&format!("Warning: {err}"));
                report.missing.push(source);
            }
            Err(err) => return Err(err),
        }
    }

    let write_err = |e: io::Error| PackError::file_system(output_path, e);
    let encoder = builder.into_inner().map_err(write_err)?;
    let mut writer = encoder.finish().map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    debug!(
        added = report.added.len(),
        missing = report.missing.len(),
        "Archive written"
    );
    Ok(report)
}

/// Identity of the output file, taken right after it is created
struct OutputIdentity {
    canonical: PathBuf,
    #[cfg(unix)]
    inode: (u64, u64),
}

impl OutputIdentity {
    fn of(path: &Path) -> io::Result<Self> {
        let canonical = fs::canonicalize(path)?;
        #[cfg(unix)]
        let inode = {
            use std::os::unix::fs::MetadataExt;
            let metadata = fs::metadata(&canonical)?;
            (metadata.dev(), metadata.ino())
        };

        Ok(Self {
            canonical,
            #[cfg(unix)]
            inode,
        })
    }

    /// Hard links to the output count as the output.
    fn matches(&self, source: &Path) -> bool {
        if fs::canonicalize(source).is_ok_and(|path| path == self.canonical) {
            return true;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            if let Ok(metadata) = fs::metadata(source) {
                return (metadata.dev(), metadata.ino()) == self.inode;
            }
        }

        false
    }
}

/// Any failure to stat or open the source counts as a missing file; only
/// writing the member can fail the run.
fn append_member<W: Write>(
    builder: &mut tar::Builder<W>,
    source: &Path,
    member: &str,
) -> Result<(), PackError> {
    let missing = |e: Option<io::Error>| {
        if let Some(e) = e {
            debug!(path = %source.display(), error = %e, "Source file unavailable");
        }
        PackError::MissingSourceFile {
            path: source.to_path_buf(),
        }
    };

    match fs::metadata(source) {
        Ok(metadata) if metadata.is_file() => {}
        Ok(_) => return Err(missing(None)),
        Err(e) => return Err(missing(Some(e))),
    }

    let mut file = File::open(source).map_err(|e| missing(Some(e)))?;

    builder
        .append_file(Path::new(member), &mut file)
        .map_err(|e| PackError::file_system(source, e))
}
