use crate::PackContext;
use crate::archive::{self, ArchiveReport};
use crate::manifest::Manifest;
use crate::output;
use anyhow::{Context, Result};

/// Pack every included file listed in the context's manifest
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or parsed, or if the
/// archive cannot be written. Files that disappeared since the scan only
/// produce warnings.
pub fn execute(ctx: &PackContext) -> Result<ArchiveReport> {
    let manifest_path = ctx.manifest_path();
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest from {}", manifest_path.display()))?;

    ctx.ensure_output_dirs()?;

    let archive_path = ctx.archive_path();
    let report = archive::build_archive(&ctx.root, &manifest, &archive_path)?;

    if !report.missing.is_empty() {
        output::warning(&format!(
            "{} listed file(s) no longer exist and were skipped",
            report.missing.len()
        ));
    }
    output::success(&format!(
        "Files successfully archived into {}",
        archive_path.display()
    ));

    Ok(report)
}
