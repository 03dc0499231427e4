use crate::PackContext;
use crate::config::ExclusionRules;
use crate::output;
use crate::scanner::{self, ScanOptions, ScanOutput};
use anyhow::{Context, Result};
use std::path::Path;

/// Scan the context root and write the listings and the manifest
///
/// Rules are loaded before anything is created on disk, so a bad
/// configuration leaves the tree untouched.
///
/// # Errors
///
/// Returns an error if:
/// - The exclusion config is missing or malformed
/// - Any directory under the root cannot be listed
/// - An artifact cannot be written
pub fn execute(ctx: &PackContext, config_path: &Path, options: ScanOptions) -> Result<ScanOutput> {
    let rules = ExclusionRules::load(config_path)
        .with_context(|| format!("Failed to load exclusion rules from {}", config_path.display()))?;

    ctx.ensure_output_dirs()?;

    let output = scanner::scan(&ctx.root, &rules, options)
        .with_context(|| format!("Failed to scan {}", ctx.root.display()))?;

    let full_path = ctx.full_listing_path();
    output.full.save(&full_path)?;
    output::saved("Full markdown structure", &full_path);

    let abbreviated_path = ctx.abbreviated_listing_path();
    output.abbreviated.save(&abbreviated_path)?;
    output::saved("Abbreviated markdown structure", &abbreviated_path);

    let manifest_path = ctx.manifest_path();
    output.manifest.save(&manifest_path)?;
    output::saved("Project pack JSON", &manifest_path);

    Ok(output)
}
