//! Stage entry points shared by the `projpack-scan` and `projpack-archive`
//! binaries.

/// Archive stage.
pub mod archive;

/// Scan stage.
pub mod scan;
