#![allow(dead_code)]

use anyhow::Result;
use projpack::PackContext;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path};
use tempfile::TempDir;

/// Project fixture: `<tmp>/projects` is the script directory, `<tmp>` the root
pub struct TestProject {
    pub temp_dir: TempDir,
    pub ctx: PackContext,
}

impl TestProject {
    /// Create a project whose exclusion config has the given JSON content
    pub fn new(config_json: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let ctx = PackContext::from_script_dir(temp_dir.path().join("projects"))?;
        fs::create_dir_all(&ctx.script_dir)?;
        fs::write(ctx.default_config_path(), config_json)?;

        Ok(Self { temp_dir, ctx })
    }

    /// Scanned root
    pub fn root(&self) -> &Path {
        &self.ctx.root
    }

    /// Write a file below the root, creating parent directories
    pub fn file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Create a directory below the root
    pub fn dir(&self, relative: &str) -> Result<()> {
        fs::create_dir_all(self.root().join(relative))?;
        Ok(())
    }
}

/// Turn a `/`-separated path into a manifest key for this platform
pub fn key(path: &str) -> String {
    path.replace('/', &MAIN_SEPARATOR.to_string())
}
