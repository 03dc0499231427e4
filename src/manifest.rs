//! Manifest of every path visited by the scan and its include decision.
//!
//! The manifest is the only contract between the scan stage and the archive
//! stage. On disk it is a JSON object keyed by relative path:
//!
//! ```json
//! {
//!     "src": { "type": "directory", "include": true },
//!     "src/app.py": { "type": "file", "include": true }
//! }
//! ```
//!
//! Keys are written exactly as recorded (native separators included) so the
//! archive stage can re-resolve them against the same root. Entry order is the
//! traversal order and survives a save/load cycle, but lookups are by key.

use crate::error::PackError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path};
use tracing::debug;

/// File name of the manifest inside the output directory
pub const MANIFEST_FILE: &str = "project-pack.json";

/// Kind of filesystem entry a manifest key refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file (or anything that is not a directory)
    File,
    /// Directory
    Directory,
}

/// Decision recorded for one path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Whether the path is a file or a directory
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Hard include decision; absent means excluded
    #[serde(default)]
    pub include: bool,
}

impl ManifestEntry {
    /// Check if this entry should become an archive member
    #[must_use]
    pub fn is_included_file(&self) -> bool {
        self.include && self.entry_type == EntryType::File
    }
}

/// Ordered map from relative path to [`ManifestEntry`] with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Entries in insertion order
    entries: Vec<(String, ManifestEntry)>,
    /// Key to position in `entries`
    index: HashMap<String, usize>,
}

impl Manifest {
    /// Create an empty manifest
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path. Returns `false` and keeps the existing entry if the key
    /// is already present.
    pub fn insert(&mut self, key: String, entry: ManifestEntry) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry));
        true
    }

    /// Look up the entry recorded for `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Keys of file entries marked for inclusion, in insertion order
    pub fn included_files(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, entry)| entry.is_included_file())
            .map(|(key, _)| key)
    }

    /// Number of recorded paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no paths are recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the manifest as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileSystem`] if the file cannot be created or
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), PackError> {
        let file = File::create(path).map_err(|e| PackError::file_system(path, e))?;
        let mut writer = BufWriter::new(file);

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| PackError::file_system(path, io::Error::other(e)))?;

        writer.flush().map_err(|e| PackError::file_system(path, e))?;
        debug!(path = %path.display(), entries = self.len(), "Manifest written");
        Ok(())
    }

    /// Load a manifest previously written by [`Manifest::save`]
    ///
    /// # Errors
    ///
    /// Returns [`PackError::FileSystem`] if the file cannot be read and
    /// [`PackError::ManifestCorrupt`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, PackError> {
        let content = std::fs::read_to_string(path).map_err(|e| PackError::file_system(path, e))?;
        let manifest: Self =
            serde_json::from_str(&content).map_err(|e| PackError::manifest_corrupt(path, e.to_string()))?;

        debug!(path = %path.display(), entries = manifest.len(), "Manifest loaded");
        Ok(manifest)
    }
}

impl Serialize for Manifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = Manifest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from relative path to {type, include}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut manifest = Manifest::new();

        while let Some((key, entry)) = access.next_entry::<String, ManifestEntry>()? {
            if !is_relative_key(&key) {
                return Err(serde::de::Error::custom(format!(
                    "manifest key '{key}' is not a relative path below the root"
                )));
            }
            if manifest.get(&key).is_some() {
                return Err(serde::de::Error::custom(format!(
                    "duplicate manifest key '{key}'"
                )));
            }
            manifest.insert(key, entry);
        }

        Ok(manifest)
    }
}

/// Keys must name something strictly below the scan root.
fn is_relative_key(key: &str) -> bool {
    let path = Path::new(key);
    !key.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}
