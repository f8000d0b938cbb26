//! Config Store
//!
//! Persists slot paths and checked flags to a flat JSON document. The file is
//! always rewritten whole; there is no partial update and no schema version.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::slots::{Slot, SLOT_COUNT};
use crate::Result;

/// Default config file name, relative to the working directory
pub const CONFIG_FILE_NAME: &str = "noksuLauncherConfig.json";

/// On-disk snapshot of all slots, positionally aligned with slot index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    #[serde(default)]
    pub entries: Vec<String>,
    #[serde(default)]
    pub checked: Vec<bool>,
}

impl ConfigDocument {
    /// Snapshot the given slots
    pub fn from_slots(slots: &[Slot]) -> Self {
        Self {
            entries: slots.iter().map(|s| s.path.clone()).collect(),
            checked: slots.iter().map(|s| s.checked).collect(),
        }
    }

    /// Path and checked state for a slot. Short arrays read as empty and
    /// unchecked; elements past `SLOT_COUNT` are never asked for.
    pub fn slot(&self, index: usize) -> (&str, bool) {
        let path = self.entries.get(index).map(String::as_str).unwrap_or("");
        let checked = self.checked.get(index).copied().unwrap_or(false);
        (path, checked)
    }

    /// Number of slots this document actually describes
    pub fn len(&self) -> usize {
        self.entries.len().min(SLOT_COUNT)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Reads, writes and deletes the config document
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(CONFIG_FILE_NAME)
    }
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document. Missing or malformed files are logged and read as
    /// absent.
    pub fn load(&self) -> Option<ConfigDocument> {
        match self.try_load() {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Failed to load config {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Load the document, reporting what went wrong
    pub fn try_load(&self) -> Result<Option<ConfigDocument>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let doc: ConfigDocument = serde_json::from_str(&text)?;
        info!(
            "Loaded config {} ({} entries)",
            self.path.display(),
            doc.len()
        );
        Ok(Some(doc))
    }

    /// Overwrite the file with a snapshot of `slots`
    pub fn save(&self, slots: &[Slot]) -> Result<()> {
        let doc = ConfigDocument::from_slots(slots);
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, json)?;
        info!("Saved config {}", self.path.display());
        Ok(())
    }

    /// Delete the file. Absent is fine.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted config {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
