//! Whole-collection persistence for the vocabulary

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::models::StoredItem;
use super::store::{Result, VocabError};

/// Reads and overwrites the complete item list.
pub trait VocabBackend: Send + Sync {
    /// Load all items in stored order. Absent data is an empty collection.
    fn load(&self) -> Result<Vec<StoredItem>>;

    /// Replace the stored collection. Readers never observe a partial write.
    fn save(&self, items: &[StoredItem]) -> Result<()>;
}

fn decode(raw: &str, location: &str) -> Result<Vec<StoredItem>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| VocabError::CorruptStore {
        location: location.to_string(),
        source,
    })
}

/// JSON array stored in a single file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VocabBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<StoredItem>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        decode(&content, &self.path.display().to_string())
    }

    /// Atomic write: write to .tmp then rename
    fn save(&self, items: &[StoredItem]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(items)?)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved {} vocabulary items to {:?}", items.len(), self.path);
        Ok(())
    }
}

/// In-memory backend holding the serialized JSON text
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, which need not be valid JSON
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(raw.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl VocabBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<StoredItem>> {
        match self.contents() {
            Some(raw) => decode(&raw, "memory"),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[StoredItem]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(raw);
        Ok(())
    }
}
