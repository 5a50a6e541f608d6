//! Vocabulary collection operations
//!
//! Every operation is a full read-modify-write cycle against the backend.
//! Nothing is cached between calls.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::backend::VocabBackend;
use super::models::*;
use crate::dictionary::TranslationLookup;

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vocabulary store at {location} is corrupt: {source}")]
    CorruptStore {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Word not found in vocabulary: {0}")]
    NotFound(String),

    #[error("Word already in vocabulary: {0}")]
    DuplicateWord(String),

    #[error("Word must not be empty")]
    EmptyWord,

    #[error("Quality must be between 0 and 5, got {0}")]
    InvalidQuality(i64),
}

pub type Result<T> = std::result::Result<T, VocabError>;

/// Storage manager for the vocabulary collection
pub struct VocabStore<B> {
    backend: B,
}

impl<B: VocabBackend> VocabStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load every stored item, legacy words included
    pub fn load(&self) -> Result<Vec<StoredItem>> {
        self.backend.load()
    }

    pub fn save(&self, items: &[StoredItem]) -> Result<()> {
        self.backend.save(items)
    }

    /// All structured entries in insertion order
    pub fn all(&self) -> Result<Vec<VocabEntry>> {
        Ok(self
            .load()?
            .into_iter()
            .filter_map(StoredItem::into_entry)
            .collect())
    }

    pub fn find(&self, word: &str) -> Result<Option<VocabEntry>> {
        Ok(self.all()?.into_iter().find(|e| e.word == word))
    }

    /// Add a word, looking up its translation only if the word is new
    pub fn add(&self, word: &str, lookup: &dyn TranslationLookup) -> Result<VocabEntry> {
        self.add_at(word, lookup, Utc::now())
    }

    pub fn add_at(
        &self,
        word: &str,
        lookup: &dyn TranslationLookup,
        now: DateTime<Utc>,
    ) -> Result<VocabEntry> {
        if word.trim().is_empty() {
            return Err(VocabError::EmptyWord);
        }

        let mut items = self.load()?;
        let existing = items.iter().position(|item| item.word() == word);

        if let Some(entry) = existing.and_then(|pos| items[pos].as_entry()) {
            return Ok(entry.clone());
        }

        let entry = VocabEntry::new(word.to_string(), lookup.lookup(word).into(), now);
        match existing {
            // A bare legacy word gets upgraded where it stands
            Some(pos) => items[pos] = StoredItem::Entry(entry.clone()),
            None => items.push(StoredItem::Entry(entry.clone())),
        }
        self.save(&items)?;

        log::info!("Added '{}' to vocabulary", word);
        Ok(entry)
    }

    /// Delete the entry for `word`
    pub fn remove(&self, word: &str) -> Result<VocabEntry> {
        let mut items = self.load()?;
        let pos = items
            .iter()
            .position(|item| item.as_entry().is_some_and(|e| e.word == word))
            .ok_or_else(|| VocabError::NotFound(word.to_string()))?;

        let removed = items.remove(pos);
        self.save(&items)?;

        log::info!("Removed '{}' from vocabulary", word);
        removed
            .into_entry()
            .ok_or_else(|| VocabError::NotFound(word.to_string()))
    }

    /// Rename an entry and replace its translation.
    ///
    /// Returns `None` without writing if `old_word` is unknown.
    pub fn edit(
        &self,
        old_word: &str,
        new_word: &str,
        translation: Translation,
    ) -> Result<Option<VocabEntry>> {
        if new_word.trim().is_empty() {
            return Err(VocabError::EmptyWord);
        }

        let mut items = self.load()?;
        let Some(pos) = items
            .iter()
            .position(|item| item.as_entry().is_some_and(|e| e.word == old_word))
        else {
            return Ok(None);
        };

        let taken = items
            .iter()
            .enumerate()
            .any(|(i, item)| i != pos && item.word() == new_word);
        if taken {
            return Err(VocabError::DuplicateWord(new_word.to_string()));
        }

        let updated = match items[pos].as_entry_mut() {
            Some(entry) => {
                entry.word = new_word.to_string();
                entry.translation = translation;
                entry.clone()
            }
            None => return Ok(None),
        };
        self.save(&items)?;

        log::info!("Edited '{}' -> '{}'", old_word, new_word);
        Ok(Some(updated))
    }

    /// Convert bare legacy words into full entries, returning how many changed
    pub fn migrate_legacy(&self, lookup: &dyn TranslationLookup) -> Result<usize> {
        let now = Utc::now();
        let mut items = self.load()?;
        let mut migrated = 0;

        for item in items.iter_mut() {
            if let StoredItem::Legacy(word) = item {
                let translation = lookup.lookup(word).into();
                *item = StoredItem::Entry(VocabEntry::new(word.clone(), translation, now));
                migrated += 1;
            }
        }

        if migrated > 0 {
            self.save(&items)?;
            log::info!("Migrated {} legacy vocabulary items", migrated);
        }

        Ok(migrated)
    }
}
