//! Review operations over the vocabulary store

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use super::algorithm::{schedule, Quality};
use super::models::ReviewStats;
use crate::vocab::{Result, StoredItem, VocabBackend, VocabEntry, VocabError, VocabStore};

/// Due selection, review submission and statistics.
///
/// Read-only views never fail: an unreadable store is reported in the log and
/// treated as empty.
pub struct ReviewService<B> {
    store: VocabStore<B>,
}

impl<B: VocabBackend> ReviewService<B> {
    pub fn new(store: VocabStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &VocabStore<B> {
        &self.store
    }

    /// Structured entries for listing, empty if the store cannot be read
    pub fn entries(&self) -> Vec<VocabEntry> {
        self.store.all().unwrap_or_else(|e| {
            log::warn!("Reading vocabulary failed, showing nothing: {}", e);
            Vec::new()
        })
    }

    /// Words whose next review is at or before `now`, in store order
    pub fn due_reviews(&self, now: DateTime<Utc>) -> Vec<VocabEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.is_due(now))
            .collect()
    }

    pub fn submit_review(&self, word: &str, quality: i64) -> Result<VocabEntry> {
        self.submit_review_at(word, quality, Utc::now())
    }

    /// Apply a review to the first entry matching `word` and persist it
    pub fn submit_review_at(
        &self,
        word: &str,
        quality: i64,
        now: DateTime<Utc>,
    ) -> Result<VocabEntry> {
        let quality = Quality::new(quality)?;

        let mut items = self.store.load()?;
        let entry = items
            .iter_mut()
            .filter_map(StoredItem::as_entry_mut)
            .find(|entry| entry.word == word)
            .ok_or_else(|| VocabError::NotFound(word.to_string()))?;

        let next = schedule(entry, quality, now);
        *entry = next.clone();
        self.store.save(&items)?;

        log::info!(
            "Reviewed '{}' (quality {}): next in {} days, EF {:.2}",
            word,
            quality.value(),
            next.interval.floor(),
            next.easiness_factor
        );
        Ok(next)
    }

    pub fn stats(&self) -> ReviewStats {
        self.stats_at(Utc::now())
    }

    pub fn stats_at(&self, now: DateTime<Utc>) -> ReviewStats {
        let entries = self.entries();

        let total_words = entries.len();
        let mastered_words = entries.iter().filter(|e| e.is_mastered()).count();

        let reviewed: Vec<f64> = entries
            .iter()
            .filter(|e| e.last_review_date.is_some())
            .map(|e| e.easiness_factor)
            .collect();
        let avg_recall = if reviewed.is_empty() {
            0.0
        } else {
            let mean = reviewed.iter().sum::<f64>() / reviewed.len() as f64;
            (mean * 10.0).round_ties_even() / 10.0
        };

        ReviewStats {
            total_words,
            mastered_words,
            learning_words: total_words - mastered_words,
            avg_recall,
            words_due_today: entries.iter().filter(|e| e.is_due(now)).count(),
        }
    }

    /// Every entry in a fresh random order
    pub fn practice_words(&self) -> Vec<VocabEntry> {
        self.practice_words_with(&mut rand::thread_rng())
    }

    pub fn practice_words_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<VocabEntry> {
        let mut entries = self.entries();
        entries.shuffle(rng);
        entries
    }
}
