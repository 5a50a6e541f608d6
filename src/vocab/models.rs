//! Data models for the vocabulary collection

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Starting SM-2 ease factor for a new word
pub const DEFAULT_EASINESS_FACTOR: f64 = 2.5;

/// Known translation(s) of a word.
///
/// Words added through the dictionary carry a list; older files and hand edits
/// may hold a single string. Both shapes are written back as they were read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Translation {
    Many(Vec<String>),
    One(String),
}

impl Translation {
    /// Parse the comma separated form used by the edit dialog
    pub fn from_edit_input(input: &str) -> Self {
        Self::Many(input.split(", ").map(str::to_string).collect())
    }

    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Many(items) => items.clone(),
            Self::One(item) => vec![item.clone()],
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Many(items) => items.is_empty(),
            Self::One(item) => item.is_empty(),
        }
    }
}

impl Default for Translation {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl From<Vec<String>> for Translation {
    fn from(items: Vec<String>) -> Self {
        Self::Many(items)
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Many(items) => write!(f, "{}", items.join(", ")),
            Self::One(item) => write!(f, "{}", item),
        }
    }
}

/// A word being learned together with its spaced repetition state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    #[serde(default)]
    pub translation: Translation,
    /// SM-2 ease factor, never below 1.3
    #[serde(default = "default_easiness_factor")]
    pub easiness_factor: f64,
    /// Days until the next review. Kept fractional between reviews.
    #[serde(default)]
    pub interval: f64,
    /// Consecutive successful recalls
    #[serde(default)]
    pub repetition_count: u32,
    #[serde(default, with = "timestamp::option")]
    pub last_review_date: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now", with = "timestamp")]
    pub next_review_date: DateTime<Utc>,
}

fn default_easiness_factor() -> f64 {
    DEFAULT_EASINESS_FACTOR
}

impl VocabEntry {
    pub fn new(word: String, translation: Translation, now: DateTime<Utc>) -> Self {
        Self {
            word,
            translation,
            easiness_factor: DEFAULT_EASINESS_FACTOR,
            interval: 0.0,
            repetition_count: 0,
            last_review_date: None,
            next_review_date: now,
        }
    }

    /// Check if the word is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }

    pub fn is_mastered(&self) -> bool {
        self.easiness_factor >= DEFAULT_EASINESS_FACTOR && self.repetition_count >= 3
    }
}

/// One item of the persisted collection.
///
/// Early versions stored bare words. Those are kept as opaque `Legacy` items:
/// they still reserve their word, but take no part in scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredItem {
    Entry(VocabEntry),
    Legacy(String),
}

impl StoredItem {
    pub fn word(&self) -> &str {
        match self {
            Self::Entry(entry) => &entry.word,
            Self::Legacy(word) => word,
        }
    }

    pub fn as_entry(&self) -> Option<&VocabEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Legacy(_) => None,
        }
    }

    pub fn as_entry_mut(&mut self) -> Option<&mut VocabEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Legacy(_) => None,
        }
    }

    pub fn into_entry(self) -> Option<VocabEntry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::Legacy(_) => None,
        }
    }
}

/// Timestamps are written as RFC 3339 in UTC. Naive ISO-8601 values, as
/// produced by earlier versions, are read as local time.
pub(crate) mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        let naive: NaiveDateTime = raw.parse().ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
                None => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_entry_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let entry = VocabEntry::new("Haus".to_string(), vec!["house".to_string()].into(), now);

        assert_eq!(entry.easiness_factor, 2.5);
        assert_eq!(entry.interval, 0.0);
        assert_eq!(entry.repetition_count, 0);
        assert!(entry.last_review_date.is_none());
        assert_eq!(entry.next_review_date, now);
        assert!(entry.is_due(now));
    }

    #[test]
    fn test_reads_earlier_file_format() {
        let json = r#"[
            "Baum",
            {
                "word": "Hund",
                "translation": ["dog", "hound"],
                "easiness_factor": 2.36,
                "interval": 6,
                "repetition_count": 2,
                "last_review_date": "2024-02-01T09:30:00.123456",
                "next_review_date": "2024-02-07T09:30:00"
            },
            {
                "word": "Katze",
                "translation": "cat",
                "easiness_factor": 2.5,
                "interval": 0,
                "repetition_count": 0,
                "last_review_date": null,
                "next_review_date": "2024-02-01T09:30:00+00:00"
            }
        ]"#;

        let items: Vec<StoredItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], StoredItem::Legacy("Baum".to_string()));

        let hund = items[1].as_entry().unwrap();
        assert_eq!(hund.interval, 6.0);
        assert_eq!(hund.translation.to_vec(), vec!["dog", "hound"]);
        assert!(hund.last_review_date.is_some());

        let katze = items[2].as_entry().unwrap();
        assert_eq!(katze.translation, Translation::One("cat".to_string()));
        assert_eq!(
            katze.next_review_date,
            Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_translation_edit_input() {
        let translation = Translation::from_edit_input("house, home");
        assert_eq!(translation.to_vec(), vec!["house", "home"]);
        assert_eq!(translation.to_string(), "house, home");
    }

    #[test]
    fn test_mastered() {
        let now = Utc::now();
        let mut entry = VocabEntry::new("Tisch".to_string(), Translation::default(), now);
        entry.repetition_count = 3;
        assert!(entry.is_mastered());

        entry.easiness_factor = 2.4;
        assert!(!entry.is_mastered());
    }
}
