//! Translation lookup against a static de-en dictionary file
//!
//! The file uses the line format
//! `German term {m}; variant | subentry :: English; other | sub`.
//! Lines starting with `#` are comments.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Source of translations for a word.
///
/// Lookups never fail: a broken or missing dictionary yields no translations.
pub trait TranslationLookup: Send + Sync {
    fn lookup(&self, word: &str) -> Vec<String>;
}

impl<F> TranslationLookup for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn lookup(&self, word: &str) -> Vec<String> {
        self(word)
    }
}

/// Dictionary backed by a text file, re-read on every lookup
#[derive(Debug, Clone)]
pub struct FileDictionary {
    path: PathBuf,
}

impl FileDictionary {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TranslationLookup for FileDictionary {
    fn lookup(&self, word: &str) -> Vec<String> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Dictionary file not found: {:?} ({})", self.path, e);
                return Vec::new();
            }
        };

        match lookup_in(BufReader::new(file), word) {
            Ok(translations) => translations,
            Err(e) => {
                log::warn!("Error reading dictionary {:?}: {}", self.path, e);
                Vec::new()
            }
        }
    }
}

/// Collect the translations of `word` from every matching dictionary line
pub fn lookup_in<R: BufRead>(reader: R, word: &str) -> io::Result<Vec<String>> {
    let mut translations = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.trim().split("::").collect();
        let [german, english] = parts.as_slice() else {
            continue;
        };

        if german.split(';').map(clean_term).any(|term| term == word) {
            translations.extend(english.split(';').map(|t| first_variant(t.trim())));
        }
    }

    Ok(translations)
}

/// Strip `{m}`-style grammar markers and `[med.]`-style context tags, then cut
/// at the first variant separator
fn clean_term(term: &str) -> String {
    let kept: Vec<&str> = term
        .split_whitespace()
        .filter(|token| !is_wrapped(token, '{', '}') && !is_wrapped(token, '[', ']'))
        .collect();
    first_variant(&kept.join(" "))
}

fn is_wrapped(token: &str, open: char, close: char) -> bool {
    token.starts_with(open) && token.ends_with(close)
}

fn first_variant(term: &str) -> String {
    term.split('|').next().unwrap_or_default().trim().to_string()
}
