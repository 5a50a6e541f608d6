//! Reading texts: uploaded files and pages fetched from a URL
//!
//! Texts live as plain files in a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name used when a URL has no last path segment
const DEFAULT_URL_FILENAME: &str = "url-text.txt";

#[derive(Error, Debug)]
pub enum TextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Invalid file name: {0:?}")]
    InvalidFilename(String),

    #[error("Text not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, TextError>;

/// A text fetched from the web and saved to the library
#[derive(Debug, Clone, serde::Serialize)]
pub struct FetchedText {
    pub filename: String,
    pub content: String,
}

pub struct TextLibrary {
    dir: PathBuf,
}

impl TextLibrary {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn text_path(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.dir.join(filename))
    }

    /// Store a text under `filename`, replacing any previous one
    pub fn save(&self, filename: &str, content: &[u8]) -> Result<()> {
        let path = self.text_path(filename)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, content)?;
        log::info!("Saved text {:?} ({} bytes)", filename, content.len());
        Ok(())
    }

    /// File names of all stored texts, sorted
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn read(&self, filename: &str) -> Result<String> {
        let path = self.text_path(filename)?;
        if !path.exists() {
            return Err(TextError::NotFound(filename.to_string()));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Download `url` and save the body as a text
    pub async fn fetch_url(&self, url: &str) -> Result<FetchedText> {
        log::info!("Loading url: {}", url);
        let response = reqwest::get(url).await?.error_for_status()?;
        let content = response.text().await?;

        let filename = filename_for_url(url);
        self.save(&filename, content.as_bytes())?;

        Ok(FetchedText { filename, content })
    }
}

/// Last path segment of the URL, ignoring any query or fragment
pub fn filename_for_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    match path.rsplit('/').next() {
        Some(segment) if validate_filename(segment).is_ok() => segment.to_string(),
        _ => DEFAULT_URL_FILENAME.to_string(),
    }
}

fn validate_filename(filename: &str) -> Result<()> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename.contains("..")
        || filename.contains(['/', '\\', '\0']);
    if invalid {
        return Err(TextError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
