use anyhow::{Context, Result};

use vokabel_lib::config::AppConfig;
use vokabel_lib::dictionary::FileDictionary;
use vokabel_lib::review::ReviewService;
use vokabel_lib::vocab::{JsonFileBackend, VocabStore};

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub reviews: ReviewService<JsonFileBackend>,
    pub dictionary: FileDictionary,
}

impl App {
    /// Initialize from the resolved configuration
    pub fn new() -> Result<Self> {
        let config = AppConfig::load().context("Failed to load configuration")?;
        log::debug!("Using vocabulary file {:?}", config.vocab_path());

        let store = VocabStore::new(JsonFileBackend::new(config.vocab_path()));
        let dictionary = FileDictionary::new(config.dictionary_path.clone());

        Ok(Self {
            config,
            reviews: ReviewService::new(store),
            dictionary,
        })
    }

    pub fn store(&self) -> &VocabStore<JsonFileBackend> {
        self.reviews.store()
    }
}
