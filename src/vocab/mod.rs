//! Vocabulary collection for Vokabel
//!
//! This module provides:
//! - The persisted word record with its spaced repetition fields
//! - A pluggable whole-collection backend (JSON file or in-memory)
//! - Word CRUD with uniqueness by exact word match

mod backend;
pub mod models;
mod store;

pub use backend::{JsonFileBackend, MemoryBackend, VocabBackend};
pub use models::*;
pub use store::{Result, VocabError, VocabStore};
