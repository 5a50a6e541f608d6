use serde::{Deserialize, Serialize};

/// Progress summary over the whole vocabulary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_words: usize,
    pub mastered_words: usize,
    pub learning_words: usize,
    /// Mean ease factor of reviewed words, one decimal
    pub avg_recall: f64,
    pub words_due_today: usize,
}
