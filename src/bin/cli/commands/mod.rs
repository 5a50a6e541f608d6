pub mod lookup;
pub mod review;
pub mod vocab;

use vokabel_lib::vocab::VocabEntry;

/// One-line summary used by the plain listings
pub fn entry_line(entry: &VocabEntry) -> String {
    format!(
        "{:<24} {:<40} EF {:.2}  due {}",
        entry.word,
        entry.translation.to_string(),
        entry.easiness_factor,
        entry.next_review_date.format("%Y-%m-%d %H:%M")
    )
}
