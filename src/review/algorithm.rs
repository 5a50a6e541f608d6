//! SM-2 Spaced Repetition Algorithm
//!
//! Variant of the SuperMemo 2 algorithm used for vocabulary reviews.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! The ease factor is updated on every review, failed ones included, and the
//! interval is kept fractional. It is only floored to whole days when the next
//! review date is computed.

use chrono::{DateTime, Duration, Utc};

use crate::vocab::{Result, VocabEntry, VocabError};

/// Minimum ease factor allowed
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// A validated SM-2 quality rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(q) if q <= Self::MAX => Ok(Self(q)),
            _ => Err(VocabError::InvalidQuality(value)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and above count as a successful recall
    pub fn is_recalled(self) -> bool {
        self.0 >= 3
    }
}

impl TryFrom<i64> for Quality {
    type Error = VocabError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

/// Compute the state of `entry` after a review of the given quality at `now`.
///
/// The entry itself is left untouched; persisting the result is up to the caller.
pub fn schedule(entry: &VocabEntry, quality: Quality, now: DateTime<Utc>) -> VocabEntry {
    let mut next = entry.clone();
    let q = quality.value() as f64;

    if quality.is_recalled() {
        next.interval = match entry.repetition_count {
            0 => 1.0,
            1 => 6.0,
            _ => entry.interval * entry.easiness_factor,
        };
        next.repetition_count = entry.repetition_count.saturating_add(1);
    } else {
        next.interval = 1.0;
        next.repetition_count = 0;
    }

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
    next.easiness_factor = (entry.easiness_factor
        + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASINESS_FACTOR);

    next.last_review_date = Some(now);
    next.next_review_date = due_after(now, next.interval);
    next
}

/// Whole days until the next review for each quality 0 through 5
pub fn preview_intervals(entry: &VocabEntry, now: DateTime<Utc>) -> [i64; 6] {
    let mut days = [0; 6];
    for (q, slot) in days.iter_mut().enumerate() {
        let quality = Quality(q as u8);
        *slot = whole_days(schedule(entry, quality, now).interval);
    }
    days
}

fn whole_days(interval: f64) -> i64 {
    interval.floor() as i64
}

/// Saturates at the latest representable timestamp for runaway intervals
fn due_after(now: DateTime<Utc>, interval: f64) -> DateTime<Utc> {
    Duration::try_days(whole_days(interval))
        .and_then(|offset| now.checked_add_signed(offset))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Translation;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()
    }

    fn new_entry() -> VocabEntry {
        VocabEntry::new("Haus".to_string(), Translation::default(), now())
    }

    fn q(value: i64) -> Quality {
        Quality::new(value).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_quality_bounds() {
        assert!(Quality::new(0).is_ok());
        assert!(Quality::new(5).is_ok());
        assert!(matches!(Quality::new(6), Err(VocabError::InvalidQuality(6))));
        assert!(matches!(Quality::new(-1), Err(VocabError::InvalidQuality(-1))));
    }

    #[test]
    fn test_first_review_correct() {
        let result = schedule(&new_entry(), q(4), now());

        assert_eq!(result.interval, 1.0);
        assert_eq!(result.repetition_count, 1);
        assert_eq!(result.next_review_date, now() + Duration::days(1));
        assert_eq!(result.last_review_date, Some(now()));
    }

    #[test]
    fn test_second_review_correct() {
        let mut entry = new_entry();
        entry.repetition_count = 1;
        entry.interval = 1.0;

        let result = schedule(&entry, q(3), now());
        assert_eq!(result.interval, 6.0);
        assert_eq!(result.repetition_count, 2);
    }

    #[test]
    fn test_subsequent_review_uses_old_ease_factor() {
        let mut entry = new_entry();
        entry.easiness_factor = 2.5;
        entry.interval = 6.0;
        entry.repetition_count = 2;

        let result = schedule(&entry, q(4), now());

        assert_eq!(result.repetition_count, 3);
        assert_close(result.interval, 15.0);
        assert_close(result.easiness_factor, 2.5);
        assert_eq!(result.next_review_date, now() + Duration::days(15));
    }

    #[test]
    fn test_interval_stays_fractional() {
        let mut entry = new_entry();
        entry.easiness_factor = 1.3;
        entry.interval = 6.0;
        entry.repetition_count = 2;

        // The new EF would be 1.3 + 0.1; growth still uses 1.3
        let result = schedule(&entry, q(5), now());
        assert_close(result.interval, 7.8);
        assert_close(result.easiness_factor, 1.4);
        assert_eq!(result.next_review_date, now() + Duration::days(7));
    }

    #[test]
    fn test_blackout_resets_and_lowers_ease() {
        let mut entry = new_entry();
        entry.repetition_count = 7;
        entry.interval = 40.0;

        let result = schedule(&entry, q(0), now());

        assert_eq!(result.interval, 1.0);
        assert_eq!(result.repetition_count, 0);
        assert_close(result.easiness_factor, 1.7);
    }

    #[test]
    fn test_failure_always_resets() {
        for quality in 0..3 {
            let mut entry = new_entry();
            entry.repetition_count = 4;
            entry.interval = 22.5;

            let result = schedule(&entry, q(quality), now());
            assert_eq!(result.interval, 1.0);
            assert_eq!(result.repetition_count, 0);
        }
    }

    #[test]
    fn test_ease_factor_minimum() {
        let mut entry = new_entry();
        for quality in [0, 1, 2, 0, 0, 3, 1, 0] {
            entry = schedule(&entry, q(quality), now());
            assert!(entry.easiness_factor >= MIN_EASINESS_FACTOR);
        }
        assert_close(entry.easiness_factor, MIN_EASINESS_FACTOR);
    }

    #[test]
    fn test_input_entry_untouched() {
        let entry = new_entry();
        let _ = schedule(&entry, q(5), now());
        assert_eq!(entry.repetition_count, 0);
        assert!(entry.last_review_date.is_none());
    }

    #[test]
    fn test_runaway_interval_saturates() {
        let mut entry = new_entry();
        entry.repetition_count = 50;
        entry.interval = 1e300;

        let result = schedule(&entry, q(5), now());
        assert_eq!(result.next_review_date, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_preview_intervals() {
        let mut entry = new_entry();
        entry.easiness_factor = 2.5;
        entry.interval = 6.0;
        entry.repetition_count = 2;

        assert_eq!(preview_intervals(&entry, now()), [1, 1, 1, 15, 15, 15]);
    }
}
