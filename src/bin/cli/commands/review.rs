use anyhow::{Context, Result};
use chrono::Utc;

use vokabel_lib::review::preview_intervals;

use super::entry_line;
use crate::app::App;
use crate::OutputFormat;

pub fn run_due(app: &App, format: &OutputFormat) -> Result<()> {
    let due = app.reviews.due_reviews(Utc::now());

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&due)?),
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due. Well done!");
                return Ok(());
            }
            for entry in &due {
                println!("{}", entry_line(entry));
            }
            println!("\n{} due", due.len());
        }
    }

    Ok(())
}

pub fn run_review(app: &App, word: &str, quality: i64, format: &OutputFormat) -> Result<()> {
    let entry = app.reviews.submit_review(word, quality)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => println!(
            "\"{}\" next due {} (interval {:.1} days, EF {:.2}, streak {})",
            entry.word,
            entry.next_review_date.format("%Y-%m-%d"),
            entry.interval,
            entry.easiness_factor,
            entry.repetition_count
        ),
    }

    Ok(())
}

pub fn run_stats(app: &App, format: &OutputFormat) -> Result<()> {
    let stats = app.reviews.stats();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Plain => {
            println!("Total words:     {}", stats.total_words);
            println!("Mastered:        {}", stats.mastered_words);
            println!("Learning:        {}", stats.learning_words);
            println!("Average recall:  {:.1}", stats.avg_recall);
            println!("Due today:       {}", stats.words_due_today);
        }
    }

    Ok(())
}

pub fn run_practice(app: &App, format: &OutputFormat) -> Result<()> {
    let words = app.reviews.practice_words();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&words)?),
        OutputFormat::Plain => {
            for entry in &words {
                println!("{:<24} {}", entry.word, entry.translation);
            }
        }
    }

    Ok(())
}

pub fn run_preview(app: &App, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app
        .store()
        .find(word)?
        .with_context(|| format!("\"{}\" is not in the vocabulary", word))?;
    let days = preview_intervals(&entry, Utc::now());

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "word": entry.word, "days": days })),
        OutputFormat::Plain => {
            for (quality, d) in days.iter().enumerate() {
                println!("quality {}: {} days", quality, d);
            }
        }
    }

    Ok(())
}
