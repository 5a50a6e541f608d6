use anyhow::Result;

use vokabel_lib::vocab::{StoredItem, Translation};

use super::entry_line;
use crate::app::App;
use crate::OutputFormat;

pub fn run_add(app: &App, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.store().add(word, &app.dictionary)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry)?),
        OutputFormat::Plain => {
            if entry.translation.is_empty() {
                println!("Added \"{}\" (no translation found)", entry.word);
            } else {
                println!("Added \"{}\": {}", entry.word, entry.translation);
            }
        }
    }

    Ok(())
}

pub fn run_remove(app: &App, word: &str, format: &OutputFormat) -> Result<()> {
    let removed = app.store().remove(word)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&removed)?),
        OutputFormat::Plain => println!("Removed \"{}\"", removed.word),
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    old_word: &str,
    new_word: &str,
    translation: &str,
    format: &OutputFormat,
) -> Result<()> {
    let edited = app
        .store()
        .edit(old_word, new_word, Translation::from_edit_input(translation))?;

    match (format, edited) {
        (OutputFormat::Json, edited) => println!("{}", serde_json::to_string_pretty(&edited)?),
        (OutputFormat::Plain, Some(entry)) => {
            println!("Updated \"{}\" -> \"{}\": {}", old_word, entry.word, entry.translation)
        }
        (OutputFormat::Plain, None) => println!("\"{}\" is not in the vocabulary", old_word),
    }

    Ok(())
}

pub fn run_list(app: &App, format: &OutputFormat) -> Result<()> {
    let items = app.store().load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Plain => {
            if items.is_empty() {
                println!("No words yet.");
                return Ok(());
            }
            for item in &items {
                match item {
                    StoredItem::Entry(entry) => println!("{}", entry_line(entry)),
                    StoredItem::Legacy(word) => println!("{:<24} (legacy, run `migrate`)", word),
                }
            }
            println!("\n{} words", items.len());
        }
    }

    Ok(())
}

pub fn run_migrate(app: &App, format: &OutputFormat) -> Result<()> {
    let migrated = app.store().migrate_legacy(&app.dictionary)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "migrated": migrated })),
        OutputFormat::Plain => println!("Migrated {} legacy words", migrated),
    }

    Ok(())
}
