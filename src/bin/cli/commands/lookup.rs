use anyhow::Result;

use vokabel_lib::dictionary::TranslationLookup;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, word: &str, format: &OutputFormat) -> Result<()> {
    let translations = app.dictionary.lookup(word);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word,
                "translations": translations,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if translations.is_empty() {
                println!(
                    "No translation found for \"{}\" in {}",
                    word,
                    app.dictionary.path().display()
                );
            } else {
                for t in &translations {
                    println!("{}", t);
                }
            }
        }
    }

    Ok(())
}
