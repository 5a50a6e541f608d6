mod app;
mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vokabel-cli", about = "Vokabel vocabulary trainer CLI", version)]
struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word, translating it from the dictionary
    Add {
        word: String,
    },

    /// Remove a word
    Rm {
        word: String,
    },

    /// Rename a word and replace its translation
    Edit {
        old_word: String,
        new_word: String,
        /// Translations separated by ", "
        translation: String,
    },

    /// List all words
    List,

    /// Show words due for review
    Due,

    /// Record a review for a word
    Review {
        word: String,
        /// Recall quality from 0 (blackout) to 5 (perfect)
        #[arg(allow_negative_numbers = true)]
        quality: i64,
    },

    /// Show review statistics
    Stats,

    /// List all words in random order
    Practice,

    /// Look up a word in the dictionary
    Lookup {
        word: String,
    },

    /// Show the interval each rating would give a word
    Preview {
        word: String,
    },

    /// Convert bare legacy words into full entries
    Migrate,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new()?;

    match cli.command {
        Command::Add { word } => commands::vocab::run_add(&app, &word, &cli.format)?,
        Command::Rm { word } => commands::vocab::run_remove(&app, &word, &cli.format)?,
        Command::Edit {
            old_word,
            new_word,
            translation,
        } => commands::vocab::run_edit(&app, &old_word, &new_word, &translation, &cli.format)?,
        Command::List => commands::vocab::run_list(&app, &cli.format)?,
        Command::Migrate => commands::vocab::run_migrate(&app, &cli.format)?,
        Command::Due => commands::review::run_due(&app, &cli.format)?,
        Command::Review { word, quality } => {
            commands::review::run_review(&app, &word, quality, &cli.format)?
        }
        Command::Stats => commands::review::run_stats(&app, &cli.format)?,
        Command::Practice => commands::review::run_practice(&app, &cli.format)?,
        Command::Preview { word } => commands::review::run_preview(&app, &word, &cli.format)?,
        Command::Lookup { word } => commands::lookup::run(&app, &word, &cli.format)?,
    }

    Ok(())
}
