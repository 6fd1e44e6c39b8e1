//! # cardgen
//!
//! Command-line entry point: reads a word list, generates a flashcard for
//! each word via the configured providers and imports the cards into Anki
//! through AnkiConnect.

use anyhow::{Context, Result};
use cardgen::anki::{AnkiConnect, ANKI_CONNECT_URL};
use cardgen::{pipeline, prompts, GeneratorConfigs, GeneratorSet, RuntimeOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Processes a list of words or phrases (with optional context) and creates
/// an Anki card for each word. Cards are imported via AnkiConnect.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Input CSV file with semicolons and a `word;context` header
    input_file: PathBuf,
    /// Directory where cards and media are staged. May already contain
    /// cards from a previous run; those are imported instead of regenerated
    processing_directory: PathBuf,

    /// Name of the Anki deck to import into
    #[arg(long, default_value = "cardgen")]
    deck_name: String,
    /// AnkiConnect endpoint
    #[arg(long, default_value = ANKI_CONNECT_URL)]
    anki_url: String,
    /// Create the deck if it does not exist yet
    #[arg(long)]
    create_deck: bool,
    /// Target card language
    #[arg(long, default_value = "english")]
    language: String,

    /// Text model identifier
    #[arg(long, default_value = "cohere")]
    text_model: String,
    /// Text model API key
    #[arg(long, env = "CARDGEN_TEXT_API_KEY", default_value = "")]
    text_api_key: String,
    /// Text model secret key
    #[arg(long, env = "CARDGEN_TEXT_SECRET_KEY", default_value = "")]
    text_secret_key: String,

    /// Image model identifier
    #[arg(long, default_value = "kandinsky")]
    image_model: String,
    /// Image model API key
    #[arg(long, env = "CARDGEN_IMAGE_API_KEY", default_value = "")]
    image_api_key: String,
    /// Image model secret key
    #[arg(long, env = "CARDGEN_IMAGE_SECRET_KEY", default_value = "")]
    image_secret_key: String,

    /// Voice model identifier
    #[arg(long, default_value = "elevenlabs")]
    voice_model: String,
    /// Voice model API key
    #[arg(long, env = "CARDGEN_VOICE_API_KEY", default_value = "")]
    voice_api_key: String,
    /// Voice model secret key
    #[arg(long, env = "CARDGEN_VOICE_SECRET_KEY", default_value = "")]
    voice_secret_key: String,
}

impl Cli {
    fn runtime_options(&self) -> RuntimeOptions {
        RuntimeOptions {
            text_model: self.text_model.clone(),
            text_api_key: self.text_api_key.clone(),
            text_secret_key: self.text_secret_key.clone(),
            image_model: self.image_model.clone(),
            image_api_key: self.image_api_key.clone(),
            image_secret_key: self.image_secret_key.clone(),
            voice_model: self.voice_model.clone(),
            voice_api_key: self.voice_api_key.clone(),
            voice_secret_key: self.voice_secret_key.clone(),
            language: self.language.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    if !prompts::supported_languages().contains(&cli.language.as_str()) {
        anyhow::bail!(
            "language '{}' is not supported (available: {})",
            cli.language,
            prompts::supported_languages().join(", ")
        );
    }

    // Misconfiguration aborts here, before any generation starts.
    let configs = GeneratorConfigs::from_runtime_options(&cli.runtime_options())?;
    let generators = GeneratorSet::from_configs(configs)?;

    std::fs::create_dir_all(&cli.processing_directory)
        .with_context(|| format!("cannot create {}", cli.processing_directory.display()))?;
    let input_words = cardgen::input::read_words_csv(&cli.input_file)
        .with_context(|| format!("cannot read {}", cli.input_file.display()))?;

    let anki = AnkiConnect::new(cli.anki_url.clone())?;
    anki.check_connection()
        .await
        .context("AnkiConnect is not reachable, is Anki running?")?;
    if cli.create_deck {
        anki.create_deck(&cli.deck_name).await?;
    }
    anki.check_deck_exists(&cli.deck_name).await?;

    let imported_existing_words = pipeline::process_existing_cards(
        &anki,
        &cli.deck_name,
        &cli.processing_directory,
        &input_words,
    )
    .await?;
    info!("Existing cards processed");

    let remaining_words = pipeline::exclude_imported_words(&input_words, &imported_existing_words);
    pipeline::process_new_cards(
        &anki,
        &cli.deck_name,
        &cli.processing_directory,
        &remaining_words,
        &generators,
    )
    .await?;
    info!("New cards processed");
    info!("Processing completed");

    Ok(())
}
