//! # Pipeline Orchestration
//!
//! Two phases over the same input word list, always in this order: the
//! existing-card phase imports cards a prior run already produced, then the
//! new-card phase generates and imports cards for whatever is left. A word
//! imported in phase 1 is never regenerated in phase 2.

use crate::anki::TargetCollection;
use crate::errors::PipelineError;
use crate::providers::{factory::GeneratorSet, Generator, GeneratorInput, TextGenerator};
use crate::store;
use crate::types::{cards_to_map, CardRawDataV1, WordWithContext};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

/// Phase 1: imports valid cards already persisted in the processing
/// directory for words not yet present in the target deck.
///
/// Returns the words imported this way, so the caller can exclude them from
/// the generation phase.
pub async fn process_existing_cards(
    target: &dyn TargetCollection,
    deck: &str,
    processing_directory: &Path,
    input_words: &[WordWithContext],
) -> Result<Vec<String>, PipelineError> {
    let filtered_words = target.words_missing_from_target(deck, input_words).await?;
    let candidate_words: Vec<&str> = filtered_words
        .iter()
        .map(|word_with_context| word_with_context.word.as_str())
        .collect();

    info!("Processing existing cards");
    let cards = store::cards_in_directory(processing_directory)?;
    let relevant_cards: Vec<CardRawDataV1> = cards
        .into_iter()
        .filter(|card| candidate_words.contains(&card.word.as_str()))
        .collect();
    let validated_cards = store::discard_invalid_cards(processing_directory, relevant_cards);
    let existing_cards = cards_to_map(validated_cards);

    target.import_card_collection(deck, &existing_cards).await?;
    info!("All existing cards processed");

    Ok(existing_cards
        .keys()
        .map(|word_with_context| word_with_context.word.clone())
        .collect())
}

/// Removes every word imported by phase 1 from the input, by exact match on
/// the word field.
pub fn exclude_imported_words(
    input_words: &[WordWithContext],
    imported_existing_words: &[String],
) -> Vec<WordWithContext> {
    if imported_existing_words.is_empty() {
        return input_words.to_vec();
    }
    info!(
        words = ?imported_existing_words,
        "Words are imported from existing files and are excluded from further processing"
    );
    input_words
        .iter()
        .filter(|word_with_context| !imported_existing_words.contains(&word_with_context.word))
        .cloned()
        .collect()
}

/// Phase 2: generates and imports cards for the words still missing from
/// the target deck. `input_words` must already have phase 1's imports
/// removed (see [`exclude_imported_words`]).
pub async fn process_new_cards(
    target: &dyn TargetCollection,
    deck: &str,
    processing_directory: &Path,
    input_words: &[WordWithContext],
    generators: &GeneratorSet,
) -> Result<(), PipelineError> {
    let filtered_words = target.words_missing_from_target(deck, input_words).await?;
    let generated_cards =
        generate_cards(processing_directory, &filtered_words, generators).await?;
    info!("Card generation completed");
    target.import_card_collection(deck, &generated_cards).await?;
    info!("Import of new cards completed");
    Ok(())
}

/// Runs the generation legs for each word, aggregating results by word.
///
/// A failure while generating one word's card is logged with the word and
/// that card skipped; remaining words are unaffected.
pub async fn generate_cards(
    processing_directory: &Path,
    words: &[WordWithContext],
    generators: &GeneratorSet,
) -> Result<BTreeMap<WordWithContext, CardRawDataV1>, PipelineError> {
    let mut generated = BTreeMap::new();
    for word_with_context in words {
        match generate_card(processing_directory, word_with_context, generators).await {
            Ok(card) => {
                generated.insert(word_with_context.clone(), card);
            }
            Err(e) => warn!(
                word = %word_with_context.word,
                "Card generation failed, word is skipped: {e}"
            ),
        }
    }
    Ok(generated)
}

/// One word's card: text first, then the image leg seeded by the generated
/// card text (prompt derivation, then image), then the audio leg over the
/// same card text.
async fn generate_card(
    processing_directory: &Path,
    word_with_context: &WordWithContext,
    generators: &GeneratorSet,
) -> Result<CardRawDataV1, PipelineError> {
    info!(word = %word_with_context.word, "Generating card");

    let text_response = generators
        .text
        .generate(GeneratorInput::Word(word_with_context))
        .await?;
    let card_text = text_response.text;

    let prompt_response = generators
        .text
        .generate_image_prompt(word_with_context, &card_text)
        .await?;
    let image_prompt = prompt_response.text;

    let image_response = generators
        .image
        .generate(GeneratorInput::Text(&image_prompt))
        .await?;
    let image_path = store::media_file_path(processing_directory, &word_with_context.word, "png");
    image_response.save_image(&image_path)?;

    let mut audio_response = generators
        .tts
        .generate(GeneratorInput::Text(&card_text))
        .await?;
    let audio_path = store::media_file_path(processing_directory, &word_with_context.word, "mp3");
    audio_response.save_audio(&audio_path).await?;

    let card = CardRawDataV1 {
        word: word_with_context.word.clone(),
        card_text,
        image_prompt,
        image_path,
        audio_path,
    };
    store::save_card(processing_directory, &card)?;
    Ok(card)
}
