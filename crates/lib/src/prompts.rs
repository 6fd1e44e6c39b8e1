//! # Card Prompt Templates
//!
//! System prompts used by the text providers, keyed by target language.
//! Lookup is strict: a language with no template is a configuration error,
//! not a fallback to English.

use crate::errors::GeneratorError;

/// Card-text system prompt for German learners.
pub const CARD_TEXT_SYSTEM_PROMPT_GERMAN: &str = "You are a German language teacher creating flashcards. \
For the given WORD (with optional CONTEXT) produce a short flashcard back side in German: \
a one-sentence definition in simple German, one example sentence using the word, \
and for nouns the article and plural form. Do not repeat the word itself in the definition. \
Plain text only, no markdown.";

/// Card-text system prompt for English learners.
pub const CARD_TEXT_SYSTEM_PROMPT_ENGLISH: &str = "You are an English language teacher creating flashcards. \
For the given WORD (with optional CONTEXT) produce a short flashcard back side: \
a one-sentence definition in simple English and one example sentence using the word. \
Do not repeat the word itself in the definition. Plain text only, no markdown.";

/// System prompt for deriving an image-generation prompt from a card's
/// already-generated text.
pub const IMAGE_PROMPT_SYSTEM_PROMPT: &str = "You write prompts for an image generation model. \
Given a WORD, its CONTEXT and the TEXT of a flashcard about it, write a single short English prompt \
describing a memorable, concrete scene that illustrates the word's meaning. \
Do not include any text or letters in the scene. Output the prompt only.";

const LANGUAGE_PROMPTS: &[(&str, &str)] = &[
    ("english", CARD_TEXT_SYSTEM_PROMPT_ENGLISH),
    ("german", CARD_TEXT_SYSTEM_PROMPT_GERMAN),
];

/// Returns the card-text system prompt for `language`, or
/// `UnsupportedLanguage` if no template exists for it.
pub fn card_text_system_prompt(language: &str) -> Result<&'static str, GeneratorError> {
    LANGUAGE_PROMPTS
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|(_, prompt)| *prompt)
        .ok_or_else(|| GeneratorError::UnsupportedLanguage(language.to_string()))
}

/// Languages a card-text prompt exists for.
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGE_PROMPTS.iter().map(|(lang, _)| *lang).collect()
}
