#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared mocks for pipeline and factory tests: in-memory generators with
//! call histories, and an in-memory target collection standing in for
//! AnkiConnect.

use async_trait::async_trait;
use bytes::Bytes;
use cardgen::anki::TargetCollection;
use cardgen::errors::{AnkiError, GeneratorError};
use cardgen::providers::{
    Generator, GeneratorInput, ImageGenerator, TextGenerator, TtsGenerator,
};
use cardgen::types::{CardRawDataV1, GeneratorResponse, WordWithContext};
use dotenvy::dotenv;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        tracing_subscriber::fmt::init();
    });
}

// --- Mock text generator ---

#[derive(Clone, Debug, Default)]
pub struct MockTextGenerator {
    /// Scripted card texts, popped per `generate` call; when exhausted a
    /// default text derived from the word is returned.
    pub responses: Arc<RwLock<Vec<String>>>,
    /// Words `generate` was called with.
    pub generate_calls: Arc<RwLock<Vec<String>>>,
    /// (word, card_text) pairs `generate_image_prompt` was called with.
    pub image_prompt_calls: Arc<RwLock<Vec<(String, String)>>>,
    /// Words whose `generate` call fails with a remote error.
    pub fail_words: Arc<RwLock<HashSet<String>>>,
}

impl MockTextGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
            ..Default::default()
        }
    }

    pub fn fail_for(self, word: &str) -> Self {
        self.fail_words.write().unwrap().insert(word.to_string());
        self
    }
}

#[async_trait]
impl Generator for MockTextGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Word(word_with_context) = input else {
            return Err(GeneratorError::InvalidInputType(format!("{input:?}")));
        };
        self.generate_calls
            .write()
            .unwrap()
            .push(word_with_context.word.clone());
        if self.fail_words.read().unwrap().contains(&word_with_context.word) {
            return Err(GeneratorError::Api(format!(
                "simulated remote failure for {}",
                word_with_context.word
            )));
        }
        let text = self
            .responses
            .write()
            .unwrap()
            .pop()
            .unwrap_or_else(|| format!("text for {}", word_with_context.word));
        Ok(GeneratorResponse::with_text(text))
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_image_prompt(
        &self,
        word_with_context: &WordWithContext,
        card_text: &str,
    ) -> Result<GeneratorResponse, GeneratorError> {
        self.image_prompt_calls
            .write()
            .unwrap()
            .push((word_with_context.word.clone(), card_text.to_string()));
        Ok(GeneratorResponse::with_text(format!(
            "prompt for {}",
            word_with_context.word
        )))
    }
}

// --- Mock image generator ---

#[derive(Clone, Debug, Default)]
pub struct MockImageGenerator {
    /// Prompts `generate` was called with.
    pub calls: Arc<RwLock<Vec<String>>>,
}

#[async_trait]
impl Generator for MockImageGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Text(prompt) = input else {
            return Err(GeneratorError::InvalidInputType(format!("{input:?}")));
        };
        self.calls.write().unwrap().push(prompt.to_string());
        Ok(GeneratorResponse::with_image_bytes(vec![0x89, b'P', b'N', b'G']))
    }
}

impl ImageGenerator for MockImageGenerator {}

// --- Mock TTS generator ---

#[derive(Clone, Debug, Default)]
pub struct MockTtsGenerator {
    /// Texts `generate` was called with.
    pub calls: Arc<RwLock<Vec<String>>>,
}

#[async_trait]
impl Generator for MockTtsGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Text(text) = input else {
            return Err(GeneratorError::InvalidInputType(format!("{input:?}")));
        };
        self.calls.write().unwrap().push(text.to_string());
        let chunks: Vec<Result<Bytes, reqwest::Error>> =
            vec![Ok(Bytes::from_static(b"audio-")), Ok(Bytes::from_static(b"chunk"))];
        Ok(GeneratorResponse::with_audio(Box::pin(
            futures::stream::iter(chunks),
        )))
    }
}

impl TtsGenerator for MockTtsGenerator {}

// --- Mock target collection ---

/// An in-memory flashcard store. Imported words become present, as they
/// would in a real collection.
#[derive(Clone, Debug, Default)]
pub struct MockTarget {
    pub present_words: Arc<RwLock<HashSet<String>>>,
    /// The word list of each `import_card_collection` call, in call order.
    pub imports: Arc<RwLock<Vec<Vec<String>>>>,
}

impl MockTarget {
    pub fn with_present_words(words: &[&str]) -> Self {
        Self {
            present_words: Arc::new(RwLock::new(
                words.iter().map(|w| w.to_string()).collect(),
            )),
            ..Default::default()
        }
    }
}

#[async_trait]
impl TargetCollection for MockTarget {
    async fn words_missing_from_target(
        &self,
        _deck: &str,
        words: &[WordWithContext],
    ) -> Result<Vec<WordWithContext>, AnkiError> {
        let present = self.present_words.read().unwrap();
        Ok(words
            .iter()
            .filter(|word_with_context| !present.contains(&word_with_context.word))
            .cloned()
            .collect())
    }

    async fn import_card_collection(
        &self,
        _deck: &str,
        cards: &BTreeMap<WordWithContext, CardRawDataV1>,
    ) -> Result<(), AnkiError> {
        let words: Vec<String> = cards
            .keys()
            .map(|word_with_context| word_with_context.word.clone())
            .collect();
        let mut present = self.present_words.write().unwrap();
        for word in &words {
            present.insert(word.clone());
        }
        self.imports.write().unwrap().push(words);
        Ok(())
    }
}
