//! # Generation Providers
//!
//! The polymorphic unit of work over the capability set. Every backend
//! implements [`Generator`]; text backends additionally implement
//! [`TextGenerator`] to derive image prompts from already-generated card
//! text. Concrete providers are selected through [`factory::GeneratorFactory`].

pub mod cohere;
pub mod elevenlabs;
pub mod factory;
pub mod kandinsky;
pub mod openai;

use crate::errors::GeneratorError;
use crate::types::{GeneratorResponse, WordWithContext};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// Input to a generator call.
///
/// Text generators take a [`WordWithContext`]; image and tts generators take
/// a plain string (the image prompt or the text to speak). Passing the wrong
/// shape is an `InvalidInputType` error, not a coercion.
#[derive(Clone, Copy, Debug)]
pub enum GeneratorInput<'a> {
    Word(&'a WordWithContext),
    Text(&'a str),
}

/// A unit of generation work backed by one remote provider.
#[async_trait]
pub trait Generator: Send + Sync + Debug + DynClone {
    /// Runs one generation call and returns the produced artifacts.
    async fn generate(&self, input: GeneratorInput<'_>)
        -> Result<GeneratorResponse, GeneratorError>;
}

dyn_clone::clone_trait_object!(Generator);

/// A text-capability generator.
#[async_trait]
pub trait TextGenerator: Generator {
    /// Derives an image-generation prompt for a word from that word's
    /// already-generated card text.
    async fn generate_image_prompt(
        &self,
        word_with_context: &WordWithContext,
        card_text: &str,
    ) -> Result<GeneratorResponse, GeneratorError>;
}

dyn_clone::clone_trait_object!(TextGenerator);

/// An image-capability generator: `generate` takes a prompt string and
/// populates `image_bytes`.
pub trait ImageGenerator: Generator {}

dyn_clone::clone_trait_object!(ImageGenerator);

/// A text-to-speech generator: `generate` takes the text to speak and
/// populates the lazy `audio_bytes` stream.
pub trait TtsGenerator: Generator {}

dyn_clone::clone_trait_object!(TtsGenerator);

/// A constructed generator, tagged by its capability class.
#[derive(Debug, Clone)]
pub enum AnyGenerator {
    Text(Box<dyn TextGenerator>),
    Image(Box<dyn ImageGenerator>),
    Tts(Box<dyn TtsGenerator>),
}

pub(crate) fn invalid_input(expected: &str, input: &GeneratorInput<'_>) -> GeneratorError {
    GeneratorError::InvalidInputType(format!("expected {expected}, got {input:?}"))
}
