//! # Generator Factory
//!
//! Central dispatch from a capability identifier to a concrete generator
//! constructor. The `match` below is the whole registration table; because
//! `AvailableModel` is a closed enum, every declared identifier has exactly
//! one constructor and the dispatch holds no shared state.

use crate::config::{GeneratorConfig, GeneratorConfigs};
use crate::errors::GeneratorError;
use crate::models::AvailableModel;
use crate::providers::{
    cohere::{CohereTextGenerator, COHERE_API_URL},
    elevenlabs::{ElevenlabsTtsGenerator, ELEVENLABS_API_URL},
    kandinsky::{KandinskyImageGenerator, KANDINSKY_API_URL},
    openai::{OpenAiTextGenerator, OPENAI_API_URL},
    AnyGenerator, ImageGenerator, TextGenerator, TtsGenerator,
};
use tracing::info;

pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Constructs the generator registered for `config.model`, tagged by its
    /// capability class.
    ///
    /// Construction-time validation (credential presence, voice mapping)
    /// runs inside the concrete constructors, before any network call.
    pub fn create(config: GeneratorConfig) -> Result<AnyGenerator, GeneratorError> {
        info!(model = %config.model, "Creating generator");
        match config.model {
            AvailableModel::Gpt4o | AvailableModel::Gpt35Turbo => Ok(AnyGenerator::Text(
                Box::new(OpenAiTextGenerator::new(OPENAI_API_URL.to_string(), config)?),
            )),
            AvailableModel::Cohere => Ok(AnyGenerator::Text(Box::new(CohereTextGenerator::new(
                COHERE_API_URL.to_string(),
                config,
            )?))),
            AvailableModel::Kandinsky3 => Ok(AnyGenerator::Image(Box::new(
                KandinskyImageGenerator::new(KANDINSKY_API_URL.to_string(), config)?,
            ))),
            AvailableModel::Elevenlabs => Ok(AnyGenerator::Tts(Box::new(
                ElevenlabsTtsGenerator::new(ELEVENLABS_API_URL.to_string(), config)?,
            ))),
        }
    }
}

/// The three generators a pipeline run needs, one per capability slot.
#[derive(Debug, Clone)]
pub struct GeneratorSet {
    pub text: Box<dyn TextGenerator>,
    pub image: Box<dyn ImageGenerator>,
    pub tts: Box<dyn TtsGenerator>,
}

impl GeneratorSet {
    pub fn new(
        text: Box<dyn TextGenerator>,
        image: Box<dyn ImageGenerator>,
        tts: Box<dyn TtsGenerator>,
    ) -> Self {
        Self { text, image, tts }
    }

    /// Runs the factory for each of the three configs.
    ///
    /// A config whose identifier resolves to a different capability than its
    /// slot (e.g. a TTS model supplied as the text model) fails with
    /// `UnsupportedProvider` here instead of failing late mid-generation.
    pub fn from_configs(configs: GeneratorConfigs) -> Result<Self, GeneratorError> {
        let text_model = configs.text.model;
        let text = match GeneratorFactory::create(configs.text)? {
            AnyGenerator::Text(generator) => generator,
            _ => {
                return Err(GeneratorError::UnsupportedProvider(format!(
                    "{text_model} is not a text model"
                )))
            }
        };
        let image_model = configs.image.model;
        let image = match GeneratorFactory::create(configs.image)? {
            AnyGenerator::Image(generator) => generator,
            _ => {
                return Err(GeneratorError::UnsupportedProvider(format!(
                    "{image_model} is not an image model"
                )))
            }
        };
        let tts_model = configs.tts.model;
        let tts = match GeneratorFactory::create(configs.tts)? {
            AnyGenerator::Tts(generator) => generator,
            _ => {
                return Err(GeneratorError::UnsupportedProvider(format!(
                    "{tts_model} is not a tts model"
                )))
            }
        };
        Ok(Self { text, image, tts })
    }
}
