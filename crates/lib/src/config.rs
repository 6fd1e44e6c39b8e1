//! # Generator Configuration
//!
//! One [`GeneratorConfig`] per capability class, built from a single
//! validated [`RuntimeOptions`] value. Provider strings are resolved through
//! the capability model's reverse mapping at construction time, so a typo in
//! a model name aborts the run before any generator is built.

use crate::errors::GeneratorError;
use crate::models::AvailableModel;

/// Per-provider configuration. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub model: AvailableModel,
    pub api_key: String,
    pub secret_key: String,
    pub language: String,
}

/// The raw option set parsed by the caller (CLI flags or otherwise): three
/// independent (provider, api_key, secret_key) triples and one shared target
/// language. No ambient defaults live here; whatever the caller parsed is
/// what the configs are built from.
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub text_model: String,
    pub text_api_key: String,
    pub text_secret_key: String,
    pub image_model: String,
    pub image_api_key: String,
    pub image_secret_key: String,
    pub voice_model: String,
    pub voice_api_key: String,
    pub voice_secret_key: String,
    pub language: String,
}

/// The three configs a pipeline run needs, one per capability class.
#[derive(Clone, Debug)]
pub struct GeneratorConfigs {
    pub text: GeneratorConfig,
    pub image: GeneratorConfig,
    pub tts: GeneratorConfig,
}

impl GeneratorConfigs {
    /// Builds the text, image and tts configs from one runtime option set.
    ///
    /// Fails with `UnknownProvider` if any of the three provider strings is
    /// not a declared wire name.
    pub fn from_runtime_options(options: &RuntimeOptions) -> Result<Self, GeneratorError> {
        let text = GeneratorConfig {
            model: AvailableModel::from_wire(&options.text_model)?,
            api_key: options.text_api_key.clone(),
            secret_key: options.text_secret_key.clone(),
            language: options.language.clone(),
        };
        let image = GeneratorConfig {
            model: AvailableModel::from_wire(&options.image_model)?,
            api_key: options.image_api_key.clone(),
            secret_key: options.image_secret_key.clone(),
            language: options.language.clone(),
        };
        let tts = GeneratorConfig {
            model: AvailableModel::from_wire(&options.voice_model)?,
            api_key: options.voice_api_key.clone(),
            secret_key: options.voice_secret_key.clone(),
            language: options.language.clone(),
        };
        Ok(Self { text, image, tts })
    }
}
