//! # Capability Model
//!
//! The closed set of provider identifiers, partitioned into three disjoint
//! capability classes (text, image, text-to-speech). The wire string of each
//! identifier is the canonical form used on the command line and in card
//! data; `from_wire` is the total reverse mapping.

use crate::errors::GeneratorError;
use std::fmt;
use std::str::FromStr;

/// What kind of artifact a provider produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Text,
    Image,
    Tts,
}

/// A concrete generation backend known to the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvailableModel {
    Gpt4o,
    Gpt35Turbo,
    Cohere,
    Kandinsky3,
    Elevenlabs,
}

const TEXT_MODELS: &[AvailableModel] = &[
    AvailableModel::Gpt4o,
    AvailableModel::Gpt35Turbo,
    AvailableModel::Cohere,
];

const IMAGE_MODELS: &[AvailableModel] = &[AvailableModel::Kandinsky3];

const TTS_MODELS: &[AvailableModel] = &[AvailableModel::Elevenlabs];

impl AvailableModel {
    /// The canonical wire string. Round-trips with [`AvailableModel::from_wire`].
    pub fn wire_name(&self) -> &'static str {
        match self {
            AvailableModel::Gpt4o => "gpt-4o",
            AvailableModel::Gpt35Turbo => "gpt-3.5-turbo",
            AvailableModel::Cohere => "cohere",
            AvailableModel::Kandinsky3 => "kandinsky",
            AvailableModel::Elevenlabs => "elevenlabs",
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            AvailableModel::Gpt4o | AvailableModel::Gpt35Turbo | AvailableModel::Cohere => {
                Capability::Text
            }
            AvailableModel::Kandinsky3 => Capability::Image,
            AvailableModel::Elevenlabs => Capability::Tts,
        }
    }

    /// Union of the three capability sets, without duplicates.
    pub fn all() -> Vec<AvailableModel> {
        let mut models = Vec::new();
        models.extend_from_slice(TEXT_MODELS);
        models.extend_from_slice(IMAGE_MODELS);
        models.extend_from_slice(TTS_MODELS);
        models
    }

    pub fn text_models() -> &'static [AvailableModel] {
        TEXT_MODELS
    }

    pub fn image_models() -> &'static [AvailableModel] {
        IMAGE_MODELS
    }

    pub fn tts_models() -> &'static [AvailableModel] {
        TTS_MODELS
    }

    /// Resolves a wire string to its identifier.
    ///
    /// Every declared value is reachable; an unknown string is a hard error,
    /// never a default.
    pub fn from_wire(s: &str) -> Result<AvailableModel, GeneratorError> {
        AvailableModel::all()
            .into_iter()
            .find(|model| model.wire_name() == s)
            .ok_or_else(|| GeneratorError::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for AvailableModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for AvailableModel {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AvailableModel::from_wire(s)
    }
}
