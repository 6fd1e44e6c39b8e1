use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::providers::{invalid_input, Generator, GeneratorInput, TtsGenerator};
use crate::types::GeneratorResponse;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use tracing::debug;

/// Default base URL for the ElevenLabs API.
pub const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io";

const MODEL_ID: &str = "eleven_monolingual_v1";

/// Per-language voice ids. An unmapped language is rejected at construction
/// time; there is no default voice.
const VOICE_IDS: &[(&str, &str)] = &[
    ("english", "P7x743VjyZEOihNNygQ9"),
    ("german", "MHxgWgZ7ayjcFagtPw59"),
];

// --- ElevenLabs request structures ---

#[derive(Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

// --- ElevenLabs TTS generator ---

/// A text-to-speech generator backed by the ElevenLabs API.
///
/// The response body is not buffered: `generate` hands the chunked audio
/// stream to the caller as the response's `audio_bytes`.
#[derive(Clone, Debug)]
pub struct ElevenlabsTtsGenerator {
    client: ReqwestClient,
    api_url: String,
    api_key: String,
    voice_id: String,
}

impl ElevenlabsTtsGenerator {
    /// Requires a non-empty API key and a voice mapping for the config's
    /// language; either failing aborts construction before any network use.
    pub fn new(api_url: String, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_empty() {
            return Err(GeneratorError::MissingCredential(
                "API key for ElevenLabs was empty".to_string(),
            ));
        }
        let voice_id = VOICE_IDS
            .iter()
            .find(|(language, _)| *language == config.language)
            .map(|(_, voice_id)| voice_id.to_string())
            .ok_or_else(|| GeneratorError::UnsupportedLanguage(config.language.clone()))?;
        let client = ReqwestClient::builder()
            .build()
            .map_err(GeneratorError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key: config.api_key,
            voice_id,
        })
    }
}

#[async_trait]
impl Generator for ElevenlabsTtsGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Text(text) = input else {
            return Err(invalid_input("text to speak", &input));
        };

        let request_body = TtsRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.5,
            },
        };

        let url = format!("{}/v1/text-to-speech/{}", self.api_url, self.voice_id);
        debug!(voice_id = %self.voice_id, "--> Sending TTS request to ElevenLabs");

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&request_body)
            .send()
            .await
            .map_err(GeneratorError::Request)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api(error_text));
        }

        Ok(GeneratorResponse::with_audio(Box::pin(
            response.bytes_stream(),
        )))
    }
}

impl TtsGenerator for ElevenlabsTtsGenerator {}
