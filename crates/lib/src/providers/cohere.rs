use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::prompts;
use crate::providers::{invalid_input, Generator, GeneratorInput, TextGenerator};
use crate::types::{GeneratorResponse, WordWithContext};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default endpoint for the Cohere chat API.
pub const COHERE_API_URL: &str = "https://api.cohere.com/v1/chat";

// --- Cohere request and response structures ---

#[derive(Serialize)]
struct CohereRequest {
    message: String,
    temperature: f32,
    max_tokens: i32,
}

#[derive(Deserialize, Debug)]
struct CohereResponse {
    text: String,
}

// --- Cohere text generator ---

/// A text generator backed by the Cohere chat API.
#[derive(Clone, Debug)]
pub struct CohereTextGenerator {
    client: ReqwestClient,
    api_url: String,
    config: GeneratorConfig,
}

impl CohereTextGenerator {
    pub fn new(api_url: String, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_empty() {
            return Err(GeneratorError::MissingCredential(
                "API key for Cohere was empty".to_string(),
            ));
        }
        let client = ReqwestClient::builder()
            .build()
            .map_err(GeneratorError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    async fn chat(&self, message: String) -> Result<String, GeneratorError> {
        let request_body = CohereRequest {
            message,
            temperature: 0.2,
            max_tokens: 512,
        };

        debug!("--> Sending chat request to Cohere");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(GeneratorError::Request)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api(error_text));
        }

        let cohere_response: CohereResponse = response
            .json()
            .await
            .map_err(GeneratorError::Deserialization)?;

        Ok(cohere_response.text)
    }
}

#[async_trait]
impl Generator for CohereTextGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Word(word_with_context) = input else {
            return Err(invalid_input("WordWithContext", &input));
        };
        let system_prompt = prompts::card_text_system_prompt(&self.config.language)?;
        let message = format!(
            "{system_prompt}\nWORD: [{}]; CONTEXT: [{}]",
            word_with_context.word, word_with_context.context
        );
        let text = self.chat(message).await?;
        // The card front already carries the word; a cloze-style back must
        // not repeat it.
        let text = text.replace(&word_with_context.word, "");
        Ok(GeneratorResponse::with_text(text))
    }
}

#[async_trait]
impl TextGenerator for CohereTextGenerator {
    async fn generate_image_prompt(
        &self,
        word_with_context: &WordWithContext,
        card_text: &str,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let message = format!(
            "{}\nWORD: [{}]; CONTEXT: [{}]; TEXT: [{card_text}]",
            prompts::IMAGE_PROMPT_SYSTEM_PROMPT,
            word_with_context.word,
            word_with_context.context
        );
        let image_prompt = self.chat(message).await?;
        Ok(GeneratorResponse::with_text(image_prompt))
    }
}
