use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::prompts;
use crate::providers::{invalid_input, Generator, GeneratorInput, TextGenerator};
use crate::types::{GeneratorResponse, WordWithContext};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default endpoint for the OpenAI chat completions API.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

// --- OpenAI request and response structures ---

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: i32,
    n: u8,
    presence_penalty: f32,
    frequency_penalty: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessage,
}

// --- OpenAI text generator ---

/// A text generator backed by the OpenAI chat completions API.
///
/// The concrete chat model (`gpt-4o`, `gpt-3.5-turbo`) comes from the
/// config's capability identifier.
#[derive(Clone, Debug)]
pub struct OpenAiTextGenerator {
    client: ReqwestClient,
    api_url: String,
    config: GeneratorConfig,
}

impl OpenAiTextGenerator {
    pub fn new(api_url: String, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_empty() {
            return Err(GeneratorError::MissingCredential(
                "API key for OpenAI was empty".to_string(),
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

    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GeneratorError> {
        let request_body = ChatRequest {
            model: self.config.model.wire_name(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            // Kept low for conservative, repeatable card text.
            temperature: 0.2,
            max_tokens: 512,
            n: 1,
            presence_penalty: 0.0,
            frequency_penalty: 0.1,
        };

        debug!(user_prompt = %user_prompt, "--> Sending chat request to OpenAI");

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

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(GeneratorError::Deserialization)?;

        let text = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .unwrap_or_default();

        Ok(text)
    }
}

fn word_user_prompt(word_with_context: &WordWithContext) -> String {
    format!(
        "WORD: [{}]; CONTEXT: [{}]",
        word_with_context.word, word_with_context.context
    )
}

#[async_trait]
impl Generator for OpenAiTextGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Word(word_with_context) = input else {
            return Err(invalid_input("WordWithContext", &input));
        };
        let system_prompt = prompts::card_text_system_prompt(&self.config.language)?;
        let text = self
            .chat(system_prompt, &word_user_prompt(word_with_context))
            .await?;
        Ok(GeneratorResponse::with_text(text))
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate_image_prompt(
        &self,
        word_with_context: &WordWithContext,
        card_text: &str,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let user_prompt = format!(
            "WORD: [{}]; CONTEXT: [{}]; TEXT: [{card_text}]",
            word_with_context.word, word_with_context.context
        );
        let image_prompt = self
            .chat(prompts::IMAGE_PROMPT_SYSTEM_PROMPT, &user_prompt)
            .await?;
        Ok(GeneratorResponse::with_text(image_prompt))
    }
}
