use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::providers::{invalid_input, Generator, GeneratorInput, ImageGenerator};
use crate::types::GeneratorResponse;
use async_trait::async_trait;
use base64::prelude::*;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default base URL for the Kandinsky (FusionBrain) API.
pub const KANDINSKY_API_URL: &str = "https://api-key.fusionbrain.ai";

const POLL_ATTEMPTS: u32 = 30;
const POLL_DELAY: Duration = Duration::from_secs(2);

// --- Kandinsky request and response structures ---

#[derive(Serialize)]
struct Text2ImageRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(rename = "numImages")]
    num_images: u8,
    width: u32,
    height: u32,
    #[serde(rename = "generateParams")]
    generate_params: GenerateParams<'a>,
}

#[derive(Serialize)]
struct GenerateParams<'a> {
    query: &'a str,
}

#[derive(Deserialize, Debug)]
struct RunResponse {
    uuid: String,
}

#[derive(Deserialize, Debug)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    images: Vec<String>,
    #[serde(rename = "errorDescription", default)]
    error_description: Option<String>,
}

// --- Kandinsky image generator ---

/// An image generator backed by the Kandinsky text2image API.
///
/// Generation is asynchronous on the provider side: a run request returns a
/// task id which is polled until the task is done. The finished image
/// arrives base64-encoded.
#[derive(Clone, Debug)]
pub struct KandinskyImageGenerator {
    client: ReqwestClient,
    api_url: String,
    config: GeneratorConfig,
}

impl KandinskyImageGenerator {
    /// Both the API key and the secret key are required; an empty one fails
    /// here, before any request is built.
    pub fn new(api_url: String, config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.api_key.is_empty() {
            return Err(GeneratorError::MissingCredential(
                "API key for Kandinsky was empty".to_string(),
            ));
        }
        if config.secret_key.is_empty() {
            return Err(GeneratorError::MissingCredential(
                "Secret key for Kandinsky was empty".to_string(),
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

    fn auth_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-Key", format!("Key {}", self.config.api_key))
            .header("X-Secret", format!("Secret {}", self.config.secret_key))
    }

    async fn run(&self, prompt: &str) -> Result<String, GeneratorError> {
        let request_body = Text2ImageRequest {
            kind: "GENERATE",
            num_images: 1,
            width: 1024,
            height: 1024,
            generate_params: GenerateParams { query: prompt },
        };

        let url = format!("{}/key/api/v1/text2image/run", self.api_url);
        let response = self
            .auth_headers(self.client.post(&url))
            .json(&request_body)
            .send()
            .await
            .map_err(GeneratorError::Request)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api(error_text));
        }

        let run_response: RunResponse = response
            .json()
            .await
            .map_err(GeneratorError::Deserialization)?;
        Ok(run_response.uuid)
    }

    async fn poll(&self, uuid: &str) -> Result<Vec<u8>, GeneratorError> {
        let url = format!("{}/key/api/v1/text2image/status/{uuid}", self.api_url);
        for attempt in 0..POLL_ATTEMPTS {
            let response = self
                .auth_headers(self.client.get(&url))
                .send()
                .await
                .map_err(GeneratorError::Request)?;

            if !response.status().is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(GeneratorError::Api(error_text));
            }

            let status: StatusResponse = response
                .json()
                .await
                .map_err(GeneratorError::Deserialization)?;

            debug!(uuid, attempt, status = %status.status, "Kandinsky task status");

            match status.status.as_str() {
                "DONE" => {
                    let encoded = status.images.first().ok_or_else(|| {
                        GeneratorError::Api("task finished without images".to_string())
                    })?;
                    return BASE64_STANDARD
                        .decode(encoded)
                        .map_err(|e| GeneratorError::Api(format!("invalid image payload: {e}")));
                }
                "FAIL" => {
                    return Err(GeneratorError::Api(
                        status
                            .error_description
                            .unwrap_or_else(|| "image generation failed".to_string()),
                    ));
                }
                _ => tokio::time::sleep(POLL_DELAY).await,
            }
        }
        Err(GeneratorError::Api(format!(
            "image task {uuid} did not finish after {POLL_ATTEMPTS} polls"
        )))
    }
}

#[async_trait]
impl Generator for KandinskyImageGenerator {
    async fn generate(
        &self,
        input: GeneratorInput<'_>,
    ) -> Result<GeneratorResponse, GeneratorError> {
        let GeneratorInput::Text(prompt) = input else {
            return Err(invalid_input("prompt string", &input));
        };
        let uuid = self.run(prompt).await?;
        let image_bytes = self.poll(&uuid).await?;
        Ok(GeneratorResponse::with_image_bytes(image_bytes))
    }
}

impl ImageGenerator for KandinskyImageGenerator {}
