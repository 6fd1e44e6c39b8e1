//! # Anki Import Collaborator
//!
//! The target collection the pipeline imports into, spoken to over the
//! AnkiConnect JSON protocol (version 6). The pipeline only depends on the
//! [`TargetCollection`] trait; this module provides the real client.

use crate::errors::AnkiError;
use crate::types::{CardRawDataV1, WordWithContext};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Default AnkiConnect endpoint.
pub const ANKI_CONNECT_URL: &str = "http://127.0.0.1:8765";

const ANKI_CONNECT_VERSION: u8 = 6;

/// The external flashcard store cards are imported into.
#[async_trait]
pub trait TargetCollection: Send + Sync {
    /// Returns the subset of `words` that have no note in `deck` yet.
    async fn words_missing_from_target(
        &self,
        deck: &str,
        words: &[WordWithContext],
    ) -> Result<Vec<WordWithContext>, AnkiError>;

    /// Imports every card in the mapping. A failure is surfaced to the
    /// caller untouched; this collaborator does not retry.
    async fn import_card_collection(
        &self,
        deck: &str,
        cards: &BTreeMap<WordWithContext, CardRawDataV1>,
    ) -> Result<(), AnkiError>;
}

// --- AnkiConnect request and response structures ---

#[derive(Serialize)]
struct AnkiRequest<P> {
    action: &'static str,
    version: u8,
    params: P,
}

#[derive(Deserialize, Debug)]
struct AnkiResponse<R> {
    result: Option<R>,
    error: Option<String>,
}

// --- AnkiConnect client ---

/// A client for the AnkiConnect add-on.
#[derive(Clone, Debug)]
pub struct AnkiConnect {
    client: ReqwestClient,
    api_url: String,
}

impl AnkiConnect {
    pub fn new(api_url: String) -> Result<Self, AnkiError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(AnkiError::Request)?;
        Ok(Self { client, api_url })
    }

    async fn invoke<P: Serialize, R: DeserializeOwned>(
        &self,
        action: &'static str,
        params: P,
    ) -> Result<R, AnkiError> {
        let request_body = AnkiRequest {
            action,
            version: ANKI_CONNECT_VERSION,
            params,
        };

        debug!(action, "--> Invoking AnkiConnect");

        let response = self
            .client
            .post(&self.api_url)
            .json(&request_body)
            .send()
            .await
            .map_err(AnkiError::Request)?;

        let envelope: AnkiResponse<R> = response.json().await.map_err(AnkiError::Deserialization)?;

        if let Some(error) = envelope.error {
            return Err(AnkiError::Protocol(format!("{action}: {error}")));
        }
        envelope
            .result
            .ok_or_else(|| AnkiError::Protocol(format!("{action}: response carried no result")))
    }

    /// Verifies AnkiConnect is reachable and speaks our protocol version.
    pub async fn check_connection(&self) -> Result<(), AnkiError> {
        let version: u32 = self.invoke("version", json!({})).await?;
        info!(version, "AnkiConnect is reachable");
        Ok(())
    }

    /// Fails with `MissingDeck` if `deck` is not present in the collection.
    pub async fn check_deck_exists(&self, deck: &str) -> Result<(), AnkiError> {
        let decks: Vec<String> = self.invoke("deckNames", json!({})).await?;
        if decks.iter().any(|name| name == deck) {
            Ok(())
        } else {
            Err(AnkiError::MissingDeck(deck.to_string()))
        }
    }

    /// Creates `deck` if it does not exist yet. `createDeck` is idempotent
    /// on the AnkiConnect side.
    pub async fn create_deck(&self, deck: &str) -> Result<(), AnkiError> {
        let _id: u64 = self.invoke("createDeck", json!({ "deck": deck })).await?;
        Ok(())
    }

    async fn note_exists(&self, deck: &str, word: &str) -> Result<bool, AnkiError> {
        let query = format!("\"deck:{deck}\" \"Front:{word}\"");
        let notes: Vec<u64> = self.invoke("findNotes", json!({ "query": query })).await?;
        Ok(!notes.is_empty())
    }

    async fn store_media(&self, filename: &str, path: &std::path::Path) -> Result<(), AnkiError> {
        let path = path
            .canonicalize()
            .map_err(|e| AnkiError::Protocol(format!("cannot resolve media path: {e}")))?;
        let _stored: String = self
            .invoke(
                "storeMediaFile",
                json!({ "filename": filename, "path": path }),
            )
            .await?;
        Ok(())
    }

    async fn add_note(&self, deck: &str, card: &CardRawDataV1) -> Result<(), AnkiError> {
        let mut back = card.card_text.clone();
        if card.image_path.as_os_str().is_empty() {
            debug!(word = %card.word, "Card has no image");
        } else {
            let filename = media_filename(&card.word, "png");
            self.store_media(&filename, &card.image_path).await?;
            back.push_str(&format!("<br><img src=\"{filename}\">"));
        }
        if !card.audio_path.as_os_str().is_empty() {
            let filename = media_filename(&card.word, "mp3");
            self.store_media(&filename, &card.audio_path).await?;
            back.push_str(&format!("<br>[sound:{filename}]"));
        }

        let _note_id: u64 = self
            .invoke(
                "addNote",
                json!({
                    "note": {
                        "deckName": deck,
                        "modelName": "Basic",
                        "fields": { "Front": card.word, "Back": back },
                        "options": { "allowDuplicate": false },
                    }
                }),
            )
            .await?;
        Ok(())
    }
}

fn media_filename(word: &str, extension: &str) -> String {
    format!("cardgen-{word}.{extension}")
}

#[async_trait]
impl TargetCollection for AnkiConnect {
    async fn words_missing_from_target(
        &self,
        deck: &str,
        words: &[WordWithContext],
    ) -> Result<Vec<WordWithContext>, AnkiError> {
        let mut missing = Vec::new();
        for word_with_context in words {
            if self.note_exists(deck, &word_with_context.word).await? {
                info!(word = %word_with_context.word, "Word is already present in the deck");
            } else {
                missing.push(word_with_context.clone());
            }
        }
        Ok(missing)
    }

    async fn import_card_collection(
        &self,
        deck: &str,
        cards: &BTreeMap<WordWithContext, CardRawDataV1>,
    ) -> Result<(), AnkiError> {
        for (word_with_context, card) in cards {
            self.add_note(deck, card).await?;
            info!(word = %word_with_context.word, "Imported card");
        }
        Ok(())
    }
}
