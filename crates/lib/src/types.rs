use crate::errors::GeneratorError;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tempfile::NamedTempFile;

/// One input row: the word (or phrase) a card is generated for, plus an
/// optional free-text context that disambiguates the generation prompts.
///
/// Identity is the word alone. Two inputs with the same word but different
/// contexts refer to the same card.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct WordWithContext {
    pub word: String,
    #[serde(default)]
    pub context: String,
}

impl WordWithContext {
    pub fn new(word: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            context: context.into(),
        }
    }
}

impl PartialEq for WordWithContext {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for WordWithContext {}

impl Hash for WordWithContext {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
    }
}

impl PartialOrd for WordWithContext {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WordWithContext {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

/// On-disk representation of one generated card, version 1.
///
/// Written once by the generation phase (or found on disk from a prior run)
/// and never mutated; re-running generation supersedes the file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CardRawDataV1 {
    pub word: String,
    pub card_text: String,
    pub image_prompt: String,
    pub image_path: PathBuf,
    pub audio_path: PathBuf,
}

/// Joins persisted cards back to their identity keys, ordered by word so the
/// import order is deterministic.
pub fn cards_to_map(cards: Vec<CardRawDataV1>) -> BTreeMap<WordWithContext, CardRawDataV1> {
    cards
        .into_iter()
        .map(|card| (WordWithContext::new(card.word.clone(), ""), card))
        .collect()
}

/// A single-pass sequence of binary audio chunks as delivered by a TTS
/// provider. Not replayable: draining it consumes it.
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Result container for one generator call.
///
/// Only the fields relevant to the producing capability are populated; the
/// rest keep their defaults.
#[derive(Default)]
pub struct GeneratorResponse {
    pub text: String,
    pub image_path: PathBuf,
    pub image_bytes: Vec<u8>,
    pub audio_bytes: Option<AudioStream>,
}

impl fmt::Debug for GeneratorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorResponse")
            .field("text", &self.text)
            .field("image_path", &self.image_path)
            .field("image_bytes", &self.image_bytes.len())
            .field("audio_bytes", &self.audio_bytes.is_some())
            .finish_non_exhaustive()
    }
}

impl GeneratorResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_image_bytes(image_bytes: Vec<u8>) -> Self {
        Self {
            image_bytes,
            ..Default::default()
        }
    }

    pub fn with_audio(audio_bytes: AudioStream) -> Self {
        Self {
            audio_bytes: Some(audio_bytes),
            ..Default::default()
        }
    }

    /// Writes `image_bytes` to `path`.
    ///
    /// The bytes are written to a temp file in the destination directory and
    /// renamed into place, so a failure never leaves a partial file behind.
    pub fn save_image(&self, path: &Path) -> Result<(), GeneratorError> {
        if self.image_bytes.is_empty() {
            return Err(GeneratorError::InvalidArtifact(format!(
                "image bytes are empty, nothing to save to {}",
                path.display()
            )));
        }
        let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
        tmp.write_all(&self.image_bytes)?;
        tmp.persist(path).map_err(|e| GeneratorError::Io(e.error))?;
        Ok(())
    }

    /// Drains the audio stream exactly once, writing each chunk in order to
    /// `path`.
    ///
    /// The stream is taken out of the response: a second call fails with
    /// `InvalidArtifact`. A chunk error aborts the write and drops the temp
    /// file, leaving no partial file at `path`.
    pub async fn save_audio(&mut self, path: &Path) -> Result<(), GeneratorError> {
        let mut stream = self.audio_bytes.take().ok_or_else(|| {
            GeneratorError::InvalidArtifact(format!(
                "audio stream is absent or was already consumed, cannot save to {}",
                path.display()
            ))
        })?;
        let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(GeneratorError::Request)?;
            tmp.write_all(&chunk)?;
        }
        tmp.persist(path).map_err(|e| GeneratorError::Io(e.error))?;
        Ok(())
    }
}

// The temp file must live in the destination directory so the final rename
// stays on one filesystem.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}
