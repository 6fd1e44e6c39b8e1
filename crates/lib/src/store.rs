//! # Processing Directory Store
//!
//! On-disk staging area for generated cards. Each card is one
//! `<word>.card.json` file next to its media artifacts; files are written
//! once and superseded by regeneration, never mutated.

use crate::types::CardRawDataV1;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CARD_SUFFIX: &str = ".card.json";

/// Filesystem-safe stem for a word's artifacts.
fn file_stem(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

pub fn card_file_path(directory: &Path, word: &str) -> PathBuf {
    directory.join(format!("{}{CARD_SUFFIX}", file_stem(word)))
}

pub fn media_file_path(directory: &Path, word: &str, extension: &str) -> PathBuf {
    directory.join(format!("{}.{extension}", file_stem(word)))
}

/// Persists one card's data file, overwriting a superseded card from an
/// earlier run.
pub fn save_card(directory: &Path, card: &CardRawDataV1) -> io::Result<PathBuf> {
    let path = card_file_path(directory, &card.word);
    let json = serde_json::to_string_pretty(card).map_err(io::Error::other)?;
    fs::write(&path, json)?;
    debug!(word = %card.word, path = %path.display(), "Card data saved");
    Ok(path)
}

/// Reads every persisted card in `directory`.
///
/// A file that no longer parses as `CardRawDataV1` is skipped with a
/// warning; it cannot be represented as a candidate card at all.
pub fn cards_in_directory(directory: &Path) -> io::Result<Vec<CardRawDataV1>> {
    let mut cards = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(CARD_SUFFIX) {
            continue;
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<CardRawDataV1>(&contents) {
            Ok(card) => cards.push(card),
            Err(e) => warn!(path = %path.display(), "Skipping unreadable card file: {e}"),
        }
    }
    Ok(cards)
}

/// Drops candidate cards that fail integrity validation: empty card text,
/// or a referenced media file that is missing from disk. Discards are
/// logged, not errors.
pub fn discard_invalid_cards(directory: &Path, cards: Vec<CardRawDataV1>) -> Vec<CardRawDataV1> {
    cards
        .into_iter()
        .filter(|card| match validate_card(card) {
            Ok(()) => true,
            Err(reason) => {
                warn!(
                    word = %card.word,
                    directory = %directory.display(),
                    "Discarding invalid card: {reason}"
                );
                false
            }
        })
        .collect()
}

fn validate_card(card: &CardRawDataV1) -> Result<(), String> {
    if card.card_text.trim().is_empty() {
        return Err("card text is empty".to_string());
    }
    if !card.image_path.as_os_str().is_empty() && !card.image_path.exists() {
        return Err(format!(
            "image file {} is missing",
            card.image_path.display()
        ));
    }
    if !card.audio_path.as_os_str().is_empty() && !card.audio_path.exists() {
        return Err(format!(
            "audio file {} is missing",
            card.audio_path.display()
        ));
    }
    Ok(())
}
