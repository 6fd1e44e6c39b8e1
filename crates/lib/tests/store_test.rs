//! # Processing Directory Tests

mod common;

use cardgen::store::{card_file_path, cards_in_directory, discard_invalid_cards, save_card};
use cardgen::types::CardRawDataV1;
use common::setup_tracing;
use std::path::PathBuf;

fn card(word: &str) -> CardRawDataV1 {
    CardRawDataV1 {
        word: word.to_string(),
        card_text: format!("text for {word}"),
        image_prompt: String::new(),
        image_path: PathBuf::new(),
        audio_path: PathBuf::new(),
    }
}

#[test]
fn test_saved_cards_are_read_back() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    save_card(dir.path(), &card("haus")).unwrap();
    save_card(dir.path(), &card("baum")).unwrap();

    let mut cards = cards_in_directory(dir.path()).unwrap();
    cards.sort_by(|a, b| a.word.cmp(&b.word));
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].word, "baum");
    assert_eq!(cards[1].word, "haus");
}

#[test]
fn test_unreadable_card_files_are_skipped() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    save_card(dir.path(), &card("haus")).unwrap();
    std::fs::write(dir.path().join("broken.card.json"), "{ not json").unwrap();
    // Unrelated files in the directory are not card candidates.
    std::fs::write(dir.path().join("haus.png"), b"image").unwrap();

    let cards = cards_in_directory(dir.path()).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].word, "haus");
}

#[test]
fn test_discard_drops_cards_with_missing_media_or_empty_text() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();

    let valid = card("haus");

    let mut empty_text = card("leer");
    empty_text.card_text = "  ".to_string();

    let mut missing_image = card("baum");
    missing_image.image_path = dir.path().join("baum.png");

    let mut with_media = card("hund");
    with_media.image_path = dir.path().join("hund.png");
    std::fs::write(&with_media.image_path, b"image").unwrap();

    let kept = discard_invalid_cards(
        dir.path(),
        vec![valid, empty_text, missing_image, with_media],
    );
    let words: Vec<&str> = kept.iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, vec!["haus", "hund"]);
}

#[test]
fn test_card_file_name_is_filesystem_safe() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = card_file_path(dir.path(), "auf etwas/jemanden achten");
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(!name.contains('/'));
    assert!(name.ends_with(".card.json"));
}
