//! # Input Reading Tests

mod common;

use cardgen::input::read_words_csv;
use common::setup_tracing;

#[test]
fn test_reads_semicolon_csv_with_word_and_context() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");
    std::fs::write(&path, "word;context\nhaus;das haus\nbaum;\n").unwrap();

    let words = read_words_csv(&path).unwrap();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].word, "haus");
    assert_eq!(words[0].context, "das haus");
    assert_eq!(words[1].word, "baum");
    assert_eq!(words[1].context, "");
}

#[test]
fn test_rows_with_an_empty_word_are_skipped() {
    setup_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");
    std::fs::write(&path, "word;context\n;stray context\nhaus;\n").unwrap();

    let words = read_words_csv(&path).unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0].word, "haus");
}
