//! # Input Reading
//!
//! Reads the word list from a semicolon-delimited CSV file with a
//! `word;context` header. The context column may be empty.

use crate::types::WordWithContext;
use std::io;
use std::path::Path;
use tracing::info;

/// Reads the input word list. Rows with an empty word column are skipped.
pub fn read_words_csv(path: &Path) -> io::Result<Vec<WordWithContext>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .map_err(io::Error::other)?;

    let mut words = Vec::new();
    for record in reader.deserialize() {
        let word_with_context: WordWithContext = record.map_err(io::Error::other)?;
        if word_with_context.word.trim().is_empty() {
            continue;
        }
        words.push(word_with_context);
    }
    info!(count = words.len(), path = %path.display(), "Input words read");
    Ok(words)
}
