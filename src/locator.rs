/// Word extraction and Russian classification.
///
/// Two text sources feed the locator: a live text buffer addressed by a
/// character offset, and free-form recognized text from the screen, which
/// carries no per-character coordinates.
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::phonetics::is_cyrillic;

static RUSSIAN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[а-яёА-ЯЁ]+").expect("valid regex"));

/// True iff `word` contains at least one Cyrillic code point.
#[must_use]
pub fn is_russian(word: &str) -> bool {
    word.chars().any(is_cyrillic)
}

/// The maximal run of letter-or-digit characters containing `offset`.
///
/// `offset` counts characters, not bytes. Out-of-range offsets and offsets
/// on a separator yield `""`.
#[must_use]
pub fn word_at(text: &str, offset: usize) -> String {
    let Some((at, c)) = text.char_indices().nth(offset) else {
        return String::new();
    };
    if !c.is_alphanumeric() {
        return String::new();
    }

    let start = text[..at]
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric())
        .last()
        .map_or(at, |(i, _)| i);
    let end = text[at..]
        .char_indices()
        .find(|(_, c)| !c.is_alphanumeric())
        .map_or(text.len(), |(i, _)| at + i);

    text[start..end].to_string()
}

/// First whitespace-separated token that is Russian.
///
/// Order-dependent: recognized text has no link back to the cursor, so the
/// first Russian token wins.
#[must_use]
pub fn first_russian_word(text: &str) -> Option<&str> {
    text.split_whitespace().find(|token| is_russian(token))
}

/// Distinct runs of Russian letters longer than one character, in order of
/// first appearance.
#[must_use]
pub fn extract_russian_words(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    RUSSIAN_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| w.chars().count() > 1)
        .filter(|w| seen.insert(*w))
        .collect()
}

/// Normalize recognizer output to space-separated Russian words.
#[must_use]
pub fn normalize_recognized(text: &str) -> String {
    extract_russian_words(text.trim()).join(" ")
}
