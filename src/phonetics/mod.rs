//! Russian → Latin phonetic transliteration.
//!
//! A deterministic character/digraph mapping, not a linguistic model.
//! Curated whole-word pronunciations take priority over the rules.
pub mod rules;

use std::collections::HashMap;
use std::fmt;

use rules::{CHARACTER_RULES, COMMON_WORDS, DIGRAPH_RULES};

/// Punctuation stripped from token edges when building a pronunciation guide.
const GUIDE_TRIM: &[char] = &[
    '.', ',', '!', '?', ':', ';', '"', '\'', '(', ')', '[', ']', '{', '}',
];

/// Whether `c` lies in the Cyrillic block (U+0400–U+04FF).
#[must_use]
pub fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Phonetic transliteration engine.
///
/// Tables are built once at construction and never change afterwards, so a
/// single instance can be shared behind `Arc` by every resolver.
pub struct Transliterator {
    characters: HashMap<char, &'static str>,
    digraphs: HashMap<[char; 2], &'static str>,
    common_words: HashMap<&'static str, &'static str>,
}

/// One line of a pronunciation guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideLine {
    pub word: String,
    /// `None` when the token is not Russian.
    pub pronunciation: Option<String>,
}

impl fmt::Display for GuideLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.pronunciation {
            Some(p) => write!(f, "{} → [{p}]", self.word),
            None => write!(f, "{} → (not Russian)", self.word),
        }
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    pub fn new() -> Self {
        Self {
            characters: CHARACTER_RULES.iter().copied().collect(),
            digraphs: DIGRAPH_RULES.iter().copied().collect(),
            common_words: COMMON_WORDS.iter().copied().collect(),
        }
    }

    /// Phonetic rendering of `word`.
    ///
    /// Total: characters without a rule are copied verbatim, so Latin text
    /// comes back unchanged and `""` maps to `""`.
    #[must_use]
    pub fn pronounce(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        if let Some(curated) = self.common_words.get(word.to_lowercase().as_str()) {
            return (*curated).to_string();
        }

        self.pronounce_by_rules(word)
    }

    /// Greedy left-to-right scan: a matching digraph consumes both letters.
    fn pronounce_by_rules(&self, word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::with_capacity(word.len() * 2);
        let mut i = 0;

        while i < chars.len() {
            let current = fold(chars[i]);

            if let Some(next) = chars.get(i + 1).copied().map(fold) {
                if let Some(fragment) = self.digraphs.get(&[current, next]) {
                    out.push_str(fragment);
                    i += 2;
                    continue;
                }
            }

            match self.characters.get(&current) {
                Some(fragment) => out.push_str(fragment),
                None => out.push(chars[i]),
            }
            i += 1;
        }

        out
    }

    /// Pronunciation guide for a block of text, one line per token.
    #[must_use]
    pub fn pronunciation_guide(&self, text: &str) -> Vec<GuideLine> {
        text.split([' ', '\n', '\r', '\t'])
            .filter(|token| !token.is_empty())
            .map(|token| {
                let word = token.trim_matches(GUIDE_TRIM);
                let pronunciation = word
                    .chars()
                    .any(is_cyrillic)
                    .then(|| self.pronounce(word));
                GuideLine {
                    word: word.to_string(),
                    pronunciation,
                }
            })
            .collect()
    }
}

/// Case-fold a single character; multi-char lowercase forms are left alone.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let t = Transliterator::new();
        assert_eq!(t.pronounce(""), "");
    }

    #[test]
    fn test_latin_passthrough() {
        let t = Transliterator::new();
        assert_eq!(t.pronounce("hello, world 42"), "hello, world 42");
    }

    #[test]
    fn test_character_rules() {
        let t = Transliterator::new();
        assert_eq!(t.pronounce("кот"), "kot");
        assert_eq!(t.pronounce("щука"), "shchooka");
        assert_eq!(t.pronounce("КОТ"), "kot", "uppercase uses the same rules");
    }

    #[test]
    fn test_digraph_takes_precedence() {
        let t = Transliterator::new();
        // с+ч would be "s"+"ch" without the override.
        assert_eq!(t.pronounce("сч"), "sch");
        assert_eq!(t.pronounce("счёт"), "schyot");
        assert_eq!(t.pronounce("СЧёт"), "schyot", "digraphs are case-insensitive");
    }

    #[test]
    fn test_digraph_consumes_both_letters() {
        let t = Transliterator::new();
        // "тс" matches at index 0, scanning resumes at "с"+"а" which is no digraph.
        assert_eq!(t.pronounce("тса"), "tsa");
        // "дсч": "дс" wins first, so "сч" is never considered.
        assert_eq!(t.pronounce("дсч"), "dsch");
    }

    #[test]
    fn test_common_word_shortcut() {
        let t = Transliterator::new();
        assert_ne!(t.pronounce_by_rules("привет"), "privet");
        assert_eq!(t.pronounce("привет"), "privet");
        assert_eq!(t.pronounce("ПРИВЕТ"), "privet");
        assert_eq!(t.pronounce("Привет"), "privet");
    }

    #[test]
    fn test_mixed_script() {
        let t = Transliterator::new();
        assert_eq!(t.pronounce("abc да"), "abc da");
    }

    #[test]
    fn test_pronunciation_guide() {
        let t = Transliterator::new();
        let lines = t.pronunciation_guide("Привет, world!\n  кот.");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), "Привет → [privet]");
        assert_eq!(lines[1].to_string(), "world → (not Russian)");
        assert_eq!(lines[2].to_string(), "кот → [kot]");
    }

    #[test]
    fn test_pronunciation_guide_empty() {
        let t = Transliterator::new();
        assert!(t.pronunciation_guide("  \n\t ").is_empty());
    }

    #[test]
    fn test_is_cyrillic() {
        assert!(is_cyrillic('ж'));
        assert!(is_cyrillic('Ё'));
        assert!(!is_cyrillic('z'));
    }
}
