//! Dictionary of playable words
//!
//! Words are stored normalized: trimmed, diacritics stripped and lower-cased,
//! so "Árbol" in a word list and "arbol" typed by a player match.
//! A small Spanish word list is embedded at build time as a fallback when no
//! word list file is configured.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::DictionaryError;

/// Embedded word list, one word per line.
static WORDS_DATA: &str = include_str!("../../data/palabras.txt");

/// Embedded dictionary, built on first use.
static EMBEDDED: Lazy<Dictionary> = Lazy::new(|| Dictionary::from_lines(WORDS_DATA));

/// Strip diacritics and lower-case a word.
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// An immutable set of normalized words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary from words, normalizing each and dropping blanks.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| normalize_word(w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    fn from_lines(data: &str) -> Self {
        Self::from_words(data.lines())
    }

    /// Load a word list file (UTF-8, one word per line).
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        let data = fs::read_to_string(path).map_err(|source| DictionaryError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::from_lines(&data);
        if dictionary.is_empty() {
            return Err(DictionaryError::Empty(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), words = dictionary.len(), "loaded word list");
        Ok(dictionary)
    }

    /// The built-in word list.
    pub fn embedded() -> &'static Dictionary {
        &EMBEDDED
    }

    /// Exact lookup of an already-normalized word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize_word("Árbol"), "arbol");
        assert_eq!(normalize_word("  canción \n"), "cancion");
        assert_eq!(normalize_word("pingüino"), "pinguino");
        assert_eq!(normalize_word("NIÑO"), "nino");
    }

    #[test]
    fn test_from_words_drops_blanks() {
        let dict = Dictionary::from_words(["pez", "", "   ", "Sol"]);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("pez"));
        assert!(dict.contains("sol"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_embedded_words() {
        let dict = Dictionary::embedded();
        assert!(dict.len() > 200, "expected 200+ words, got {}", dict.len());
        assert!(dict.contains("pez"));
        assert!(dict.contains("casa"));
        assert!(dict.contains("a"));
        assert!(!dict.contains(""));
    }

    #[test]
    fn test_embedded_is_normalized() {
        let dict = Dictionary::embedded();
        for word in &dict.words {
            assert_eq!(word, &normalize_word(word));
        }
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Camión").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "luz").unwrap();

        let dict = Dictionary::load(file.path()).unwrap();
        assert_eq!(dict.len(), 2);
        assert!(dict.contains("camion"));
        assert!(dict.contains("luz"));
    }

    #[test]
    fn test_load_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = Dictionary::load(file.path());
        assert!(matches!(result, Err(DictionaryError::Empty(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Dictionary::load(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(DictionaryError::Read { .. })));
    }
}
