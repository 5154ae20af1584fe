//! Word validation
//!
//! A word is playable when it is in the dictionary and can be formed from
//! the rack, counting multiplicity. A wildcard in the word stands for one of
//! the five vowels: each vowel is tried in turn with the wildcard tile spent
//! on it, and the word is valid if any of them works.

use std::collections::BTreeMap;

use super::{Dictionary, Rack, VOWELS, WILDCARD};

/// Result of word validation with specific reasons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// Word is valid
    Valid,
    /// Word (or every vowel reading of its wildcard) is not in the dictionary
    NotInDictionary,
    /// Word is in the dictionary but the rack lacks some letters
    MissingLetters { missing: Vec<char> },
}

impl ValidationResult {
    /// Returns true if the word is valid
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns a user-friendly error message
    pub fn message(&self) -> String {
        match self {
            ValidationResult::Valid => "Valid word!".to_string(),
            ValidationResult::NotInDictionary => "Not in dictionary".to_string(),
            ValidationResult::MissingLetters { missing } => {
                let letters: String = missing.iter().collect();
                format!("Missing letters: {}", letters)
            }
        }
    }
}

/// Whether `word` can be played from `rack`.
pub fn is_valid(word: &str, rack: &Rack, dictionary: &Dictionary) -> bool {
    validate_word(word, rack, dictionary).is_valid()
}

/// Validate a word against the rack and dictionary.
///
/// The word is lower-cased first. Only the first wildcard is substituted;
/// a second one stays in the candidate and can never match.
pub fn validate_word(word: &str, rack: &Rack, dictionary: &Dictionary) -> ValidationResult {
    let word = word.to_lowercase();

    let Some(position) = word.find(WILDCARD) else {
        return validate_plain(&word, rack, dictionary);
    };
    if rack.count(WILDCARD) == 0 {
        return ValidationResult::MissingLetters {
            missing: vec![WILDCARD],
        };
    }

    let (head, tail) = (&word[..position], &word[position + WILDCARD.len_utf8()..]);
    let mut result = ValidationResult::NotInDictionary;
    for vowel in VOWELS {
        let candidate = format!("{}{}{}", head, vowel, tail);
        let spent = rack.with_wildcard_as(WILDCARD, vowel);

        match validate_plain(&candidate, &spent, dictionary) {
            ValidationResult::Valid => return ValidationResult::Valid,
            // Report the first reading that exists but cannot be formed.
            missing @ ValidationResult::MissingLetters { .. }
                if result == ValidationResult::NotInDictionary =>
            {
                result = missing;
            }
            _ => {}
        }
    }

    result
}

/// Validate a word containing no wildcard.
fn validate_plain(word: &str, rack: &Rack, dictionary: &Dictionary) -> ValidationResult {
    if !dictionary.contains(word) {
        return ValidationResult::NotInDictionary;
    }

    match check_letters_available(word, rack) {
        Some(missing) => ValidationResult::MissingLetters { missing },
        None => ValidationResult::Valid,
    }
}

/// Letters of `word` the rack cannot cover, counting repeats, or `None`
/// when every letter is there.
fn check_letters_available(word: &str, rack: &Rack) -> Option<Vec<char>> {
    let mut needed: BTreeMap<char, u32> = BTreeMap::new();
    for c in word.chars() {
        *needed.entry(c).or_insert(0) += 1;
    }

    let missing: Vec<char> = needed
        .into_iter()
        .filter(|&(letter, count)| rack.count(letter) < count)
        .map(|(letter, _)| letter)
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> Dictionary {
        Dictionary::from_words(["pez", "paz", "casa", "sol", "oso", "a", "tos", "ola"])
    }

    #[test]
    fn test_valid_word() {
        let rack = Rack::parse("pezxyzt");
        assert_eq!(validate_word("pez", &rack, &dictionary()), ValidationResult::Valid);
        assert_eq!(validate_word("PEZ", &rack, &dictionary()), ValidationResult::Valid);
    }

    #[test]
    fn test_not_in_dictionary() {
        let rack = Rack::parse("zep");
        assert_eq!(
            validate_word("zep", &rack, &dictionary()),
            ValidationResult::NotInDictionary
        );
    }

    #[test]
    fn test_empty_word() {
        let rack = Rack::parse("*abc");
        assert!(!is_valid("", &rack, &dictionary()));
    }

    #[test]
    fn test_missing_letters() {
        let rack = Rack::parse("cas");
        assert_eq!(
            validate_word("casa", &rack, &dictionary()),
            ValidationResult::MissingLetters { missing: vec!['a'] }
        );
    }

    #[test]
    fn test_letter_absent_from_rack() {
        let rack = Rack::parse("pe");
        assert_eq!(
            validate_word("pez", &rack, &dictionary()),
            ValidationResult::MissingLetters { missing: vec!['z'] }
        );
    }

    #[test]
    fn test_multiplicity_respected() {
        let rack = Rack::parse("osx");
        assert!(!is_valid("oso", &rack, &dictionary()));
        let rack = Rack::parse("oos");
        assert!(is_valid("oso", &rack, &dictionary()));
    }

    #[test]
    fn test_zero_count_key_is_missing() {
        let rack = Rack::parse("pez").deplete("z");
        assert!(!is_valid("pez", &rack, &dictionary()));
    }

    #[test]
    fn test_wildcard_as_vowel() {
        // p*z reads as "paz" or "pez"
        let rack = Rack::parse("*pz");
        assert!(is_valid("p*z", &rack, &dictionary()));
    }

    #[test]
    fn test_wildcard_adds_to_existing_vowel() {
        // c*sa -> casa needs two a's: one on the rack, one from the wildcard
        let rack = Rack::parse("*acs");
        assert!(is_valid("c*sa", &rack, &dictionary()));
    }

    #[test]
    fn test_wildcard_never_a_consonant() {
        // "sol" would need the wildcard to be an 'l'
        let rack = Rack::parse("*os");
        assert!(!is_valid("so*", &rack, &dictionary()));
    }

    #[test]
    fn test_wildcard_without_tile_on_rack() {
        let rack = Rack::parse("pz");
        assert_eq!(
            validate_word("p*z", &rack, &dictionary()),
            ValidationResult::MissingLetters { missing: vec!['*'] }
        );
    }

    #[test]
    fn test_spent_wildcard_cannot_be_reused() {
        let rack = Rack::parse("*pzpz").deplete("*");
        assert!(rack.has_key(WILDCARD));
        assert!(!is_valid("p*z", &rack, &dictionary()));
    }

    #[test]
    fn test_wildcard_word_alone() {
        let rack = Rack::parse("*");
        assert!(is_valid("*", &rack, &dictionary()));
    }

    #[test]
    fn test_two_wildcards_rejected() {
        let rack = Rack::parse("**");
        let dict = Dictionary::from_words(["oso", "aa"]);
        assert!(!is_valid("**", &rack, &dict));
        let rack = Rack::parse("**s");
        assert!(!is_valid("*s*", &rack, &dict));
    }

    #[test]
    fn test_wildcard_equivalent_to_some_vowel_substitution() {
        let dict = dictionary();
        let racks = ["*pz", "*csa", "*tos", "*ol", "*s", "tos", "*"];
        let words = ["p*z", "c*sa", "t*s", "*la", "os*", "*", "*os"];

        for rack_letters in racks {
            let rack = Rack::parse(rack_letters);
            for word in words {
                let has_wildcard = rack.count(WILDCARD) > 0;
                let expected = has_wildcard
                    && VOWELS.iter().any(|&v| {
                        let candidate = word.replacen(WILDCARD, &v.to_string(), 1);
                        validate_plain(&candidate, &rack.with_wildcard_as(WILDCARD, v), &dict)
                            .is_valid()
                    });
                assert_eq!(
                    is_valid(word, &rack, &dict),
                    expected,
                    "word {} on rack {}",
                    word,
                    rack_letters
                );
            }
        }
    }

    #[test]
    fn test_message_format() {
        assert_eq!(ValidationResult::Valid.message(), "Valid word!");
        assert_eq!(
            ValidationResult::NotInDictionary.message(),
            "Not in dictionary"
        );
        assert_eq!(
            ValidationResult::MissingLetters {
                missing: vec!['x', 'y']
            }
            .message(),
            "Missing letters: xy"
        );
    }
}
