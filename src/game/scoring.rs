//! Word scoring
//!
//! A word's score is the sum of its letter values multiplied by a length
//! bonus that rewards using a large share of the letters held:
//!
//! ```text
//! bonus = max(1, 7 * L - 3 * (available - L))
//! ```
//!
//! where `L` is the word length and `available` is the rack size just before
//! the word is played. The wildcard is worth nothing but still counts
//! towards `L`.

use super::WILDCARD;

/// Points per letter.
const LETTER_POINTS: [(char, u32); 26] = [
    ('a', 1),
    ('b', 3),
    ('c', 3),
    ('d', 2),
    ('e', 1),
    ('f', 4),
    ('g', 2),
    ('h', 4),
    ('i', 1),
    ('j', 8),
    ('k', 5),
    ('l', 1),
    ('m', 3),
    ('n', 1),
    ('o', 1),
    ('p', 3),
    ('q', 10),
    ('r', 1),
    ('s', 1),
    ('t', 1),
    ('u', 1),
    ('v', 4),
    ('w', 4),
    ('x', 8),
    ('y', 4),
    ('z', 10),
];

/// Point value of a single letter. The wildcard and unknown symbols are
/// worth 0.
pub fn letter_value(letter: char) -> u32 {
    if letter == WILDCARD {
        return 0;
    }
    LETTER_POINTS
        .iter()
        .find(|(c, _)| *c == letter)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Sum of letter values of a word.
pub fn letter_points(word: &str) -> u32 {
    word.chars().map(letter_value).sum()
}

/// Length multiplier, never below 1.
pub fn length_bonus(word_len: usize, available: u32) -> u32 {
    let len = word_len as i64;
    let unused = available as i64 - len;
    (7 * len - 3 * unused).max(1) as u32
}

/// Score a word played from a rack that held `available` letters.
pub fn score_word(word: &str, available: u32) -> u32 {
    let word = word.to_lowercase();
    let points = letter_points(&word);
    let bonus = length_bonus(word.chars().count(), available);
    points * bonus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_values() {
        assert_eq!(letter_value('a'), 1);
        assert_eq!(letter_value('q'), 10);
        assert_eq!(letter_value('z'), 10);
        assert_eq!(letter_value(WILDCARD), 0);
        assert_eq!(letter_value('1'), 0);
    }

    #[test]
    fn test_table_covers_alphabet() {
        for letter in crate::game::alphabet() {
            assert!(letter_value(letter) > 0, "no value for {}", letter);
        }
    }

    #[test]
    fn test_pez_on_full_rack() {
        assert_eq!(letter_points("pez"), 14);
        assert_eq!(length_bonus(3, 7), 9);
        assert_eq!(score_word("pez", 7), 126);
    }

    #[test]
    fn test_minimum_bonus() {
        assert_eq!(length_bonus(1, 7), 1);
        assert_eq!(score_word("a", 7), 1);
        assert_eq!(score_word("q", 7), 10);
    }

    #[test]
    fn test_using_whole_rack() {
        // 7 letters out of 7: bonus 49
        assert_eq!(length_bonus(7, 7), 49);
        assert_eq!(score_word("abcdefg", 7), 16 * 49);
    }

    #[test]
    fn test_wildcard_scores_zero_but_counts_length() {
        assert_eq!(letter_points("p*z"), 13);
        assert_eq!(score_word("p*z", 3), 13 * 21);
    }

    #[test]
    fn test_all_wildcard_word_scores_zero() {
        assert_eq!(score_word("*", 1), 0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score_word("PEZ", 7), score_word("pez", 7));
    }
}
