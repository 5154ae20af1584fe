//! Letter rack: the multiset of letters a player holds
//!
//! Racks are values. Every update returns a new rack and leaves the
//! original untouched, so the rack dealt at the start of a round can be
//! replayed later without any extra bookkeeping.

use std::collections::BTreeMap;
use std::fmt;

use super::{alphabet, LetterSource};
use crate::error::GameError;

/// Letter counts, keyed by letter (the wildcard included).
///
/// Keys whose count drops to zero are kept; a zero count means the letter
/// is absent. The key set matters for replacement, where a letter that was
/// on the rack can never be chosen as a replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    counts: BTreeMap<char, u32>,
}

impl Rack {
    /// Build a rack from individual letters. Letters are lower-cased.
    pub fn from_letters<I: IntoIterator<Item = char>>(letters: I) -> Self {
        let mut counts = BTreeMap::new();
        for letter in letters {
            for lower in letter.to_lowercase() {
                *counts.entry(lower).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Build a rack from a string of letters, e.g. `"*aepstz"`.
    pub fn parse(letters: &str) -> Self {
        Self::from_letters(letters.chars())
    }

    /// Total number of letters held, wildcard included.
    pub fn total_count(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Whether no letters remain.
    pub fn is_exhausted(&self) -> bool {
        self.total_count() == 0
    }

    /// How many of `letter` the rack holds.
    pub fn count(&self, letter: char) -> u32 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Whether `letter` is a key of the rack (even at count zero).
    pub fn has_key(&self, letter: char) -> bool {
        self.counts.contains_key(&letter)
    }

    /// Letter keys in alphabetical order, the wildcard first.
    pub fn keys(&self) -> impl Iterator<Item = char> + '_ {
        self.counts.keys().copied()
    }

    /// Letters expanded by count, sorted.
    pub fn letters(&self) -> Vec<char> {
        self.counts
            .iter()
            .flat_map(|(&letter, &count)| std::iter::repeat_n(letter, count as usize))
            .collect()
    }

    /// Remove one of each letter of `word` from the rack.
    ///
    /// Letters not on the rack, or already used up, are skipped, so this is
    /// safe to call with any string.
    pub fn deplete(&self, word: &str) -> Rack {
        let mut next = self.clone();
        for letter in word.to_lowercase().chars() {
            if let Some(count) = next.counts.get_mut(&letter) {
                if *count > 0 {
                    *count -= 1;
                }
            }
        }
        next
    }

    /// Swap every copy of `target` for a single new letter that is not
    /// currently a key of the rack, keeping the same count.
    ///
    /// The wildcard is a key, so it is never picked as a replacement.
    /// Fails with [`GameError::InvalidLetter`] if `target` is not a key, or
    /// if every letter of the alphabet is already on the rack.
    pub fn replace_letter<S: LetterSource + ?Sized>(
        &self,
        target: char,
        source: &mut S,
    ) -> Result<Rack, GameError> {
        let target = target.to_lowercase().next().unwrap_or(target);
        let count = *self
            .counts
            .get(&target)
            .ok_or(GameError::InvalidLetter { letter: target })?;

        let candidates = self.replacement_candidates();
        let replacement = source
            .pick(&candidates)
            .ok_or(GameError::InvalidLetter { letter: target })?;

        let mut next = self.clone();
        next.counts.remove(&target);
        next.counts.insert(replacement, count);
        Ok(next)
    }

    /// Letters a replacement may be drawn from: the alphabet minus every key.
    pub fn replacement_candidates(&self) -> Vec<char> {
        alphabet().filter(|letter| !self.has_key(*letter)).collect()
    }

    /// A copy where the wildcard has been spent on `vowel`.
    pub(crate) fn with_wildcard_as(&self, wildcard: char, vowel: char) -> Rack {
        let mut next = self.clone();
        next.counts.remove(&wildcard);
        *next.counts.entry(vowel).or_insert(0) += 1;
        next
    }
}

impl fmt::Display for Rack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: Vec<String> = self.letters().iter().map(|c| c.to_string()).collect();
        write!(f, "{}", letters.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{LetterPool, WILDCARD};

    #[test]
    fn test_counts() {
        let rack = Rack::parse("*aapqz");
        assert_eq!(rack.total_count(), 6);
        assert_eq!(rack.count('a'), 2);
        assert_eq!(rack.count(WILDCARD), 1);
        assert_eq!(rack.count('e'), 0);
        assert_eq!(rack.to_string(), "* a a p q z");
    }

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(Rack::parse("PEZ"), Rack::parse("pez"));
    }

    #[test]
    fn test_deplete_returns_new_rack() {
        let rack = Rack::parse("*aepz");
        let next = rack.deplete("pez");

        assert_eq!(rack.total_count(), 5);
        assert_eq!(next.total_count(), 2);
        assert_eq!(next.count('p'), 0);
        assert!(next.has_key('p'));
        assert_eq!(next.count('a'), 1);
    }

    #[test]
    fn test_deplete_skips_missing_letters() {
        let rack = Rack::parse("ab");
        let next = rack.deplete("aaxyz");
        assert_eq!(next.count('a'), 0);
        assert_eq!(next.count('b'), 1);
        assert_eq!(next.count('x'), 0);
        assert!(!next.has_key('x'));
    }

    #[test]
    fn test_deplete_consumes_wildcard() {
        let rack = Rack::parse("*ps");
        let next = rack.deplete("p*s");
        assert!(next.is_exhausted());
    }

    #[test]
    fn test_empty_rack() {
        let rack = Rack::default();
        assert!(rack.is_exhausted());
        assert_eq!(rack.deplete("abc"), rack);
    }

    #[test]
    fn test_replace_letter_keeps_count_and_excludes_keys() {
        let rack = Rack::parse("*aqqrt");
        let mut pool = LetterPool::seeded(11);

        for _ in 0..200 {
            let next = rack.replace_letter('q', &mut pool).unwrap();
            assert!(!next.has_key('q'));
            assert_eq!(next.total_count(), rack.total_count());

            let new_keys: Vec<char> = next.keys().filter(|k| !rack.has_key(*k)).collect();
            assert_eq!(new_keys.len(), 1);
            assert_eq!(next.count(new_keys[0]), 2);
            assert_ne!(new_keys[0], WILDCARD);
        }
    }

    #[test]
    fn test_replace_excludes_zero_count_keys() {
        let rack = Rack::parse("*abq").deplete("ab");
        let candidates = rack.replacement_candidates();
        assert!(!candidates.contains(&'a'));
        assert!(!candidates.contains(&'b'));
        assert!(!candidates.contains(&'q'));
        assert_eq!(candidates.len(), 23);
    }

    #[test]
    fn test_replace_missing_letter_fails() {
        let rack = Rack::parse("*abc");
        let mut pool = LetterPool::seeded(5);
        assert_eq!(
            rack.replace_letter('z', &mut pool),
            Err(GameError::InvalidLetter { letter: 'z' })
        );
        assert_eq!(rack, Rack::parse("*abc"));
    }

    #[test]
    fn test_replace_is_case_insensitive() {
        let rack = Rack::parse("*abc");
        let mut pool = LetterPool::seeded(5);
        let next = rack.replace_letter('B', &mut pool).unwrap();
        assert!(!next.has_key('b'));
    }

    #[test]
    fn test_replace_wildcard_is_allowed() {
        let rack = Rack::parse("*abc");
        let mut pool = LetterPool::seeded(9);
        let next = rack.replace_letter(WILDCARD, &mut pool).unwrap();
        assert!(!next.has_key(WILDCARD));
        assert_eq!(next.total_count(), 4);
    }

    #[test]
    fn test_replace_with_full_alphabet_fails() {
        let full: String = alphabet().collect();
        let rack = Rack::parse(&full);
        let mut pool = LetterPool::seeded(2);
        assert!(matches!(
            rack.replace_letter('a', &mut pool),
            Err(GameError::InvalidLetter { letter: 'a' })
        ));
    }

    #[test]
    fn test_with_wildcard_as() {
        let rack = Rack::parse("*ep");
        let spent = rack.with_wildcard_as(WILDCARD, 'e');
        assert!(!spent.has_key(WILDCARD));
        assert_eq!(spent.count('e'), 2);

        let spent = rack.with_wildcard_as(WILDCARD, 'u');
        assert_eq!(spent.count('u'), 1);
    }
}
