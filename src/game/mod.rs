#![allow(dead_code)]
//! Game logic: letter racks, word validation, scoring, rounds and games

pub mod dictionary;
pub mod rack;
pub mod round;
pub mod scoring;
pub mod session;
pub mod validation;

use rand::prelude::*;

pub use dictionary::Dictionary;
pub use rack::Rack;

/// The rack tile that stands in for any vowel.
pub const WILDCARD: char = '*';

/// Vowels, in the order the wildcard tries them.
pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Consonants dealt alongside the vowels.
pub const CONSONANTS: [char; 21] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w',
    'x', 'y', 'z',
];

/// Rack size used when nothing else is configured.
pub const DEFAULT_RACK_SIZE: usize = 7;

/// Every letter a rack can hold besides the wildcard: vowels then consonants.
pub fn alphabet() -> impl Iterator<Item = char> {
    VOWELS.into_iter().chain(CONSONANTS)
}

/// Number of vowels dealt in a rack of `size` letters.
///
/// A third of the rack, rounded up, goes to vowels; the wildcard takes
/// one of those slots.
pub fn vowel_share(size: usize) -> usize {
    size.div_ceil(3).saturating_sub(1)
}

/// Source of fresh racks and replacement letters.
///
/// This is the only place the engine draws randomness from; everything else
/// is deterministic given the racks and letters it hands out.
pub trait LetterSource {
    /// Deal a rack of `size` letters.
    fn deal(&mut self, size: usize) -> Rack;

    /// Pick one of `candidates`, or `None` if there are none.
    fn pick(&mut self, candidates: &[char]) -> Option<char>;
}

/// Deals racks at random from the fixed vowel and consonant alphabets.
#[derive(Debug)]
pub struct LetterPool<R> {
    rng: R,
}

impl LetterPool<StdRng> {
    /// A pool backed by an OS-seeded generator.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// A pool with a fixed seed (for testing/replays).
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> LetterPool<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> LetterSource for LetterPool<R> {
    /// Deal a rack of `size` letters: one wildcard, `vowel_share(size)`
    /// vowels and consonants for the rest, each drawn uniformly with
    /// replacement.
    fn deal(&mut self, size: usize) -> Rack {
        if size == 0 {
            return Rack::default();
        }
        let vowels = vowel_share(size);
        let consonants = size.saturating_sub(1 + vowels);

        let mut letters = Vec::with_capacity(size);
        letters.push(WILDCARD);
        for _ in 0..vowels {
            letters.push(*VOWELS.choose(&mut self.rng).unwrap_or(&VOWELS[0]));
        }
        for _ in 0..consonants {
            letters.push(*CONSONANTS.choose(&mut self.rng).unwrap_or(&CONSONANTS[0]));
        }

        Rack::from_letters(letters)
    }

    /// Uniform pick among `candidates`.
    fn pick(&mut self, candidates: &[char]) -> Option<char> {
        candidates.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_share() {
        assert_eq!(vowel_share(1), 0);
        assert_eq!(vowel_share(3), 0);
        assert_eq!(vowel_share(4), 1);
        assert_eq!(vowel_share(7), 2);
        assert_eq!(vowel_share(9), 2);
        assert_eq!(vowel_share(10), 3);
    }

    #[test]
    fn test_deal_shape() {
        let mut pool = LetterPool::seeded(7);
        for size in 1..=12 {
            for _ in 0..50 {
                let rack = pool.deal(size);
                let vowels: u32 = VOWELS.iter().map(|&v| rack.count(v)).sum();
                let consonants: u32 = CONSONANTS.iter().map(|&c| rack.count(c)).sum();

                assert_eq!(rack.total_count(), size as u32);
                assert_eq!(rack.count(WILDCARD), 1);
                assert_eq!(vowels as usize, vowel_share(size));
                assert_eq!(consonants as usize, size - 1 - vowels as usize);
            }
        }
    }

    #[test]
    fn test_default_rack_has_two_vowels() {
        let mut pool = LetterPool::seeded(1);
        for _ in 0..100 {
            let rack = pool.deal(DEFAULT_RACK_SIZE);
            let vowels: u32 = VOWELS.iter().map(|&v| rack.count(v)).sum();
            assert_eq!(vowels, 2, "rack {} should have 2 vowels", rack);
        }
    }

    #[test]
    fn test_seeded_deal_is_deterministic() {
        let rack1 = LetterPool::seeded(42).deal(DEFAULT_RACK_SIZE);
        let rack2 = LetterPool::seeded(42).deal(DEFAULT_RACK_SIZE);
        assert_eq!(rack1, rack2);
    }

    #[test]
    fn test_pick_from_empty() {
        let mut pool = LetterPool::seeded(3);
        assert_eq!(pool.pick(&[]), None);
        assert_eq!(pool.pick(&['q']), Some('q'));
    }

    #[test]
    fn test_alphabet_has_26_letters() {
        let letters: Vec<char> = alphabet().collect();
        assert_eq!(letters.len(), 26);
        assert!(!letters.contains(&WILDCARD));
        assert!(letters.iter().all(|c| c.is_ascii_lowercase()));
    }
}
