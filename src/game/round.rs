//! A single round: words played against one dealt rack
//!
//! The round accepts words until the player sends the stop token or the
//! rack runs out. Valid words are scored against the rack size at the time
//! of play and then removed from the rack; invalid words change nothing.

use super::dictionary::normalize_word;
use super::scoring::score_word;
use super::validation::{validate_word, ValidationResult};
use super::{Dictionary, Rack};
use crate::error::GameError;

/// Default token that ends a round early.
pub const DEFAULT_STOP_TOKEN: &str = "!!";

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The player sent the stop token.
    Stopped,
    /// No letters were left.
    Exhausted,
}

/// A word that was accepted and scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredWord {
    pub word: String,
    pub points: u32,
}

/// A word that was turned down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedWord {
    pub word: String,
    pub reason: ValidationResult,
}

/// Outcome of a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    pub score: u32,
    pub plays: Vec<ScoredWord>,
    pub finish: FinishReason,
}

/// What happened after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// Word accepted. `finished` is set when it used the last letters.
    Scored {
        word: String,
        points: u32,
        total: u32,
        finished: bool,
    },
    /// Stop token received.
    Stopped { total: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingWord,
    Finished(FinishReason),
}

/// Round controller.
#[derive(Debug, Clone)]
pub struct Round {
    rack: Rack,
    stop_token: String,
    score: u32,
    plays: Vec<ScoredWord>,
    rejections: Vec<RejectedWord>,
    phase: Phase,
}

impl Round {
    /// Start a round on `rack`. An empty rack finishes immediately.
    pub fn new(rack: Rack, stop_token: impl Into<String>) -> Self {
        let phase = if rack.is_exhausted() {
            Phase::Finished(FinishReason::Exhausted)
        } else {
            Phase::AwaitingWord
        };
        Self {
            rack,
            stop_token: stop_token.into(),
            score: 0,
            plays: Vec::new(),
            rejections: Vec::new(),
            phase,
        }
    }

    /// Submit a word.
    ///
    /// Returns [`GameError::InvalidWord`] for a word that cannot be played;
    /// the round carries on. Returns [`GameError::RoundFinished`] once the
    /// round is over.
    pub fn submit(&mut self, input: &str, dictionary: &Dictionary) -> Result<RoundEvent, GameError> {
        if self.is_finished() {
            return Err(GameError::RoundFinished);
        }

        let input = input.trim();
        if input == self.stop_token {
            self.phase = Phase::Finished(FinishReason::Stopped);
            tracing::debug!(score = self.score, "round stopped by player");
            return Ok(RoundEvent::Stopped { total: self.score });
        }

        let word = normalize_word(input);
        let verdict = validate_word(&word, &self.rack, dictionary);
        if !verdict.is_valid() {
            tracing::debug!(%word, reason = %verdict.message(), "word rejected");
            self.rejections.push(RejectedWord {
                word: word.clone(),
                reason: verdict.clone(),
            });
            return Err(GameError::InvalidWord {
                word,
                reason: verdict,
            });
        }

        let points = score_word(&word, self.rack.total_count());
        self.score += points;
        self.rack = self.rack.deplete(&word);
        self.plays.push(ScoredWord {
            word: word.clone(),
            points,
        });

        let finished = self.rack.is_exhausted();
        if finished {
            self.phase = Phase::Finished(FinishReason::Exhausted);
        }
        tracing::debug!(%word, points, total = self.score, "word scored");

        Ok(RoundEvent::Scored {
            word,
            points,
            total: self.score,
            finished,
        })
    }

    /// Letters still held.
    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    /// Score so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn plays(&self) -> &[ScoredWord] {
        &self.plays
    }

    pub fn rejections(&self) -> &[RejectedWord] {
        &self.rejections
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// The result, once the round is over.
    pub fn result(&self) -> Option<RoundResult> {
        match self.phase {
            Phase::AwaitingWord => None,
            Phase::Finished(finish) => Some(RoundResult {
                score: self.score,
                plays: self.plays.clone(),
                finish,
            }),
        }
    }
}
