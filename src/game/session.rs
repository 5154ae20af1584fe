//! A full game: several rounds plus the two single-use privileges
//!
//! Each game grants one letter replacement and one round replay, both for
//! the whole game rather than per round. Replaying restarts the round from
//! the rack it was dealt (after any replacement) and the better of the two
//! scores counts.
//!
//! [`Game`] is a phase machine so that an interactive front-end can feed it
//! one input at a time; [`Game::run`] drives it to the end from a
//! [`Player`] instead.

use std::fmt;

use super::round::{Round, RoundEvent, RoundResult, DEFAULT_STOP_TOKEN};
use super::{Dictionary, LetterSource, Rack, DEFAULT_RACK_SIZE};
use crate::error::GameError;

/// The two single-use rights a player holds for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Privilege {
    Replace,
    Replay,
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privilege::Replace => write!(f, "replace"),
            Privilege::Replay => write!(f, "replay"),
        }
    }
}

/// Game-wide counters and privilege flags.
///
/// Transitions return a new value: privileges only ever go from available
/// to used, and the total only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub rounds_remaining: u32,
    pub replace_available: bool,
    pub replay_available: bool,
    pub total_score: u32,
}

impl GameState {
    pub fn new(rounds: u32) -> Self {
        Self {
            rounds_remaining: rounds,
            replace_available: true,
            replay_available: true,
            total_score: 0,
        }
    }

    pub fn is_available(&self, privilege: Privilege) -> bool {
        match privilege {
            Privilege::Replace => self.replace_available,
            Privilege::Replay => self.replay_available,
        }
    }

    /// Mark a privilege as used. Fails if it already was.
    pub fn consume(self, privilege: Privilege) -> Result<Self, GameError> {
        if !self.is_available(privilege) {
            return Err(GameError::PrivilegeUnavailable(privilege));
        }
        let mut next = self;
        match privilege {
            Privilege::Replace => next.replace_available = false,
            Privilege::Replay => next.replay_available = false,
        }
        Ok(next)
    }

    /// Close a round, adding its contribution to the total.
    pub fn settle_round(self, contribution: u32) -> Self {
        Self {
            rounds_remaining: self.rounds_remaining.saturating_sub(1),
            total_score: self.total_score + contribution,
            ..self
        }
    }

    pub fn is_over(&self) -> bool {
        self.rounds_remaining == 0
    }
}

/// Rules fixed for the length of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    pub rounds: u32,
    pub rack_size: usize,
    pub stop_token: String,
    /// Offer the replace privilege at the start of every round while unused,
    /// instead of before the first round only.
    pub replace_any_round: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            rounds: 3,
            rack_size: DEFAULT_RACK_SIZE,
            stop_token: DEFAULT_STOP_TOKEN.to_string(),
            replace_any_round: false,
        }
    }
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based round number
    pub number: u32,
    /// Rack the round was played from (after any replacement)
    pub rack: Rack,
    pub first: RoundResult,
    pub replay: Option<RoundResult>,
    /// Score counted towards the game total
    pub contribution: u32,
}

/// Where the game is.
#[derive(Debug, Clone)]
pub enum GamePhase {
    /// Waiting for the next round to be dealt.
    Between,
    /// Rack dealt; the replace privilege may be exercised before play.
    Dealt { rack: Rack },
    /// Words are being played. `first` holds the first attempt while
    /// replaying.
    Playing {
        round: Round,
        rack: Rack,
        first: Option<RoundResult>,
    },
    /// First attempt done and the replay privilege is still unused.
    ReplayOffer { rack: Rack, first: RoundResult },
    GameOver,
}

/// Decisions a player makes over a game, used by [`Game::run`].
pub trait Player {
    /// Letter to replace on a freshly dealt rack, or `None` to keep it.
    fn choose_replacement(&mut self, rack: &Rack) -> Option<char>;

    /// Next word to play. `None` ends the round as if the stop token was sent.
    fn next_word(&mut self, rack: &Rack, score: u32) -> Option<String>;

    /// Whether to replay a round that scored `first`.
    fn wants_replay(&mut self, first: &RoundResult) -> bool;

    fn on_replaced(&mut self, _rack: &Rack) {}

    fn on_replace_failed(&mut self, _error: &GameError) {}

    fn on_word(&mut self, _outcome: &Result<RoundEvent, GameError>) {}

    fn on_round_complete(&mut self, _record: &RoundRecord) {}
}

/// Game controller.
pub struct Game<S> {
    rules: GameRules,
    source: S,
    state: GameState,
    phase: GamePhase,
    round_number: u32,
    history: Vec<RoundRecord>,
}

impl<S: LetterSource> Game<S> {
    /// Set up a game. Nothing is dealt until [`Game::begin_round`].
    pub fn new(rules: GameRules, source: S) -> Result<Self, GameError> {
        if rules.rack_size == 0 {
            return Err(GameError::InvalidRackSize(rules.rack_size));
        }
        let state = GameState::new(rules.rounds);
        let phase = if state.is_over() {
            GamePhase::GameOver
        } else {
            GamePhase::Between
        };
        Ok(Self {
            rules,
            source,
            state,
            phase,
            round_number: 0,
            history: Vec::new(),
        })
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// Current round number, 1-based; 0 before the first deal.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    /// The letters the player is looking at right now.
    pub fn current_rack(&self) -> Option<&Rack> {
        match &self.phase {
            GamePhase::Dealt { rack } => Some(rack),
            GamePhase::Playing { round, .. } => Some(round.rack()),
            GamePhase::ReplayOffer { rack, .. } => Some(rack),
            GamePhase::Between | GamePhase::GameOver => None,
        }
    }

    pub fn current_round(&self) -> Option<&Round> {
        match &self.phase {
            GamePhase::Playing { round, .. } => Some(round),
            _ => None,
        }
    }

    /// Whether the current phase is a replay attempt.
    pub fn is_replaying(&self) -> bool {
        matches!(self.phase, GamePhase::Playing { first: Some(_), .. })
    }

    /// Whether the replace privilege can be exercised now.
    pub fn offers_replace(&self) -> bool {
        matches!(self.phase, GamePhase::Dealt { .. })
            && self.state.replace_available
            && (self.rules.replace_any_round || self.round_number == 1)
    }

    /// Deal the next round's rack.
    pub fn begin_round(&mut self) -> Result<&Rack, GameError> {
        match self.phase {
            GamePhase::Between => {}
            GamePhase::GameOver => return Err(GameError::GameOver),
            _ => return Err(GameError::UnexpectedPhase("a round is already in progress")),
        }

        self.round_number += 1;
        let rack = self.source.deal(self.rules.rack_size);
        tracing::info!(round = self.round_number, %rack, "round dealt");
        self.phase = GamePhase::Dealt { rack };
        self.current_rack().ok_or(GameError::UnexpectedPhase("no rack has been dealt"))
    }

    /// Exercise the replace privilege on the dealt rack.
    ///
    /// On [`GameError::InvalidLetter`] the rack is unchanged and the
    /// privilege stays available for another attempt.
    pub fn replace_letter(&mut self, letter: char) -> Result<&Rack, GameError> {
        let GamePhase::Dealt { rack } = &self.phase else {
            return Err(GameError::UnexpectedPhase("letters can only be replaced before play"));
        };
        if !self.offers_replace() {
            return Err(GameError::PrivilegeUnavailable(Privilege::Replace));
        }

        let replaced = rack.replace_letter(letter, &mut self.source)?;
        self.state = self.state.consume(Privilege::Replace)?;
        tracing::info!(%letter, rack = %replaced, "letter replaced");
        self.phase = GamePhase::Dealt { rack: replaced };
        self.current_rack().ok_or(GameError::UnexpectedPhase("no rack has been dealt"))
    }

    /// Start playing the dealt rack.
    pub fn start_playing(&mut self) -> Result<(), GameError> {
        match std::mem::replace(&mut self.phase, GamePhase::Between) {
            GamePhase::Dealt { rack } => {
                self.phase = GamePhase::Playing {
                    round: Round::new(rack.clone(), self.rules.stop_token.clone()),
                    rack,
                    first: None,
                };
                self.after_submission();
                Ok(())
            }
            other => {
                self.phase = other;
                Err(GameError::UnexpectedPhase("no rack has been dealt"))
            }
        }
    }

    /// Submit a word to the round in progress.
    pub fn submit(&mut self, word: &str, dictionary: &Dictionary) -> Result<RoundEvent, GameError> {
        let GamePhase::Playing { round, .. } = &mut self.phase else {
            return Err(GameError::UnexpectedPhase("no round is being played"));
        };
        let event = round.submit(word, dictionary)?;
        self.after_submission();
        Ok(event)
    }

    /// Use the replay privilege on the round just played.
    pub fn replay(&mut self) -> Result<(), GameError> {
        match std::mem::replace(&mut self.phase, GamePhase::Between) {
            GamePhase::ReplayOffer { rack, first } => match self.state.consume(Privilege::Replay) {
                Ok(state) => {
                    self.state = state;
                    tracing::info!(round = self.round_number, first = first.score, "replaying round");
                    self.phase = GamePhase::Playing {
                        round: Round::new(rack.clone(), self.rules.stop_token.clone()),
                        rack,
                        first: Some(first),
                    };
                    self.after_submission();
                    Ok(())
                }
                Err(err) => {
                    self.phase = GamePhase::ReplayOffer { rack, first };
                    Err(err)
                }
            },
            other => {
                self.phase = other;
                Err(GameError::UnexpectedPhase("there is no round to replay"))
            }
        }
    }

    /// Keep the first attempt and move on.
    pub fn decline_replay(&mut self) -> Result<(), GameError> {
        match std::mem::replace(&mut self.phase, GamePhase::Between) {
            GamePhase::ReplayOffer { rack, first } => {
                self.settle(rack, first, None);
                Ok(())
            }
            other => {
                self.phase = other;
                Err(GameError::UnexpectedPhase("there is no round to replay"))
            }
        }
    }

    /// Move a finished round on to the replay offer or to settlement.
    fn after_submission(&mut self) {
        let result = match &self.phase {
            GamePhase::Playing { round, .. } => round.result(),
            _ => None,
        };
        let Some(result) = result else {
            return;
        };

        let GamePhase::Playing { rack, first, .. } =
            std::mem::replace(&mut self.phase, GamePhase::Between)
        else {
            return;
        };

        match first {
            Some(first) => self.settle(rack, first, Some(result)),
            None if self.state.replay_available => {
                self.phase = GamePhase::ReplayOffer {
                    rack,
                    first: result,
                };
            }
            None => self.settle(rack, result, None),
        }
    }

    fn settle(&mut self, rack: Rack, first: RoundResult, replay: Option<RoundResult>) {
        let contribution = match &replay {
            Some(replay) => first.score.max(replay.score),
            None => first.score,
        };
        self.state = self.state.settle_round(contribution);
        tracing::info!(
            round = self.round_number,
            contribution,
            total = self.state.total_score,
            "round complete"
        );

        self.history.push(RoundRecord {
            number: self.round_number,
            rack,
            first,
            replay,
            contribution,
        });
        self.phase = if self.state.is_over() {
            GamePhase::GameOver
        } else {
            GamePhase::Between
        };
    }

    /// Play the rest of the game with decisions from `player`.
    /// Returns the final total.
    pub fn run<P: Player + ?Sized>(
        &mut self,
        player: &mut P,
        dictionary: &Dictionary,
    ) -> Result<u32, GameError> {
        loop {
            let settled = self.history.len();
            match &self.phase {
                GamePhase::GameOver => return Ok(self.state.total_score),
                GamePhase::Between => {
                    self.begin_round()?;
                }
                GamePhase::Dealt { rack } => {
                    if self.offers_replace() {
                        if let Some(letter) = player.choose_replacement(rack) {
                            match self.replace_letter(letter) {
                                Ok(rack) => player.on_replaced(rack),
                                Err(err) => {
                                    tracing::warn!(%letter, error = %err, "replacement failed");
                                    player.on_replace_failed(&err);
                                }
                            }
                        }
                    }
                    self.start_playing()?;
                }
                GamePhase::Playing { round, .. } => {
                    let word = player
                        .next_word(round.rack(), round.score())
                        .unwrap_or_else(|| self.rules.stop_token.clone());
                    let outcome = self.submit(&word, dictionary);
                    player.on_word(&outcome);
                    match outcome {
                        Ok(_) | Err(GameError::InvalidWord { .. }) => {}
                        Err(err) => return Err(err),
                    }
                }
                GamePhase::ReplayOffer { first, .. } => {
                    if player.wants_replay(first) {
                        self.replay()?;
                    } else {
                        self.decline_replay()?;
                    }
                }
            }

            if self.history.len() > settled {
                if let Some(record) = self.history.last() {
                    player.on_round_complete(record);
                }
            }
        }
    }
}
