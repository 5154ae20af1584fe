//! Application state for one game in progress

use std::sync::Arc;

use crate::error::GameError;
use crate::game::round::{RejectedWord, RoundEvent, ScoredWord};
use crate::game::session::{Game, GamePhase, GameRules, GameState, RoundRecord};
use crate::game::{Dictionary, LetterPool, LetterSource, Rack};

/// How the feedback line should be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Good,
    Bad,
    Warning,
}

/// Feedback from the last input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

impl Feedback {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// What the player is being asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Letter to replace, or Enter to keep the rack
    Replace,
    /// A word, or the stop token
    Word,
    /// Replay the round? y/n
    Replay,
    /// Enter to deal the next round
    NextRound,
    /// Game finished
    Done,
}

/// Main application state for a game
pub struct App<S = LetterPool<rand::rngs::StdRng>> {
    game: Game<S>,
    dictionary: Arc<Dictionary>,
    /// Current user input
    pub input: String,
    /// Feedback from the last submission
    pub feedback: Option<Feedback>,
}

impl App {
    /// Start a game with an OS-seeded letter pool.
    pub fn new(rules: GameRules, dictionary: Arc<Dictionary>) -> Result<Self, GameError> {
        Self::with_source(rules, dictionary, LetterPool::from_os_rng())
    }
}

impl<S: LetterSource> App<S> {
    /// Start a game and deal the first round.
    pub fn with_source(
        rules: GameRules,
        dictionary: Arc<Dictionary>,
        source: S,
    ) -> Result<Self, GameError> {
        let game = Game::new(rules, source)?;
        let mut app = Self {
            game,
            dictionary,
            input: String::new(),
            feedback: None,
        };
        if !app.game.is_over() {
            app.deal()?;
        }
        Ok(app)
    }

    pub fn game_state(&self) -> GameState {
        self.game.state()
    }

    pub fn round_number(&self) -> u32 {
        self.game.round_number()
    }

    pub fn total_rounds(&self) -> u32 {
        self.game.rules().rounds
    }

    pub fn stop_token(&self) -> &str {
        &self.game.rules().stop_token
    }

    /// Letters currently shown to the player.
    pub fn rack(&self) -> Option<&Rack> {
        self.game.current_rack()
    }

    /// Score of the attempt in progress.
    pub fn round_score(&self) -> u32 {
        self.game.current_round().map(|r| r.score()).unwrap_or(0)
    }

    /// Words scored in the attempt in progress.
    pub fn played_words(&self) -> &[ScoredWord] {
        self.game.current_round().map(|r| r.plays()).unwrap_or(&[])
    }

    /// Words turned down in the attempt in progress.
    pub fn missed_words(&self) -> &[RejectedWord] {
        self.game
            .current_round()
            .map(|r| r.rejections())
            .unwrap_or(&[])
    }

    pub fn is_replaying(&self) -> bool {
        self.game.is_replaying()
    }

    pub fn history(&self) -> &[RoundRecord] {
        self.game.history()
    }

    pub fn last_round(&self) -> Option<&RoundRecord> {
        self.game.history().last()
    }

    /// Score of the first attempt while the replay is being offered or played.
    pub fn first_attempt_score(&self) -> Option<u32> {
        match self.game.phase() {
            GamePhase::ReplayOffer { first, .. } => Some(first.score),
            GamePhase::Playing {
                first: Some(first), ..
            } => Some(first.score),
            _ => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game.is_over()
    }

    pub fn prompt(&self) -> Prompt {
        match self.game.phase() {
            GamePhase::Dealt { .. } => Prompt::Replace,
            GamePhase::Playing { .. } => Prompt::Word,
            GamePhase::ReplayOffer { .. } => Prompt::Replay,
            GamePhase::Between => Prompt::NextRound,
            GamePhase::GameOver => Prompt::Done,
        }
    }

    /// Handle character input
    pub fn on_char(&mut self, c: char) {
        if self.is_game_over() {
            return;
        }
        self.input.push(c);
    }

    /// Handle backspace
    pub fn on_backspace(&mut self) {
        self.input.pop();
    }

    /// Handle Enter: dispatch the input according to the current prompt
    pub fn on_submit(&mut self) {
        let input = std::mem::take(&mut self.input);
        let input = input.trim();

        let outcome = match self.prompt() {
            Prompt::Replace => self.submit_replacement(input),
            Prompt::Word => self.submit_word(input),
            Prompt::Replay => self.submit_replay_choice(input),
            Prompt::NextRound => self.deal(),
            Prompt::Done => Ok(()),
        };

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "input failed");
            self.feedback = Some(Feedback::new(err.to_string(), Tone::Bad));
        }
    }

    /// Deal the next round, skipping the replace prompt when it is not on offer.
    fn deal(&mut self) -> Result<(), GameError> {
        self.game.begin_round()?;
        if !self.game.offers_replace() {
            self.game.start_playing()?;
        }
        Ok(())
    }

    fn submit_replacement(&mut self, input: &str) -> Result<(), GameError> {
        if let Some(letter) = input.chars().next() {
            match self.game.replace_letter(letter) {
                Ok(rack) => {
                    self.feedback = Some(Feedback::new(
                        format!("Replaced '{}': {}", letter, rack),
                        Tone::Good,
                    ));
                }
                Err(err @ GameError::InvalidLetter { .. }) => {
                    self.feedback = Some(Feedback::new(
                        format!("{} - try again or press Enter to keep", err),
                        Tone::Warning,
                    ));
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        } else {
            self.feedback = None;
        }
        self.game.start_playing()
    }

    fn submit_word(&mut self, input: &str) -> Result<(), GameError> {
        if input.is_empty() {
            return Ok(());
        }

        match self.game.submit(input, &self.dictionary) {
            Ok(RoundEvent::Scored {
                word,
                points,
                finished,
                ..
            }) => {
                let text = if finished {
                    format!("OK +{} ({}) - no letters left!", points, word.to_uppercase())
                } else {
                    format!("OK +{} ({})", points, word.to_uppercase())
                };
                self.feedback = Some(Feedback::new(text, Tone::Good));
            }
            Ok(RoundEvent::Stopped { total }) => {
                self.feedback = Some(Feedback::new(
                    format!("Round stopped with {} points", total),
                    Tone::Neutral,
                ));
            }
            Err(GameError::InvalidWord { word, reason }) => {
                self.feedback = Some(Feedback::new(
                    format!("NOPE: {} ({})", word.to_uppercase(), reason.message()),
                    Tone::Bad,
                ));
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    fn submit_replay_choice(&mut self, input: &str) -> Result<(), GameError> {
        if is_yes(input) {
            self.game.replay()?;
            self.feedback = Some(Feedback::new("Replaying the round", Tone::Neutral));
        } else {
            self.game.decline_replay()?;
            self.feedback = None;
        }
        Ok(())
    }
}

/// Whether an answer means yes ("si" for the Spanish-speaking original).
pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    )
}
