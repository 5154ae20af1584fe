//! Error types shared across the game engine and front-ends

use std::path::PathBuf;

use thiserror::Error;

use crate::game::session::Privilege;
use crate::game::validation::ValidationResult;

/// Errors raised by the rule engine.
///
/// None of these are fatal: each one is local to a single submission,
/// a single privilege exercise or a call made in the wrong phase, and
/// leaves the rack and game state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("\"{word}\" is not a valid word: {}", reason.message())]
    InvalidWord {
        word: String,
        reason: ValidationResult,
    },
    #[error("letter '{letter}' is not on the rack")]
    InvalidLetter { letter: char },
    #[error("the round has already finished")]
    RoundFinished,
    #[error("the {0} privilege is not available")]
    PrivilegeUnavailable(Privilege),
    #[error("that action is not allowed right now ({0})")]
    UnexpectedPhase(&'static str),
    #[error("the game is over")]
    GameOver,
    #[error("rack size must be at least 1, got {0}")]
    InvalidRackSize(usize),
}

/// Errors raised while loading a word list.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {0} contains no words")]
    Empty(PathBuf),
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("could not determine data directory")]
    NoDataDirectory,
}

/// Anything that stops the program before or during a game.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Game(#[from] GameError),
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
