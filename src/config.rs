//! Runtime configuration from environment variables
//!
//! | Variable                     | Default            |
//! |------------------------------|--------------------|
//! | `ESCRABOL_ROUNDS`            | 3                  |
//! | `ESCRABOL_RACK_SIZE`         | 7                  |
//! | `ESCRABOL_DICTIONARY`        | data dir, embedded |
//! | `ESCRABOL_STOP_TOKEN`        | `!!`               |
//! | `ESCRABOL_REPLACE_ANY_ROUND` | false              |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;

use crate::error::{ConfigError, DictionaryError};
use crate::game::session::GameRules;
use crate::game::Dictionary;

/// Word list looked up in the data directory when no path is configured.
pub const DICTIONARY_FILE: &str = "palabras.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub rules: GameRules,
    /// Explicit word list path
    pub dictionary_path: Option<PathBuf>,
}

impl GameConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its
    /// value. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get("ESCRABOL_ROUNDS") {
            config.rules.rounds = parse_value("ESCRABOL_ROUNDS", &value)?;
        }
        if let Some(value) = get("ESCRABOL_RACK_SIZE") {
            let size: usize = parse_value("ESCRABOL_RACK_SIZE", &value)?;
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "ESCRABOL_RACK_SIZE",
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.rules.rack_size = size;
        }
        if let Some(value) = get("ESCRABOL_STOP_TOKEN") {
            config.rules.stop_token = value;
        }
        if let Some(value) = get("ESCRABOL_REPLACE_ANY_ROUND") {
            config.rules.replace_any_round = parse_flag("ESCRABOL_REPLACE_ANY_ROUND", &value)?;
        }
        config.dictionary_path = get("ESCRABOL_DICTIONARY").map(PathBuf::from);

        Ok(config)
    }

    /// Load the word list: the configured path, else `palabras.txt` in the
    /// data directory if present, else the embedded list.
    pub fn load_dictionary(&self) -> Result<Dictionary, DictionaryError> {
        if let Some(path) = &self.dictionary_path {
            return Dictionary::load(path);
        }

        if let Ok(dir) = data_dir() {
            let path = dir.join(DICTIONARY_FILE);
            if path.is_file() {
                return Dictionary::load(&path);
            }
        }

        tracing::info!("using embedded word list");
        Ok(Dictionary::embedded().clone())
    }
}

/// OS-standard data directory:
/// - Linux: `$XDG_DATA_HOME/escrabol/` or `~/.local/share/escrabol/`
/// - macOS: `~/Library/Application Support/escrabol/`
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "escrabol")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDirectory)
}

fn parse_value<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "si" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
