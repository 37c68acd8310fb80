//! Match configuration read from the environment.

use thiserror::Error;
use ur_core::BotDifficulty;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive integer, got {value:?}")]
    NotPositive { key: &'static str, value: String },

    #[error("{key} is not a valid number: {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key}: {source}")]
    InvalidBot {
        key: &'static str,
        #[source]
        source: ur_core::bot::ParseDifficultyError,
    },
}

/// Settings for a run of bot matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    /// Pieces per team
    pub start_pieces: u32,
    /// Matches to play
    pub games: u32,
    /// Seed for dice and bots, random if unset
    pub seed: Option<u64>,
    pub white: BotDifficulty,
    pub black: BotDifficulty,
    /// Turns after which a match is abandoned
    pub max_turns: u32,
    /// Print the final state of each match as JSON
    pub dump_state: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            start_pieces: 7,
            games: 1,
            seed: None,
            white: BotDifficulty::Easy,
            black: BotDifficulty::Easy,
            max_turns: 10_000,
            dump_state: false,
        }
    }
}

impl MatchConfig {
    /// Read `UR_*` variables from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let start_pieces = positive(&lookup, "UR_START_PIECES")?.unwrap_or(defaults.start_pieces);
        let games = positive(&lookup, "UR_GAMES")?.unwrap_or(defaults.games);
        let max_turns = positive(&lookup, "UR_MAX_TURNS")?.unwrap_or(defaults.max_turns);

        let seed = match lookup("UR_SEED") {
            Some(value) => {
                let parsed = value.trim().parse::<u64>();
                Some(parsed.map_err(|_| ConfigError::InvalidNumber {
                    key: "UR_SEED",
                    value,
                })?)
            }
            None => defaults.seed,
        };

        let white = bot(&lookup, "UR_WHITE_BOT")?.unwrap_or(defaults.white);
        let black = bot(&lookup, "UR_BLACK_BOT")?.unwrap_or(defaults.black);

        let dump_state = lookup("UR_DUMP_STATE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(defaults.dump_state);

        Ok(Self {
            start_pieces,
            games,
            seed,
            white,
            black,
            max_turns,
            dump_state,
        })
    }
}

fn positive<F>(lookup: &F, key: &'static str) -> Result<Option<u32>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::NotPositive { key, value }),
    }
}

fn bot<F>(lookup: &F, key: &'static str) -> Result<Option<BotDifficulty>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidBot { key, source })
        })
        .transpose()
}
