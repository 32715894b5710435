//! Runtime configuration read from the environment
//!
//! `.env` is loaded by the binary before [`Config::from_env`] runs, so values
//! there behave exactly like exported variables.

use std::env;
use std::str::FromStr;

use super::error::{DebateError, DebateResult};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Automated rounds run after every human input
pub const DEFAULT_ROUNDS_PER_INPUT: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent keys are reported when the generation service is bound
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub log_level: String,
    pub rounds_per_input: usize,
    pub turn_delay_ms: u64,
    /// 0 = no limit
    pub max_paragraphs: i64,
    pub agents_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            openai_model: DEFAULT_MODEL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            rounds_per_input: DEFAULT_ROUNDS_PER_INPUT,
            turn_delay_ms: 0,
            max_paragraphs: 0,
            agents_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> DebateResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source
    pub fn from_lookup<F>(lookup: F) -> DebateResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            log_level: non_empty("LOG_LEVEL").unwrap_or(defaults.log_level),
            rounds_per_input: parse_var(&non_empty, "DEBATE_ROUNDS")?
                .unwrap_or(defaults.rounds_per_input),
            turn_delay_ms: parse_var(&non_empty, "DEBATE_TURN_DELAY_MS")?
                .unwrap_or(defaults.turn_delay_ms),
            max_paragraphs: parse_var(&non_empty, "DEBATE_MAX_PARAGRAPHS")?
                .unwrap_or(defaults.max_paragraphs),
            agents_path: non_empty("DEBATE_AGENTS_FILE"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DebateResult<()> {
        if self.rounds_per_input == 0 {
            return Err(DebateError::config("rounds per input must be at least 1"));
        }
        if self.max_paragraphs < 0 {
            return Err(DebateError::config("max paragraphs must not be negative"));
        }
        if self.openai_model.trim().is_empty() {
            return Err(DebateError::config("model identifier must not be empty"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> DebateResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| DebateError::config(format!("invalid {key} '{raw}': {e}")))
        })
        .transpose()
}
