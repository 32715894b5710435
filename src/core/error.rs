//! Error taxonomy for the debate engine.

use thiserror::Error;

/// Errors surfaced by the debate engine.
///
/// Only [`DebateError::GenerationFailed`] is recoverable: the current round is
/// abandoned and the session goes back to waiting for input. Everything else
/// ends the session.
#[derive(Error, Debug)]
pub enum DebateError {
    /// Missing or invalid settings, bad agent roster
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The text generation service could not be bound
    #[error("Generation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The text generation service failed while producing a turn
    #[error("Generation failed for {agent}: {message}")]
    GenerationFailed { agent: String, message: String },

    /// Reading from or writing to the console failed
    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),
}

impl DebateError {
    /// Creates a Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a GenerationFailed error
    pub fn generation(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GenerationFailed {
            agent: agent.into(),
            message: message.into(),
        }
    }

    /// Whether the session can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::GenerationFailed { .. })
    }
}

pub type DebateResult<T> = Result<T, DebateError>;
