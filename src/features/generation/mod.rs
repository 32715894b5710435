//! # Feature: Text Generation
//!
//! The seam between the debate engine and whatever produces text. The engine
//! only sees [`TextGenerator`]; [`OpenAiGenerator`] talks to any
//! OpenAI-compatible chat completion endpoint.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod chat;
#[cfg(test)]
pub(crate) mod testing;

pub use chat::OpenAiGenerator;

use async_trait::async_trait;

use crate::core::{DebateResult, Turn};

/// Outcome of a successful generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    Text(String),
    /// The service answered but produced nothing usable
    NoContent,
}

impl Generation {
    /// Map an optional raw response, treating blank text as no content
    pub fn from_optional(text: Option<String>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => Self::Text(text),
            _ => Self::NoContent,
        }
    }
}

/// Produces the next utterance for an ordered sequence of turns.
///
/// The first turn of every request is the speaking agent's persona
/// instruction. Implementations report failures as
/// [`DebateError::GenerationFailed`](crate::core::DebateError::GenerationFailed).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, model: &str, turns: &[Turn]) -> DebateResult<Generation>;
}
