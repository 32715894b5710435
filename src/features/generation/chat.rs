//! OpenAI-compatible chat completion backend

use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};
use openai::Credentials;

use super::{Generation, TextGenerator};
use crate::core::{Config, DebateError, DebateResult, Role, Turn};

/// Generator bound to one set of credentials.
///
/// Credentials travel with every request instead of living in process-wide
/// environment variables, so several generators can coexist.
#[derive(Clone)]
pub struct OpenAiGenerator {
    credentials: Credentials,
}

impl OpenAiGenerator {
    /// Bind to the service described by `config`.
    ///
    /// Fails with [`DebateError::ServiceUnavailable`] when no API key is set.
    pub fn new(config: &Config) -> DebateResult<Self> {
        let api_key = config.openai_api_key.clone().ok_or_else(|| {
            DebateError::ServiceUnavailable(
                "OPENAI_API_KEY is not set (add it to the environment or a .env file)".into(),
            )
        })?;
        // Routes are appended directly to the base URL
        let base_url = if config.openai_base_url.ends_with('/') {
            config.openai_base_url.clone()
        } else {
            format!("{}/", config.openai_base_url)
        };
        debug!("Binding generation service at {base_url}");
        Ok(Self {
            credentials: Credentials::new(api_key, base_url),
        })
    }
}

/// Convert a turn into the chat wire format
fn to_message(turn: &Turn) -> ChatCompletionMessage {
    let role = match turn.role() {
        Role::Instruction => ChatCompletionMessageRole::System,
        Role::Human | Role::AgentOutput | Role::ContinuationCue => ChatCompletionMessageRole::User,
    };
    ChatCompletionMessage {
        role,
        content: Some(turn.labeled()),
        name: None,
        function_call: None,
        tool_call_id: None,
        tool_calls: None,
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, model: &str, turns: &[Turn]) -> DebateResult<Generation> {
        let messages: Vec<ChatCompletionMessage> = turns.iter().map(to_message).collect();

        let chat_completion = ChatCompletion::builder(model, messages)
            .credentials(self.credentials.clone())
            .create()
            .await
            .map_err(|e| DebateError::generation(model, format!("OpenAI API error: {e}")))?;

        if let Some(usage) = &chat_completion.usage {
            debug!(
                "{model} usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(Generation::from_optional(
            chat_completion
                .choices
                .first()
                .and_then(|c| c.message.content.clone()),
        ))
    }
}
