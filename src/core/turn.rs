//! Conversation turns
//!
//! A [`Turn`] is one immutable utterance. Fields are private so a turn cannot
//! change once it has been appended to a history.

/// Text of the synthetic cue that keeps agents talking between human inputs
pub const CONTINUATION_CUE: &str = "continue";

/// Label used for human turns when they are shown to agents
pub const HUMAN_SPEAKER: &str = "User";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Fixed persona instruction, only ever prepended to a request
    Instruction,
    /// Line typed by the human participant
    Human,
    /// Normalized output of an agent
    AgentOutput,
    /// Synthetic "keep going" prompt
    ContinuationCue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    /// Agent name for `AgentOutput` turns
    speaker: Option<String>,
    content: String,
}

impl Turn {
    pub fn instruction(content: impl Into<String>) -> Self {
        Self {
            role: Role::Instruction,
            speaker: None,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            speaker: None,
            content: content.into(),
        }
    }

    pub fn agent_output(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::AgentOutput,
            speaker: Some(speaker.into()),
            content: content.into(),
        }
    }

    pub fn continuation() -> Self {
        Self {
            role: Role::ContinuationCue,
            speaker: None,
            content: CONTINUATION_CUE.to_string(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Who said it, as other participants see it
    pub fn speaker(&self) -> Option<&str> {
        match self.role {
            Role::Human => Some(HUMAN_SPEAKER),
            Role::AgentOutput => self.speaker.as_deref(),
            Role::Instruction | Role::ContinuationCue => None,
        }
    }

    /// Content prefixed with the speaker label, e.g. `User: hello`.
    /// Unlabeled turns are returned as-is.
    pub fn labeled(&self) -> String {
        match self.speaker() {
            Some(speaker) => format!("{speaker}: {}", self.content),
            None => self.content.clone(),
        }
    }
}
