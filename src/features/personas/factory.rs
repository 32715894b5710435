//! # Persona Factory
//!
//! Turns a name and a trait description into an [`Agent`]: a fixed persona
//! instruction bound to a shared generation service handle.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::info;

use super::prompt_builder::PromptBuilder;
use crate::core::{Config, DebateError, DebateResult, RosterConfig, Turn, HUMAN_SPEAKER};
use crate::features::debate::normalizer::NamePrefix;
use crate::features::generation::{OpenAiGenerator, TextGenerator};

/// A personified participant.
///
/// The persona instruction is fixed at creation and is never part of a
/// history; the orchestrator prepends it to every request.
#[derive(Clone)]
pub struct Agent {
    name: String,
    model: String,
    persona: Turn,
    prefix: NamePrefix,
    generator: Arc<dyn TextGenerator>,
}

impl Agent {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn persona(&self) -> &Turn {
        &self.persona
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Strip this agent's self-announced name from raw output
    pub fn normalize(&self, raw: &str) -> String {
        self.prefix.strip(raw)
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Creates agents that share one generation service handle
pub struct PersonaFactory {
    generator: Arc<dyn TextGenerator>,
    model: String,
    max_paragraphs: i64,
    /// Lowercased names handed out so far
    taken: HashSet<String>,
}

impl PersonaFactory {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            max_paragraphs: 0,
            taken: HashSet::new(),
        }
    }

    /// Bind the OpenAI-compatible service described by `config`
    pub fn from_config(config: &Config) -> DebateResult<Self> {
        let generator = OpenAiGenerator::new(config)?;
        Ok(Self::new(Arc::new(generator), config.openai_model.clone())
            .with_max_paragraphs(config.max_paragraphs))
    }

    pub fn with_max_paragraphs(mut self, max: i64) -> Self {
        self.max_paragraphs = max;
        self
    }

    pub fn create_agent(&mut self, name: &str, traits: &str) -> DebateResult<Agent> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DebateError::config("agent name must not be empty"));
        }
        let key = name.to_lowercase();
        if key == HUMAN_SPEAKER.to_lowercase() {
            return Err(DebateError::config(format!(
                "agent name '{name}' is reserved for the human participant"
            )));
        }
        if self.taken.contains(&key) {
            return Err(DebateError::config(format!(
                "duplicate agent name '{name}' (names are case-insensitive)"
            )));
        }

        let instruction = PromptBuilder::new(name, traits)
            .with_max_paragraphs(Some(self.max_paragraphs))
            .build();
        let agent = Agent {
            name: name.to_string(),
            model: self.model.clone(),
            persona: Turn::instruction(instruction),
            prefix: NamePrefix::new(name)?,
            generator: Arc::clone(&self.generator),
        };

        self.taken.insert(key);
        info!("Created agent {} ({})", agent.name, agent.model);
        Ok(agent)
    }

    /// Create every agent in the roster, in roster order
    pub fn create_roster(&mut self, roster: &RosterConfig) -> DebateResult<Vec<Agent>> {
        roster
            .agents
            .iter()
            .map(|spec| self.create_agent(&spec.name, &spec.traits))
            .collect()
    }
}
