//! # Agent Roster
//!
//! YAML description of who takes part in the conversation.
//!
//! ```yaml
//! agents:
//!   - name: Mark
//!     traits: a blunt, skeptical engineer
//!   - name: Julia
//!     traits: an upbeat, curious chef
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    pub agents: Vec<AgentSpec>,
}

/// One participant definition
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    /// Free-form personality description
    pub traits: String,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, traits: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            traits: traits.into(),
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            agents: vec![
                AgentSpec::new(
                    "Mark",
                    "A blunt, skeptical software engineer who distrusts hype and likes hard numbers.",
                ),
                AgentSpec::new(
                    "Julia",
                    "An upbeat, curious chef who loves bold flavours and unusual ideas.",
                ),
            ],
        }
    }
}

impl RosterConfig {
    /// Load a roster from a YAML file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read agent roster {path}"))?;
        let roster: RosterConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse agent roster {path}"))?;
        roster.validate()?;
        Ok(roster)
    }

    /// Name uniqueness is checked when agents are created
    pub fn validate(&self) -> Result<()> {
        if self.agents.len() < 2 {
            return Err(anyhow::anyhow!(
                "A debate needs at least two agents, roster has {}",
                self.agents.len()
            ));
        }
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Agent name must not be empty"));
            }
            if agent.traits.trim().is_empty() {
                return Err(anyhow::anyhow!("Agent {} has no traits", agent.name));
            }
        }
        Ok(())
    }
}
