//! # Turn Orchestrator
//!
//! Runs single agent turns and schedules rounds between agents.

use log::debug;
use tokio::time::{sleep, Duration};

use super::history::HistoryStore;
use crate::core::{DebateError, DebateResult, Turn};
use crate::features::generation::Generation;
use crate::features::personas::Agent;

/// Stands in for a response with no usable text
pub const NO_COMMENTS: &str = "[No Comments]";

/// Request sent for one turn: the persona instruction followed by the
/// agent's own history. Neither input is modified.
pub fn build_request(persona: &Turn, history: &[Turn]) -> Vec<Turn> {
    std::iter::once(persona)
        .chain(history)
        .cloned()
        .collect()
}

/// Schedules agent turns strictly one after another
#[derive(Debug, Clone, Default)]
pub struct TurnOrchestrator {
    turn_delay: Duration,
}

impl TurnOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause between consecutive turns within a round
    pub fn with_turn_delay(mut self, delay: Duration) -> Self {
        self.turn_delay = delay;
        self
    }

    /// Produce `agent`'s next utterance given the history it can see.
    ///
    /// Empty output becomes [`NO_COMMENTS`]. Service errors are returned as
    /// [`DebateError::GenerationFailed`] without retrying.
    pub async fn run_turn(&self, agent: &Agent, history: &[Turn]) -> DebateResult<Turn> {
        let request = build_request(agent.persona(), history);
        debug!(
            "{} responding ({} turns of context)",
            agent.name(),
            history.len()
        );

        let generation = agent
            .generator()
            .generate(agent.model(), &request)
            .await
            .map_err(|e| match e {
                DebateError::GenerationFailed { message, .. } => {
                    DebateError::generation(agent.name(), message)
                }
                other => other,
            })?;

        let text = match generation {
            Generation::Text(raw) => agent.normalize(&raw),
            Generation::NoContent => String::new(),
        };
        let text = if text.is_empty() {
            debug!("{} had nothing to say", agent.name());
            NO_COMMENTS.to_string()
        } else {
            text
        };

        Ok(Turn::agent_output(agent.name(), text))
    }

    /// One round: every agent speaks once, in order.
    ///
    /// Each utterance is appended to every other agent's history (never the
    /// speaker's own), handed to `emit`, and followed in those same histories
    /// by a continuation cue. With two agents each history grows by exactly
    /// two turns per round. The round stops at the first failure; turns
    /// already appended stay in place.
    pub async fn debate_round<F>(
        &self,
        agents: &[Agent],
        store: &mut HistoryStore,
        mut emit: F,
    ) -> DebateResult<Vec<Turn>>
    where
        F: FnMut(&Agent, &Turn) -> std::io::Result<()>,
    {
        if agents.len() != store.len() {
            return Err(DebateError::config(format!(
                "{} agents but {} histories",
                agents.len(),
                store.len()
            )));
        }

        let mut spoken = Vec::with_capacity(agents.len());
        for (index, agent) in agents.iter().enumerate() {
            if index > 0 && !self.turn_delay.is_zero() {
                sleep(self.turn_delay).await;
            }

            let history = store.get(index).map(|h| h.turns()).unwrap_or_default();
            let turn = self.run_turn(agent, history).await?;

            store.broadcast_except(index, &turn);
            emit(agent, &turn)?;
            store.broadcast_except(index, &Turn::continuation());
            spoken.push(turn);
        }
        Ok(spoken)
    }
}
