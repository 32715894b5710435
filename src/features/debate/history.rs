//! Per-agent conversation histories
//!
//! Each agent owns one append-only [`History`]. Only the orchestrator and the
//! session loop append to them; everyone else gets read access.

use crate::core::{Role, Turn};

/// Ordered turns visible to a single agent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }
}

/// One history per agent, indexed like the session's agent list
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    histories: Vec<History>,
}

impl HistoryStore {
    pub fn new(agent_count: usize) -> Self {
        Self {
            histories: vec![History::default(); agent_count],
        }
    }

    /// Number of agents tracked
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&History> {
        self.histories.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &History> {
        self.histories.iter()
    }

    /// Append to every history
    pub(crate) fn broadcast(&mut self, turn: &Turn) {
        for history in &mut self.histories {
            history.push(turn.clone());
        }
    }

    /// Append to every history except the speaker's own
    pub(crate) fn broadcast_except(&mut self, speaker: usize, turn: &Turn) {
        for (index, history) in self.histories.iter_mut().enumerate() {
            if index != speaker {
                history.push(turn.clone());
            }
        }
    }

    /// Append a continuation cue to every history whose last turn is human,
    /// so the next human line never lands directly after another one
    pub(crate) fn cue_after_human(&mut self) {
        for history in &mut self.histories {
            if history.last().map(Turn::role) == Some(Role::Human) {
                history.push(Turn::continuation());
            }
        }
    }
}
