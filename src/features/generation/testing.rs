//! In-memory generator for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Generation, TextGenerator};
use crate::core::{DebateError, DebateResult, Turn};

/// Replays queued results and records every request.
/// Once the queue is empty it answers `reply N` with a running counter.
#[derive(Default)]
pub struct ScriptedGenerator {
    queue: Mutex<VecDeque<DebateResult<Generation>>>,
    requests: Mutex<Vec<(String, Vec<Turn>)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(Generation::Text(text.to_string())));
    }

    pub fn push_empty(&self) {
        self.push(Ok(Generation::NoContent));
    }

    pub fn push_failure(&self, message: &str) {
        self.push(Err(DebateError::generation("service", message)));
    }

    fn push(&self, result: DebateResult<Generation>) {
        self.queue.lock().unwrap().push_back(result);
    }

    pub fn requests(&self) -> Vec<(String, Vec<Turn>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, model: &str, turns: &[Turn]) -> DebateResult<Generation> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((model.to_string(), turns.to_vec()));
            requests.len()
        };
        match self.queue.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(Generation::Text(format!("reply {call}"))),
        }
    }
}
