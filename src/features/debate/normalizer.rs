//! Response normalization
//!
//! Agents are told not to announce themselves, but models still open with
//! `Mark: ...` now and then. The orchestrator strips that prefix before the
//! text reaches anyone else's history.

use log::warn;
use regex::Regex;

use crate::core::{DebateError, DebateResult};

/// Case-insensitive matcher for an agent's own `<name>:` prefix
#[derive(Debug, Clone)]
pub struct NamePrefix {
    pattern: Regex,
}

impl NamePrefix {
    pub fn new(agent_name: &str) -> DebateResult<Self> {
        // Repeated prefixes ("Mark: Mark: hi") are removed together so that
        // normalizing is idempotent.
        let source = format!(r"(?i)^(?:{}:\s*)+", regex::escape(agent_name.trim()));
        let pattern = Regex::new(&source).map_err(|e| {
            DebateError::config(format!("cannot build name matcher for '{agent_name}': {e}"))
        })?;
        Ok(Self { pattern })
    }

    /// Trim `raw` and drop a leading self-announcement
    pub fn strip(&self, raw: &str) -> String {
        let text = raw.trim();
        match self.pattern.find(text) {
            Some(m) => text[m.end()..].trim().to_string(),
            None => text.to_string(),
        }
    }
}

/// Strip `agent_name`'s own prefix from `raw_text`.
///
/// Other speakers' names and mentions of the agent's name later in the text
/// are left alone.
pub fn normalize(agent_name: &str, raw_text: &str) -> String {
    strip_or_trim(NamePrefix::new(agent_name), agent_name, raw_text)
}

fn strip_or_trim(prefix: DebateResult<NamePrefix>, agent_name: &str, raw_text: &str) -> String {
    match prefix {
        Ok(prefix) => prefix.strip(raw_text),
        Err(e) => {
            warn!("Leaving output of {agent_name} unstripped: {e}");
            raw_text.trim().to_string()
        }
    }
}
