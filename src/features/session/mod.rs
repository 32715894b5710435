//! # Session Feature
//!
//! Interactive loop: read a human line, let the agents debate for a fixed
//! number of rounds, repeat until a stop word or end of input.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

use std::collections::HashSet;
use std::io::Write;

use log::{error, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Duration;

use crate::core::{Config, DebateError, DebateResult, Turn};
use crate::features::debate::{History, HistoryStore, TurnOrchestrator};
use crate::features::personas::Agent;

/// Inputs that end the session (case-insensitive)
pub const STOP_WORDS: [&str; 5] = ["exit", "quit", "stop", "bye", "cya"];

const PROMPT: &str = "You: ";

pub fn is_stop_word(input: &str) -> bool {
    let input = input.trim();
    STOP_WORDS.iter().any(|word| word.eq_ignore_ascii_case(input))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Automated rounds after each human input
    pub rounds_per_input: usize,
    pub turn_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            rounds_per_input: crate::core::config::DEFAULT_ROUNDS_PER_INPUT,
            turn_delay: Duration::ZERO,
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            rounds_per_input: config.rounds_per_input,
            turn_delay: Duration::from_millis(config.turn_delay_ms),
        }
    }
}

/// Active agents, their histories, and the loop state
pub struct Session {
    agents: Vec<Agent>,
    store: HistoryStore,
    orchestrator: TurnOrchestrator,
    rounds_per_input: usize,
    state: SessionState,
}

impl Session {
    pub fn new(agents: Vec<Agent>, settings: SessionSettings) -> DebateResult<Self> {
        if agents.len() < 2 {
            return Err(DebateError::config(format!(
                "a debate needs at least two agents, got {}",
                agents.len()
            )));
        }
        if settings.rounds_per_input == 0 {
            return Err(DebateError::config("rounds per input must be at least 1"));
        }
        let mut seen = HashSet::new();
        for agent in &agents {
            if !seen.insert(agent.name().to_lowercase()) {
                return Err(DebateError::config(format!(
                    "duplicate agent name '{}'",
                    agent.name()
                )));
            }
        }

        let store = HistoryStore::new(agents.len());
        Ok(Self {
            agents,
            store,
            orchestrator: TurnOrchestrator::new().with_turn_delay(settings.turn_delay),
            rounds_per_input: settings.rounds_per_input,
            state: SessionState::AwaitingInput,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn histories(&self) -> &HistoryStore {
        &self.store
    }

    /// History of the agent with this name (case-insensitive)
    pub fn history_of(&self, name: &str) -> Option<&History> {
        let name = name.trim().to_lowercase();
        self.agents
            .iter()
            .position(|agent| agent.name().to_lowercase() == name)
            .and_then(|index| self.store.get(index))
    }

    /// Process one line of human input.
    ///
    /// A generation failure abandons the remaining rounds for this input and
    /// is reported on `out`; the session stays alive.
    pub async fn handle_input<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> DebateResult<SessionState> {
        if self.state == SessionState::Terminated {
            return Ok(self.state);
        }

        let line = line.trim();
        if is_stop_word(line) {
            info!("Stop word received, ending session");
            self.state = SessionState::Terminated;
            return Ok(self.state);
        }
        if line.is_empty() {
            return Ok(self.state);
        }

        self.store.broadcast(&Turn::human(line));

        for round in 1..=self.rounds_per_input {
            let result = self
                .orchestrator
                .debate_round(&self.agents, &mut self.store, |agent, turn| {
                    writeln!(out, "[{}]: {}", agent.name(), turn.content())
                })
                .await;

            match result {
                Ok(_) => {}
                Err(e) if e.is_recoverable() => {
                    error!("Round {round}/{} failed: {e}", self.rounds_per_input);
                    writeln!(out, "[error]: {e}")?;
                    self.store.cue_after_human();
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(self.state)
    }

    /// Drive the session until a stop word or end of input
    pub async fn run<R, W>(&mut self, mut input: R, mut out: W) -> DebateResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let names: Vec<&str> = self.agents.iter().map(|a| a.name()).collect();
        info!("Session started with {}", names.join(", "));

        while self.state == SessionState::AwaitingInput {
            write!(out, "{PROMPT}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line).await? == 0 {
                warn!("Input closed, ending session");
                writeln!(out)?;
                self.state = SessionState::Terminated;
                break;
            }
            self.handle_input(&line, &mut out).await?;
            out.flush()?;
        }

        info!("Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use crate::features::generation::testing::ScriptedGenerator;
    use crate::features::personas::PersonaFactory;
    use std::sync::Arc;

    fn session(generator: &Arc<ScriptedGenerator>, rounds: usize) -> Session {
        let mut factory = PersonaFactory::new(generator.clone(), "test-model");
        let agents = vec![
            factory.create_agent("Mark", "Skeptical.").unwrap(),
            factory.create_agent("Julia", "Cheerful.").unwrap(),
        ];
        Session::new(
            agents,
            SessionSettings {
                rounds_per_input: rounds,
                ..SessionSettings::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_stop_words_case_insensitive() {
        for word in ["exit", "QUIT", "Bye", "cya", "  stop  ", "Exit\n"] {
            assert!(is_stop_word(word), "{word:?} should stop");
        }
        for word in ["quitter", "good bye", "", "continue"] {
            assert!(!is_stop_word(word), "{word:?} should not stop");
        }
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            rounds_per_input: 5,
            turn_delay_ms: 250,
            ..Config::default()
        };
        let settings = SessionSettings::from(&config);
        assert_eq!(settings.rounds_per_input, 5);
        assert_eq!(settings.turn_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_new_requires_two_agents() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut factory = PersonaFactory::new(generator, "m");
        let solo = vec![factory.create_agent("Solo", "x").unwrap()];
        assert!(matches!(
            Session::new(solo, SessionSettings::default()),
            Err(DebateError::Configuration(_))
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_agents() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut first = PersonaFactory::new(generator.clone(), "m");
        let mut second = PersonaFactory::new(generator, "m");
        let agents = vec![
            first.create_agent("Mark", "x").unwrap(),
            second.create_agent("mark", "y").unwrap(),
        ];
        assert!(matches!(
            Session::new(agents, SessionSettings::default()),
            Err(DebateError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_input_runs_configured_rounds() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        let state = session
            .handle_input("Let's discuss pizza toppings", &mut out)
            .await
            .unwrap();

        assert_eq!(state, SessionState::AwaitingInput);
        assert_eq!(generator.call_count(), 6);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().count(), 6);
        assert!(printed.starts_with("[Mark]: reply 1\n[Julia]: reply 2\n"));

        // human turn + 3 rounds * (heard + cue)
        for name in ["Mark", "Julia"] {
            let history = session.history_of(name).unwrap();
            assert_eq!(history.len(), 7);
            assert_eq!(history.turns()[0], Turn::human("Let's discuss pizza toppings"));
        }
    }

    #[tokio::test]
    async fn test_human_turn_reaches_every_agent_first() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 1);
        let mut out = Vec::new();
        session.handle_input("hello both", &mut out).await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests[0].1[1], Turn::human("hello both"));
        assert_eq!(requests[1].1[1], Turn::human("hello both"));
    }

    #[tokio::test]
    async fn test_stop_word_makes_no_calls() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        let state = session.handle_input("QUIT", &mut out).await.unwrap();
        assert_eq!(state, SessionState::Terminated);
        assert_eq!(generator.call_count(), 0);

        // Terminated is final
        let state = session.handle_input("hello?", &mut out).await.unwrap();
        assert_eq!(state, SessionState::Terminated);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        session.handle_input("   \n", &mut out).await.unwrap();
        assert_eq!(generator.call_count(), 0);
        assert!(session.histories().iter().all(History::is_empty));
    }

    #[tokio::test]
    async fn test_generation_failure_abandons_round_only() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_text("first");
        generator.push_failure("503 from upstream");
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        let state = session.handle_input("go", &mut out).await.unwrap();
        assert_eq!(state, SessionState::AwaitingInput);
        assert_eq!(generator.call_count(), 2);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[Mark]: first"));
        assert!(printed.contains("[error]: Generation failed for Julia: 503 from upstream"));

        // Next input works again
        let mut out = Vec::new();
        session.handle_input("again", &mut out).await.unwrap();
        assert_eq!(generator.call_count(), 8);
    }

    #[tokio::test]
    async fn test_empty_reply_does_not_skip_round() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_empty();
        let mut session = session(&generator, 1);
        let mut out = Vec::new();

        session.handle_input("anyone?", &mut out).await.unwrap();
        assert_eq!(generator.call_count(), 2);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("[Mark]: [No Comments]\n"));
    }

    #[tokio::test]
    async fn test_run_until_stop_word() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 3);
        let input: &[u8] = b"Let's discuss pizza toppings\nquit\nnever read\n";
        let mut out = Vec::new();

        session.run(input, &mut out).await.unwrap();

        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(generator.call_count(), 6);
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.matches(PROMPT).count(), 2);
        let utterances = printed.lines().filter(|l| l.contains("]: reply")).count();
        assert_eq!(utterances, 6);
    }

    #[tokio::test]
    async fn test_run_ends_on_eof() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 1);
        let input: &[u8] = b"hi";

        session.run(input, Vec::new()).await.unwrap();
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(generator.call_count(), 2);
    }

    fn assert_no_consecutive_human_turns(session: &Session) {
        for history in session.histories().iter() {
            for pair in history.turns().windows(2) {
                assert!(
                    !(pair[0].role() == Role::Human && pair[1].role() == Role::Human),
                    "two consecutive human turns in {:?}",
                    history.turns()
                );
            }
        }
    }

    #[tokio::test]
    async fn test_first_speaker_failure_keeps_human_turns_apart() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_failure("timeout");
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        session.handle_input("first", &mut out).await.unwrap();
        session.handle_input("second", &mut out).await.unwrap();

        assert_no_consecutive_human_turns(&session);
        // Mark's second request: persona, first, cue, second
        let requests = generator.requests();
        let roles: Vec<Role> = requests[1].1.iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![Role::Instruction, Role::Human, Role::ContinuationCue, Role::Human]
        );
    }

    #[tokio::test]
    async fn test_second_speaker_failure_keeps_human_turns_apart() {
        let generator = Arc::new(ScriptedGenerator::new());
        generator.push_text("Mark goes first");
        generator.push_failure("503");
        let mut session = session(&generator, 3);
        let mut out = Vec::new();

        session.handle_input("first", &mut out).await.unwrap();
        let mark = session.history_of("Mark").unwrap();
        assert_eq!(mark.last(), Some(&Turn::continuation()));
        // Julia already heard Mark, nothing to add
        assert_eq!(session.history_of("Julia").unwrap().len(), 3);

        session.handle_input("second", &mut out).await.unwrap();
        assert_no_consecutive_human_turns(&session);
    }

    #[test]
    fn test_history_lookup_unicode_case() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut factory = PersonaFactory::new(generator, "m");
        let agents = vec![
            factory.create_agent("émile", "x").unwrap(),
            factory.create_agent("Zoë", "y").unwrap(),
        ];
        let session = Session::new(agents, SessionSettings::default()).unwrap();
        assert!(session.history_of("ÉMILE").is_some());
        assert!(session.history_of("zoë").is_some());
        assert!(session.history_of("emile").is_none());
    }

    #[tokio::test]
    async fn test_no_consecutive_human_turns() {
        let generator = Arc::new(ScriptedGenerator::new());
        let mut session = session(&generator, 3);
        let mut out = Vec::new();
        session.handle_input("one", &mut out).await.unwrap();
        session.handle_input("two", &mut out).await.unwrap();

        for history in session.histories().iter() {
            let turns = history.turns();
            for pair in turns.windows(2) {
                assert!(!(pair[0].role() == Role::Human && pair[1].role() == Role::Human));
            }
        }
    }
}
