// Core layer - shared types, configuration, errors
pub mod core;

// Features layer - personas, generation, debate, session
pub mod features;

pub use self::core::{Config, DebateError, DebateResult, RosterConfig, Turn};

pub use features::{
    // Debate
    normalize, History, HistoryStore, TurnOrchestrator, NO_COMMENTS,
    // Generation
    Generation, OpenAiGenerator, TextGenerator,
    // Personas
    Agent, PersonaFactory,
    // Session
    is_stop_word, Session, SessionSettings, SessionState, STOP_WORDS,
};
