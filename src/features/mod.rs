//! # Features
//!
//! - `personas`: agent creation from name and traits
//! - `generation`: text generation service seam
//! - `debate`: histories, normalization, turn orchestration
//! - `session`: interactive loop

pub mod debate;
pub mod generation;
pub mod personas;
pub mod session;

pub use debate::{normalize, History, HistoryStore, TurnOrchestrator, NO_COMMENTS};
pub use generation::{Generation, OpenAiGenerator, TextGenerator};
pub use personas::{Agent, PersonaFactory};
pub use session::{is_stop_word, Session, SessionSettings, SessionState, STOP_WORDS};
