//! # Debate Feature
//!
//! Persona-scoped histories, response normalization, and the round driver
//! that lets agents talk to each other between human inputs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod history;
pub mod normalizer;
pub mod orchestrator;

pub use history::{History, HistoryStore};
pub use normalizer::{normalize, NamePrefix};
pub use orchestrator::{build_request, TurnOrchestrator, NO_COMMENTS};
