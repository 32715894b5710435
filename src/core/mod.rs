//! # Core Module
//!
//! Shared types, configuration, and error handling for the debate engine.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod config;
pub mod error;
pub mod roster;
pub mod turn;

// Re-export commonly used items
pub use config::Config;
pub use error::{DebateError, DebateResult};
pub use roster::{AgentSpec, RosterConfig};
pub use turn::{Role, Turn, CONTINUATION_CUE, HUMAN_SPEAKER};
