//! # Personas Feature
//!
//! Builds personified agents from a name and a trait description.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release

pub mod factory;
pub mod prompt_builder;

pub use factory::{Agent, PersonaFactory};
pub use prompt_builder::{apply_paragraph_limit, PromptBuilder};
