//! Persona instruction construction
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Template-based persona instruction with paragraph limit

const PERSONA_TEMPLATE: &str = include_str!("../../../prompt/persona.md");

/// Builder for an agent's fixed persona instruction
///
/// # Example
///
/// ```ignore
/// let prompt = PromptBuilder::new("Mark", "A skeptical engineer.")
///     .with_max_paragraphs(Some(2))
///     .build();
/// ```
pub struct PromptBuilder {
    name: String,
    traits: String,
    max_paragraphs: Option<i64>,
}

impl PromptBuilder {
    pub fn new(name: &str, traits: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            traits: traits.trim().to_string(),
            max_paragraphs: None,
        }
    }

    /// Set maximum paragraphs for each response
    pub fn with_max_paragraphs(mut self, max: Option<i64>) -> Self {
        self.max_paragraphs = max;
        self
    }

    pub fn build(self) -> String {
        let prompt = PERSONA_TEMPLATE
            .replace("{name}", &self.name)
            .replace("{traits}", &self.traits);
        apply_paragraph_limit(prompt.trim_end(), self.max_paragraphs.unwrap_or(0))
    }
}

/// Apply paragraph limit to a persona instruction.
/// 0 = no limit (returns prompt unchanged)
pub fn apply_paragraph_limit(prompt: &str, max_paragraphs: i64) -> String {
    if max_paragraphs > 0 {
        format!(
            "{prompt}\n\nIMPORTANT: Limit your response to {max_paragraphs} paragraph(s) maximum."
        )
    } else {
        prompt.to_string()
    }
}
