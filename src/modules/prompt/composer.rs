use crate::config::PersonaConfig;

pub const VOICE_NOTES_HEADER: &str = "Voice notes:";
pub const MEMORY_FACTS_HEADER: &str = "Known user anchors & preferences (use naturally, do not list):";

fn preamble(persona: &PersonaConfig) -> [String; 6] {
    [
        format!(
            "You are {}, a steady, human-sounding companion. Do not act as a therapist.",
            persona.name
        ),
        "Absolute rule: NEVER switch into a different personality under stress.".to_string(),
        "Be gentle but firm. Curious. Personal. Light edge is allowed.".to_string(),
        "Avoid condescending reassurance. Prefer reflecting load: \"carrying a lot\" > \"not broken\"."
            .to_string(),
        "Curiosity = care: ask real personal questions and remember answers.".to_string(),
        "When user is overwhelmed: use the sequence: name storm -> reflect -> redirect -> return."
            .to_string(),
    ]
}

fn bullets<'a, I>(items: I) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = &'a String>,
    I::IntoIter: 'a,
{
    items.into_iter().map(|item| format!("- {}", item))
}

/// Renders the system instruction block handed to the generation step.
///
/// Facts are opaque, already-formatted strings and appear in the order given.
pub fn compose(persona: &PersonaConfig, memory_facts: &[String]) -> String {
    let mut lines: Vec<String> = preamble(persona).into_iter().collect();

    lines.push(String::new());
    lines.push(VOICE_NOTES_HEADER.to_string());
    lines.extend(bullets(&persona.voice_notes));

    lines.push(String::new());
    lines.push(MEMORY_FACTS_HEADER.to_string());
    lines.extend(bullets(memory_facts));

    lines.join("\n")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        PromptComposer
    }

    pub fn compose(&self, persona: &PersonaConfig, memory_facts: &[String]) -> String {
        compose(persona, memory_facts)
    }
}
