use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type DialLevel = u8;

pub const MAX_DIAL_LEVEL: DialLevel = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaVariant {
    #[default]
    ArborMasc,
    ArborFem,
}

impl PersonaVariant {
    pub const ALL: [PersonaVariant; 2] = [PersonaVariant::ArborMasc, PersonaVariant::ArborFem];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaVariant::ArborMasc => "arbor_masc",
            PersonaVariant::ArborFem => "arbor_fem",
        }
    }

    /// Strict parse; `None` for anything outside the closed set.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.as_str() == key.trim())
    }

    /// Total parse: missing or unknown keys resolve to the default variant.
    pub fn from_key(key: Option<&str>) -> Self {
        key.and_then(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for PersonaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaConfig {
    pub name: String,
    pub addressing_default: String,
    pub humor_level: DialLevel,
    pub firmness_level: DialLevel,
    pub avoid_coddle: bool,
    pub voice_notes: Vec<String>,
}

impl PersonaConfig {
    pub fn new(name: impl Into<String>, addressing_default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            addressing_default: addressing_default.into(),
            humor_level: 0,
            firmness_level: 0,
            avoid_coddle: false,
            voice_notes: Vec::new(),
        }
    }

    pub fn with_dials(mut self, humor_level: DialLevel, firmness_level: DialLevel) -> Self {
        self.humor_level = humor_level;
        self.firmness_level = firmness_level;
        self
    }

    pub fn with_avoid_coddle(mut self, avoid_coddle: bool) -> Self {
        self.avoid_coddle = avoid_coddle;
        self
    }

    pub fn with_voice_notes<I, S>(mut self, notes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.voice_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Persona name must not be empty".to_string());
        }

        if self.addressing_default.trim().is_empty() {
            return Err(format!("Persona '{}' has an empty default address term", self.name));
        }

        let dials = [("humor_level", self.humor_level), ("firmness_level", self.firmness_level)];

        for (name, value) in dials {
            if value > MAX_DIAL_LEVEL {
                return Err(format!(
                    "Persona dial '{}' has value {}, but must be between 0 and {}",
                    name, value, MAX_DIAL_LEVEL
                ));
            }
        }

        Ok(())
    }
}

lazy_static! {
    static ref PERSONAS: HashMap<PersonaVariant, PersonaConfig> = {
        let mut personas = HashMap::new();

        personas.insert(
            PersonaVariant::ArborMasc,
            PersonaConfig::new("Arbor", "Firefly")
                .with_dials(2, 2)
                .with_avoid_coddle(true)
                .with_voice_notes([
                    "Stay familiar. No clinical tone. No sudden 'safety-bot' mode.",
                    "Gentle but firm. Direct. Human. Slight edge + wit.",
                    "Curiosity = care. Ask personal questions that fit the user.",
                    "Reflect load, not labels. Prefer 'carrying a lot' over 'not broken'.",
                    "Under stress: same voice, tighter boundaries. Not a different personality.",
                ]),
        );

        personas.insert(
            PersonaVariant::ArborFem,
            PersonaConfig::new("Arbor", "Firefly")
                .with_dials(2, 2)
                .with_avoid_coddle(true)
                .with_voice_notes([
                    "Same being. Slightly softer cadence, still firm.",
                    "Curious, validating, not coddling.",
                    "Use lightweight warmth; keep edge optional.",
                ]),
        );

        personas
    };
}

/// Static persona table. Every `PersonaVariant` has an entry, so lookups never miss.
pub struct PersonaCatalog;

impl PersonaCatalog {
    pub fn get(variant: PersonaVariant) -> &'static PersonaConfig {
        match PERSONAS.get(&variant) {
            Some(persona) => persona,
            None => &PERSONAS[&PersonaVariant::default()],
        }
    }

    pub fn lookup(key: Option<&str>) -> &'static PersonaConfig {
        Self::get(PersonaVariant::from_key(key))
    }

    pub fn default_persona() -> &'static PersonaConfig {
        Self::get(PersonaVariant::default())
    }

    pub fn variants() -> &'static [PersonaVariant] {
        &PersonaVariant::ALL
    }
}
