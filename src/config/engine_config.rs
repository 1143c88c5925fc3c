use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::persona::PersonaVariant;

pub const CONFIG_FILE: &str = "arbor_config.toml";
pub const DEFAULT_MEMORY_FACT_CAP: usize = 12;
pub const DEFAULT_FALLBACK_REPLY: &str = "I’m here. Say one sentence about what you want next.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaSettings {
    pub default_variant: PersonaVariant,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            default_variant: PersonaVariant::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySettings {
    pub fact_cap: usize,
}

impl MemorySettings {
    pub fn new(fact_cap: usize) -> Self {
        Self { fact_cap }
    }
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_FACT_CAP)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub fallback_reply: String,
    /// Forward the rendered move to the generator as an assistant draft.
    pub include_move_draft: bool,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            include_move_draft: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub persona: PersonaSettings,
    pub memory: MemorySettings,
    pub generation: GenerationSettings,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading engine config");
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise `arbor_config.toml` in the working
    /// directory if present, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.memory.fact_cap == 0 {
            return Err("memory.fact_cap must be at least 1".to_string());
        }

        if self.generation.fallback_reply.trim().is_empty() {
            return Err("generation.fallback_reply must not be empty".to_string());
        }

        Ok(())
    }
}
