pub mod engine_config;
pub mod persona;

pub use engine_config::{
    ConfigError, EngineConfig, GenerationSettings, MemorySettings, PersonaSettings,
    DEFAULT_FALLBACK_REPLY, DEFAULT_MEMORY_FACT_CAP,
};
pub use persona::{DialLevel, PersonaCatalog, PersonaConfig, PersonaVariant, MAX_DIAL_LEVEL};
