pub mod config;
pub mod modules;
pub mod api;
pub mod utils;

#[cfg(test)]
mod _test_mock;

pub use config::{EngineConfig, PersonaCatalog, PersonaConfig, PersonaVariant};
pub use modules::cues::{analyze, CueAnalyzer, CueSignal, CueSignals};
pub use modules::moves::{select_move, MemoryHints, MoveSelector, MoveType, NextMove};
pub use modules::prompt::{compose, PromptComposer};
pub use modules::memory::{MemoryItem, MemoryKind, MemoryRecall, MemoryStore};
pub use api::{TurnError, TurnRequest, TurnResponse};
pub use api::services::TurnService;
