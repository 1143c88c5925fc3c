use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::api::services::identity_service::BearerTokenResolver;
use crate::api::services::turn_service::TurnService;
use crate::api::types::ApiResult;
use crate::config::{EngineConfig, PersonaCatalog};
use crate::modules::cues::{analyze, CueSignals};
use crate::modules::moves::{select_move, MemoryHints, NextMove};

pub struct SharedEngine {
    pub service: TurnService,
    pub identity: BearerTokenResolver,
}

pub static SHARED_ENGINE: OnceLock<SharedEngine> = OnceLock::new();

pub fn initialize_shared_engine(config: EngineConfig) -> Result<(), *mut ApiResult> {
    let identity = BearerTokenResolver::new();
    let service = TurnService::in_memory(config, identity.clone());

    SHARED_ENGINE
        .set(SharedEngine { service, identity })
        .map_err(|_| ApiResult::error("Turn engine already initialized".to_string()).boxed())?;

    tracing::info!("turn engine initialized");
    Ok(())
}

pub fn shared_engine() -> Result<&'static SharedEngine, *mut ApiResult> {
    SHARED_ENGINE.get().ok_or_else(|| {
        ApiResult::error("Turn engine not initialized. Call initialize_turn_engine first.".to_string()).boxed()
    })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovePreviewRequest {
    pub persona: Option<String>,
    pub text: String,
    pub memory: MemoryHints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePreview {
    pub cues: CueSignals,
    pub next_move: NextMove,
}

/// Cue analysis plus move selection, without touching any store.
pub fn preview_move(request: &MovePreviewRequest) -> MovePreview {
    let persona = PersonaCatalog::lookup(request.persona.as_deref());
    let cues = analyze(&request.text);
    let next_move = select_move(persona, &cues, &request.memory);

    MovePreview { cues, next_move }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize response: {}", e))
}
