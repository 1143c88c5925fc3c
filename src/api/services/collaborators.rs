//! Seams between a chat turn and the systems around it.
//!
//! The in-memory stores in [`crate::modules`] implement every trait here
//! except [`TextGenerator`]; hosts plug in their own datastore or model
//! client by implementing the same traits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::TurnError;
use crate::api::types::UserId;
use crate::modules::billing::{GateDecision, SubscriptionLedger};
use crate::modules::conversation::{ConversationStore, MessageRole};
use crate::modules::memory::{MemoryRecall, MemoryStore};
use crate::modules::profile::ProfileStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMessage {
    pub role: MessageRole,
    pub content: String,
}

impl GenerationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

pub trait IdentityResolver: Send + Sync {
    /// Maps the raw `Authorization` header value to a stable user id.
    fn resolve(&self, authorization: Option<&str>) -> Result<UserId, TurnError>;
}

pub trait ProfileReader: Send + Sync {
    fn persona_variant(&self, user_id: &UserId) -> Result<Option<String>, TurnError>;
}

pub trait MemoryReader: Send + Sync {
    fn recall(&self, user_id: &UserId, cap: usize) -> Result<MemoryRecall, TurnError>;
}

pub trait MessageWriter: Send + Sync {
    fn ensure_conversation(&self, conversation_id: &Uuid, user_id: &UserId) -> Result<(), TurnError>;

    fn append(&self, conversation_id: &Uuid, role: MessageRole, content: &str) -> Result<(), TurnError>;
}

pub trait SubscriptionGate: Send + Sync {
    fn check(&self, user_id: &UserId) -> Result<GateDecision, TurnError>;

    fn record_turn(&self, user_id: &UserId) -> Result<(), TurnError>;
}

pub trait TextGenerator: Send + Sync {
    /// May return an empty string; the caller substitutes its fallback reply.
    fn generate(&self, system_prompt: &str, history: &[GenerationMessage]) -> Result<String, TurnError>;
}

impl ProfileReader for ProfileStore {
    fn persona_variant(&self, user_id: &UserId) -> Result<Option<String>, TurnError> {
        ProfileStore::persona_variant(user_id).map_err(TurnError::Storage)
    }
}

impl MemoryReader for MemoryStore {
    fn recall(&self, user_id: &UserId, cap: usize) -> Result<MemoryRecall, TurnError> {
        MemoryRecall::load(user_id, cap).map_err(TurnError::Storage)
    }
}

impl MessageWriter for ConversationStore {
    fn ensure_conversation(&self, conversation_id: &Uuid, user_id: &UserId) -> Result<(), TurnError> {
        ConversationStore::ensure_conversation(conversation_id, user_id).map_err(TurnError::Storage)
    }

    fn append(&self, conversation_id: &Uuid, role: MessageRole, content: &str) -> Result<(), TurnError> {
        ConversationStore::append(conversation_id, role, content)
            .map(|_| ())
            .map_err(TurnError::Storage)
    }
}

impl SubscriptionGate for SubscriptionLedger {
    fn check(&self, user_id: &UserId) -> Result<GateDecision, TurnError> {
        SubscriptionLedger::check(user_id).map_err(TurnError::Storage)
    }

    fn record_turn(&self, user_id: &UserId) -> Result<(), TurnError> {
        SubscriptionLedger::record_turn(user_id)
            .map(|_| ())
            .map_err(TurnError::Storage)
    }
}
