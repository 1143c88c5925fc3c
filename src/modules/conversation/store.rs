use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::api::types::UserId;

struct Conversation {
    owner: UserId,
    messages: Vec<StoredMessage>,
}

lazy_static! {
    static ref CONVERSATIONS: Mutex<HashMap<Uuid, Conversation>> = Mutex::new(HashMap::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

pub struct ConversationStore;

impl ConversationStore {
    /// Creates the conversation if missing and records `user_id` as its owner.
    ///
    /// This is an upsert: an existing conversation is reassigned to `user_id`
    /// and keeps its messages. Callers that need ownership checks must compare
    /// [`ConversationStore::owner`] before calling this.
    pub fn ensure_conversation(conversation_id: &Uuid, user_id: &UserId) -> Result<(), String> {
        let mut conversations = CONVERSATIONS.lock().map_err(|_| "Failed to acquire lock")?;

        conversations
            .entry(*conversation_id)
            .and_modify(|conversation| conversation.owner = user_id.clone())
            .or_insert_with(|| Conversation {
                owner: user_id.clone(),
                messages: Vec::new(),
            });

        Ok(())
    }

    pub fn append(conversation_id: &Uuid, role: MessageRole, content: &str) -> Result<StoredMessage, String> {
        let mut conversations = CONVERSATIONS.lock().map_err(|_| "Failed to acquire lock")?;

        let conversation = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| format!("Conversation '{}' not found", conversation_id))?;

        let message = StoredMessage {
            id: Uuid::new_v4().to_string(),
            conversation_id: *conversation_id,
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        conversation.messages.push(message.clone());

        tracing::debug!(conversation_id = %conversation_id, role = ?role, "appended message");
        Ok(message)
    }

    pub fn messages(conversation_id: &Uuid) -> Result<Vec<StoredMessage>, String> {
        let conversations = CONVERSATIONS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(conversations
            .get(conversation_id)
            .map(|conversation| conversation.messages.clone())
            .unwrap_or_default())
    }

    pub fn owner(conversation_id: &Uuid) -> Result<Option<UserId>, String> {
        let conversations = CONVERSATIONS.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(conversations.get(conversation_id).map(|conversation| conversation.owner.clone()))
    }

    pub fn remove(conversation_id: &Uuid) -> Result<(), String> {
        let mut conversations = CONVERSATIONS.lock().map_err(|_| "Failed to acquire lock")?;

        conversations.remove(conversation_id);

        Ok(())
    }
}
