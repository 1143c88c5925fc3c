use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use crate::api::types::UserId;

lazy_static! {
    static ref USER_MEMORIES: Mutex<HashMap<UserId, Vec<MemoryItem>>> = Mutex::new(HashMap::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Preference,
    Redirect,
    Humor,
    Anchor,
    Fact,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemoryKind::Preference => "preference",
            MemoryKind::Redirect => "redirect",
            MemoryKind::Humor => "humor",
            MemoryKind::Anchor => "anchor",
            MemoryKind::Fact => "fact",
        }
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub kind: MemoryKind,
    pub key: String,
    pub value: String,
    pub weight: f32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl MemoryItem {
    pub fn new(kind: MemoryKind, key: impl Into<String>, value: impl Into<String>, weight: f32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            key: key.into(),
            value: value.into(),
            weight,
            created_at: Utc::now(),
        }
    }

    /// `kind:key=value`, the shape the prompt composer receives.
    pub fn render(&self) -> String {
        format!("{}:{}={}", self.kind, self.key, self.value)
    }
}

fn validate_item(item: &MemoryItem) -> Result<(), String> {
    if !item.weight.is_finite() || item.weight < 0.0 {
        return Err(format!(
            "Memory item {} has invalid weight: {} (must be a finite value >= 0)",
            item.id, item.weight
        ));
    }
    Ok(())
}

pub struct MemoryStore;

impl MemoryStore {
    pub fn insert(user_id: &UserId, item: MemoryItem) -> Result<(), String> {
        if item.id.is_empty() {
            return Err("Memory item has empty ID".to_string());
        }
        validate_item(&item)?;

        let mut memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;
        let user_memory = memories.entry(user_id.clone()).or_insert_with(Vec::new);

        tracing::debug!(user_id = %user_id, kind = %item.kind, key = %item.key, "storing memory item");
        user_memory.push(item);

        Ok(())
    }

    pub fn get_all(user_id: &UserId) -> Result<Vec<MemoryItem>, String> {
        let memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(memories.get(user_id).cloned().unwrap_or_default())
    }

    /// Highest weight first; equal weights keep insertion order.
    pub fn top_weighted(user_id: &UserId, cap: usize) -> Result<Vec<MemoryItem>, String> {
        let mut items = Self::get_all(user_id)?;
        items.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        items.truncate(cap);
        Ok(items)
    }

    pub fn import(user_id: &UserId, items: Vec<MemoryItem>) -> Result<(), String> {
        for (index, item) in items.iter().enumerate() {
            if item.id.is_empty() {
                return Err(format!("Memory item at index {} has empty ID", index));
            }
            validate_item(item)?;
        }

        let mut memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;
        let user_memory = memories.entry(user_id.clone()).or_insert_with(Vec::new);

        user_memory.clear();
        user_memory.extend(items);

        Ok(())
    }

    pub fn clear(user_id: &UserId) -> Result<(), String> {
        let mut memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;

        if let Some(user_memory) = memories.get_mut(user_id) {
            user_memory.clear();
        }

        Ok(())
    }

    pub fn remove_user(user_id: &UserId) -> Result<(), String> {
        let mut memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;

        memories.remove(user_id);

        Ok(())
    }

    pub fn get_memory_count(user_id: &UserId) -> Result<usize, String> {
        let memories = USER_MEMORIES.lock().map_err(|_| "Failed to acquire lock")?;

        Ok(memories.get(user_id).map(|mem| mem.len()).unwrap_or(0))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self
    }
}
