use serde::{Deserialize, Serialize};

use super::store::{MemoryItem, MemoryKind, MemoryStore};
use crate::api::types::UserId;
use crate::modules::moves::MemoryHints;

pub const ADDRESS_AS_KEY: &str = "address_as";

/// What a turn knows about the user: rendered facts plus the two hints move
/// selection reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecall {
    pub facts: Vec<String>,
    pub redirect_hook: Option<String>,
    pub address_as: Option<String>,
}

impl MemoryRecall {
    /// `items` are expected ranked already; order is preserved.
    pub fn from_items(items: &[MemoryItem]) -> Self {
        let facts = items.iter().map(MemoryItem::render).collect();

        let redirect_hook = items
            .iter()
            .find(|item| item.kind == MemoryKind::Redirect)
            .map(|item| item.value.clone());

        let address_as = items
            .iter()
            .find(|item| item.kind == MemoryKind::Preference && item.key == ADDRESS_AS_KEY)
            .map(|item| item.value.clone());

        Self {
            facts,
            redirect_hook,
            address_as,
        }
    }

    pub fn load(user_id: &UserId, cap: usize) -> Result<Self, String> {
        let items = MemoryStore::top_weighted(user_id, cap)?;
        Ok(Self::from_items(&items))
    }

    pub fn hints(&self) -> MemoryHints {
        MemoryHints {
            address_as: self.address_as.clone(),
            redirect_hook: self.redirect_hook.clone(),
            humor_hook: None,
        }
    }
}
