use crate::api::types::UserId;
use crate::modules::memory::store::{MemoryItem, MemoryKind};

pub struct MemoryTestHelpers;

impl MemoryTestHelpers {
    /// Stores are process-wide, so every test works under its own user.
    pub fn test_user_id() -> UserId {
        format!("test-user-{}", uuid::Uuid::new_v4())
    }

    /// `count` plain facts keyed `item-0..`, weight rising with the index.
    pub fn weighted_items(count: usize) -> Vec<MemoryItem> {
        (0..count)
            .map(|i| MemoryItem::new(MemoryKind::Fact, format!("item-{}", i), format!("value-{}", i), (i + 1) as f32))
            .collect()
    }

    pub fn sample_profile_items() -> Vec<MemoryItem> {
        vec![
            MemoryItem::new(MemoryKind::Preference, "address_as", "Cap", 5.0),
            MemoryItem::new(MemoryKind::Redirect, "escape", "painting", 4.0),
            MemoryItem::new(MemoryKind::Anchor, "kid", "Mia, 7", 3.0),
            MemoryItem::new(MemoryKind::Humor, "style", "dry", 1.0),
        ]
    }
}
