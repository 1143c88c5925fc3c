use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::types::UserId;

lazy_static! {
    static ref PERSONA_VARIANTS: Mutex<HashMap<UserId, String>> = Mutex::new(HashMap::new());
}

/// Per-user profile settings. Variant keys are stored untyped, as a profile
/// row would hold them; resolution happens in the persona catalog.
pub struct ProfileStore;

impl ProfileStore {
    pub fn set_persona_variant(user_id: &UserId, key: impl Into<String>) -> Result<(), String> {
        let mut profiles = PERSONA_VARIANTS.lock().map_err(|_| "Failed to acquire lock")?;
        profiles.insert(user_id.clone(), key.into());
        Ok(())
    }

    pub fn persona_variant(user_id: &UserId) -> Result<Option<String>, String> {
        let profiles = PERSONA_VARIANTS.lock().map_err(|_| "Failed to acquire lock")?;
        Ok(profiles.get(user_id).cloned())
    }
}
