use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::api::error::TurnError;
use crate::api::services::collaborators::IdentityResolver;
use crate::api::types::UserId;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves `Bearer <token>` headers against a registry of issued tokens.
/// Clones share the registry.
#[derive(Clone, Default)]
pub struct BearerTokenResolver {
    tokens: Arc<Mutex<HashMap<String, UserId>>>,
}

impl BearerTokenResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, token: impl Into<String>, user_id: impl Into<UserId>) -> Result<(), String> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err("Token must not be empty".to_string());
        }

        let mut tokens = self.tokens.lock().map_err(|_| "Failed to acquire lock")?;
        tokens.insert(token, user_id.into());
        Ok(())
    }

    pub fn revoke(&self, token: &str) -> Result<(), String> {
        let mut tokens = self.tokens.lock().map_err(|_| "Failed to acquire lock")?;
        tokens.remove(token);
        Ok(())
    }
}

pub fn bearer_token(authorization: &str) -> Option<&str> {
    authorization
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl IdentityResolver for BearerTokenResolver {
    fn resolve(&self, authorization: Option<&str>) -> Result<UserId, TurnError> {
        let token = authorization.and_then(bearer_token).ok_or(TurnError::Unauthorized)?;

        let tokens = self
            .tokens
            .lock()
            .map_err(|_| TurnError::Storage("Failed to acquire token lock".to_string()))?;

        tokens.get(token).cloned().ok_or(TurnError::Unauthorized)
    }
}
