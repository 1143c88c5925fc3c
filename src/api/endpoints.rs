use std::os::raw::c_char;

use crate::api::{
    services::{
        engine_service::{initialize_shared_engine, preview_move, shared_engine, to_json, MovePreviewRequest},
        validation_service::{parse_c_string, parse_optional_c_string},
    },
    types::ApiResult,
};
use crate::config::{EngineConfig, PersonaCatalog};
use crate::modules::billing::{SubscriptionLedger, SubscriptionStatus};
use crate::modules::cues::analyze;
use crate::modules::memory::{MemoryItem, MemoryStore};
use crate::modules::profile::ProfileStore;
use crate::modules::prompt::compose;

fn respond(result: Result<String, String>) -> *mut ApiResult {
    match result {
        Ok(data) => ApiResult::success(data).boxed(),
        Err(error) => ApiResult::error(error).boxed(),
    }
}

/// A null or empty config selects the defaults.
#[no_mangle]
pub extern "C" fn initialize_turn_engine(config_toml: *const c_char) -> *mut ApiResult {
    let config = match parse_optional_c_string(config_toml) {
        Some(content) if !content.trim().is_empty() => match EngineConfig::from_toml_str(&content) {
            Ok(config) => config,
            Err(e) => return ApiResult::error(format!("Failed to parse config: {}", e)).boxed(),
        },
        _ => EngineConfig::default(),
    };

    match initialize_shared_engine(config) {
        Ok(()) => ApiResult::success("Turn engine initialized successfully".to_string()).boxed(),
        Err(result) => result,
    }
}

#[no_mangle]
pub extern "C" fn analyze_cues(text: *const c_char) -> *mut ApiResult {
    let text_str = match parse_c_string(text, "Text string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    respond(to_json(&analyze(&text_str)))
}

#[no_mangle]
pub extern "C" fn select_next_move(request_json: *const c_char) -> *mut ApiResult {
    let request_str = match parse_c_string(request_json, "Request string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let request: MovePreviewRequest = match serde_json::from_str(&request_str) {
        Ok(r) => r,
        Err(e) => return ApiResult::error(format!("Failed to parse request: {}", e)).boxed(),
    };

    respond(to_json(&preview_move(&request)))
}

/// `facts_json` is a JSON array of strings; null means no facts.
#[no_mangle]
pub extern "C" fn compose_system_prompt(persona: *const c_char, facts_json: *const c_char) -> *mut ApiResult {
    let persona_key = parse_optional_c_string(persona);

    let facts: Vec<String> = match parse_optional_c_string(facts_json) {
        Some(json) if !json.trim().is_empty() => match serde_json::from_str(&json) {
            Ok(facts) => facts,
            Err(e) => return ApiResult::error(format!("Failed to parse facts: {}", e)).boxed(),
        },
        _ => Vec::new(),
    };

    let persona = PersonaCatalog::lookup(persona_key.as_deref());
    ApiResult::success(compose(persona, &facts)).boxed()
}

/// Issues `token` for `user_id` and seeds the profile and subscription stores.
#[no_mangle]
pub extern "C" fn register_user(
    token: *const c_char,
    user_id: *const c_char,
    persona: *const c_char,
    status: *const c_char,
) -> *mut ApiResult {
    let engine = match shared_engine() {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let token_str = match parse_c_string(token, "Token string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let user_id_str = match parse_c_string(user_id, "User ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let status = parse_optional_c_string(status)
        .map(|key| SubscriptionStatus::from_key(&key))
        .unwrap_or_default();

    let result = engine
        .identity
        .register(token_str, user_id_str.clone())
        .and_then(|_| match parse_optional_c_string(persona) {
            Some(key) => ProfileStore::set_persona_variant(&user_id_str, key),
            None => Ok(()),
        })
        .and_then(|_| SubscriptionLedger::set_status(&user_id_str, status))
        .map(|_| format!("User '{}' registered", user_id_str));

    respond(result)
}

#[no_mangle]
pub extern "C" fn remember(user_id: *const c_char, item_json: *const c_char) -> *mut ApiResult {
    let user_id_str = match parse_c_string(user_id, "User ID string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let item_str = match parse_c_string(item_json, "Memory item string") {
        Ok(s) => s,
        Err(result) => return result,
    };

    let item: MemoryItem = match serde_json::from_str(&item_str) {
        Ok(item) => item,
        Err(e) => return ApiResult::error(format!("Failed to parse memory item: {}", e)).boxed(),
    };

    respond(MemoryStore::insert(&user_id_str, item).map(|_| "Memory stored".to_string()))
}

/// Credentials are checked before the body is parsed; a null body is treated as empty.
/// Errors carry the status code as a prefix, e.g. `402: Subscription required (status: none)`.
#[no_mangle]
pub extern "C" fn process_turn(authorization: *const c_char, request_json: *const c_char) -> *mut ApiResult {
    let engine = match shared_engine() {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let authorization_str = parse_optional_c_string(authorization);
    let request_str = parse_optional_c_string(request_json).unwrap_or_default();

    let result = engine
        .service
        .process_turn_json(authorization_str.as_deref(), &request_str)
        .map_err(|e| format!("{}: {}", e.status_code(), e))
        .and_then(|response| to_json(&response));

    respond(result)
}

#[no_mangle]
pub extern "C" fn free_api_result(result: *mut ApiResult) {
    if result.is_null() {
        return;
    }

    unsafe {
        let result = Box::from_raw(result);
        if !result.data.is_null() {
            let _ = std::ffi::CString::from_raw(result.data);
        }
        if !result.error.is_null() {
            let _ = std::ffi::CString::from_raw(result.error);
        }
    }
}
