use std::ffi::CStr;
use std::os::raw::c_char;
use uuid::Uuid;

use crate::api::error::TurnError;
use crate::api::types::{ApiResult, TurnRequest};

pub fn parse_c_string(ptr: *const c_char, field_name: &str) -> Result<String, *mut ApiResult> {
    if ptr.is_null() {
        return Err(ApiResult::error(format!("{} is null", field_name)).boxed());
    }

    unsafe {
        match CStr::from_ptr(ptr).to_str() {
            Ok(s) => Ok(s.to_string()),
            Err(_) => Err(ApiResult::error(format!("Invalid UTF-8 string for {}", field_name)).boxed()),
        }
    }
}

pub fn parse_optional_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTurn {
    pub conversation_id: Uuid,
    pub user_text: String,
}

pub fn parse_turn_request(request_json: &str) -> Result<TurnRequest, TurnError> {
    Ok(serde_json::from_str(request_json)?)
}

pub fn validate_turn_request(request: &TurnRequest) -> Result<ValidatedTurn, TurnError> {
    let conversation_id = Uuid::parse_str(&request.conversation_id).map_err(|e| {
        TurnError::InvalidRequest(format!("conversationId must be a UUID: {}", e))
    })?;

    if request.user_text.is_empty() {
        return Err(TurnError::InvalidRequest("userText must not be empty".to_string()));
    }

    Ok(ValidatedTurn {
        conversation_id,
        user_text: request.user_text.clone(),
    })
}
