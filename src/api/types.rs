use serde::{Deserialize, Serialize};
use std::ffi::CString;
use std::os::raw::c_char;

use crate::modules::cues::CueSignals;
use crate::modules::moves::MoveType;

#[repr(C)]
pub struct ApiResult {
    pub success: u8,
    pub data: *mut c_char,
    pub error: *mut c_char,
}

pub type UserId = String;

impl ApiResult {
    pub fn success(data: String) -> Self {
        let data_ptr = match CString::new(data) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => c"Data contains invalid characters".to_owned().into_raw(),
        };

        Self {
            success: 1,
            data: data_ptr,
            error: std::ptr::null_mut(),
        }
    }

    pub fn error(error: String) -> Self {
        let error_ptr = match CString::new(error) {
            Ok(cstring) => cstring.into_raw(),
            Err(_) => c"Error message contains invalid characters".to_owned().into_raw(),
        };

        Self {
            success: 0,
            data: std::ptr::null_mut(),
            error: error_ptr,
        }
    }

    pub fn boxed(self) -> *mut ApiResult {
        Box::into_raw(Box::new(self))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    pub conversation_id: String,
    pub user_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub cues: CueSignals,
    pub next_move_type: MoveType,
    pub assistant_text: String,
}
