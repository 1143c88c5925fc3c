pub mod error;
pub mod types;
pub mod services;
pub mod endpoints;

pub use error::TurnError;
pub use types::{ApiResult, TurnRequest, TurnResponse, UserId};
pub use endpoints::*;
