use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Subscription required (status: {reason})")]
    SubscriptionRequired { reason: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Generation error: {0}")]
    Generation(String),
}

impl TurnError {
    /// HTTP-style status a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            TurnError::Unauthorized => 401,
            TurnError::InvalidRequest(_) => 400,
            TurnError::SubscriptionRequired { .. } => 402,
            TurnError::Storage(_) => 500,
            TurnError::Generation(_) => 502,
        }
    }
}

impl From<serde_json::Error> for TurnError {
    fn from(error: serde_json::Error) -> Self {
        TurnError::InvalidRequest(error.to_string())
    }
}
