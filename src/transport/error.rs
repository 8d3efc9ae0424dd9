use crate::domain::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response field `{field}` is missing or empty")]
    MissingField { field: &'static str },

    #[error("response contains an invalid value: {0}")]
    Invalid(#[from] ValidationError),
}
