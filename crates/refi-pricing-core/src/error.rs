use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefiPricingError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RefiPricingError {
    fn from(e: serde_json::Error) -> Self {
        RefiPricingError::SerializationError(e.to_string())
    }
}
