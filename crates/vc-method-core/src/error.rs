use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcMethodError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for VcMethodError {
    fn from(e: serde_json::Error) -> Self {
        VcMethodError::SerializationError(e.to_string())
    }
}
