//! Wire types for the notes API.

use serde::{Deserialize, Serialize};

/// Error body: `{"error": "..."}`. Storage failures carry a generic message;
/// detail stays on the server side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Confirmation body for a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted() -> Self {
        Self {
            message: "Note deleted successfully".to_string(),
        }
    }
}
