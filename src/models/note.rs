use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note record. Serialized field names match the JSON wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// Flattened sketch as a `data:image/png;base64,` URI.
    pub drawing: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update. Updates are full replacement: all
/// three fields are submitted together even when unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub drawing: Option<String>,
}

impl NotePayload {
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        drawing: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            drawing,
        }
    }
}
