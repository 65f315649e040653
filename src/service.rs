//! Validation boundary between callers and the note store.
//!
//! Identifiers and payloads are checked here; store outcomes map onto a
//! small error taxonomy so the HTTP layer and the CLI flows translate them
//! uniformly. Storage failures keep their detail for server-side logging
//! and are never shown to clients verbatim.

use thiserror::Error;

use crate::db::Database;
use crate::models::{Note, NotePayload};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Note ID is required")]
    MissingId,
    #[error("Invalid note ID")]
    InvalidId,
    #[error("Title is required")]
    MissingTitle,
    #[error("Note not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub struct NotesService<'a> {
    db: &'a Database,
}

impl<'a> NotesService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Parse a raw identifier. An empty id is missing, anything that is not
    /// a positive integer is malformed; neither is ever a not-found.
    pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ServiceError::MissingId);
        }
        raw.parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ServiceError::InvalidId)
    }

    pub fn create(&self, payload: &NotePayload) -> Result<Note, ServiceError> {
        let title = Self::require_title(payload)?;
        let note = self.db.insert_note(
            title,
            payload.description.as_deref(),
            payload.drawing.as_deref(),
        )?;
        Ok(note)
    }

    pub fn list(&self) -> Result<Vec<Note>, ServiceError> {
        Ok(self.db.list_notes()?)
    }

    pub fn get(&self, id: i64) -> Result<Note, ServiceError> {
        self.db.get_note_by_id(id)?.ok_or(ServiceError::NotFound)
    }

    /// Full replacement of {title, description, drawing}. Title presence is
    /// enforced here as on create.
    pub fn update(&self, id: i64, payload: &NotePayload) -> Result<Note, ServiceError> {
        let title = Self::require_title(payload)?;
        self.db
            .update_note(
                id,
                title,
                payload.description.as_deref(),
                payload.drawing.as_deref(),
            )?
            .ok_or(ServiceError::NotFound)
    }

    pub fn delete(&self, id: i64) -> Result<Note, ServiceError> {
        self.db.delete_note(id)?.ok_or(ServiceError::NotFound)
    }

    fn require_title(payload: &NotePayload) -> Result<&str, ServiceError> {
        let title = payload.title.trim();
        if title.is_empty() {
            return Err(ServiceError::MissingTitle);
        }
        Ok(title)
    }
}
