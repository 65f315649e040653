use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use super::Database;
use crate::models::Note;

/// Helper to convert timestamp parse errors to rusqlite errors
fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl Database {
    // ==================== NOTE CREATE ====================

    /// Insert a new note. `created_at` and `updated_at` are both set to now.
    pub fn insert_note(
        &self,
        title: &str,
        description: Option<&str>,
        drawing: Option<&str>,
    ) -> Result<Note> {
        let now = Utc::now();
        self.conn.execute(
            r#"INSERT INTO notes (title, description, drawing, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?)"#,
            params![
                title,
                description,
                drawing,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(Note {
            id,
            title: title.to_string(),
            description: description.map(String::from),
            drawing: drawing.map(String::from),
            created_at: now,
            updated_at: now,
        })
    }

    // ==================== NOTE READ ====================

    pub fn get_note_by_id(&self, id: i64) -> Result<Option<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, drawing, created_at, updated_at
             FROM notes WHERE id = ?",
        )?;

        let result = stmt.query_row([id], Self::row_to_note);

        match result {
            Ok(note) => Ok(Some(note)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, description, drawing, created_at, updated_at FROM notes",
        )?;

        let notes = stmt
            .query_map([], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    pub fn count_notes(&self) -> Result<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(count)
    }

    // ==================== NOTE UPDATE ====================

    /// Replace all three mutable fields and refresh `updated_at`. Returns
    /// `None` when no note has this id.
    pub fn update_note(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        drawing: Option<&str>,
    ) -> Result<Option<Note>> {
        let now = Utc::now();
        let changed = self.conn.execute(
            "UPDATE notes SET title = ?, description = ?, drawing = ?, updated_at = ? WHERE id = ?",
            params![title, description, drawing, now.to_rfc3339(), id],
        )?;

        if changed == 0 {
            return Ok(None);
        }
        self.get_note_by_id(id)
    }

    // ==================== NOTE DELETE ====================

    /// Remove a note, returning the deleted snapshot. Deleting a missing id
    /// returns `None` rather than an error.
    pub fn delete_note(&self, id: i64) -> Result<Option<Note>> {
        let existing = self.get_note_by_id(id)?;
        if existing.is_some() {
            self.conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
        }
        Ok(existing)
    }

    fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
        let created_at: String = row.get("created_at")?;
        let updated_at: String = row.get("updated_at")?;
        Ok(Note {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            drawing: row.get("drawing")?,
            created_at: parse_timestamp(&created_at)?,
            updated_at: parse_timestamp(&updated_at)?,
        })
    }
}
