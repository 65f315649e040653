use anyhow::Result;
use std::path::Path;

use crate::cli::add::sketch_from_file;
use crate::db::Database;
use crate::models::NotePayload;
use crate::service::NotesService;

/// Execute the edit command. The service contract is full replacement of
/// {title, description, drawing}, so unchanged fields are carried over from
/// the current record before submitting.
pub fn run_edit(
    db: &Database,
    raw_id: &str,
    title: Option<String>,
    description: Option<String>,
    sketch: Option<&Path>,
    clear_sketch: bool,
) -> Result<()> {
    let id = NotesService::parse_id(raw_id)?;
    let service = NotesService::new(db);
    let current = service.get(id)?;

    let drawing = if clear_sketch {
        None
    } else {
        match sketch {
            Some(path) => Some(sketch_from_file(path)?),
            None => current.drawing,
        }
    };

    let payload = NotePayload::new(
        title.unwrap_or(current.title),
        description.or(current.description),
        drawing,
    );
    let note = service.update(id, &payload)?;

    println!("Updated note #{}: {}", note.id, note.title);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::DrawingSurface;

    #[test]
    fn test_edit_replaces_title_keeps_rest() {
        let db = Database::open_memory().unwrap();
        let uri = DrawingSurface::new(8, 8).export_data_uri().unwrap();
        let note = db
            .insert_note("old", Some("keep me"), Some(&uri))
            .unwrap();

        run_edit(&db, &note.id.to_string(), Some("new".into()), None, None, false).unwrap();

        let updated = db.get_note_by_id(note.id).unwrap().unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        assert_eq!(updated.drawing.as_deref(), Some(uri.as_str()));
    }

    #[test]
    fn test_edit_clear_sketch() {
        let db = Database::open_memory().unwrap();
        let uri = DrawingSurface::new(8, 8).export_data_uri().unwrap();
        let note = db.insert_note("t", None, Some(&uri)).unwrap();

        run_edit(&db, &note.id.to_string(), None, None, None, true).unwrap();

        let updated = db.get_note_by_id(note.id).unwrap().unwrap();
        assert!(updated.drawing.is_none());
    }

    #[test]
    fn test_edit_rejects_malformed_id() {
        let db = Database::open_memory().unwrap();
        assert!(run_edit(&db, "abc", Some("t".into()), None, None, false).is_err());
    }
}
