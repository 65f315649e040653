use anyhow::Result;

use crate::canvas;
use crate::db::Database;
use crate::service::NotesService;

/// Execute the show command
pub fn run_show(db: &Database, raw_id: &str) -> Result<()> {
    let id = NotesService::parse_id(raw_id)?;
    let service = NotesService::new(db);
    let note = service.get(id)?;

    println!("Note #{}", note.id);
    println!("Title:       {}", note.title);
    println!(
        "Description: {}",
        note.description.as_deref().unwrap_or("(none)")
    );
    println!("Sketch:      {}", describe_sketch(note.drawing.as_deref()));
    println!("Created:     {}", note.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Updated:     {}", note.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

/// A stored sketch that no longer decodes is reported, not fatal.
fn describe_sketch(drawing: Option<&str>) -> String {
    let Some(uri) = drawing else {
        return "(none)".to_string();
    };

    let bytes = match canvas::from_data_uri(uri) {
        Ok(bytes) => bytes,
        Err(_) => return "(unreadable image data)".to_string(),
    };

    match image::load_from_memory(&bytes) {
        Ok(img) => format!("{}x{} PNG, {} bytes", img.width(), img.height(), bytes.len()),
        Err(_) => "(unreadable image data)".to_string(),
    }
}
