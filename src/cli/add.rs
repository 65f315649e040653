use anyhow::{anyhow, Result};
use std::path::Path;

use crate::canvas::DrawingSurface;
use crate::db::Database;
use crate::models::NotePayload;
use crate::service::NotesService;

/// Execute the add command
pub fn run_add(
    db: &Database,
    title: String,
    description: Option<String>,
    sketch: Option<&Path>,
) -> Result<()> {
    let drawing = match sketch {
        Some(path) => Some(sketch_from_file(path)?),
        None => None,
    };

    let service = NotesService::new(db);
    let note = service.create(&NotePayload::new(title, description, drawing))?;

    println!("Created note #{}: {}", note.id, note.title);
    if note.drawing.is_some() {
        println!("Sketch attached.");
    }

    Ok(())
}

/// Read an image file and flatten it to the portable PNG data URI through a
/// drawing surface sized to the image.
pub fn sketch_from_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))?;
    let surface = DrawingSurface::from_image_bytes(&bytes)
        .map_err(|e| anyhow!("Not a usable image {}: {}", path.display(), e))?;
    surface.export_data_uri()
}
