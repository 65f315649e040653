use anyhow::{anyhow, Result};
use std::path::Path;

use crate::canvas::{DrawingSurface, LoadResult, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::db::Database;
use crate::service::NotesService;

/// Execute the export command: write a note's sketch to a PNG file.
pub fn run_export(db: &Database, raw_id: &str, output: &Path) -> Result<()> {
    let id = NotesService::parse_id(raw_id)?;
    let service = NotesService::new(db);
    let note = service.get(id)?;

    let uri = note
        .drawing
        .ok_or_else(|| anyhow!("Note #{} has no sketch", note.id))?;

    let mut surface = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    if surface.load_data_uri(&uri) == LoadResult::Invalid {
        // Stored payload no longer decodes; degrade to a blank canvas
        eprintln!(
            "Warning: sketch on note #{} could not be decoded, exporting a blank canvas",
            note.id
        );
    }

    std::fs::write(output, surface.export_image()?)
        .map_err(|e| anyhow!("Could not write {}: {}", output.display(), e))?;

    println!("Wrote {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BrushColor, Point};

    #[test]
    fn test_export_writes_stored_sketch() {
        let db = Database::open_memory().unwrap();

        let mut surface = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        surface.begin_stroke(Point::new(10.0, 10.0));
        surface.append_point(Point::new(100.0, 100.0));
        surface.end_stroke();
        let uri = surface.export_data_uri().unwrap();

        let note = db.insert_note("t", None, Some(&uri)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        run_export(&db, &note.id.to_string(), &out).unwrap();

        let img = image::open(&out).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(*img.get_pixel(10, 10), image::Rgba(BrushColor::Black.rgba()));
    }

    #[test]
    fn test_export_without_sketch_is_an_error() {
        let db = Database::open_memory().unwrap();
        let note = db.insert_note("plain", None, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        assert!(run_export(&db, &note.id.to_string(), &out).is_err());
    }

    #[test]
    fn test_export_corrupt_sketch_degrades_to_blank() {
        let db = Database::open_memory().unwrap();
        let note = db
            .insert_note("t", None, Some("data:image/png;base64,@@@@"))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.png");
        run_export(&db, &note.id.to_string(), &out).unwrap();

        let img = image::open(&out).unwrap().to_rgba8();
        let blank = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        let blank_img = image::load_from_memory(&blank.export_image().unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(img, blank_img);
    }
}
