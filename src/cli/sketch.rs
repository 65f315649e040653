use anyhow::{anyhow, Result};
use std::path::Path;

use crate::canvas::{DrawingSurface, LoadResult, Stroke, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::db::Database;
use crate::models::NotePayload;
use crate::service::NotesService;

/// Execute the sketch command: replay a stroke script on top of a note's
/// stored sketch and save the flattened result. Previously saved strokes are
/// already flattened into the raster, so only the scripted strokes layer on.
pub fn run_sketch(db: &Database, raw_id: &str, script_path: &Path) -> Result<()> {
    let id = NotesService::parse_id(raw_id)?;
    let service = NotesService::new(db);
    let note = service.get(id)?;

    let script = read_script(script_path)?;
    if script.is_empty() {
        return Err(anyhow!("Stroke script is empty"));
    }

    let mut surface = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    if let Some(uri) = note.drawing.as_deref() {
        if surface.load_data_uri(uri) == LoadResult::Invalid {
            eprintln!(
                "Warning: sketch on note #{} could not be decoded, starting from a blank canvas",
                note.id
            );
        }
    }

    apply_strokes(&mut surface, &script);

    let payload = NotePayload::new(
        note.title,
        note.description,
        Some(surface.export_data_uri()?),
    );
    service.update(id, &payload)?;

    println!("Applied {} stroke(s) to note #{}", script.len(), id);

    Ok(())
}

fn read_script(path: &Path) -> Result<Vec<Stroke>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("Could not read {}: {}", path.display(), e))?;
    let strokes: Vec<Stroke> = serde_json::from_str(&text)
        .map_err(|e| anyhow!("Invalid stroke script {}: {}", path.display(), e))?;
    Ok(strokes)
}

/// Feed scripted strokes through the surface's capture operations, exactly
/// as pointer input would arrive.
fn apply_strokes(surface: &mut DrawingSurface, strokes: &[Stroke]) {
    for stroke in strokes {
        let Some((first, rest)) = stroke.points.split_first() else {
            continue;
        };
        surface.set_brush_color(stroke.color);
        surface.set_brush_size(stroke.width);
        surface.begin_stroke(*first);
        for point in rest {
            surface.append_point(*point);
        }
        surface.end_stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BrushColor, BrushWidth, Point};

    fn write_script(dir: &Path, strokes: &[Stroke]) -> std::path::PathBuf {
        let path = dir.join("strokes.json");
        std::fs::write(&path, serde_json::to_string(strokes).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_sketch_saves_flattened_strokes() {
        let db = Database::open_memory().unwrap();
        let note = db.insert_note("t", Some("d"), None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            &[Stroke {
                color: BrushColor::Red,
                width: BrushWidth::Medium,
                points: vec![Point::new(20.0, 20.0), Point::new(120.0, 20.0)],
            }],
        );

        run_sketch(&db, &note.id.to_string(), &script).unwrap();

        let updated = db.get_note_by_id(note.id).unwrap().unwrap();
        assert_eq!(updated.title, "t");
        assert_eq!(updated.description.as_deref(), Some("d"));
        let uri = updated.drawing.unwrap();

        let bytes = crate::canvas::from_data_uri(&uri).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(*img.get_pixel(60, 20), image::Rgba(BrushColor::Red.rgba()));
    }

    #[test]
    fn test_sketch_layers_on_existing_drawing() {
        let db = Database::open_memory().unwrap();

        let mut surface = DrawingSurface::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        surface.begin_stroke(Point::new(20.0, 100.0));
        surface.append_point(Point::new(120.0, 100.0));
        surface.end_stroke();
        let note = db
            .insert_note("t", None, Some(&surface.export_data_uri().unwrap()))
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            &[Stroke {
                color: BrushColor::Blue,
                width: BrushWidth::Medium,
                points: vec![Point::new(20.0, 200.0), Point::new(120.0, 200.0)],
            }],
        );

        run_sketch(&db, &note.id.to_string(), &script).unwrap();

        let updated = db.get_note_by_id(note.id).unwrap().unwrap();
        let bytes = crate::canvas::from_data_uri(&updated.drawing.unwrap()).unwrap();
        let img = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(*img.get_pixel(60, 100), image::Rgba(BrushColor::Black.rgba()));
        assert_eq!(*img.get_pixel(60, 200), image::Rgba(BrushColor::Blue.rgba()));
    }

    #[test]
    fn test_sketch_rejects_empty_script() {
        let db = Database::open_memory().unwrap();
        let note = db.insert_note("t", None, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), &[]);
        assert!(run_sketch(&db, &note.id.to_string(), &script).is_err());
    }
}
