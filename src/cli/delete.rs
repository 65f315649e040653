use anyhow::Result;

use crate::db::Database;
use crate::service::NotesService;

/// Execute the delete command
pub fn run_delete(db: &Database, raw_id: &str) -> Result<()> {
    let id = NotesService::parse_id(raw_id)?;
    let service = NotesService::new(db);
    let deleted = service.delete(id)?;

    println!("Deleted note #{}: {}", deleted.id, deleted.title);

    Ok(())
}
