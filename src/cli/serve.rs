use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::db::Database;
use crate::server::NotesServer;

/// Execute the serve command (blocking until Ctrl-C).
pub fn run_serve(port: u16) -> Result<()> {
    let db_path = Database::default_path()?;
    let server = NotesServer::bind(&format!("0.0.0.0:{}", port), db_path)?;

    println!("Notes server listening on {}", server.local_addr()?);

    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    server.run(shutdown)
}
