use anyhow::Result;

use crate::db::Database;

/// Execute the list command
pub fn run_list(db: &Database) -> Result<()> {
    let notes = db.list_notes()?;

    if notes.is_empty() {
        println!("No notes yet.");
        return Ok(());
    }

    for note in &notes {
        let marker = if note.drawing.is_some() { " [sketch]" } else { "" };
        let description = note
            .description
            .as_deref()
            .map(|d| format!(" - {}", truncate(d, 40)))
            .unwrap_or_default();
        println!("{:>4}  {}{}{}", note.id, note.title, description, marker);
    }
    println!();
    println!("{} note(s)", notes.len());

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
