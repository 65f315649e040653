use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod serve;
pub mod show;
pub mod sketch;

pub use add::run_add;
pub use delete::run_delete;
pub use edit::run_edit;
pub use export::run_export;
pub use list::run_list;
pub use serve::run_serve;
pub use show::run_show;
pub use sketch::run_sketch;

#[derive(Parser)]
#[command(name = "sketchnote")]
#[command(about = "Notes with hand-drawn sketches")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all notes
    List,
    /// Show full details for a note
    Show(ShowArgs),
    /// Add a new note
    Add(AddArgs),
    /// Replace a note's title, description, and sketch
    Edit(EditArgs),
    /// Delete a note permanently
    Delete(DeleteArgs),
    /// Write a note's sketch to a PNG file
    Export(ExportArgs),
    /// Apply scripted strokes on top of a note's sketch
    Sketch(SketchArgs),
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note id
    pub id: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(short, long)]
    pub title: String,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Attach an image file as the note's sketch
    #[arg(short, long, value_name = "FILE")]
    pub sketch: Option<PathBuf>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note id
    pub id: String,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Replace the sketch with an image file
    #[arg(short, long, value_name = "FILE", conflicts_with = "clear_sketch")]
    pub sketch: Option<PathBuf>,
    /// Remove the sketch
    #[arg(long)]
    pub clear_sketch: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note id
    pub id: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Note id
    pub id: String,
    /// Output PNG path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct SketchArgs {
    /// Note id
    pub id: String,
    /// JSON stroke script: an array of {color, width, points}
    #[arg(short = 'f', long, value_name = "FILE")]
    pub script: PathBuf,
}

#[derive(Args)]
pub struct ServeArgs {
    #[arg(short, long, default_value = "8080")]
    pub port: u16,
}
