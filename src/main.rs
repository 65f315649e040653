use clap::Parser;
use sketchnote::cli::{
    run_add, run_delete, run_edit, run_export, run_list, run_serve, run_show, run_sketch, Cli,
    Commands,
};
use sketchnote::db::Database;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            run_serve(args.port)?;
        }
        Commands::List => {
            let db = Database::open()?;
            run_list(&db)?;
        }
        Commands::Show(args) => {
            let db = Database::open()?;
            run_show(&db, &args.id)?;
        }
        Commands::Add(args) => {
            let db = Database::open()?;
            run_add(&db, args.title, args.description, args.sketch.as_deref())?;
        }
        Commands::Edit(args) => {
            let db = Database::open()?;
            run_edit(
                &db,
                &args.id,
                args.title,
                args.description,
                args.sketch.as_deref(),
                args.clear_sketch,
            )?;
        }
        Commands::Delete(args) => {
            let db = Database::open()?;
            run_delete(&db, &args.id)?;
        }
        Commands::Export(args) => {
            let db = Database::open()?;
            run_export(&db, &args.id, &args.output)?;
        }
        Commands::Sketch(args) => {
            let db = Database::open()?;
            run_sketch(&db, &args.id, &args.script)?;
        }
    }

    Ok(())
}
