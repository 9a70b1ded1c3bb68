//! Vision board commands for CLI.

use clap::{Args, Subcommand};
use prajnayana_core::{sync, CanvasSize, Config, NoteFilter, NoteType, Position, VisionBoard};

use crate::common::{connect, print_json, CliResult};

/// Canvas size override; defaults come from `board.canvas_*` in config.
#[derive(Args)]
pub struct CanvasArgs {
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
}

impl CanvasArgs {
    fn resolve(&self, config: &Config) -> CanvasSize {
        let default = config.board.canvas();
        CanvasSize::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }
}

fn parse_note_type(s: &str) -> Result<NoteType, String> {
    NoteType::parse(s).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List notes
    List {
        /// Only notes of this type (goal, affirmation, inspiration, reflection)
        #[arg(long = "type", value_parser = parse_note_type)]
        note_type: Option<NoteType>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Add a note at a free spot on the canvas
    Add {
        /// Note text
        content: String,
        #[arg(long = "type", default_value = "goal", value_parser = parse_note_type)]
        note_type: NoteType,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Move a note; the position is clamped to the canvas
    Move {
        /// Note ID
        id: i64,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Clamp every note into the canvas and save the moved positions
    Fit {
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Toggle the favorite flag
    Favorite {
        /// Note ID
        id: i64,
    },
    /// Replace a note's text
    Edit {
        /// Note ID
        id: i64,
        /// New text
        content: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: i64,
    },
}

pub async fn run(action: BoardAction) -> CliResult {
    let (config, client) = connect()?;
    let canvas = match &action {
        BoardAction::List { canvas, .. }
        | BoardAction::Add { canvas, .. }
        | BoardAction::Move { canvas, .. }
        | BoardAction::Fit { canvas } => canvas.resolve(&config),
        _ => config.board.canvas(),
    };

    if let BoardAction::Fit { .. } = action {
        // Stored positions, not the locally clamped ones.
        let mut board = VisionBoard::new(client.list_notes().await?, canvas);
        let moved = sync::fit_board(&client, &mut board, canvas).await?;
        println!("{} note(s) moved into {:.0}x{:.0}", moved.len(), canvas.width, canvas.height);
        return Ok(());
    }
    let mut board = sync::load_board(&client, canvas).await?;

    match action {
        BoardAction::List {
            note_type,
            favorites,
            json,
            ..
        } => {
            let filter = NoteFilter {
                note_type,
                favorites_only: favorites,
            };
            let notes = board.filtered(filter);
            if json {
                return print_json(&notes);
            }
            if notes.is_empty() {
                println!("No notes.");
            }
            for note in notes {
                let star = if note.favorite { '*' } else { ' ' };
                println!(
                    "{:>5} {star} {:<12} ({:>6.0}, {:>6.0})  {}",
                    note.id,
                    note.note_type.as_str(),
                    note.position.x,
                    note.position.y,
                    note.content
                );
            }
        }
        BoardAction::Add { content, note_type, .. } => {
            let mut rng = rand::thread_rng();
            let note = sync::add_note(&client, &mut board, &content, note_type, &mut rng).await?;
            println!("Note created: {} at ({:.0}, {:.0})", note.id, note.position.x, note.position.y);
        }
        BoardAction::Move { id, x, y, .. } => {
            let saved = sync::move_note(&client, &mut board, id, Position::new(x, y)).await?;
            println!("Note {id} moved to ({:.0}, {:.0})", saved.x, saved.y);
        }
        BoardAction::Fit { .. } => {}
        BoardAction::Favorite { id } => {
            let favorite = sync::toggle_favorite(&client, &mut board, id).await?;
            println!("Note {id} favorite: {favorite}");
        }
        BoardAction::Edit { id, content } => {
            sync::edit_note(&client, &mut board, id, &content).await?;
            println!("Note {id} updated");
        }
        BoardAction::Delete { id } => {
            sync::delete_note(&client, &mut board, id).await?;
            println!("Note {id} deleted");
        }
    }
    Ok(())
}
