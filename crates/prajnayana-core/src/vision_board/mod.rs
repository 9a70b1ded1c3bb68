//! Vision board: notes, the placement engine and board state.

pub mod board;
pub mod note;
pub mod placement;

pub use board::{NoteFilter, VisionBoard};
pub use note::{CanvasSize, NewNote, Note, NoteId, NotePatch, NoteType, Position};
pub use placement::{
    ensure_within_boundaries, overlap_area, place_note, place_note_random, SafeRect, MAX_ATTEMPTS,
    NOTE_HEIGHT, NOTE_WIDTH, PADDING,
};
