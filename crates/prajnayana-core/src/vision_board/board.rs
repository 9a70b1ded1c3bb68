//! Vision board page state.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::note::{CanvasSize, NewNote, Note, NoteId, NoteType, Position};
use super::placement::{ensure_within_boundaries, place_note};

/// Which notes to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFilter {
    pub note_type: Option<NoteType>,
    pub favorites_only: bool,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        self.note_type.map_or(true, |t| note.note_type == t) && (!self.favorites_only || note.favorite)
    }
}

/// Notes on one canvas.
#[derive(Debug, Clone)]
pub struct VisionBoard {
    notes: Vec<Note>,
    canvas: CanvasSize,
}

impl VisionBoard {
    pub fn new(notes: Vec<Note>, canvas: CanvasSize) -> Self {
        Self { notes, canvas }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn positions(&self) -> Vec<Position> {
        self.notes.iter().map(|n| n.position).collect()
    }

    /// Prepare a new note, positioned away from the existing ones.
    ///
    /// The note joins the board once the server has assigned it an id; see
    /// [`VisionBoard::insert`].
    pub fn draft_note<R: Rng + ?Sized>(&self, content: impl Into<String>, note_type: NoteType, rng: &mut R) -> NewNote {
        let position = place_note(&self.positions(), self.canvas, rng);
        debug!(x = position.x, y = position.y, %note_type, "placed new note");
        NewNote {
            content: content.into(),
            note_type,
            position,
            favorite: false,
        }
    }

    /// Add a note as stored by the server.
    pub fn insert(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Move a note by hand. Returns the clamped position actually applied.
    pub fn move_note(&mut self, id: NoteId, position: Position) -> Option<Position> {
        let canvas = self.canvas;
        let note = self.note_mut(id)?;
        note.position = ensure_within_boundaries(position, canvas);
        Some(note.position)
    }

    /// Adopt new canvas bounds and pull every note back inside them.
    ///
    /// Returns the ids of the notes that moved.
    pub fn resize_canvas(&mut self, canvas: CanvasSize) -> Vec<NoteId> {
        self.canvas = canvas;
        let mut moved = Vec::new();
        for note in &mut self.notes {
            let clamped = ensure_within_boundaries(note.position, canvas);
            if clamped != note.position {
                note.position = clamped;
                moved.push(note.id);
            }
        }
        moved
    }

    /// Flip the favorite flag. Returns the new value.
    pub fn toggle_favorite(&mut self, id: NoteId) -> Option<bool> {
        let note = self.note_mut(id)?;
        note.favorite = !note.favorite;
        Some(note.favorite)
    }

    pub fn edit_content(&mut self, id: NoteId, content: impl Into<String>) -> Option<&Note> {
        let note = self.note_mut(id)?;
        note.content = content.into();
        Some(note)
    }

    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Notes matching `filter`, ordered by id.
    pub fn filtered(&self, filter: NoteFilter) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.iter().filter(|n| filter.matches(n)).collect();
        notes.sort_by_key(|n| n.id);
        notes
    }

    fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.id == id)
    }
}
