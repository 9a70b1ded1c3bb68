//! Page actions: apply a user change locally, then push it to the server.
//!
//! Each function mirrors one control on the web pages. Local state changes
//! first so the caller can render immediately. A failed request is returned
//! to the caller; habit toggles are rolled back, other changes are corrected
//! by the next full refresh.

use chrono::NaiveDate;
use rand::Rng;
use tracing::info;

use crate::api::ApiClient;
use crate::error::{Result, ValidationError};
use crate::habits::{Habit, HabitId, HabitTracker, ToggleAction};
use crate::profile::{ProfileForm, UserProfile};
use crate::vision_board::{CanvasSize, Note, NoteId, NotePatch, NoteType, Position, VisionBoard};

fn not_found(entity: &'static str, id: i64) -> ValidationError {
    ValidationError::NotFound { entity, id }
}

/// Fetch habits and their tracking rows and build tracker state.
pub async fn load_tracker(client: &ApiClient, today: NaiveDate) -> Result<HabitTracker> {
    let habits = client.list_habits().await?;
    let entries = client.list_tracking().await?;
    Ok(HabitTracker::from_server(habits, &entries, today))
}

/// Toggle a habit for a day. Returns the new done flag.
///
/// The local flag is restored when the request fails.
pub async fn toggle_habit(
    client: &ApiClient,
    tracker: &mut HabitTracker,
    habit: HabitId,
    day: NaiveDate,
) -> Result<bool> {
    let action = tracker
        .toggle(habit, day)
        .ok_or_else(|| not_found("habit", habit))?;
    let saved = match action {
        ToggleAction::Create(new_entry) => client.create_tracking(&new_entry).await.map(|created| {
            tracker.apply_created_entry(&created);
            created.completed
        }),
        ToggleAction::Update { entry_id, completed } => {
            client.update_tracking(entry_id, completed).await.map(|_| completed)
        }
    };
    let completed = match saved {
        Ok(completed) => completed,
        Err(e) => {
            tracker.revert_toggle(habit, day);
            return Err(e);
        }
    };
    info!(habit, %day, completed, "habit completion saved");
    Ok(completed)
}

pub async fn create_habit(
    client: &ApiClient,
    tracker: &mut HabitTracker,
    name: &str,
    description: Option<&str>,
) -> Result<Habit> {
    let habit = client.create_habit(name, description).await?;
    info!(id = ?habit.id, name = %habit.name, "habit created");
    tracker.add_habit(habit.clone());
    Ok(habit)
}

pub async fn delete_habit(client: &ApiClient, tracker: &mut HabitTracker, habit: HabitId) -> Result<Habit> {
    let removed = tracker
        .remove_habit(habit)
        .ok_or_else(|| not_found("habit", habit))?;
    client.delete_habit(habit).await?;
    info!(habit, "habit deleted");
    Ok(removed)
}

/// Fetch notes and clamp any that sit outside the current canvas.
///
/// Clamping is local only; stored positions change through [`move_note`]
/// and [`fit_board`].
pub async fn load_board(client: &ApiClient, canvas: CanvasSize) -> Result<VisionBoard> {
    let notes = client.list_notes().await?;
    let mut board = VisionBoard::new(notes, canvas);
    board.resize_canvas(canvas);
    Ok(board)
}

/// Clamp every note into `canvas` and save the ones that moved.
///
/// Returns the ids of the notes written back.
pub async fn fit_board(client: &ApiClient, board: &mut VisionBoard, canvas: CanvasSize) -> Result<Vec<NoteId>> {
    let moved = board.resize_canvas(canvas);
    for &id in &moved {
        if let Some(position) = board.note(id).map(|n| n.position) {
            client
                .update_note(id, &NotePatch { position: Some(position), ..Default::default() })
                .await?;
        }
    }
    info!(moved = moved.len(), "board fitted to canvas");
    Ok(moved)
}

/// Place and store a new note.
pub async fn add_note<R: Rng + ?Sized>(
    client: &ApiClient,
    board: &mut VisionBoard,
    content: &str,
    note_type: NoteType,
    rng: &mut R,
) -> Result<Note> {
    let draft = board.draft_note(content, note_type, rng);
    let note = client.create_note(&draft).await?;
    info!(id = note.id, %note_type, "note created");
    board.insert(note.clone());
    Ok(note)
}

/// Drag a note. Returns the clamped position that was saved.
pub async fn move_note(client: &ApiClient, board: &mut VisionBoard, id: NoteId, to: Position) -> Result<Position> {
    let position = board.move_note(id, to).ok_or_else(|| not_found("note", id))?;
    client
        .update_note(id, &NotePatch { position: Some(position), ..Default::default() })
        .await?;
    Ok(position)
}

pub async fn toggle_favorite(client: &ApiClient, board: &mut VisionBoard, id: NoteId) -> Result<bool> {
    let favorite = board.toggle_favorite(id).ok_or_else(|| not_found("note", id))?;
    client
        .update_note(id, &NotePatch { favorite: Some(favorite), ..Default::default() })
        .await?;
    Ok(favorite)
}

pub async fn edit_note(client: &ApiClient, board: &mut VisionBoard, id: NoteId, content: &str) -> Result<()> {
    board.edit_content(id, content).ok_or_else(|| not_found("note", id))?;
    client
        .update_note(id, &NotePatch { content: Some(content.to_string()), ..Default::default() })
        .await?;
    Ok(())
}

pub async fn delete_note(client: &ApiClient, board: &mut VisionBoard, id: NoteId) -> Result<Note> {
    let removed = board.remove_note(id).ok_or_else(|| not_found("note", id))?;
    client.delete_note(id).await?;
    info!(id, "note deleted");
    Ok(removed)
}

/// Validate and save the profile form, then mirror it onto `user`.
pub async fn save_profile(client: &ApiClient, user: &mut UserProfile, form: &ProfileForm) -> Result<String> {
    form.validate()?;
    let message = client.update_user(user.id, &form.to_update()).await?;
    form.apply_to(user);
    info!(user = user.id, "profile updated");
    Ok(message)
}
