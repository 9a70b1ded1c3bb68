//! Vision-board notes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Server-assigned note identifier.
pub type NoteId = i64;

/// Canvas coordinates of a note's top-left corner, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the rendering surface, measured by whoever draws the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The fixed set of note categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteType {
    Goal,
    Affirmation,
    Inspiration,
    Reflection,
}

impl NoteType {
    pub const ALL: [NoteType; 4] = [
        NoteType::Goal,
        NoteType::Affirmation,
        NoteType::Inspiration,
        NoteType::Reflection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteType::Goal => "goal",
            NoteType::Affirmation => "affirmation",
            NoteType::Inspiration => "inspiration",
            NoteType::Reflection => "reflection",
        }
    }

    /// Case-insensitive parse of a category name.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "note_type".to_string(),
                message: format!(
                    "'{s}' is not one of {}",
                    Self::ALL.map(|t| t.as_str()).join(", ")
                ),
            })
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A positioned, categorized piece of text on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    pub note_type: NoteType,
    #[serde(flatten)]
    pub position: Position,
    #[serde(default)]
    pub favorite: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub content: String,
    pub note_type: NoteType,
    #[serde(flatten)]
    pub position: Position,
    pub favorite: bool,
}

/// Partial update for a note; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_type: Option<NoteType>,
    #[serde(flatten)]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(NoteType::parse("Goal").unwrap(), NoteType::Goal);
        assert_eq!(NoteType::parse(" REFLECTION ").unwrap(), NoteType::Reflection);
        assert!(NoteType::parse("todo").is_err());
    }

    #[test]
    fn note_position_is_flat_on_the_wire() {
        let json = serde_json::json!({
            "id": 4,
            "content": "Run a marathon",
            "note_type": "goal",
            "x": 120.0,
            "y": 64.5,
            "favorite": true,
        });
        let note: Note = serde_json::from_value(json).unwrap();
        assert_eq!(note.position, Position::new(120.0, 64.5));
        assert!(note.favorite);
        assert!(note.created_at.is_none());
    }

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = NotePatch {
            position: Some(Position::new(30.0, 40.0)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "x": 30.0, "y": 40.0 })
        );

        let patch = NotePatch {
            favorite: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            serde_json::json!({ "favorite": false })
        );
    }
}
