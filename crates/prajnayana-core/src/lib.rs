//! # Prajnayana Core Library
//!
//! Client-side logic for the Prajnayana self-development app: daily habit
//! tracking with streaks, a free-form vision board, the user profile and the
//! self-discovery questionnaire. The server owns the data; this crate keeps
//! page state, computes derived values and talks to the REST API.
//!
//! ## Architecture
//!
//! - **Habits**: completion record, streak calculation, tracker state
//! - **Vision board**: notes, the non-overlapping placement engine, board state
//! - **API**: one authenticated [`ApiClient`] with the token injected up front
//! - **Sync**: page actions that update local state and push to the server
//! - **Storage**: TOML configuration under `~/.config/prajnayana`
//!
//! ## Key Components
//!
//! - [`HabitTracker`]: habit list plus completions for the tracker page
//! - [`VisionBoard`]: notes on a canvas of known size
//! - [`ApiClient`]: typed access to every server endpoint
//! - [`Config`]: application configuration management

pub mod api;
pub mod auth;
pub mod date_key;
pub mod error;
pub mod habits;
pub mod profile;
pub mod questionnaire;
pub mod storage;
pub mod sync;
pub mod vision_board;

pub use api::ApiClient;
pub use auth::{AuthToken, KeyringTokenStore, MemoryTokenStore, RegisterRequest, TokenStore};
pub use date_key::{date_key, parse_date_key, today_local};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use habits::{compute_streak, CompletionRecord, Habit, HabitId, HabitTracker, HabitTrackingEntry};
pub use profile::{ProfileForm, UserProfile};
pub use questionnaire::{DiscoveryQuestion, LikertChoice, TestSession};
pub use storage::Config;
pub use vision_board::{place_note, CanvasSize, Note, NoteFilter, NoteId, NoteType, Position, VisionBoard};
