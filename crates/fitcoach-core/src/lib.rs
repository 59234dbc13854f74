//! # FitCoach Core Library
//!
//! Core logic for the FitCoach workout timer. Everything a workout view
//! needs lives here; the `fitcoach` CLI is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a synchronous phase state machine per workout format (AMRAP,
//!   EMOM, Tabata, For Time), driven by an async one-second clock
//! - **Notes**: recovery of timer settings from structured fields or legacy
//!   free-text block notes
//! - **Audio**: beep and start cues behind a pluggable engine
//! - **Storage**: SQLite key-value preferences and TOML configuration
//! - **API**: client for the workout content backend
//!
//! ## Key Components
//!
//! - [`SessionController`]: applies commands and ticks to a [`TimerSession`]
//! - [`SessionRunner`]: owns the clock, audio and preferences for one view
//! - [`WorkoutPlan`]: per-format transition table
//! - [`ApiClient`]: workout, blog, admin and contact endpoints

pub mod api;
pub mod audio;
pub mod auth;
pub mod error;
pub mod events;
pub mod model;
pub mod notes;
pub mod storage;
pub mod timer;

pub use api::{ApiClient, RetryPolicy};
pub use audio::{AudioCues, AudioEngine};
pub use auth::{Caller, Role};
pub use error::{ApiError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Cue, Event};
pub use model::{BlockType, WorkoutBlock, WorkoutDay, WorkoutFormat};
pub use notes::{FormatSource, LegacyNotesParser, StructuredSource};
pub use storage::{Config, Database, Preferences};
pub use timer::{
    Command, Phase, SessionConfig, SessionController, SessionRunner, TimerSession, WorkoutPlan,
};
