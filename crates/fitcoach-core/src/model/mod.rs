//! Workout content as delivered by the backend.
//!
//! Blocks and exercises are created through the admin screens and are
//! read-only while a session runs.

mod block;
mod content;
mod exercise;

pub use block::{BlockType, TimerSettings, WorkoutBlock, WorkoutFormat};
pub use content::{BlogPost, ContactForm, Program, User, WorkoutDay};
pub use exercise::{BlockExercise, Exercise, Modification};
