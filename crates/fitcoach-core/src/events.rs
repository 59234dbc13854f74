use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::WorkoutFormat;
use crate::timer::{Phase, Progress};

/// Audio cues requested by the session. The runner plays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cue {
    /// Short countdown beep in the last seconds of a phase.
    Beep,
    /// Marks the start of a work period; played after `delay_ms`.
    StartSound { delay_ms: u64 },
}

/// Every state change in a session produces an Event.
/// The front end renders from them; the runner plays the cues.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        format: WorkoutFormat,
        phase: Phase,
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_seconds: u32,
        at: DateTime<Utc>,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
        remaining_seconds: u32,
        progress: Progress,
        at: DateTime<Utc>,
    },
    Cue {
        cue: Cue,
        at: DateTime<Utc>,
    },
    /// `full` is false for the first reset (phase timer only) and true for
    /// the second consecutive one.
    TimerReset {
        full: bool,
        at: DateTime<Utc>,
    },
    RoundCounterChanged {
        count: u32,
        at: DateTime<Utc>,
    },
    StepCompleted {
        index: usize,
        current_step: usize,
        at: DateTime<Utc>,
    },
    StepUncompleted {
        index: usize,
        current_step: usize,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        elapsed_seconds: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        format: WorkoutFormat,
        phase: Phase,
        is_paused: bool,
        remaining_seconds: u32,
        elapsed_seconds: u32,
        progress: Progress,
        exercise: String,
        rounds_completed_manually: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::Cue { cue, .. } => Some(*cue),
            _ => None,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Event::SessionCompleted { .. })
    }
}
