use serde::{Deserialize, Serialize};

use super::phase::{Phase, Progress};
use super::plan::{PhasePlan, Transition};
use crate::model::WorkoutFormat;

/// Work through the steps as fast as possible. The clock counts up and the
/// session ends when every step is marked done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForTimePlan {
    steps: usize,
}

impl ForTimePlan {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }
}

impl PhasePlan for ForTimePlan {
    fn format(&self) -> WorkoutFormat {
        WorkoutFormat::ForTime
    }

    fn phase_seconds(&self, _phase: Phase, _progress: &Progress) -> u32 {
        0
    }

    fn counts_up(&self) -> bool {
        true
    }

    fn exercise_index(&self, progress: &Progress) -> usize {
        progress.exercise_index
    }

    fn on_expired(&self, _phase: Phase, _progress: &Progress) -> Transition {
        Transition::Complete
    }

    fn step_count(&self) -> usize {
        self.steps
    }
}
