use serde::{Deserialize, Serialize};

use super::phase::{Phase, Progress};
use super::plan::{PhasePlan, Transition};
use crate::model::WorkoutFormat;
use crate::notes::EmomSettings;

pub const MINUTE_SECONDS: u32 = 60;

/// Every minute on the minute. Each minute is one work period; the due
/// exercise rotates every `rotate_every` minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmomPlan {
    settings: EmomSettings,
    exercise_count: usize,
}

impl EmomPlan {
    pub fn new(settings: EmomSettings, exercise_count: usize) -> Self {
        Self {
            settings,
            exercise_count,
        }
    }

    pub fn settings(&self) -> &EmomSettings {
        &self.settings
    }

    /// Exercise due during 1-based `minute`.
    pub fn exercise_for_minute(&self, minute: u32) -> usize {
        if self.exercise_count == 0 {
            return 0;
        }
        let every = self.settings.rotate_every.max(1);
        (minute.saturating_sub(1) / every) as usize % self.exercise_count
    }
}

impl PhasePlan for EmomPlan {
    fn format(&self) -> WorkoutFormat {
        WorkoutFormat::Emom
    }

    fn phase_seconds(&self, phase: Phase, _progress: &Progress) -> u32 {
        match phase {
            Phase::Work => MINUTE_SECONDS,
            _ => 0,
        }
    }

    fn beep_threshold(&self) -> u32 {
        3
    }

    fn exercise_index(&self, progress: &Progress) -> usize {
        self.exercise_for_minute(progress.minute)
    }

    fn on_expired(&self, phase: Phase, progress: &Progress) -> Transition {
        match phase {
            Phase::Work | Phase::Rest | Phase::RoundRest
                if progress.minute < self.settings.minutes =>
            {
                let minute = progress.minute + 1;
                Transition::Enter {
                    phase: Phase::Work,
                    seconds: MINUTE_SECONDS,
                    progress: Progress {
                        minute,
                        exercise_index: self.exercise_for_minute(minute),
                        ..*progress
                    },
                }
            }
            _ => Transition::Complete,
        }
    }
}
