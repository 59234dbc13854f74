use serde::{Deserialize, Serialize};

use super::phase::{Phase, Progress};
use super::plan::{PhasePlan, Transition};
use crate::model::WorkoutFormat;
use crate::notes::AmrapSettings;

/// As many rounds as possible inside a fixed window, optionally repeated
/// with rest between repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrapPlan {
    settings: AmrapSettings,
}

impl AmrapPlan {
    pub fn new(settings: AmrapSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AmrapSettings {
        &self.settings
    }
}

impl PhasePlan for AmrapPlan {
    fn format(&self) -> WorkoutFormat {
        WorkoutFormat::Amrap
    }

    fn phase_seconds(&self, phase: Phase, _progress: &Progress) -> u32 {
        match phase {
            Phase::Work => self.settings.total_seconds,
            Phase::Rest | Phase::RoundRest => self.settings.round_rest_seconds,
            _ => 0,
        }
    }

    fn exercise_index(&self, _progress: &Progress) -> usize {
        0
    }

    fn on_expired(&self, phase: Phase, progress: &Progress) -> Transition {
        let next_round = Progress {
            round: progress.round + 1,
            ..*progress
        };
        match phase {
            Phase::Work if progress.round < self.settings.rounds => {
                if self.settings.round_rest_seconds > 0 {
                    Transition::Enter {
                        phase: Phase::RoundRest,
                        seconds: self.settings.round_rest_seconds,
                        progress: *progress,
                    }
                } else {
                    Transition::Enter {
                        phase: Phase::Work,
                        seconds: self.settings.total_seconds,
                        progress: next_round,
                    }
                }
            }
            Phase::Rest | Phase::RoundRest => Transition::Enter {
                phase: Phase::Work,
                seconds: self.settings.total_seconds,
                progress: next_round,
            },
            _ => Transition::Complete,
        }
    }
}
