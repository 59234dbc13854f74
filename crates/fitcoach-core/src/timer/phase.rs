use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// Optional lead-in before the first work period.
    Preparation,
    Work,
    Rest,
    /// Rest between rounds (AMRAP) or between blocks (Tabata).
    RoundRest,
    Complete,
}

impl Phase {
    /// A session in this phase ticks unless paused.
    pub fn is_active(self) -> bool {
        !matches!(self, Phase::Idle | Phase::Complete)
    }

    /// Phases whose last seconds are marked with a beep.
    pub fn is_cued(self) -> bool {
        matches!(self, Phase::Work | Phase::Rest | Phase::RoundRest)
    }

    /// Phases that hand over to a work period when they run out.
    pub fn leads_into_work(self) -> bool {
        matches!(self, Phase::Preparation | Phase::Rest | Phase::RoundRest)
    }
}

/// Position within a workout. Rounds, sets and minutes count from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub round: u32,
    pub block_index: usize,
    pub exercise_index: usize,
    pub set: u32,
    pub minute: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            round: 1,
            block_index: 0,
            exercise_index: 0,
            set: 1,
            minute: 1,
        }
    }
}
