use serde::{Deserialize, Serialize};

use super::phase::{Phase, Progress};
use super::plan::{PhasePlan, Transition};
use crate::model::WorkoutFormat;
use crate::notes::TabataSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabataBlock {
    pub settings: TabataSettings,
    pub exercise_count: usize,
}

/// Work/rest intervals for a fixed number of sets, block after block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabataPlan {
    blocks: Vec<TabataBlock>,
}

impl TabataPlan {
    pub fn new(blocks: Vec<TabataBlock>) -> Self {
        Self { blocks }
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn block(&self, index: usize) -> Option<&TabataBlock> {
        self.blocks.get(index)
    }

    fn is_last_block(&self, index: usize) -> bool {
        index + 1 >= self.blocks.len()
    }

    fn work(&self, progress: Progress) -> Transition {
        Transition::Enter {
            phase: Phase::Work,
            seconds: self
                .block(progress.block_index)
                .map(|b| b.settings.work_seconds)
                .unwrap_or(0),
            progress: Progress {
                exercise_index: self.exercise_index(&progress),
                ..progress
            },
        }
    }
}

impl PhasePlan for TabataPlan {
    fn format(&self) -> WorkoutFormat {
        WorkoutFormat::Tabata
    }

    fn phase_seconds(&self, phase: Phase, progress: &Progress) -> u32 {
        let Some(block) = self.block(progress.block_index) else {
            return 0;
        };
        match phase {
            Phase::Work => block.settings.work_seconds,
            Phase::Rest => block.settings.rest_seconds,
            // Rest between blocks belongs to the block just finished.
            Phase::RoundRest => progress
                .block_index
                .checked_sub(1)
                .and_then(|i| self.block(i))
                .map(|b| b.settings.block_rest_seconds)
                .unwrap_or(0),
            _ => 0,
        }
    }

    fn exercise_index(&self, progress: &Progress) -> usize {
        match self.block(progress.block_index) {
            Some(block) if block.exercise_count > 0 => {
                progress.set.saturating_sub(1) as usize % block.exercise_count
            }
            _ => 0,
        }
    }

    fn on_expired(&self, phase: Phase, progress: &Progress) -> Transition {
        let Some(block) = self.block(progress.block_index) else {
            return Transition::Complete;
        };
        let sets = block.settings.sets;

        match phase {
            Phase::Work => {
                if progress.set >= sets && self.is_last_block(progress.block_index) {
                    return Transition::Complete;
                }
                Transition::Enter {
                    phase: Phase::Rest,
                    seconds: block.settings.rest_seconds,
                    progress: *progress,
                }
            }
            Phase::Rest if progress.set < sets => self.work(Progress {
                set: progress.set + 1,
                ..*progress
            }),
            Phase::Rest => {
                if self.is_last_block(progress.block_index) {
                    return Transition::Complete;
                }
                let next = Progress {
                    block_index: progress.block_index + 1,
                    set: 1,
                    exercise_index: 0,
                    ..*progress
                };
                if block.settings.block_rest_seconds > 0 {
                    Transition::Enter {
                        phase: Phase::RoundRest,
                        seconds: block.settings.block_rest_seconds,
                        progress: next,
                    }
                } else {
                    self.work(next)
                }
            }
            Phase::RoundRest => self.work(*progress),
            _ => Transition::Complete,
        }
    }
}
