//! Format-specific transition tables.
//!
//! Each workout format implements [`PhasePlan`]; the session controller is
//! format-agnostic and only asks the plan what comes next when a phase
//! runs out.

use serde::{Deserialize, Serialize};

use super::amrap::AmrapPlan;
use super::emom::EmomPlan;
use super::for_time::ForTimePlan;
use super::phase::{Phase, Progress};
use super::tabata::{TabataBlock, TabataPlan};
use crate::error::ValidationError;
use crate::model::{WorkoutBlock, WorkoutDay, WorkoutFormat};
use crate::notes::{FormatSettings, FormatSource};

/// What happens when a countdown phase reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter {
        phase: Phase,
        seconds: u32,
        progress: Progress,
    },
    Complete,
}

pub trait PhasePlan {
    fn format(&self) -> WorkoutFormat;

    /// Full length of `phase` at `progress`. Zero for phases without a
    /// countdown.
    fn phase_seconds(&self, phase: Phase, progress: &Progress) -> u32;

    /// Beeps fire while `0 < remaining <= beep_threshold()`.
    fn beep_threshold(&self) -> u32 {
        5
    }

    /// The clock counts elapsed time up instead of down.
    fn counts_up(&self) -> bool {
        false
    }

    /// Exercise due at `progress`, as an index into the block's ordered
    /// exercise list.
    fn exercise_index(&self, progress: &Progress) -> usize;

    fn on_expired(&self, phase: Phase, progress: &Progress) -> Transition;

    /// Number of manually tracked steps (For Time only).
    fn step_count(&self) -> usize {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum WorkoutPlan {
    Amrap(AmrapPlan),
    Emom(EmomPlan),
    Tabata(TabataPlan),
    ForTime(ForTimePlan),
}

impl WorkoutPlan {
    fn inner(&self) -> &dyn PhasePlan {
        match self {
            WorkoutPlan::Amrap(p) => p,
            WorkoutPlan::Emom(p) => p,
            WorkoutPlan::Tabata(p) => p,
            WorkoutPlan::ForTime(p) => p,
        }
    }

    /// Build the plan for a single timed block.
    pub fn from_block(
        block: &WorkoutBlock,
        source: &dyn FormatSource,
    ) -> Result<Self, ValidationError> {
        let format = block
            .block_type
            .timer_format()
            .ok_or_else(|| ValidationError::UnsupportedFormat(block.block_type.to_string()))?;
        block.validate()?;
        let exercise_count = block.exercises.len();

        let plan = match source.resolve(block, format) {
            FormatSettings::Amrap(settings) => WorkoutPlan::Amrap(AmrapPlan::new(settings)),
            FormatSettings::Emom(settings) => {
                WorkoutPlan::Emom(EmomPlan::new(settings, exercise_count))
            }
            FormatSettings::Tabata(settings) => WorkoutPlan::Tabata(TabataPlan::new(vec![
                TabataBlock {
                    settings,
                    exercise_count,
                },
            ])),
            FormatSettings::ForTime => WorkoutPlan::ForTime(ForTimePlan::new(exercise_count)),
        };
        Ok(plan)
    }

    /// Build a plan for every block of `format` in a workout day.
    ///
    /// Tabata blocks are chained into one session that advances block by
    /// block; the other formats run their first matching block. Returns the
    /// plan together with the blocks it covers.
    pub fn from_day(
        day: &WorkoutDay,
        format: WorkoutFormat,
        source: &dyn FormatSource,
    ) -> Result<(Self, Vec<WorkoutBlock>), ValidationError> {
        let blocks: Vec<WorkoutBlock> = day
            .blocks
            .iter()
            .filter(|b| b.block_type.timer_format() == Some(format))
            .cloned()
            .collect();
        let first = blocks
            .first()
            .ok_or_else(|| ValidationError::EmptyCollection(format!("{format} blocks")))?;

        if format != WorkoutFormat::Tabata {
            let plan = Self::from_block(first, source)?;
            return Ok((plan, vec![first.clone()]));
        }

        let mut tabata = Vec::with_capacity(blocks.len());
        for block in &blocks {
            block.validate()?;
            if let FormatSettings::Tabata(settings) = source.resolve(block, format) {
                tabata.push(TabataBlock {
                    settings,
                    exercise_count: block.exercises.len(),
                });
            }
        }
        Ok((WorkoutPlan::Tabata(TabataPlan::new(tabata)), blocks))
    }
}

impl PhasePlan for WorkoutPlan {
    fn format(&self) -> WorkoutFormat {
        self.inner().format()
    }

    fn phase_seconds(&self, phase: Phase, progress: &Progress) -> u32 {
        self.inner().phase_seconds(phase, progress)
    }

    fn beep_threshold(&self) -> u32 {
        self.inner().beep_threshold()
    }

    fn counts_up(&self) -> bool {
        self.inner().counts_up()
    }

    fn exercise_index(&self, progress: &Progress) -> usize {
        self.inner().exercise_index(progress)
    }

    fn on_expired(&self, phase: Phase, progress: &Progress) -> Transition {
        self.inner().on_expired(phase, progress)
    }

    fn step_count(&self) -> usize {
        self.inner().step_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockExercise, BlockType, Exercise};
    use crate::notes::StructuredSource;

    fn exercises(n: usize) -> Vec<BlockExercise> {
        (0..n)
            .map(|i| BlockExercise::new(Exercise::named(format!("Move {i}")), i as u32 + 1))
            .collect()
    }

    #[test]
    fn untimed_blocks_are_rejected() {
        let block = WorkoutBlock::new(BlockType::Mobility);
        assert_eq!(
            WorkoutPlan::from_block(&block, &StructuredSource::new()),
            Err(ValidationError::UnsupportedFormat("Mobility".into()))
        );
    }

    #[test]
    fn from_block_picks_matching_plan() {
        let block = WorkoutBlock::new(BlockType::Emom)
            .with_notes("every 2 minutes for 10 minutes")
            .with_exercises(exercises(3));
        let plan = WorkoutPlan::from_block(&block, &StructuredSource::new()).unwrap();
        assert_eq!(plan.format(), WorkoutFormat::Emom);
        assert_eq!(plan.beep_threshold(), 3);
    }

    #[test]
    fn from_day_chains_tabata_blocks() {
        let day = WorkoutDay {
            id: None,
            program: "shred".into(),
            day_number: 1,
            title: "Intervals".into(),
            blocks: vec![
                WorkoutBlock::new(BlockType::Tabata).with_exercises(exercises(2)),
                WorkoutBlock::new(BlockType::Circuit),
                WorkoutBlock::new(BlockType::Tabata).with_exercises(exercises(1)),
            ],
        };
        let (plan, blocks) =
            WorkoutPlan::from_day(&day, WorkoutFormat::Tabata, &StructuredSource::new()).unwrap();
        assert_eq!(blocks.len(), 2);
        match plan {
            WorkoutPlan::Tabata(t) => assert_eq!(t.block_count(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_day_without_matching_blocks_fails() {
        let day = WorkoutDay {
            id: None,
            program: "shred".into(),
            day_number: 2,
            title: String::new(),
            blocks: vec![WorkoutBlock::new(BlockType::Circuit)],
        };
        assert!(WorkoutPlan::from_day(&day, WorkoutFormat::Amrap, &StructuredSource::new()).is_err());
    }
}
