use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::exercise::BlockExercise;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "AMRAP")]
    Amrap,
    #[serde(rename = "EMOM")]
    Emom,
    #[serde(rename = "For Time")]
    ForTime,
    #[serde(rename = "Tabata")]
    Tabata,
    #[serde(rename = "Circuit")]
    Circuit,
    #[serde(rename = "Mobility")]
    Mobility,
    #[serde(rename = "Fitness Assessment")]
    FitnessAssessment,
}

impl BlockType {
    /// The interval timer used for this block, if it has one.
    pub fn timer_format(self) -> Option<WorkoutFormat> {
        match self {
            BlockType::Amrap => Some(WorkoutFormat::Amrap),
            BlockType::Emom => Some(WorkoutFormat::Emom),
            BlockType::ForTime => Some(WorkoutFormat::ForTime),
            BlockType::Tabata => Some(WorkoutFormat::Tabata),
            BlockType::Circuit | BlockType::Mobility | BlockType::FitnessAssessment => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockType::Amrap => "AMRAP",
            BlockType::Emom => "EMOM",
            BlockType::ForTime => "For Time",
            BlockType::Tabata => "Tabata",
            BlockType::Circuit => "Circuit",
            BlockType::Mobility => "Mobility",
            BlockType::FitnessAssessment => "Fitness Assessment",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four timed workout formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutFormat {
    Amrap,
    Emom,
    ForTime,
    Tabata,
}

impl WorkoutFormat {
    pub const ALL: [WorkoutFormat; 4] = [
        WorkoutFormat::Amrap,
        WorkoutFormat::Emom,
        WorkoutFormat::ForTime,
        WorkoutFormat::Tabata,
    ];

    pub fn block_type(self) -> BlockType {
        match self {
            WorkoutFormat::Amrap => BlockType::Amrap,
            WorkoutFormat::Emom => BlockType::Emom,
            WorkoutFormat::ForTime => BlockType::ForTime,
            WorkoutFormat::Tabata => BlockType::Tabata,
        }
    }
}

impl fmt::Display for WorkoutFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.block_type().as_str())
    }
}

impl std::str::FromStr for WorkoutFormat {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "amrap" => Ok(WorkoutFormat::Amrap),
            "emom" => Ok(WorkoutFormat::Emom),
            "for_time" | "fortime" => Ok(WorkoutFormat::ForTime),
            "tabata" => Ok(WorkoutFormat::Tabata),
            _ => Err(ValidationError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Structured timer configuration written by the admin form.
///
/// Every field is optional; anything left out is recovered from the block
/// notes or falls back to the format default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    #[serde(default)]
    pub total_seconds: Option<u32>,
    #[serde(default)]
    pub work_seconds: Option<u32>,
    #[serde(default)]
    pub rest_seconds: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    #[serde(default)]
    pub rotate_every_minutes: Option<u32>,
    #[serde(default)]
    pub rounds: Option<u32>,
    #[serde(default)]
    pub round_rest_seconds: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutBlock {
    #[serde(default)]
    pub id: Option<String>,
    pub block_type: BlockType,
    #[serde(default)]
    pub block_rounds: Option<u32>,
    /// Free text such as `"60s"` or `"1 min"`.
    #[serde(default)]
    pub round_rest: Option<String>,
    #[serde(default)]
    pub block_notes: String,
    #[serde(default)]
    pub timer: Option<TimerSettings>,
    #[serde(default)]
    pub exercises: Vec<BlockExercise>,
}

impl WorkoutBlock {
    pub fn new(block_type: BlockType) -> Self {
        Self {
            id: None,
            block_type,
            block_rounds: None,
            round_rest: None,
            block_notes: String::new(),
            timer: None,
            exercises: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.block_notes = notes.into();
        self
    }

    pub fn with_exercises(mut self, exercises: Vec<BlockExercise>) -> Self {
        self.exercises = exercises;
        self
    }

    /// Exercises in progression order.
    pub fn exercises(&self) -> Vec<&BlockExercise> {
        let mut sorted: Vec<&BlockExercise> = self.exercises.iter().collect();
        sorted.sort_by_key(|e| e.order);
        sorted
    }

    /// Check that exercise `order` values are unique.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for slot in &self.exercises {
            if !seen.insert(slot.order) {
                return Err(ValidationError::DuplicateOrder {
                    block: self.id.clone().unwrap_or_else(|| self.block_type.to_string()),
                    order: slot.order,
                });
            }
        }
        Ok(())
    }
}
