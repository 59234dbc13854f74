//! Timer settings resolution.
//!
//! Blocks authored with the structured admin form carry explicit
//! [`TimerSettings`]. Older blocks only describe their timing in free-text
//! notes ("12 min AMRAP", "20s work / 10s rest x 8"), which the
//! [`LegacyNotesParser`] recovers. Whatever neither source provides falls
//! back to the per-format defaults below. Resolution never fails.

mod legacy;

pub use legacy::{parse_duration_text, LegacyNotesParser};

use serde::{Deserialize, Serialize};

use crate::model::{TimerSettings, WorkoutBlock, WorkoutFormat};

pub const DEFAULT_AMRAP_SECONDS: u32 = 720;
pub const DEFAULT_EMOM_MINUTES: u32 = 12;
pub const DEFAULT_TABATA_WORK_SECONDS: u32 = 20;
pub const DEFAULT_TABATA_REST_SECONDS: u32 = 10;
pub const DEFAULT_TABATA_SETS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmrapSettings {
    pub total_seconds: u32,
    pub rounds: u32,
    pub round_rest_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmomSettings {
    pub minutes: u32,
    /// The due exercise changes every `rotate_every` minutes (1 or 2).
    pub rotate_every: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabataSettings {
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub sets: u32,
    /// Rest between tabata blocks; 0 goes straight into the next block.
    pub block_rest_seconds: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum FormatSettings {
    Amrap(AmrapSettings),
    Emom(EmomSettings),
    Tabata(TabataSettings),
    ForTime,
}

impl FormatSettings {
    pub fn defaults(format: WorkoutFormat) -> Self {
        match format {
            WorkoutFormat::Amrap => FormatSettings::Amrap(AmrapSettings {
                total_seconds: DEFAULT_AMRAP_SECONDS,
                rounds: 1,
                round_rest_seconds: 0,
            }),
            WorkoutFormat::Emom => FormatSettings::Emom(EmomSettings {
                minutes: DEFAULT_EMOM_MINUTES,
                rotate_every: 1,
            }),
            WorkoutFormat::Tabata => FormatSettings::Tabata(TabataSettings {
                work_seconds: DEFAULT_TABATA_WORK_SECONDS,
                rest_seconds: DEFAULT_TABATA_REST_SECONDS,
                sets: DEFAULT_TABATA_SETS,
                block_rest_seconds: 0,
            }),
            WorkoutFormat::ForTime => FormatSettings::ForTime,
        }
    }
}

/// Where a block's timer settings come from.
pub trait FormatSource {
    fn resolve(&self, block: &WorkoutBlock, format: WorkoutFormat) -> FormatSettings;
}

/// Structured settings first, legacy notes for anything left unset.
#[derive(Debug, Default, Clone)]
pub struct StructuredSource {
    fallback: LegacyNotesParser,
}

impl StructuredSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatSource for StructuredSource {
    fn resolve(&self, block: &WorkoutBlock, format: WorkoutFormat) -> FormatSettings {
        let parsed = self.fallback.resolve(block, format);
        let Some(timer) = block.timer.as_ref() else {
            return parsed;
        };
        overlay(parsed, timer)
    }
}

fn overlay(parsed: FormatSettings, timer: &TimerSettings) -> FormatSettings {
    match parsed {
        FormatSettings::Amrap(s) => FormatSettings::Amrap(AmrapSettings {
            total_seconds: positive(timer.total_seconds).unwrap_or(s.total_seconds),
            rounds: positive(timer.rounds).unwrap_or(s.rounds),
            round_rest_seconds: timer.round_rest_seconds.unwrap_or(s.round_rest_seconds),
        }),
        FormatSettings::Emom(s) => FormatSettings::Emom(EmomSettings {
            minutes: positive(timer.total_seconds.map(|secs| secs / 60)).unwrap_or(s.minutes),
            rotate_every: positive(timer.rotate_every_minutes).unwrap_or(s.rotate_every),
        }),
        FormatSettings::Tabata(s) => FormatSettings::Tabata(TabataSettings {
            work_seconds: positive(timer.work_seconds).unwrap_or(s.work_seconds),
            rest_seconds: timer.rest_seconds.unwrap_or(s.rest_seconds),
            sets: positive(timer.sets).unwrap_or(s.sets),
            block_rest_seconds: timer.round_rest_seconds.unwrap_or(s.block_rest_seconds),
        }),
        FormatSettings::ForTime => FormatSettings::ForTime,
    }
}

fn positive(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}
