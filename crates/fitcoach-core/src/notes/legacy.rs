//! Regex recovery of timer settings from free-text block notes.

use std::sync::OnceLock;

use regex::Regex;

use super::{AmrapSettings, EmomSettings, FormatSettings, FormatSource, TabataSettings};
use crate::model::{WorkoutBlock, WorkoutFormat};

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("notes pattern is a valid regex"))
}

fn every_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"(?i)\bevery\s+(?:(\d+|one|two|three|other)\s*)?(?:-\s*)?min(?:ute)?s?\b|\be(\d+)mom\b",
    )
}

fn minutes_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?i)(\d+)\s*(?:-\s*)?min(?:ute)?s?\b")
}

fn format_minutes_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?i)\b(?:amrap|emom)\s*(\d+)\b")
}

fn seconds_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?i)(\d+)\s*(?:s|sec|secs|seconds?)\b")
}

fn work_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"(?i)(\d+)\s*(?:s|sec|secs|seconds?)?\s*(?:of\s+)?(?:work|on)\b|\bwork\s*:?\s*(\d+)",
    )
}

fn rest_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(
        &CELL,
        r"(?i)(\d+)\s*(?:s|sec|secs|seconds?)?\s*(?:of\s+)?(?:rest|off)\b|\brest\s*:?\s*(\d+)",
    )
}

fn pair_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"\b(\d+)\s*/\s*(\d+)\b")
}

fn sets_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"(?i)(\d+)\s*(?:x\s*)?(?:sets|rounds)\b|\bx\s*(\d+)\b")
}

fn clock_re() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    regex(&CELL, r"^(\d+):([0-5]\d)$")
}

/// First capture group that matched, parsed as a number.
fn first_number(re: &Regex, text: &str) -> Option<u32> {
    let caps = re.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .find_map(|m| m.as_str().parse().ok())
}

fn word_number(word: &str) -> Option<u32> {
    match word.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" | "other" => Some(2),
        "three" => Some(3),
        digits => digits.parse().ok(),
    }
}

/// Parse a short duration such as `"60s"`, `"1 min"`, `"1:30"` or `"90"`.
///
/// Durations that do not fit in a `u32` count as unparsed.
pub fn parse_duration_text(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(caps) = clock_re().captures(text) {
        let minutes: u32 = caps[1].parse().ok()?;
        let seconds: u32 = caps[2].parse().ok()?;
        return minutes.checked_mul(60)?.checked_add(seconds);
    }
    let minutes = first_number(minutes_re(), text);
    let seconds = first_number(seconds_re(), text);
    if minutes.is_some() || seconds.is_some() {
        return minutes
            .unwrap_or(0)
            .checked_mul(60)?
            .checked_add(seconds.unwrap_or(0));
    }
    text.parse().ok()
}

/// Legacy adapter reading timing out of `block_notes`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyNotesParser;

impl LegacyNotesParser {
    /// Rotation period for EMOM exercises: 2 for "every 2 minutes",
    /// "every other minute" or "E2MOM", otherwise 1.
    pub fn rotate_every(&self, notes: &str) -> u32 {
        let Some(caps) = every_re().captures(notes) else {
            return 1;
        };
        let n = caps
            .get(1)
            .or_else(|| caps.get(2))
            .and_then(|m| word_number(m.as_str()))
            .unwrap_or(1);
        n.max(1)
    }

    /// Total minutes mentioned in the notes, ignoring any "every N min"
    /// rotation phrase.
    pub fn total_minutes(&self, notes: &str) -> Option<u32> {
        let stripped = every_re().replace_all(notes, " ");
        first_number(minutes_re(), &stripped)
            .or_else(|| first_number(format_minutes_re(), &stripped))
            .filter(|m| *m > 0)
    }

    pub fn work_rest(&self, notes: &str) -> (Option<u32>, Option<u32>) {
        let work = first_number(work_re(), notes);
        let rest = first_number(rest_re(), notes);
        if work.is_some() || rest.is_some() {
            return (work, rest);
        }
        match pair_re().captures(notes) {
            Some(caps) => (caps[1].parse().ok(), caps[2].parse().ok()),
            None => (None, None),
        }
    }

    pub fn sets(&self, notes: &str) -> Option<u32> {
        first_number(sets_re(), notes).filter(|s| *s > 0)
    }
}

impl FormatSource for LegacyNotesParser {
    fn resolve(&self, block: &WorkoutBlock, format: WorkoutFormat) -> FormatSettings {
        let notes = block.block_notes.as_str();
        let round_rest = block
            .round_rest
            .as_deref()
            .and_then(parse_duration_text)
            .unwrap_or(0);

        match FormatSettings::defaults(format) {
            FormatSettings::Amrap(d) => FormatSettings::Amrap(AmrapSettings {
                total_seconds: self
                    .total_minutes(notes)
                    .and_then(|m| m.checked_mul(60))
                    .unwrap_or(d.total_seconds),
                rounds: block
                    .block_rounds
                    .filter(|r| *r > 0)
                    .or_else(|| self.sets(notes))
                    .unwrap_or(d.rounds),
                round_rest_seconds: round_rest,
            }),
            FormatSettings::Emom(d) => FormatSettings::Emom(EmomSettings {
                minutes: self.total_minutes(notes).unwrap_or(d.minutes),
                rotate_every: self.rotate_every(notes),
            }),
            FormatSettings::Tabata(d) => {
                let (work, rest) = self.work_rest(notes);
                FormatSettings::Tabata(TabataSettings {
                    work_seconds: work.filter(|w| *w > 0).unwrap_or(d.work_seconds),
                    rest_seconds: rest.unwrap_or(d.rest_seconds),
                    sets: self.sets(notes).unwrap_or(d.sets),
                    block_rest_seconds: round_rest,
                })
            }
            FormatSettings::ForTime => FormatSettings::ForTime,
        }
    }
}
