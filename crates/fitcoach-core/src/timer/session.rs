//! Session controller.
//!
//! Holds one [`TimerSession`] and applies user commands and clock ticks to
//! it. The controller is synchronous and owns no clock: the caller (see
//! [`SessionRunner`](super::SessionRunner)) delivers one `tick()` per second
//! while [`SessionController::is_running`] is true.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> [Preparation] -> Work <-> (Rest | RoundRest) -> Complete
//! ```
//!
//! Reset is two-tiered: the first call restores the current phase's timer
//! and pauses, a second consecutive call (no `start` in between) returns to
//! Idle.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::phase::{Phase, Progress};
use super::plan::{PhasePlan, Transition, WorkoutPlan};
use crate::auth::Caller;
use crate::events::{Cue, Event};
use crate::model::{WorkoutBlock, WorkoutFormat};

pub const DEFAULT_PREPARATION_SECONDS: u32 = 5;
pub const DEFAULT_START_SOUND_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Lead-in before the first work period; 0 skips it.
    pub preparation_seconds: u32,
    pub start_sound_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preparation_seconds: DEFAULT_PREPARATION_SECONDS,
            start_sound_delay_ms: DEFAULT_START_SOUND_DELAY_MS,
        }
    }
}

/// Ephemeral state of one workout view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSession {
    pub phase: Phase,
    pub remaining_seconds: u32,
    /// Seconds spent running since the first work period began; the lead-in
    /// is not counted. The displayed clock for For Time.
    pub elapsed_seconds: u32,
    pub progress: Progress,
    pub is_paused: bool,
    /// AMRAP rounds counted by the athlete, independent of the clock.
    pub rounds_completed_manually: u32,
    pub completed_steps: BTreeSet<usize>,
    pub current_step: usize,
    /// `(block_index, exercise_index)` pairs showing their modification.
    pub show_modified: BTreeSet<(usize, usize)>,
}

impl TimerSession {
    fn initial(plan: &WorkoutPlan) -> Self {
        let progress = Progress::default();
        Self {
            phase: Phase::Idle,
            remaining_seconds: plan.phase_seconds(Phase::Work, &progress),
            elapsed_seconds: 0,
            progress,
            is_paused: false,
            rounds_completed_manually: 0,
            completed_steps: BTreeSet::new(),
            current_step: 0,
            show_modified: BTreeSet::new(),
        }
    }

    pub fn current_round(&self) -> u32 {
        self.progress.round
    }

    pub fn current_block_index(&self) -> usize {
        self.progress.block_index
    }

    pub fn current_exercise_index(&self) -> usize {
        self.progress.exercise_index
    }
}

#[derive(Debug, Clone)]
pub struct SessionController {
    plan: WorkoutPlan,
    blocks: Vec<WorkoutBlock>,
    config: SessionConfig,
    session: TimerSession,
    /// Set by a phase-level reset; a second reset while set is a full reset.
    reset_armed: bool,
}

impl SessionController {
    /// `blocks` are the workout blocks the plan was built from, in plan
    /// order. They are only used to resolve exercise names.
    pub fn new(plan: WorkoutPlan, blocks: Vec<WorkoutBlock>, config: SessionConfig) -> Self {
        let session = TimerSession::initial(&plan);
        Self {
            plan,
            blocks,
            config,
            session,
            reset_armed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn format(&self) -> WorkoutFormat {
        self.plan.format()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// The clock should be ticking.
    pub fn is_running(&self) -> bool {
        self.session.phase.is_active() && !self.session.is_paused
    }

    pub fn is_complete(&self) -> bool {
        self.session.phase == Phase::Complete
    }

    /// Name of exercise `index` in the current block, honoring the
    /// show-modified toggle.
    pub fn display_name(&self, index: usize) -> Option<&str> {
        let block_index = self.session.progress.block_index;
        let block = self.blocks.get(block_index)?;
        let slot = *block.exercises().get(index)?;
        let show_modified = self.session.show_modified.contains(&(block_index, index));
        Some(slot.display_name(show_modified))
    }

    /// Name of the exercise currently due.
    pub fn current_exercise(&self) -> String {
        let index = if self.plan.counts_up() {
            self.session.current_step
        } else {
            self.session.progress.exercise_index
        };
        self.display_name(index).unwrap_or_default().to_string()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            format: self.format(),
            phase: self.session.phase,
            is_paused: self.session.is_paused,
            remaining_seconds: self.session.remaining_seconds,
            elapsed_seconds: self.session.elapsed_seconds,
            progress: self.session.progress,
            exercise: self.current_exercise(),
            rounds_completed_manually: self.session.rounds_completed_manually,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<Event> {
        self.reset_armed = false;
        match self.session.phase {
            Phase::Complete => Vec::new(),
            Phase::Idle => {
                let (phase, seconds) = if self.config.preparation_seconds > 0 {
                    (Phase::Preparation, self.config.preparation_seconds)
                } else {
                    (
                        Phase::Work,
                        self.plan.phase_seconds(Phase::Work, &self.session.progress),
                    )
                };
                self.session.is_paused = false;
                let mut events = vec![Event::SessionStarted {
                    format: self.format(),
                    phase,
                    remaining_seconds: seconds,
                    at: Utc::now(),
                }];
                let progress = self.session.progress;
                events.push(self.enter(phase, seconds, progress));
                events
            }
            _ if self.session.is_paused => {
                self.session.is_paused = false;
                vec![Event::SessionResumed {
                    remaining_seconds: self.session.remaining_seconds,
                    at: Utc::now(),
                }]
            }
            _ => Vec::new(),
        }
    }

    pub fn pause(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        self.session.is_paused = true;
        vec![Event::SessionPaused {
            remaining_seconds: self.session.remaining_seconds,
            at: Utc::now(),
        }]
    }

    /// Alias of `start` that only acts on a paused session.
    pub fn resume(&mut self) -> Vec<Event> {
        if self.session.phase.is_active() && self.session.is_paused {
            self.start()
        } else {
            Vec::new()
        }
    }

    /// Two-tier reset: phase timer first, whole session on the second
    /// consecutive call.
    pub fn reset(&mut self) -> Vec<Event> {
        if self.reset_armed || !self.session.phase.is_active() {
            self.reset_all()
        } else {
            self.reset_once()
        }
    }

    /// Restore the current phase's timer and pause. Round, block, set and
    /// step progress are kept.
    pub fn reset_once(&mut self) -> Vec<Event> {
        if !self.session.phase.is_active() {
            return self.reset_all();
        }
        self.session.remaining_seconds = match self.session.phase {
            Phase::Preparation => self.config.preparation_seconds,
            phase => self.plan.phase_seconds(phase, &self.session.progress),
        };
        if self.plan.counts_up() {
            self.session.elapsed_seconds = 0;
        }
        self.session.is_paused = true;
        self.reset_armed = true;
        vec![Event::TimerReset {
            full: false,
            at: Utc::now(),
        }]
    }

    /// Back to Idle, round 1, block 0.
    pub fn reset_all(&mut self) -> Vec<Event> {
        let from = self.session.phase;
        self.session = TimerSession::initial(&self.plan);
        self.reset_armed = false;
        let mut events = vec![Event::TimerReset {
            full: true,
            at: Utc::now(),
        }];
        if from != Phase::Idle {
            events.push(Event::PhaseChanged {
                from,
                to: Phase::Idle,
                remaining_seconds: self.session.remaining_seconds,
                progress: self.session.progress,
                at: Utc::now(),
            });
        }
        events
    }

    /// End the current phase now, as if its countdown had expired.
    /// Admin only; ignored for anyone else.
    pub fn skip_phase(&mut self, caller: &Caller) -> Vec<Event> {
        if !caller.is_admin() {
            debug!(role = ?caller.role, "skip_phase ignored for non-admin caller");
            return Vec::new();
        }
        if !self.session.phase.is_active() {
            return Vec::new();
        }
        if self.plan.counts_up() && self.session.phase != Phase::Preparation {
            return self.complete();
        }
        self.session.remaining_seconds = 0;
        self.expire()
    }

    /// Jump straight to Complete. Admin only; ignored for anyone else.
    pub fn skip_to_end(&mut self, caller: &Caller) -> Vec<Event> {
        if !caller.is_admin() {
            debug!(role = ?caller.role, "skip_to_end ignored for non-admin caller");
            return Vec::new();
        }
        if self.is_complete() {
            return Vec::new();
        }
        self.complete()
    }

    pub fn increment_round_counter(&mut self) -> Vec<Event> {
        if self.format() != WorkoutFormat::Amrap {
            return Vec::new();
        }
        self.session.rounds_completed_manually += 1;
        vec![self.round_counter_event()]
    }

    /// Never goes below zero.
    pub fn decrement_round_counter(&mut self) -> Vec<Event> {
        if self.format() != WorkoutFormat::Amrap {
            return Vec::new();
        }
        self.session.rounds_completed_manually =
            self.session.rounds_completed_manually.saturating_sub(1);
        vec![self.round_counter_event()]
    }

    /// Mark a For Time step done. Completing the last open step ends the
    /// session.
    pub fn complete_step(&mut self, index: usize) -> Vec<Event> {
        let steps = self.plan.step_count();
        if index >= steps || self.is_complete() {
            return Vec::new();
        }
        if !self.session.completed_steps.insert(index) {
            return Vec::new();
        }
        self.session.current_step = self.step_pointer();
        let mut events = vec![Event::StepCompleted {
            index,
            current_step: self.session.current_step,
            at: Utc::now(),
        }];
        if self.session.completed_steps.len() == steps {
            events.extend(self.complete());
        }
        events
    }

    pub fn uncomplete_step(&mut self, index: usize) -> Vec<Event> {
        if self.is_complete() || !self.session.completed_steps.remove(&index) {
            return Vec::new();
        }
        self.session.current_step = self.step_pointer();
        vec![Event::StepUncompleted {
            index,
            current_step: self.session.current_step,
            at: Utc::now(),
        }]
    }

    /// Flip the show-modified flag for exercise `index` of the current
    /// block. Returns the new flag.
    pub fn toggle_modified(&mut self, index: usize) -> bool {
        let key = (self.session.progress.block_index, index);
        if self.session.show_modified.remove(&key) {
            false
        } else {
            self.session.show_modified.insert(key);
            true
        }
    }

    /// Advance the clock by one second. No-op unless running.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }
        if self.session.phase != Phase::Preparation {
            self.session.elapsed_seconds = self.session.elapsed_seconds.saturating_add(1);
        }

        if self.plan.counts_up() && self.session.phase == Phase::Work {
            return Vec::new();
        }

        self.session.remaining_seconds = self.session.remaining_seconds.saturating_sub(1);
        let remaining = self.session.remaining_seconds;
        if remaining > 0 {
            if self.session.phase.is_cued() && remaining <= self.plan.beep_threshold() {
                return vec![cue_event(Cue::Beep)];
            }
            return Vec::new();
        }
        self.expire()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn expire(&mut self) -> Vec<Event> {
        let from = self.session.phase;
        let mut transition = if from == Phase::Preparation {
            let progress = self.session.progress;
            Transition::Enter {
                phase: Phase::Work,
                seconds: self.plan.phase_seconds(Phase::Work, &progress),
                progress,
            }
        } else {
            self.plan.on_expired(from, &self.session.progress)
        };

        // Zero-length rests are passed through without stopping.
        while let Transition::Enter {
            phase,
            seconds: 0,
            progress,
        } = transition
        {
            if phase == Phase::Work {
                break;
            }
            transition = self.plan.on_expired(phase, &progress);
        }

        match transition {
            Transition::Complete => self.complete(),
            Transition::Enter {
                phase,
                seconds,
                progress,
            } => {
                let mut events = vec![self.enter(phase, seconds, progress)];
                if phase == Phase::Work && from.leads_into_work() {
                    events.push(cue_event(Cue::StartSound {
                        delay_ms: self.config.start_sound_delay_ms,
                    }));
                }
                events
            }
        }
    }

    fn enter(&mut self, phase: Phase, seconds: u32, progress: Progress) -> Event {
        let from = self.session.phase;
        self.session.phase = phase;
        self.session.remaining_seconds = seconds;
        self.session.progress = progress;
        debug!(?from, to = ?phase, seconds, round = progress.round, block = progress.block_index, "phase changed");
        Event::PhaseChanged {
            from,
            to: phase,
            remaining_seconds: seconds,
            progress,
            at: Utc::now(),
        }
    }

    fn complete(&mut self) -> Vec<Event> {
        let from = self.session.phase;
        self.session.phase = Phase::Complete;
        self.session.remaining_seconds = 0;
        self.session.is_paused = false;
        self.reset_armed = false;
        debug!(?from, elapsed = self.session.elapsed_seconds, "session complete");
        vec![
            Event::PhaseChanged {
                from,
                to: Phase::Complete,
                remaining_seconds: 0,
                progress: self.session.progress,
                at: Utc::now(),
            },
            Event::SessionCompleted {
                elapsed_seconds: self.session.elapsed_seconds,
                at: Utc::now(),
            },
        ]
    }

    /// `min(max_completed + 1, last_index)`, or 0 with nothing completed.
    fn step_pointer(&self) -> usize {
        let last = self.plan.step_count().saturating_sub(1);
        self.session
            .completed_steps
            .iter()
            .next_back()
            .map(|max| (max + 1).min(last))
            .unwrap_or(0)
    }

    fn round_counter_event(&self) -> Event {
        Event::RoundCounterChanged {
            count: self.session.rounds_completed_manually,
            at: Utc::now(),
        }
    }
}

fn cue_event(cue: Cue) -> Event {
    Event::Cue {
        cue,
        at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockExercise, BlockType, Exercise};
    use crate::notes::{AmrapSettings, EmomSettings, TabataSettings};
    use crate::timer::{AmrapPlan, EmomPlan, ForTimePlan, TabataBlock, TabataPlan};

    const NO_PREP: SessionConfig = SessionConfig {
        preparation_seconds: 0,
        start_sound_delay_ms: 1000,
    };

    fn amrap(rounds: u32, rest: u32) -> SessionController {
        let plan = WorkoutPlan::Amrap(AmrapPlan::new(AmrapSettings {
            total_seconds: 10,
            rounds,
            round_rest_seconds: rest,
        }));
        SessionController::new(plan, Vec::new(), NO_PREP)
    }

    fn tabata(blocks: usize) -> SessionController {
        let block = TabataBlock {
            settings: TabataSettings {
                work_seconds: 20,
                rest_seconds: 10,
                sets: 8,
                block_rest_seconds: 0,
            },
            exercise_count: 1,
        };
        let plan = WorkoutPlan::Tabata(TabataPlan::new(vec![block; blocks]));
        SessionController::new(plan, Vec::new(), NO_PREP)
    }

    fn for_time(steps: usize) -> SessionController {
        SessionController::new(WorkoutPlan::ForTime(ForTimePlan::new(steps)), Vec::new(), NO_PREP)
    }

    fn tick_n(c: &mut SessionController, n: u32) -> Vec<Event> {
        (0..n).flat_map(|_| c.tick()).collect()
    }

    fn cues(events: &[Event]) -> Vec<Cue> {
        events.iter().filter_map(Event::cue).collect()
    }

    #[test]
    fn start_pause_resume() {
        let mut c = amrap(1, 0);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(!c.start().is_empty());
        assert!(c.is_running());
        assert!(!c.pause().is_empty());
        assert!(!c.is_running());
        assert!(c.tick().is_empty());
        assert_eq!(c.session().remaining_seconds, 10);
        assert!(!c.resume().is_empty());
        assert!(c.is_running());
    }

    #[test]
    fn resume_is_noop_unless_paused() {
        let mut c = amrap(1, 0);
        assert!(c.resume().is_empty());
        c.start();
        assert!(c.resume().is_empty());
    }

    #[test]
    fn preparation_precedes_work_and_triggers_start_sound() {
        let plan = WorkoutPlan::Amrap(AmrapPlan::new(AmrapSettings {
            total_seconds: 60,
            rounds: 1,
            round_rest_seconds: 0,
        }));
        let mut c = SessionController::new(plan, Vec::new(), SessionConfig::default());
        c.start();
        assert_eq!(c.phase(), Phase::Preparation);
        assert_eq!(c.session().remaining_seconds, 5);
        let events = tick_n(&mut c, 5);
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.session().remaining_seconds, 60);
        assert_eq!(cues(&events), vec![Cue::StartSound { delay_ms: 1000 }]);
    }

    #[test]
    fn remaining_decreases_by_one_per_tick() {
        let mut c = amrap(1, 0);
        c.start();
        for expected in (1..10).rev() {
            c.tick();
            assert_eq!(c.session().remaining_seconds, expected);
        }
    }

    #[test]
    fn beeps_in_last_five_seconds() {
        let mut c = amrap(2, 0);
        c.start();
        let events = tick_n(&mut c, 9);
        // Remaining 5, 4, 3, 2, 1.
        assert_eq!(cues(&events), vec![Cue::Beep; 5]);
    }

    #[test]
    fn amrap_single_round_completes_at_zero() {
        let mut c = amrap(1, 0);
        c.start();
        let events = tick_n(&mut c, 10);
        assert_eq!(c.phase(), Phase::Complete);
        assert!(events.iter().any(Event::is_completion));
        assert!(!c.is_running());
        assert!(c.tick().is_empty());
    }

    #[test]
    fn amrap_round_rest_leads_back_into_work_with_start_sound() {
        let mut c = amrap(2, 3);
        c.start();
        tick_n(&mut c, 10);
        assert_eq!(c.phase(), Phase::RoundRest);
        assert_eq!(c.session().current_round(), 1);
        let events = tick_n(&mut c, 3);
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.session().current_round(), 2);
        assert!(cues(&events).contains(&Cue::StartSound { delay_ms: 1000 }));
    }

    #[test]
    fn double_reset_keeps_then_clears_progress() {
        let mut c = amrap(5, 0);
        c.start();
        tick_n(&mut c, 20);
        tick_n(&mut c, 4);
        assert_eq!(c.session().current_round(), 3);
        assert_eq!(c.session().remaining_seconds, 6);

        c.reset();
        assert_eq!(c.session().current_round(), 3);
        assert_eq!(c.session().remaining_seconds, 10);
        assert_eq!(c.phase(), Phase::Work);
        assert!(!c.is_running());

        c.reset();
        assert_eq!(c.session().current_round(), 1);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn start_between_resets_disarms_full_reset() {
        let mut c = amrap(5, 0);
        c.start();
        tick_n(&mut c, 12);
        c.reset();
        c.start();
        c.reset();
        assert_eq!(c.session().current_round(), 2);
        assert_eq!(c.phase(), Phase::Work);
    }

    #[test]
    fn reset_from_complete_is_full() {
        let mut c = amrap(1, 0);
        c.start();
        tick_n(&mut c, 10);
        c.reset();
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.session().remaining_seconds, 10);
    }

    #[test]
    fn skip_to_end_requires_admin() {
        let mut c = amrap(3, 0);
        c.start();
        assert!(c.skip_to_end(&Caller::MEMBER).is_empty());
        assert_eq!(c.phase(), Phase::Work);
        let events = c.skip_to_end(&Caller::ADMIN);
        assert_eq!(c.phase(), Phase::Complete);
        assert!(events.iter().any(Event::is_completion));
    }

    #[test]
    fn skip_phase_expires_current_phase_for_admin_only() {
        let mut c = tabata(1);
        c.start();
        assert!(c.skip_phase(&Caller::MEMBER).is_empty());
        assert_eq!(c.phase(), Phase::Work);
        c.skip_phase(&Caller::ADMIN);
        assert_eq!(c.phase(), Phase::Rest);
        assert_eq!(c.session().remaining_seconds, 10);
    }

    #[test]
    fn round_counter_floors_at_zero() {
        let mut c = amrap(1, 0);
        c.increment_round_counter();
        for _ in 0..5 {
            c.decrement_round_counter();
        }
        assert_eq!(c.session().rounds_completed_manually, 0);
        c.increment_round_counter();
        c.increment_round_counter();
        assert_eq!(c.session().rounds_completed_manually, 2);
    }

    #[test]
    fn round_counter_is_amrap_only() {
        let mut c = tabata(1);
        assert!(c.increment_round_counter().is_empty());
        assert_eq!(c.session().rounds_completed_manually, 0);
    }

    #[test]
    fn emom_exercise_rotates_every_two_minutes() {
        let exercises = (0..3)
            .map(|i| BlockExercise::new(Exercise::named(format!("E{i}")), i + 1))
            .collect();
        let block = WorkoutBlock::new(BlockType::Emom).with_exercises(exercises);
        let plan = WorkoutPlan::Emom(EmomPlan::new(
            EmomSettings {
                minutes: 12,
                rotate_every: 2,
            },
            3,
        ));
        let mut c = SessionController::new(plan, vec![block], NO_PREP);
        c.start();
        tick_n(&mut c, 4 * 60);
        assert_eq!(c.session().progress.minute, 5);
        // floor((5 - 1) / 2) % 3
        assert_eq!(c.session().current_exercise_index(), 2);
        assert_eq!(c.current_exercise(), "E2");
    }

    #[test]
    fn emom_beeps_from_three_seconds() {
        let plan = WorkoutPlan::Emom(EmomPlan::new(
            EmomSettings {
                minutes: 2,
                rotate_every: 1,
            },
            1,
        ));
        let mut c = SessionController::new(plan, Vec::new(), NO_PREP);
        c.start();
        let events = tick_n(&mut c, 60);
        assert_eq!(cues(&events), vec![Cue::Beep; 3]);
        assert_eq!(c.session().progress.minute, 2);
    }

    #[test]
    fn tabata_block_advances_after_last_rest() {
        let mut c = tabata(2);
        c.start();
        // 8 sets of 20s work + 10s rest.
        tick_n(&mut c, 8 * 30);
        assert_eq!(c.session().current_block_index(), 1);
        assert_eq!(c.session().progress.set, 1);
        assert_eq!(c.phase(), Phase::Work);
    }

    #[test]
    fn tabata_completes_after_final_work() {
        let mut c = tabata(1);
        c.start();
        tick_n(&mut c, 7 * 30 + 20);
        assert_eq!(c.phase(), Phase::Complete);
    }

    #[test]
    fn for_time_counts_up() {
        let mut c = for_time(3);
        c.start();
        tick_n(&mut c, 42);
        assert_eq!(c.session().elapsed_seconds, 42);
        assert_eq!(c.session().remaining_seconds, 0);
        assert_eq!(c.phase(), Phase::Work);
    }

    #[test]
    fn for_time_clock_starts_with_work_not_lead_in() {
        let mut c = SessionController::new(
            WorkoutPlan::ForTime(ForTimePlan::new(1)),
            Vec::new(),
            SessionConfig::default(),
        );
        c.start();
        tick_n(&mut c, 5);
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(c.session().elapsed_seconds, 0);

        tick_n(&mut c, 12);
        let events = c.complete_step(0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::SessionCompleted { elapsed_seconds: 12, .. })));
    }

    #[test]
    fn admin_skip_during_for_time_lead_in_enters_work() {
        let mut c = SessionController::new(
            WorkoutPlan::ForTime(ForTimePlan::new(2)),
            Vec::new(),
            SessionConfig::default(),
        );
        c.start();
        assert_eq!(c.phase(), Phase::Preparation);
        let events = c.skip_phase(&Caller::ADMIN);
        assert_eq!(c.phase(), Phase::Work);
        assert_eq!(cues(&events), vec![Cue::StartSound { delay_ms: 1000 }]);

        c.skip_phase(&Caller::ADMIN);
        assert!(c.is_complete());
    }

    #[test]
    fn for_time_last_step_completes_session() {
        let mut c = for_time(3);
        c.start();
        c.complete_step(0);
        c.complete_step(2);
        assert_eq!(c.session().completed_steps.len(), 2);
        assert_eq!(c.phase(), Phase::Work);
        let events = c.complete_step(1);
        assert_eq!(c.phase(), Phase::Complete);
        assert!(events.iter().any(Event::is_completion));
    }

    #[test]
    fn uncomplete_recomputes_step_pointer() {
        let mut c = for_time(4);
        c.start();
        c.complete_step(0);
        c.complete_step(1);
        c.complete_step(2);
        assert_eq!(c.session().current_step, 3);
        c.uncomplete_step(2);
        assert_eq!(c.session().current_step, 2);
        c.uncomplete_step(0);
        assert_eq!(c.session().current_step, 2);
        c.uncomplete_step(1);
        assert_eq!(c.session().current_step, 0);
    }

    #[test]
    fn step_pointer_never_passes_last_index() {
        let mut c = for_time(3);
        c.start();
        c.complete_step(2);
        assert_eq!(c.session().current_step, 2);
        assert!(c.complete_step(7).is_empty());
    }

    #[test]
    fn display_name_honors_modified_toggle() {
        let block = WorkoutBlock::new(BlockType::ForTime).with_exercises(vec![
            BlockExercise::new(Exercise::named("Pull-up").with_modification("Ring row"), 1),
            BlockExercise::new(Exercise::named("Sit-up"), 2),
        ]);
        let mut c = SessionController::new(
            WorkoutPlan::ForTime(ForTimePlan::new(2)),
            vec![block],
            NO_PREP,
        );
        assert_eq!(c.display_name(0), Some("Pull-up"));
        assert!(c.toggle_modified(0));
        assert_eq!(c.display_name(0), Some("Ring row"));
        assert!(c.toggle_modified(1));
        assert_eq!(c.display_name(1), Some("Sit-up"));
        assert!(!c.toggle_modified(0));
        assert_eq!(c.display_name(0), Some("Pull-up"));
        assert_eq!(c.display_name(5), None);
    }

    #[test]
    fn snapshot_reports_current_state() {
        let c = amrap(1, 0);
        match c.snapshot() {
            Event::StateSnapshot {
                phase,
                remaining_seconds,
                format,
                ..
            } => {
                assert_eq!(phase, Phase::Idle);
                assert_eq!(remaining_seconds, 10);
                assert_eq!(format, WorkoutFormat::Amrap);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
