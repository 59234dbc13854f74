//! Async driver tying a [`SessionController`] to the clock, audio and
//! preferences.
//!
//! The runner owns every moving part of a workout view. Commands and clock
//! ticks are applied to the controller one at a time from a single loop,
//! so the session is never touched concurrently. Events are forwarded to
//! the caller unchanged; cues are played on the way through.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::clock::{IntervalClock, Tick, TICK_PERIOD};
use super::session::{SessionController, TimerSession};
use crate::audio::AudioCues;
use crate::auth::Caller;
use crate::events::{Cue, Event};
use crate::storage::{FullscreenState, KeyValueStore, Preferences};

pub type PreferenceStore = Box<dyn KeyValueStore + Send>;

/// User input accepted while a session view is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Reset,
    ResetOnce,
    ResetAll,
    SkipPhase(Caller),
    SkipToEnd(Caller),
    IncrementRounds,
    DecrementRounds,
    CompleteStep(usize),
    UncompleteStep(usize),
    ToggleModified(usize),
    SetAudioEnabled(bool),
    SetFullscreen(bool),
    ToggleFullscreen,
    Snapshot,
    /// Leave the view: stop the clock and persist view state.
    Close,
}

enum Input {
    Tick(Tick),
    Command(Command),
    Closed,
}

pub struct SessionRunner {
    controller: SessionController,
    clock: IntervalClock,
    ticks: mpsc::Receiver<Tick>,
    audio: AudioCues,
    events: mpsc::UnboundedSender<Event>,
    preferences: Option<Preferences<PreferenceStore>>,
    fullscreen: Option<FullscreenState>,
    pending_cues: Vec<JoinHandle<()>>,
}

impl SessionRunner {
    pub fn new(
        controller: SessionController,
        audio: AudioCues,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self::with_period(controller, audio, events, TICK_PERIOD)
    }

    pub fn with_period(
        controller: SessionController,
        audio: AudioCues,
        events: mpsc::UnboundedSender<Event>,
        period: Duration,
    ) -> Self {
        let (clock, ticks) = IntervalClock::new(period);
        Self {
            controller,
            clock,
            ticks,
            audio,
            events,
            preferences: None,
            fullscreen: None,
            pending_cues: Vec::new(),
        }
    }

    /// Attach persisted preferences. The stored audio flag overrides the
    /// one the cues were built with.
    pub fn with_preferences(mut self, preferences: Preferences<PreferenceStore>) -> Self {
        self.audio.set_enabled(preferences.audio_enabled());
        self.fullscreen = Some(FullscreenState::load(&preferences, self.controller.format()));
        self.preferences = Some(preferences);
        self
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn preferences(&self) -> Option<&Preferences<PreferenceStore>> {
        self.preferences.as_ref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.as_ref().is_some_and(FullscreenState::is_enabled)
    }

    /// Drive the session until `Close` arrives or the command channel is
    /// dropped. Returns the final session state.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) -> TimerSession {
        loop {
            let input = tokio::select! {
                Some(tick) = self.ticks.recv() => Input::Tick(tick),
                command = commands.recv() => match command {
                    Some(command) => Input::Command(command),
                    None => Input::Closed,
                },
            };

            match input {
                Input::Tick(tick) => {
                    if !self.clock.is_current(tick) {
                        trace!(generation = tick.generation, "stale tick dropped");
                        continue;
                    }
                    let events = self.controller.tick();
                    self.dispatch(events);
                }
                Input::Command(Command::Close) | Input::Closed => break,
                Input::Command(command) => self.apply(command),
            }
            self.sync_clock();
        }

        self.shutdown();
        self.controller.session().clone()
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "command");
        let events = match command {
            Command::Start => self.controller.start(),
            Command::Pause => self.controller.pause(),
            Command::Resume => self.controller.resume(),
            Command::Reset => {
                self.cancel_pending_cues();
                self.controller.reset()
            }
            Command::ResetOnce => {
                self.cancel_pending_cues();
                self.controller.reset_once()
            }
            Command::ResetAll => {
                self.cancel_pending_cues();
                self.controller.reset_all()
            }
            Command::SkipPhase(caller) => self.controller.skip_phase(&caller),
            Command::SkipToEnd(caller) => self.controller.skip_to_end(&caller),
            Command::IncrementRounds => self.controller.increment_round_counter(),
            Command::DecrementRounds => self.controller.decrement_round_counter(),
            Command::CompleteStep(index) => self.controller.complete_step(index),
            Command::UncompleteStep(index) => self.controller.uncomplete_step(index),
            Command::ToggleModified(index) => {
                let shown = self.controller.toggle_modified(index);
                debug!(index, shown, "modification toggled");
                Vec::new()
            }
            Command::SetAudioEnabled(enabled) => {
                self.set_audio_enabled(enabled);
                Vec::new()
            }
            Command::SetFullscreen(enabled) => {
                if let Some(state) = self.fullscreen.as_mut() {
                    state.set(enabled);
                }
                Vec::new()
            }
            Command::ToggleFullscreen => {
                if let Some(state) = self.fullscreen.as_mut() {
                    state.toggle();
                }
                Vec::new()
            }
            Command::Snapshot => vec![self.controller.snapshot()],
            Command::Close => Vec::new(),
        };
        self.dispatch(events);
    }

    fn dispatch(&mut self, events: Vec<Event>) {
        for event in events {
            match event.cue() {
                Some(Cue::Beep) => self.audio.play_beep(),
                Some(Cue::StartSound { delay_ms }) => self.schedule_start_sound(delay_ms),
                None => {}
            }
            if event.is_completion() {
                info!(
                    format = %self.controller.format(),
                    elapsed = self.controller.session().elapsed_seconds,
                    "workout complete"
                );
            }
            // A dropped receiver only means nobody is watching.
            let _ = self.events.send(event);
        }
    }

    fn schedule_start_sound(&mut self, delay_ms: u64) {
        if delay_ms == 0 {
            self.audio.play_start_sound();
            return;
        }
        self.pending_cues.retain(|handle| !handle.is_finished());
        let audio = self.audio.clone();
        self.pending_cues.push(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            audio.play_start_sound();
        }));
    }

    fn cancel_pending_cues(&mut self) {
        for handle in self.pending_cues.drain(..) {
            handle.abort();
        }
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio.set_enabled(enabled);
        if let Some(prefs) = self.preferences.as_mut() {
            if let Err(e) = prefs.set_audio_enabled(enabled) {
                warn!(error = %e, "failed to persist audio preference");
            }
        }
    }

    /// The clock runs exactly while the controller is running.
    fn sync_clock(&mut self) {
        match (self.controller.is_running(), self.clock.is_running()) {
            (true, false) => self.clock.start(),
            (false, true) => self.clock.stop(),
            _ => {}
        }
    }

    fn shutdown(&mut self) {
        self.clock.stop();
        self.cancel_pending_cues();
        if let (Some(state), Some(prefs)) = (self.fullscreen.as_mut(), self.preferences.as_mut()) {
            if let Err(e) = state.persist_on_leave(prefs) {
                warn!(error = %e, "failed to persist fullscreen state");
            }
        }
        debug!(phase = ?self.controller.phase(), "session view closed");
    }
}
