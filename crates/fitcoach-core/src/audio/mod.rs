//! Audio cue trigger.
//!
//! [`AudioCues`] turns session cues into tones on an [`AudioEngine`]. Playing
//! is fire-and-forget: a disabled flag makes every call a no-op, a suspended
//! engine is resumed first, and engine failures are logged and swallowed so
//! the timer keeps running silently.

mod bell;
#[cfg(feature = "sound")]
mod rodio_engine;

pub use bell::{SilentEngine, TerminalBell};
#[cfg(feature = "sound")]
pub use rodio_engine::RodioEngine;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::events::Cue;

#[derive(Error, Debug)]
pub enum AudioError {
    /// No output device or backend on this platform
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    /// The engine was found but could not play
    #[error("playback failed: {0}")]
    Playback(String),
}

/// A short synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub volume: f32,
}

impl Tone {
    pub const BEEP: Tone = Tone {
        frequency_hz: 800.0,
        duration: Duration::from_millis(100),
        volume: 0.3,
    };
    pub const START: Tone = Tone {
        frequency_hz: 1000.0,
        duration: Duration::from_millis(300),
        volume: 0.3,
    };
}

/// Platform audio primitives.
pub trait AudioEngine: Send + Sync {
    /// Engines that start suspended (or get suspended by the platform)
    /// report it here so they can be resumed before playing.
    fn is_suspended(&self) -> bool {
        false
    }

    fn resume(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_tone(&self, tone: Tone) -> Result<(), AudioError>;
}

/// Cue player honoring the user's audio preference.
#[derive(Clone)]
pub struct AudioCues {
    engine: Arc<dyn AudioEngine>,
    enabled: Arc<AtomicBool>,
}

impl AudioCues {
    pub fn new(engine: Arc<dyn AudioEngine>, enabled: bool) -> Self {
        Self {
            engine,
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    pub fn silent() -> Self {
        Self::new(Arc::new(SilentEngine), false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn play_beep(&self) {
        self.play(Tone::BEEP);
    }

    pub fn play_start_sound(&self) {
        self.play(Tone::START);
    }

    /// Play a cue now, ignoring any delay it carries.
    pub fn play_cue(&self, cue: Cue) {
        match cue {
            Cue::Beep => self.play_beep(),
            Cue::StartSound { .. } => self.play_start_sound(),
        }
    }

    fn play(&self, tone: Tone) {
        if !self.is_enabled() {
            return;
        }
        if self.engine.is_suspended() {
            if let Err(e) = self.engine.resume() {
                warn!(error = %e, "could not resume audio engine");
                return;
            }
        }
        if let Err(e) = self.engine.play_tone(tone) {
            warn!(error = %e, "audio cue dropped");
        }
    }
}
