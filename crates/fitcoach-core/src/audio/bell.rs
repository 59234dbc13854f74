use std::io::Write;

use super::{AudioEngine, AudioError, Tone};

/// Rings the terminal bell on stderr. Pitch and length are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioEngine for TerminalBell {
    fn play_tone(&self, _tone: Tone) -> Result<(), AudioError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| AudioError::Playback(e.to_string()))
    }
}

/// Engine for platforms without audio output.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentEngine;

impl AudioEngine for SilentEngine {
    fn play_tone(&self, _tone: Tone) -> Result<(), AudioError> {
        Ok(())
    }
}
