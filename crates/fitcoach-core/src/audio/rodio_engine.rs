//! Sine-tone engine on the default output device.
//!
//! rodio output streams are not `Send`, so a dedicated thread owns the
//! stream and receives tones over a channel.

use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread;

use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use tracing::warn;

use super::{AudioEngine, AudioError, Tone};

pub struct RodioEngine {
    tx: Mutex<Option<Sender<Tone>>>,
}

impl RodioEngine {
    pub fn new() -> Self {
        Self {
            tx: Mutex::new(None),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<Tone>, AudioError> {
        let mut guard = self
            .tx
            .lock()
            .map_err(|e| AudioError::Playback(e.to_string()))?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<Tone>();
        thread::Builder::new()
            .name("audio-cues".to_string())
            .spawn(move || {
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(pair) => pair,
                    Err(e) => {
                        warn!(error = %e, "no audio output device");
                        return;
                    }
                };
                while let Ok(tone) = rx.recv() {
                    match Sink::try_new(&handle) {
                        Ok(sink) => {
                            let source = SineWave::new(tone.frequency_hz)
                                .take_duration(tone.duration)
                                .amplify(tone.volume);
                            sink.append(source);
                            sink.detach();
                        }
                        Err(e) => warn!(error = %e, "failed to create audio sink"),
                    }
                }
            })
            .map_err(|e| AudioError::Unavailable(e.to_string()))?;

        *guard = Some(tx.clone());
        Ok(tx)
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioEngine for RodioEngine {
    fn is_suspended(&self) -> bool {
        self.tx.lock().map(|g| g.is_none()).unwrap_or(true)
    }

    fn resume(&self) -> Result<(), AudioError> {
        self.ensure_thread().map(|_| ())
    }

    fn play_tone(&self, tone: Tone) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        if tx.send(tone).is_err() {
            // The audio thread exited (no device); start over next time.
            if let Ok(mut guard) = self.tx.lock() {
                *guard = None;
            }
            return Err(AudioError::Unavailable("audio thread stopped".into()));
        }
        Ok(())
    }
}
