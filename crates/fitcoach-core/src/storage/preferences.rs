//! User preferences that outlive a workout view.

use tracing::debug;

use super::database::KeyValueStore;
use crate::error::CoreError;
use crate::model::WorkoutFormat;

pub const AUDIO_ENABLED_KEY: &str = "workoutAudioEnabled";

/// Storage key of the fullscreen flag for one workout format.
pub fn fullscreen_key(format: WorkoutFormat) -> &'static str {
    match format {
        WorkoutFormat::Amrap => "amrapFullscreen",
        WorkoutFormat::Emom => "emomFullscreen",
        WorkoutFormat::ForTime => "forTimeFullscreen",
        WorkoutFormat::Tabata => "tabataFullscreen",
    }
}

pub struct Preferences<S> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Defaults to on when never set or unreadable.
    pub fn audio_enabled(&self) -> bool {
        match self.store.get(AUDIO_ENABLED_KEY) {
            Ok(Some(value)) => value != "false",
            Ok(None) => true,
            Err(e) => {
                debug!(error = %e, "audio preference unreadable, assuming enabled");
                true
            }
        }
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) -> Result<(), CoreError> {
        self.store
            .set(AUDIO_ENABLED_KEY, if enabled { "true" } else { "false" })
    }

    pub fn fullscreen(&self, format: WorkoutFormat) -> bool {
        matches!(
            self.store.get(fullscreen_key(format)),
            Ok(Some(value)) if value == "true"
        )
    }

    /// Stored as `"true"`; turning it off removes the key.
    pub fn set_fullscreen(&mut self, format: WorkoutFormat, enabled: bool) -> Result<(), CoreError> {
        let key = fullscreen_key(format);
        if enabled {
            self.store.set(key, "true")
        } else {
            self.store.delete(key)
        }
    }
}

/// Fullscreen flag owned by one workout view.
///
/// Loaded once when the view opens and written back only when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullscreenState {
    format: WorkoutFormat,
    enabled: bool,
    dirty: bool,
}

impl FullscreenState {
    pub fn load<S: KeyValueStore>(prefs: &Preferences<S>, format: WorkoutFormat) -> Self {
        Self {
            format,
            enabled: prefs.fullscreen(format),
            dirty: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.dirty = true;
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.set(!self.enabled);
        self.enabled
    }

    /// Persist on navigation away. Unchanged state is not rewritten.
    pub fn persist_on_leave<S: KeyValueStore>(
        &mut self,
        prefs: &mut Preferences<S>,
    ) -> Result<(), CoreError> {
        if !self.dirty {
            return Ok(());
        }
        prefs.set_fullscreen(self.format, self.enabled)?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn audio_defaults_to_enabled_and_persists() {
        let mut prefs = Preferences::new(MemoryStore::default());
        assert!(prefs.audio_enabled());
        prefs.set_audio_enabled(false).unwrap();
        assert!(!prefs.audio_enabled());
        let store = prefs.into_inner();
        assert_eq!(store.get(AUDIO_ENABLED_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn fullscreen_is_true_or_absent() {
        let mut prefs = Preferences::new(MemoryStore::default());
        prefs.set_fullscreen(WorkoutFormat::Tabata, true).unwrap();
        assert!(prefs.fullscreen(WorkoutFormat::Tabata));
        assert!(!prefs.fullscreen(WorkoutFormat::Emom));
        prefs.set_fullscreen(WorkoutFormat::Tabata, false).unwrap();
        let store = prefs.into_inner();
        assert_eq!(store.get("tabataFullscreen").unwrap(), None);
    }

    #[test]
    fn fullscreen_state_writes_only_on_leave() {
        let mut prefs = Preferences::new(MemoryStore::default());
        let mut state = FullscreenState::load(&prefs, WorkoutFormat::Amrap);
        assert!(!state.is_enabled());
        assert!(state.toggle());
        assert!(!prefs.fullscreen(WorkoutFormat::Amrap));
        state.persist_on_leave(&mut prefs).unwrap();
        assert!(prefs.fullscreen(WorkoutFormat::Amrap));
    }
}
