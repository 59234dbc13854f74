use clap::{Subcommand, ValueEnum};
use fitcoach_core::{Database, Preferences, WorkoutFormat};

use super::CliResult;

#[derive(Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    fn enabled(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show every stored preference as JSON
    Show,
    /// Turn workout audio cues on or off
    Audio { state: Switch },
    /// Remember fullscreen for a workout format
    Fullscreen {
        /// amrap, emom, tabata or for-time
        format: WorkoutFormat,
        state: Switch,
    },
}

pub fn run(action: PrefsAction) -> CliResult {
    let mut prefs = Preferences::new(Database::open()?);
    match action {
        PrefsAction::Show => {
            let fullscreen: serde_json::Map<String, serde_json::Value> = WorkoutFormat::ALL
                .iter()
                .map(|f| (f.to_string(), prefs.fullscreen(*f).into()))
                .collect();
            let json = serde_json::json!({
                "audio_enabled": prefs.audio_enabled(),
                "fullscreen": fullscreen,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        PrefsAction::Audio { state } => {
            prefs.set_audio_enabled(state.enabled())?;
            println!("audio {}", if state.enabled() { "on" } else { "off" });
        }
        PrefsAction::Fullscreen { format, state } => {
            prefs.set_fullscreen(format, state.enabled())?;
            println!("{format} fullscreen {}", if state.enabled() { "on" } else { "off" });
        }
    }
    Ok(())
}
