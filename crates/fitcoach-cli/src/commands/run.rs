use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use fitcoach_core::audio::{AudioCues, AudioEngine, SilentEngine, TerminalBell};
use fitcoach_core::notes::StructuredSource;
use fitcoach_core::storage::{AudioBackend, Config};
use fitcoach_core::timer::PreferenceStore;
use fitcoach_core::{
    Caller, Command, Database, Event, Preferences, SessionController, SessionRunner, WorkoutBlock,
    WorkoutDay, WorkoutFormat, WorkoutPlan,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{api_client, runtime, CliResult};

#[derive(Args)]
pub struct RunArgs {
    /// Workout format: amrap, emom, tabata or for-time
    #[arg(long)]
    format: WorkoutFormat,
    /// JSON file holding a workout day or a single block
    #[arg(long, conflicts_with_all = ["program", "day"])]
    file: Option<PathBuf>,
    /// Program slug to fetch from the API
    #[arg(long, requires = "day")]
    program: Option<String>,
    /// Day number to fetch from the API
    #[arg(long, requires = "program")]
    day: Option<u32>,
    /// Lead-in seconds before the first work period
    #[arg(long)]
    prep: Option<u32>,
    /// Issue skip commands as an admin
    #[arg(long)]
    admin: bool,
    /// Keep reading commands after the workout completes
    #[arg(long)]
    keep_open: bool,
}

const HELP: &str = "commands: start pause resume reset reset-once reset-all skip end \
+ - done N undo N mod N audio on|off fullscreen on|off|toggle status quit";

fn load_day(args: &RunArgs, config: &Config) -> Result<WorkoutDay, Box<dyn std::error::Error>> {
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&content)?;
        // A bare block is wrapped in a one-block day.
        if value.get("blocks").is_some() {
            return Ok(serde_json::from_value(value)?);
        }
        let block: WorkoutBlock = serde_json::from_value(value)?;
        return Ok(WorkoutDay {
            id: None,
            program: String::new(),
            day_number: 1,
            title: String::new(),
            blocks: vec![block],
        });
    }
    match (&args.program, args.day) {
        (Some(program), Some(day)) => {
            let client = api_client(config)?;
            Ok(runtime()?.block_on(client.workout_day(program, day))?)
        }
        _ => Err("pass --file or --program with --day".into()),
    }
}

fn audio_engine(backend: AudioBackend) -> Arc<dyn AudioEngine> {
    match backend {
        AudioBackend::Bell => Arc::new(TerminalBell),
        AudioBackend::Silent => Arc::new(SilentEngine),
        #[cfg(feature = "sound")]
        AudioBackend::Rodio => Arc::new(fitcoach_core::audio::RodioEngine::new()),
        #[cfg(not(feature = "sound"))]
        AudioBackend::Rodio => {
            warn!("built without the sound feature, falling back to the terminal bell");
            Arc::new(TerminalBell)
        }
    }
}

fn parse_command(line: &str, caller: Caller) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(String::new());
    };
    let arg = words.next();
    let index = || -> Result<usize, String> {
        arg.and_then(|a| a.parse().ok())
            .ok_or_else(|| format!("{verb} needs a step number"))
    };
    let switch = || -> Result<bool, String> {
        match arg {
            Some("on") => Ok(true),
            Some("off") => Ok(false),
            _ => Err(format!("{verb} needs on or off")),
        }
    };

    Ok(match verb {
        "start" => Command::Start,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "reset" => Command::Reset,
        "reset-once" => Command::ResetOnce,
        "reset-all" => Command::ResetAll,
        "skip" => Command::SkipPhase(caller),
        "end" => Command::SkipToEnd(caller),
        "+" => Command::IncrementRounds,
        "-" => Command::DecrementRounds,
        "done" => Command::CompleteStep(index()?),
        "undo" => Command::UncompleteStep(index()?),
        "mod" => Command::ToggleModified(index()?),
        "audio" => Command::SetAudioEnabled(switch()?),
        "fullscreen" if arg == Some("toggle") => Command::ToggleFullscreen,
        "fullscreen" => Command::SetFullscreen(switch()?),
        "status" => Command::Snapshot,
        "quit" | "exit" => Command::Close,
        _ => return Err(HELP.to_string()),
    })
}

pub fn run(args: RunArgs) -> CliResult {
    let config = Config::load_or_default();
    let day = load_day(&args, &config)?;
    let (plan, blocks) = WorkoutPlan::from_day(&day, args.format, &StructuredSource::new())?;

    let mut session_config = config.session_config();
    if let Some(prep) = args.prep {
        session_config.preparation_seconds = prep;
    }
    let controller = SessionController::new(plan, blocks, session_config);
    let audio = AudioCues::new(audio_engine(config.audio.backend), true);
    let caller = if args.admin { Caller::ADMIN } else { Caller::MEMBER };
    let keep_open = args.keep_open;

    let rt = runtime()?;
    rt.block_on(async move {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();

        let mut runner = SessionRunner::new(controller, audio, ev_tx);
        match Database::open() {
            Ok(db) => {
                let store: PreferenceStore = Box::new(db);
                runner = runner.with_preferences(Preferences::new(store));
            }
            Err(e) => warn!(error = %e, "preferences unavailable, using defaults"),
        }

        let printer_tx = cmd_tx.clone();
        let printer = tokio::spawn(async move {
            while let Some(event) = ev_rx.recv().await {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{line}"),
                    Err(e) => warn!(error = %e, "unprintable event"),
                }
                if matches!(event, Event::SessionCompleted { .. }) && !keep_open {
                    let _ = printer_tx.send(Command::Close).await;
                }
            }
        });

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => match parse_command(line.trim(), caller) {
                        Ok(command) => {
                            if cmd_tx.send(command).await.is_err() {
                                break;
                            }
                        }
                        Err(message) if message.is_empty() => {}
                        Err(message) => eprintln!("{message}"),
                    },
                    Ok(None) | Err(_) => {
                        debug!("stdin closed");
                        let _ = cmd_tx.send(Command::Close).await;
                        break;
                    }
                }
            }
        });

        let session = runner.run(cmd_rx).await;
        drop(runner);
        let _ = printer.await;
        debug!(phase = ?session.phase, elapsed = session.elapsed_seconds, "run finished");
    });
    // The stdin reader may still be parked on a blocking read.
    rt.shutdown_timeout(Duration::from_millis(100));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_command("start", Caller::MEMBER), Ok(Command::Start));
        assert_eq!(parse_command("done 2", Caller::MEMBER), Ok(Command::CompleteStep(2)));
        assert_eq!(
            parse_command("skip", Caller::ADMIN),
            Ok(Command::SkipPhase(Caller::ADMIN))
        );
        assert_eq!(
            parse_command("audio off", Caller::MEMBER),
            Ok(Command::SetAudioEnabled(false))
        );
        assert_eq!(
            parse_command("fullscreen toggle", Caller::MEMBER),
            Ok(Command::ToggleFullscreen)
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command("", Caller::MEMBER), Err(String::new()));
        assert!(parse_command("done", Caller::MEMBER).is_err());
        assert!(parse_command("audio loud", Caller::MEMBER).is_err());
        assert_eq!(parse_command("jump", Caller::MEMBER), Err(HELP.to_string()));
    }
}
