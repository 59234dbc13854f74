use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fitcoach", version, about = "FitCoach workout timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workout timer, reading commands from stdin
    Run(commands::run::RunArgs),
    /// Show the timer settings recovered from block notes
    Notes(commands::notes::NotesArgs),
    /// Stored user preferences
    Prefs {
        #[command(subcommand)]
        action: commands::prefs::PrefsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Workout content and blog
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Admin content management (requires api.token)
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
    /// Send a message through the contact form
    Contact(commands::contact::ContactArgs),
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FITCOACH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Notes(args) => commands::notes::run(args),
        Commands::Prefs { action } => commands::prefs::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Admin { action } => commands::admin::run(action),
        Commands::Contact(args) => commands::contact::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
