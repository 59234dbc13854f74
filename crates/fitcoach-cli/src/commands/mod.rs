pub mod admin;
pub mod config;
pub mod contact;
pub mod notes;
pub mod prefs;
pub mod run;
pub mod workout;

use fitcoach_core::{ApiClient, Config};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn api_client(config: &Config) -> Result<ApiClient, Box<dyn std::error::Error>> {
    Ok(ApiClient::from_config(&config.api)?)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
