use clap::Args;
use fitcoach_core::model::ContactForm;
use fitcoach_core::{Config, RetryPolicy};

use super::{api_client, runtime, CliResult};

#[derive(Args)]
pub struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    /// Message body
    #[arg(long)]
    message: String,
}

pub fn run(args: ContactArgs) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;
    let form = ContactForm {
        name: args.name,
        email: args.email,
        message: args.message,
    };
    let policy = RetryPolicy::from(&config.contact);
    runtime()?.block_on(client.submit_contact(&form, policy))?;
    println!("message sent");
    Ok(())
}
