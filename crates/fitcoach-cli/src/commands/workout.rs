use clap::Subcommand;
use fitcoach_core::Config;

use super::{api_client, print_json, runtime, CliResult};

#[derive(Subcommand)]
pub enum WorkoutAction {
    /// Fetch one program day as JSON
    Day {
        /// Program slug
        program: String,
        /// 1-based day number
        day: u32,
    },
    /// List published blog posts
    Blog,
    /// Show one blog post
    Post { slug: String },
}

pub fn run(action: WorkoutAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;
    let rt = runtime()?;
    match action {
        WorkoutAction::Day { program, day } => {
            print_json(&rt.block_on(client.workout_day(&program, day))?)
        }
        WorkoutAction::Blog => print_json(&rt.block_on(client.blog_posts())?),
        WorkoutAction::Post { slug } => print_json(&rt.block_on(client.blog_post(&slug))?),
    }
}
