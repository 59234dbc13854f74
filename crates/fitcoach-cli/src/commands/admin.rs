use std::path::PathBuf;

use clap::Subcommand;
use fitcoach_core::model::{BlogPost, Exercise, Program};
use fitcoach_core::{Config, WorkoutDay};

use super::{api_client, print_json, runtime, CliResult};

#[derive(Subcommand)]
pub enum AdminAction {
    /// List programs
    Programs,
    /// Create a program from a JSON file
    CreateProgram { file: PathBuf },
    /// Delete a program
    DeleteProgram { id: String },
    /// List the exercise library
    Exercises,
    /// Create an exercise from a JSON file
    CreateExercise { file: PathBuf },
    /// Delete an exercise
    DeleteExercise { id: String },
    /// List the days of a program
    Days { program: String },
    /// Create a workout day from a JSON file
    CreateDay { file: PathBuf },
    /// Replace a workout day from a JSON file
    UpdateDay { id: String, file: PathBuf },
    /// Delete a workout day
    DeleteDay { id: String },
    /// Publish a blog post from a JSON file
    CreatePost { file: PathBuf },
    /// Delete a blog post
    DeletePost { id: String },
    /// List registered users
    Users,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run(action: AdminAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;
    let rt = runtime()?;
    match action {
        AdminAction::Programs => print_json(&rt.block_on(client.programs())?),
        AdminAction::CreateProgram { file } => {
            let program: Program = read_json(&file)?;
            print_json(&rt.block_on(client.create_program(&program))?)
        }
        AdminAction::DeleteProgram { id } => {
            rt.block_on(client.delete_program(&id))?;
            println!("deleted program {id}");
            Ok(())
        }
        AdminAction::Exercises => print_json(&rt.block_on(client.exercises())?),
        AdminAction::CreateExercise { file } => {
            let exercise: Exercise = read_json(&file)?;
            print_json(&rt.block_on(client.create_exercise(&exercise))?)
        }
        AdminAction::DeleteExercise { id } => {
            rt.block_on(client.delete_exercise(&id))?;
            println!("deleted exercise {id}");
            Ok(())
        }
        AdminAction::Days { program } => print_json(&rt.block_on(client.workout_days(&program))?),
        AdminAction::CreateDay { file } => {
            let day: WorkoutDay = read_json(&file)?;
            print_json(&rt.block_on(client.create_workout_day(&day))?)
        }
        AdminAction::UpdateDay { id, file } => {
            let day: WorkoutDay = read_json(&file)?;
            print_json(&rt.block_on(client.update_workout_day(&id, &day))?)
        }
        AdminAction::DeleteDay { id } => {
            rt.block_on(client.delete_workout_day(&id))?;
            println!("deleted workout day {id}");
            Ok(())
        }
        AdminAction::CreatePost { file } => {
            let post: BlogPost = read_json(&file)?;
            print_json(&rt.block_on(client.create_blog_post(&post))?)
        }
        AdminAction::DeletePost { id } => {
            rt.block_on(client.delete_blog_post(&id))?;
            println!("deleted post {id}");
            Ok(())
        }
        AdminAction::Users => print_json(&rt.block_on(client.users())?),
    }
}
