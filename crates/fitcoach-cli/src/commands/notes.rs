use clap::Args;
use fitcoach_core::notes::{FormatSource, LegacyNotesParser, StructuredSource};
use fitcoach_core::{WorkoutBlock, WorkoutFormat};

use super::{print_json, CliResult};

#[derive(Args)]
pub struct NotesArgs {
    /// Workout format: amrap, emom, tabata or for-time
    format: WorkoutFormat,
    /// Free-text block notes, e.g. "20s work / 10s rest x 8"
    notes: String,
    /// Block rounds (AMRAP repeats)
    #[arg(long)]
    rounds: Option<u32>,
    /// Rest between rounds or blocks, e.g. "60s" or "1:30"
    #[arg(long)]
    round_rest: Option<String>,
    /// Ignore structured settings and use only the notes parser
    #[arg(long)]
    legacy_only: bool,
}

pub fn run(args: NotesArgs) -> CliResult {
    let mut block = WorkoutBlock::new(args.format.block_type()).with_notes(args.notes);
    block.block_rounds = args.rounds;
    block.round_rest = args.round_rest;

    let settings = if args.legacy_only {
        LegacyNotesParser.resolve(&block, args.format)
    } else {
        StructuredSource::new().resolve(&block, args.format)
    };
    print_json(&settings)
}
