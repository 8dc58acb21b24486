use std::path::PathBuf;

use clap::Parser;

pub mod engine;

/// Run the map and reduce stages over local files, grouping records by key
/// in between.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Glob spec for the input log files
    #[arg(short, long)]
    pub input: String,

    /// File to write the summaries to
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub input: String,
    pub output: PathBuf,
}

impl From<Args> for Job {
    fn from(args: Args) -> Self {
        Job {
            input: args.input,
            output: args.output,
        }
    }
}
