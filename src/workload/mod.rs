//! The two stages of the aggregation job.
//!
//! # Example
//!
//! Selecting a stage by the name Hadoop streaming passes on the command line:
//! ```
//! # use anyhow::Result;
//! use logagg::workload::{self, Stage};
//! # fn main() -> Result<()> {
//! let stage = workload::named("reduce")?;
//! assert_eq!(stage, Stage::Reduce);
//! # Ok(())
//! # }
//! ```

use std::io::{BufRead, Write};
use std::ops::AddAssign;

use anyhow::{bail, Result};

pub mod mapper;
pub mod reducer;

/// A stage of the aggregation job.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    Map,
    Reduce,
}

impl Stage {
    /// Picks the stage for a command-line mode argument.
    ///
    /// Only `reduce` selects the reduce stage; anything else, including no
    /// argument at all, runs the map stage.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("reduce") => Stage::Reduce,
            _ => Stage::Map,
        }
    }
}

/// Gets the [`Stage`] named `name`.
///
/// Returns [`None`] if no stage with the given name exists.
pub fn try_named(name: &str) -> Option<Stage> {
    match name {
        "map" => Some(Stage::Map),
        "reduce" => Some(Stage::Reduce),
        _ => None,
    }
}

/// Gets the [`Stage`] named `name`.
///
/// Returns an [`anyhow::Error`] if no stage with the given name exists.
pub fn named(name: &str) -> Result<Stage> {
    match try_named(name) {
        Some(stage) => Ok(stage),
        None => bail!("No stage named `{}` found.", name),
    }
}

/// Line accounting for one pass over a stream.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct StreamStats {
    /// Lines read from the input, including blank ones.
    pub lines: u64,
    /// Lines written to the output.
    pub emitted: u64,
    /// Lines dropped without a diagnostic (blank, or too few fields).
    pub skipped: u64,
    /// Lines dropped with a diagnostic.
    pub malformed: u64,
}

impl AddAssign for StreamStats {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.emitted += other.emitted;
        self.skipped += other.skipped;
        self.malformed += other.malformed;
    }
}

/// Runs `stage` over `input`, writing its records to `output`.
///
/// Malformed records are logged and skipped. Only I/O errors on either
/// stream are returned.
pub fn run<R: BufRead, W: Write>(stage: Stage, input: R, output: W) -> Result<StreamStats> {
    match stage {
        Stage::Map => mapper::run(input, output),
        Stage::Reduce => reducer::run(input, output),
    }
}
