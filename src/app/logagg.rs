use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use logagg::cmd::stream::Args;
use logagg::utils;
use logagg::workload::{self, Stage};
use tracing::{info, warn};

fn main() -> Result<()> {
    utils::init_logging();
    let args = Args::parse();

    let mode = args.mode.as_deref();
    if let Some(name) = mode.filter(|name| workload::try_named(name).is_none()) {
        warn!("unknown mode `{name}`, running the map stage");
    }
    let stage = Stage::from_arg(mode);

    let input = io::stdin().lock();
    let output = BufWriter::new(io::stdout().lock());
    let stats = workload::run(stage, input, output)?;

    info!(
        stage = ?stage,
        lines = stats.lines,
        emitted = stats.emitted,
        skipped = stats.skipped,
        malformed = stats.malformed,
        "stage finished"
    );
    Ok(())
}
