use anyhow::Result;
use clap::Parser;
use logagg::standalone::{engine::run_job, Args, Job};
use logagg::utils;

fn main() -> Result<()> {
    utils::init_logging();
    let job = Job::from(Args::parse());
    /*  The map step reads every input file, then records are grouped by key
     *  in memory before the reduce step. This stands in for the shuffle a
     *  cluster would perform.
     */
    run_job(&job)?;
    Ok(())
}
