use std::path::PathBuf;

use clap::Parser;

use crate::workflow::DEFAULT_OOZIE_URL;

#[derive(Parser, Debug)]
#[command(version, about = "Submit an Oozie workflow", long_about = None)]
pub struct Args {
    /// Path to the workflow definition in HDFS.
    ///
    /// An `oozie.wf.application.path` in the properties file takes precedence.
    #[arg(short, long)]
    pub workflow: String,

    /// Path to the job properties file
    #[arg(short, long)]
    pub properties: PathBuf,

    /// Oozie server URL
    #[arg(long, env = "OOZIE_URL", default_value = DEFAULT_OOZIE_URL)]
    pub oozie_url: String,

    /// Poll the job until it finishes, failing unless it succeeds
    #[arg(long)]
    pub wait: bool,

    /// Seconds between status polls when waiting
    #[arg(long, default_value_t = 10)]
    pub poll_interval: u64,
}
