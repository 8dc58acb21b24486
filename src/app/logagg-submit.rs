use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use logagg::cmd::submit::Args;
use logagg::utils;
use logagg::workflow::{JobStatus, Properties, WorkflowClient};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_logging();
    let args = Args::parse();

    info!("Loading job properties from {}", args.properties.display());
    let properties = Properties::load(&args.properties)?;
    if properties.is_empty() {
        warn!("{} holds no properties", args.properties.display());
    }

    info!("Submitting workflow {}", args.workflow);
    let client = WorkflowClient::new(&args.oozie_url);
    let job_id = client.submit(&args.workflow, &properties).await?;

    println!("{job_id}");
    println!("Track at: {}", client.tracking_url(&job_id));

    if args.wait {
        let interval = Duration::from_secs(args.poll_interval.max(1));
        let job = client.wait(&job_id, interval).await?;
        if job.status != JobStatus::Succeeded {
            bail!("job {} finished as {:?}", job_id, job.status);
        }
        info!(job_id = %job_id, "job succeeded");
    }
    Ok(())
}
