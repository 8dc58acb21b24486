use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::workflow::Properties;

pub const API_VERSION: &str = "v2";
pub const USER_NAME: &str = "user.name";
pub const APP_PATH: &str = "oozie.wf.application.path";
/// Submitting user when neither the properties nor `$USER` name one.
pub const DEFAULT_USER: &str = "hadoop";

/// Lifecycle states reported for a workflow job.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Prep,
    Running,
    Suspended,
    Succeeded,
    Killed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Whether the job has stopped for good.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Killed | JobStatus::Failed
        )
    }
}

/// A job as reported by `GET /v2/job/{id}`.
///
/// Only the fields this crate looks at are typed; everything else the server
/// sends is kept in `extra`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: String,
}

/// Client for the Oozie workflow REST API.
#[derive(Clone, Debug)]
pub struct WorkflowClient {
    client: Client,
    base_url: String,
}

impl WorkflowClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn jobs_endpoint(&self) -> String {
        format!("{}/{}/jobs", self.base_url, API_VERSION)
    }

    pub fn job_endpoint(&self, job_id: &str) -> String {
        format!("{}/{}/job/{}", self.base_url, API_VERSION, job_id)
    }

    /// The web console page for `job_id`.
    pub fn tracking_url(&self, job_id: &str) -> String {
        format!("{}/?job={}", self.base_url, job_id)
    }

    /// Submits the workflow at `workflow_path` and returns the new job id.
    ///
    /// Anything other than `201 Created` is an error carrying the server's
    /// status and response body.
    pub async fn submit(&self, workflow_path: &str, properties: &Properties) -> Result<String> {
        let config = submission_config(workflow_path, properties);
        let endpoint = self.jobs_endpoint();
        debug!(%endpoint, properties = config.len(), "submitting workflow");

        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/xml")
            .body(config.to_configuration_xml())
            .send()
            .await
            .with_context(|| format!("failed to reach workflow server at {}", self.base_url))?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            bail!("workflow submission failed with status {status}: {body}");
        }

        let body: SubmitResponse = response
            .json()
            .await
            .context("unexpected submission response")?;
        info!(job_id = %body.id, "Workflow submitted successfully");
        Ok(body.id)
    }

    /// Fetches the current state of `job_id`.
    pub async fn status(&self, job_id: &str) -> Result<JobInfo> {
        let endpoint = self.job_endpoint(job_id);
        let response = self
            .client
            .get(&endpoint)
            .send()
            .await
            .with_context(|| format!("failed to reach workflow server at {}", self.base_url))?;

        let status = response.status();
        if status != StatusCode::OK {
            bail!("failed to get status of job {job_id}: {status}");
        }
        response
            .json()
            .await
            .with_context(|| format!("unexpected status response for job {job_id}"))
    }

    /// Polls `job_id` every `interval` until it reaches a terminal state.
    pub async fn wait(&self, job_id: &str, interval: Duration) -> Result<JobInfo> {
        let mut last = None;
        loop {
            let job = self.status(job_id).await?;
            if last != Some(job.status) {
                info!(job_id, status = ?job.status, "job status changed");
                last = Some(job.status);
            }
            if job.status.is_terminal() {
                return Ok(job);
            }
            tokio::time::sleep(interval).await;
        }
    }
}

/// The configuration posted for a submission.
///
/// `user.name` comes first, falling back to `$USER` and then
/// [`DEFAULT_USER`]. The application path defaults to `workflow_path`; a
/// value for it in the properties overrides that in place.
pub fn submission_config(workflow_path: &str, properties: &Properties) -> Properties {
    let user = properties
        .get(USER_NAME)
        .map(str::to_string)
        .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
        .unwrap_or_else(|| DEFAULT_USER.to_string());

    let mut config = Properties::new();
    config.insert(USER_NAME, user);
    config.insert(APP_PATH, workflow_path);
    for (key, value) in properties.iter() {
        config.insert(key, value);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_ignore_trailing_slash() {
        let client = WorkflowClient::new("http://localhost:11000/oozie/");
        assert_eq!(client.base_url(), "http://localhost:11000/oozie");
        assert_eq!(client.jobs_endpoint(), "http://localhost:11000/oozie/v2/jobs");
        assert_eq!(
            client.job_endpoint("0000001-oozie-W"),
            "http://localhost:11000/oozie/v2/job/0000001-oozie-W"
        );
        assert_eq!(
            client.tracking_url("0000001-oozie-W"),
            "http://localhost:11000/oozie/?job=0000001-oozie-W"
        );
    }

    #[test]
    fn config_puts_user_and_path_first() {
        let props = Properties::parse("nameNode=hdfs://nn:8020\nuser.name=etl\n");
        let config = submission_config("hdfs://nn:8020/apps/logagg", &props);
        let entries: Vec<_> = config.iter().collect();
        assert_eq!(
            entries,
            vec![
                ("user.name", "etl"),
                ("oozie.wf.application.path", "hdfs://nn:8020/apps/logagg"),
                ("nameNode", "hdfs://nn:8020"),
            ]
        );
    }

    #[test]
    fn properties_override_application_path_in_place() {
        let props = Properties::parse(
            "nameNode=hdfs://nn:8020\noozie.wf.application.path=/from/props\n",
        );
        let config = submission_config("/from/cli", &props);
        assert_eq!(config.get(APP_PATH), Some("/from/props"));

        let keys: Vec<_> = config.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec![USER_NAME, APP_PATH, "nameNode"]);
    }

    #[test]
    fn config_always_names_a_user() {
        let config = submission_config("/apps/logagg", &Properties::new());
        let (key, user) = config.iter().next().unwrap();
        assert_eq!(key, USER_NAME);
        assert!(!user.is_empty());
    }

    #[test]
    fn job_info_keeps_unknown_fields() {
        let job: JobInfo = serde_json::from_str(
            r#"{"id":"0000001-oozie-W","status":"RUNNING","appName":"logagg-wf",
                "user":"etl","startTime":"Mon, 19 Oct 2026 10:00:00 GMT","actions":[]}"#,
        )
        .unwrap();
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.app_name.as_deref(), Some("logagg-wf"));
        assert_eq!(job.user.as_deref(), Some("etl"));
        assert!(job.extra.contains_key("startTime"));
        assert!(!job.status.is_terminal());
    }

    #[test]
    fn unrecognized_status_is_not_terminal() {
        let job: JobInfo =
            serde_json::from_str(r#"{"id":"1","status":"DONEWITHERROR"}"#).unwrap();
        assert_eq!(job.status, JobStatus::Unknown);
        assert!(!job.status.is_terminal());
        assert!(JobStatus::Killed.is_terminal());
    }
}
