//! Submission of workflow jobs to an Oozie server.
//!
//! A job is described by a workflow definition already stored in the
//! distributed filesystem plus a set of properties, usually read from a
//! `job.properties` file.

pub mod client;
pub mod properties;

pub use client::{JobInfo, JobStatus, WorkflowClient};
pub use properties::Properties;

/// Server used when no URL is configured.
pub const DEFAULT_OOZIE_URL: &str = "http://localhost:11000/oozie";
