//! Streaming log aggregation for Hadoop-style batch jobs.
//!
//! The core is a map/reduce pair meant to run under Hadoop streaming (or any
//! shell pipeline): the map stage normalizes raw tab-separated log lines into
//! `user<TAB>action,value` records, and the reduce stage tallies per-user,
//! per-action counts and value sums.
//!
//! The reduce stage relies on the contract the streaming shuffle provides:
//! all records for a key arrive contiguously. It does not regroup its input,
//! so a key that reappears after a different key is reported twice. Use
//! [`standalone::engine`] to run both stages locally with the grouping step
//! included.
//!
//! Two collaborators live alongside the aggregator without being used by it:
//! [`hdfs`] wraps the `hdfs dfs` shell client for moving job input and output
//! around, and [`workflow`] submits workflow jobs to an Oozie server.

pub mod cmd;
pub mod codec;
pub mod hdfs;
pub mod standalone;
pub mod utils;
pub mod workflow;
pub mod workload;

/////////////////////////////////////////////////////////////////////////////
// Aggregation records
/////////////////////////////////////////////////////////////////////////////

/// An intermediate record, as read back by the reduce stage.
#[derive(Clone, PartialEq, Debug)]
pub struct Record {
    /// The grouping key (the user id of the originating log line).
    pub key: String,
    /// The action the value was recorded for.
    pub action: String,
    /// The numeric value attached to the action.
    pub value: f64,
}

impl Record {
    /// Construct a new record.
    pub fn new(key: impl Into<String>, action: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
            value,
        }
    }
}

/// The aggregate of one action within one run of a key.
#[derive(Clone, PartialEq, Debug)]
pub struct Summary {
    pub key: String,
    pub action: String,
    /// Number of records seen. Always at least 1.
    pub count: u64,
    /// Sum of the values of those records.
    pub total: f64,
}

impl Summary {
    /// The mean value per record.
    #[inline]
    pub fn average(&self) -> f64 {
        self.total / self.count as f64
    }
}
