//! The reduce stage: per-key, per-action counts and sums.
//!
//! Input must be grouped by key. Each maximal run of records sharing a key is
//! aggregated on its own and flushed as soon as a different key shows up, so
//! memory is bounded by the number of distinct actions in a single run.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::codec::decode_intermediate;
use crate::utils::string_from_bytes;
use crate::workload::StreamStats;
use crate::{Record, Summary};

#[derive(Copy, Clone, Default, Debug)]
struct Totals {
    count: u64,
    sum: f64,
}

/// The actions seen so far in the current run, in first-seen order.
#[derive(Debug)]
struct Run {
    key: String,
    actions: Vec<(String, Totals)>,
}

impl Run {
    fn new(key: String) -> Self {
        Self {
            key,
            actions: Vec::new(),
        }
    }

    fn add(&mut self, action: String, value: f64) {
        let idx = match self.actions.iter().position(|(name, _)| *name == action) {
            Some(idx) => idx,
            None => {
                self.actions.push((action, Totals::default()));
                self.actions.len() - 1
            }
        };
        let totals = &mut self.actions[idx].1;
        totals.count += 1;
        totals.sum += value;
    }

    fn into_summaries(self) -> Vec<Summary> {
        let key = self.key;
        self.actions
            .into_iter()
            .map(|(action, totals)| Summary {
                key: key.clone(),
                action,
                count: totals.count,
                total: totals.sum,
            })
            .collect()
    }
}

/// Accumulates contiguous runs of records and emits their summaries.
///
/// ```
/// use logagg::workload::reducer::Aggregator;
/// use logagg::Record;
///
/// let mut agg = Aggregator::new();
/// assert!(agg.push(Record::new("u1", "A", 1.0)).is_empty());
/// assert!(agg.push(Record::new("u1", "A", 3.0)).is_empty());
///
/// let flushed = agg.push(Record::new("u2", "B", 5.0));
/// assert_eq!(flushed[0].to_string(), "u1\tA\t2\t4.00\t2.00");
///
/// let rest = agg.finish();
/// assert_eq!(rest[0].to_string(), "u2\tB\t1\t5.00\t5.00");
/// ```
#[derive(Debug, Default)]
pub struct Aggregator {
    current: Option<Run>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` to the current run.
    ///
    /// If `record` starts a new run, the summaries of the previous run are
    /// returned; otherwise the result is empty.
    pub fn push(&mut self, record: Record) -> Vec<Summary> {
        let Record { key, action, value } = record;

        let starts_new_run = self.current.as_ref().is_some_and(|run| run.key != key);
        let flushed = if starts_new_run {
            self.finish()
        } else {
            Vec::new()
        };

        self.current
            .get_or_insert_with(|| Run::new(key))
            .add(action, value);
        flushed
    }

    /// Flushes the current run, returning one summary per action in
    /// first-seen order. Empty if nothing was pushed since the last flush.
    pub fn finish(&mut self) -> Vec<Summary> {
        self.current
            .take()
            .map(Run::into_summaries)
            .unwrap_or_default()
    }
}

/// Aggregates an in-memory sequence of records.
pub fn reduce_records<I: IntoIterator<Item = Record>>(records: I) -> Vec<Summary> {
    let mut agg = Aggregator::new();
    let mut summaries = Vec::new();
    for record in records {
        summaries.extend(agg.push(record));
    }
    summaries.extend(agg.finish());
    summaries
}

/// Runs the reduce stage over every line of `input`.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<StreamStats> {
    let mut stats = StreamStats::default();
    let mut agg = Aggregator::new();

    for (line_no, buf) in input.split(b'\n').enumerate() {
        let buf = buf?;
        stats.lines += 1;

        let record = string_from_bytes(buf).and_then(|line| {
            let line = line.trim();
            if line.is_empty() {
                return Ok(None);
            }
            decode_intermediate(line).map(Some)
        });

        let record = match record {
            Ok(Some(record)) => record,
            Ok(None) => {
                stats.skipped += 1;
                continue;
            }
            Err(err) => {
                warn!(line = line_no + 1, "Reducer error: {err:#}");
                stats.malformed += 1;
                continue;
            }
        };

        for summary in agg.push(record) {
            writeln!(output, "{summary}")?;
            stats.emitted += 1;
        }
    }

    for summary in agg.finish() {
        writeln!(output, "{summary}")?;
        stats.emitted += 1;
    }

    output.flush()?;
    Ok(stats)
}
