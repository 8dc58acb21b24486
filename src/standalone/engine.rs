use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use glob::glob;
use itertools::Itertools;
use tracing::{info, warn};
use uuid::Uuid;

use crate::codec::decode_intermediate;
use crate::standalone::Job;
use crate::workload::reducer::Aggregator;
use crate::workload::{mapper, StreamStats};
use crate::Record;

/// What a local job read and wrote.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct JobReport {
    /// Input files matched by the glob.
    pub files: u64,
    /// Map stage accounting, summed over all files.
    pub map: StreamStats,
    /// Intermediate records the reduce stage could not decode.
    pub rejected: u64,
    /// Intermediate records that reached the reduce stage.
    pub records: u64,
    /// Summary lines written.
    pub summaries: u64,
}

pub fn perform_map(job: &Job, report: &mut JobReport) -> Result<Vec<Record>> {
    // Iterator going through all files matched by the input glob, in path order
    let input_files = glob(&job.input).with_context(|| format!("bad input glob {:?}", job.input))?;
    let mut records = Vec::new();
    for pathspec in input_files.flatten() {
        if !pathspec.is_file() {
            continue;
        }
        let file = File::open(&pathspec)
            .with_context(|| format!("failed to open {}", pathspec.display()))?;

        let mut intermediate = Vec::new();
        report.map += mapper::run(BufReader::new(file), &mut intermediate)?;
        report.files += 1;

        // Records go through their wire form so a local run rejects exactly
        // what a streaming reducer would.
        let intermediate = String::from_utf8(intermediate)?;
        for line in intermediate.lines() {
            match decode_intermediate(line) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(file = %pathspec.display(), "Reducer error: {err:#}");
                    report.rejected += 1;
                }
            }
        }
    }

    if report.files == 0 {
        warn!(input = %job.input, "no input files matched");
    }
    report.records = records.len() as u64;
    Ok(records)
}

pub fn perform_reduce(job: &Job, records: Vec<Record>, report: &mut JobReport) -> Result<()> {
    let output = &job.output;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    // The sort is stable, so actions keep their input order within a key.
    let grouped = records.into_iter().sorted_by(|a, b| a.key.cmp(&b.key));

    let tmp = temp_path(output)?;
    match write_summaries(&tmp, grouped, report) {
        Ok(()) => fs::rename(&tmp, output)
            .with_context(|| format!("failed to move output into {}", output.display())),
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

/// Maps every input file, groups the records by key and reduces them into
/// the output file.
pub fn run_job(job: &Job) -> Result<JobReport> {
    let mut report = JobReport::default();
    let records = perform_map(job, &mut report)?;
    perform_reduce(job, records, &mut report)?;

    info!(
        files = report.files,
        lines = report.map.lines,
        skipped = report.map.skipped,
        malformed = report.map.malformed + report.rejected,
        records = report.records,
        summaries = report.summaries,
        output = %job.output.display(),
        "local job finished"
    );
    Ok(report)
}

fn write_summaries(
    path: &Path,
    records: impl Iterator<Item = Record>,
    report: &mut JobReport,
) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out_file = BufWriter::new(file);
    let mut agg = Aggregator::new();

    for record in records {
        for summary in agg.push(record) {
            writeln!(out_file, "{summary}")?;
            report.summaries += 1;
        }
    }
    for summary in agg.finish() {
        writeln!(out_file, "{summary}")?;
        report.summaries += 1;
    }

    out_file.flush()?;
    Ok(())
}

/// A hidden, uniquely named sibling of `output`.
fn temp_path(output: &Path) -> Result<PathBuf> {
    let Some(name) = output.file_name() else {
        bail!("output path {} has no file name", output.display());
    };
    let tmp = format!(".{}.{}.tmp", name.to_string_lossy(), Uuid::new_v4());
    Ok(output.with_file_name(tmp))
}
