//! The map stage: raw log lines in, intermediate records out.
//!

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::warn;

use crate::codec::LogLine;
use crate::utils::string_from_bytes;
use crate::workload::StreamStats;

/// Maps one raw log line to its intermediate record.
///
/// Returns [`None`] for blank lines and lines with fewer than four fields.
pub fn map_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    LogLine::parse(line).map(|fields| fields.to_intermediate())
}

/// Runs the map stage over every line of `input`.
pub fn run<R: BufRead, W: Write>(input: R, mut output: W) -> Result<StreamStats> {
    let mut stats = StreamStats::default();

    for (line_no, buf) in input.split(b'\n').enumerate() {
        let buf = buf?;
        stats.lines += 1;

        let line = match string_from_bytes(buf) {
            Ok(line) => line,
            Err(err) => {
                warn!(line = line_no + 1, "Mapper error: {err}");
                stats.malformed += 1;
                continue;
            }
        };

        match map_line(&line) {
            Some(record) => {
                writeln!(output, "{record}")?;
                stats.emitted += 1;
            }
            None => stats.skipped += 1,
        }
    }

    output.flush()?;
    Ok(stats)
}
