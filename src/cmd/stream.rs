use clap::Parser;

/// Aggregate per-user action counts and value sums from tab-separated logs.
///
/// Reads stdin and writes stdout, so it can run as both the mapper and the
/// reducer of a Hadoop streaming job. The reduce stage expects its input
/// grouped by key, as the streaming shuffle (or `sort -t$'\t' -k1,1`)
/// delivers it.
#[derive(Parser, Debug)]
#[command(version, about, long_about)]
pub struct Args {
    /// Stage to run: `map` (default) or `reduce`
    pub mode: Option<String>,
}
