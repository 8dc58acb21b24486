//! Command-line arguments for each binary.

pub mod hdfs;
pub mod stream;
pub mod submit;
