use clap::{Parser, Subcommand};

use crate::hdfs::DEFAULT_PROGRAM;

#[derive(Parser, Debug)]
#[command(version, about = "Manage job files in HDFS", long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
    /// Filesystem client to run `dfs` commands with
    #[arg(long, env = "HDFS_BIN", default_value = DEFAULT_PROGRAM)]
    pub program: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a local file
    Upload {
        /// Local file path
        local_path: String,
        /// HDFS destination
        hdfs_path: String,
    },
    /// Download a file to the local filesystem
    Download {
        /// HDFS file path
        hdfs_path: String,
        /// Local destination
        local_path: String,
    },
    /// List a directory
    List {
        /// HDFS directory path
        hdfs_path: String,
    },
    /// Create a directory, including missing parents
    Mkdir {
        /// HDFS directory path
        hdfs_path: String,
    },
    /// Delete a path
    Delete {
        /// HDFS path to delete
        hdfs_path: String,
        /// Delete directories and their contents
        #[arg(short, long)]
        recursive: bool,
    },
}
