use std::process::ExitCode;

use clap::Parser;
use logagg::cmd::hdfs::{Args, Commands};
use logagg::hdfs::HdfsManager;
use logagg::utils;

fn main() -> ExitCode {
    utils::init_logging();
    let args = Args::parse();
    let manager = HdfsManager::with_program(args.program);

    let ok = match args.command {
        Commands::Upload {
            local_path,
            hdfs_path,
        } => manager.upload(&local_path, &hdfs_path),
        Commands::Download {
            hdfs_path,
            local_path,
        } => manager.download(&hdfs_path, &local_path),
        Commands::List { hdfs_path } => match manager.list(&hdfs_path) {
            Some(listing) => {
                print!("{listing}");
                true
            }
            None => false,
        },
        Commands::Mkdir { hdfs_path } => manager.create_dir(&hdfs_path),
        Commands::Delete {
            hdfs_path,
            recursive,
        } => manager.delete(&hdfs_path, recursive),
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
