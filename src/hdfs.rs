//! A thin wrapper around the `hdfs dfs` shell client.
//!
//! Used to stage job input into the distributed filesystem and pull results
//! back out. Every operation shells out once and reports success as a plain
//! `bool`; the client's own stderr is logged on failure.

use std::process::{Command, Stdio};

use tracing::{debug, error, info};

/// The filesystem client invoked when no other program is configured.
pub const DEFAULT_PROGRAM: &str = "hdfs";

/// What a single `dfs` invocation produced.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Clone, Debug)]
pub struct HdfsManager {
    program: String,
}

impl Default for HdfsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HdfsManager {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Uses `program` instead of `hdfs`, e.g. a full path to the client.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `<program> dfs <args...>`.
    ///
    /// Arguments are handed to the process as-is, with no shell in between.
    /// A program that cannot be started counts as a failed command whose
    /// stderr is the spawn error.
    pub fn run_command(&self, args: &[&str]) -> CommandOutput {
        debug!(program = %self.program, ?args, "running dfs command");
        let output = Command::new(&self.program)
            .arg("dfs")
            .args(args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(out) => CommandOutput {
                success: out.status.success(),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            },
            Err(err) => CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: format!("failed to run {}: {}", self.program, err),
            },
        }
    }

    pub fn upload(&self, local_path: &str, remote_path: &str) -> bool {
        info!("Uploading {local_path} to {remote_path}");
        let out = self.run_command(&["-put", local_path, remote_path]);
        report("Upload", &out)
    }

    pub fn download(&self, remote_path: &str, local_path: &str) -> bool {
        info!("Downloading {remote_path} to {local_path}");
        let out = self.run_command(&["-get", remote_path, local_path]);
        report("Download", &out)
    }

    /// Returns the listing of `remote_path`, or [`None`] if it failed.
    pub fn list(&self, remote_path: &str) -> Option<String> {
        let out = self.run_command(&["-ls", remote_path]);
        if out.success {
            Some(out.stdout)
        } else {
            debug!(stderr = %out.stderr.trim(), "listing {remote_path} failed");
            None
        }
    }

    /// Creates `remote_path` along with any missing parents.
    pub fn create_dir(&self, remote_path: &str) -> bool {
        info!("Creating directory {remote_path}");
        let out = self.run_command(&["-mkdir", "-p", remote_path]);
        report("Create directory", &out)
    }

    pub fn delete(&self, remote_path: &str, recursive: bool) -> bool {
        info!("Deleting {remote_path}");
        let out = self.run_command(&delete_args(remote_path, recursive));
        report("Delete", &out)
    }
}

fn delete_args(remote_path: &str, recursive: bool) -> Vec<&str> {
    if recursive {
        vec!["-rm", "-r", remote_path]
    } else {
        vec!["-rm", remote_path]
    }
}

fn report(op: &str, out: &CommandOutput) -> bool {
    if out.success {
        info!("{op} successful");
    } else {
        error!("{op} failed: {}", out.stderr.trim());
    }
    out.success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_arguments_without_a_shell() {
        let echo = HdfsManager::with_program("echo");
        let out = echo.run_command(&["-ls", "/data/my logs;rm -rf x"]);
        assert!(out.success);
        assert_eq!(out.stdout, "dfs -ls /data/my logs;rm -rf x\n");
    }

    #[test]
    fn list_returns_stdout_on_success() {
        let echo = HdfsManager::with_program("echo");
        assert_eq!(echo.list("/logs").as_deref(), Some("dfs -ls /logs\n"));

        let failing = HdfsManager::with_program("false");
        assert_eq!(failing.list("/logs"), None);
    }

    #[test]
    fn operations_follow_exit_status() {
        let ok = HdfsManager::with_program("true");
        assert!(ok.upload("a.log", "/in/a.log"));
        assert!(ok.download("/out/part-00000", "out.tsv"));
        assert!(ok.create_dir("/in"));
        assert!(ok.delete("/out", true));

        let failing = HdfsManager::with_program("false");
        assert!(!failing.upload("a.log", "/in/a.log"));
        assert!(!failing.delete("/out", false));
    }

    #[test]
    fn missing_program_is_a_failure() {
        let missing = HdfsManager::with_program("/nonexistent/hdfs-client");
        let out = missing.run_command(&["-ls", "/"]);
        assert!(!out.success);
        assert!(out.stderr.contains("/nonexistent/hdfs-client"));
        assert!(!missing.create_dir("/in"));
    }

    #[test]
    fn recursive_delete_adds_flag() {
        assert_eq!(delete_args("/out", true), vec!["-rm", "-r", "/out"]);
        assert_eq!(delete_args("/out", false), vec!["-rm", "/out"]);
    }

    #[test]
    fn defaults_to_hdfs() {
        assert_eq!(HdfsManager::default().program, "hdfs");
    }
}
