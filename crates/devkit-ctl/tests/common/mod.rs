//! Sandbox shared by the CLI integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the compiled devkit binary.
pub fn devkit_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_devkit"))
}

/// Isolated HOME, working directory and data directory for one test.
pub struct Sandbox {
    _root: TempDir,
    pub home: PathBuf,
    pub work: PathBuf,
    pub data: PathBuf,
}

impl Sandbox {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let home = root.path().join("home");
        let work = root.path().join("work");
        let data = root.path().join("data");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(&work).unwrap();
        Self {
            _root: root,
            home,
            work,
            data,
        }
    }

    /// A `devkit` command with a scrubbed environment, run from `work`.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(devkit_bin());
        cmd.current_dir(&self.work)
            .env("HOME", &self.home)
            .env("XDG_DATA_HOME", self.home.join(".local/share"))
            .env("APPDATA", self.home.join("AppData/Roaming"))
            .env_remove("DEVKIT_DATA_DIR")
            .env_remove("DEVKIT_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run with `--data-dir` pointing at the sandbox data directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .arg("--data-dir")
            .arg(&self.data)
            .args(args)
            .output()
            .expect("Failed to execute devkit")
    }

    /// Write `.devkit.toml` into the working directory.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.work.join(".devkit.toml"), contents).unwrap();
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn code(output: &Output) -> i32 {
    output.status.code().expect("devkit exited by signal")
}
