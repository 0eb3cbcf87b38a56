use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn data_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Runs the binary in script mode against `home`, feeding `lines` on stdin.
pub fn run_script(home: &Path, lines: &[&str]) -> assert_cmd::assert::Assert {
    let mut input = lines.join("\n");
    input.push('\n');

    Command::cargo_bin("spendlog")
        .expect("spendlog binary")
        .env("SPENDLOG_HOME", home)
        .env("SPENDLOG_CLI_SCRIPT", "1")
        .env("RUST_LOG", "spendlog=warn")
        .write_stdin(input)
        .assert()
}
