//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing:
//! - An isolated data directory per test
//! - Command builders that act as a given user and role
//! - Shortcuts for the setup every booking test needs

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host shell
/// cannot leak into a test.
const LODGE_VARS: [&str; 9] = [
    "LODGE_DATA_DIR",
    "LODGE_BUSY_TIMEOUT",
    "LODGE_DISABLE_AUTOINIT",
    "LODGE_ACTOR",
    "LODGE_ROLE",
    "LODGE_MAXIMUM_LOCK_WAIT_SECONDS",
    "LODGE_MAX_RANGE_DAYS",
    "LODGE_OUTPUT_FORMAT",
    "LODGE_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the lodge data directory (created on first use)
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("lodge-data");

        Self { temp_dir, data_dir }
    }

    /// A command with only the binary and a clean `LODGE_*` environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("lodge").expect("Failed to find lodge binary");
        for var in LODGE_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// A command with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// A command acting as `actor` with `role`.
    pub fn as_actor(&self, actor: &str, role: &str) -> Command {
        let mut cmd = self.command();
        cmd.args(["--actor", actor, "--role", role]);
        cmd
    }

    /// Registers a property owned by the host `owner`.
    pub fn register_property(&self, property: &str, owner: &str, price: &str) {
        self.as_actor(owner, "host")
            .args(["register-property", property, "--price", price])
            .assert()
            .success();
    }

    /// Publishes an open range as the host `owner`.
    pub fn publish_range(&self, owner: &str, property: &str, start: &str, end: &str) {
        self.as_actor(owner, "host")
            .args(["publish-range", property, start, end])
            .assert()
            .success();
    }

    /// Registers `villa` for `hannah` at 100 and opens June 1-30, 2024.
    pub fn villa(&self) {
        self.register_property("villa", "hannah", "100");
        self.publish_range("hannah", "villa", "2024-06-01", "2024-06-30");
    }

    /// Reserves as a guest and returns the booking id.
    ///
    /// # Panics
    /// Panics if the reservation fails or prints no id.
    pub fn reserve(&self, guest: &str, property: &str, start: &str, end: &str) -> i64 {
        let output = self
            .as_actor(guest, "user")
            .args(["reserve", property, start, end])
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        stdout.trim().parse().expect("Output is not a booking id")
    }

    /// Runs `list --format json` as the given actor and parses the result.
    pub fn list_json(&self, actor: &str, role: &str, extra: &[&str]) -> Vec<serde_json::Value> {
        let output = self
            .as_actor(actor, role)
            .args(["list", "--format", "json"])
            .args(extra)
            .output()
            .expect("Failed to run list command");

        assert!(
            output.status.success(),
            "List failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("List output is not JSON")
    }

    /// Path of the database file.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("lodge.db")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
