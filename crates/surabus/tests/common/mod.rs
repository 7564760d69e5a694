#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// An isolated home with its own database and config file.
pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub db: PathBuf,
    pub config: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let db = tmp.path().join("data/bookings.db");
        let config = tmp.path().join("config.toml");

        Self {
            _tmp: tmp,
            home,
            db,
            config,
        }
    }

    pub fn write_config(&self, toml: &str) {
        fs::write(&self.config, toml).expect("write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("surabus");
        cmd.env("HOME", &self.home)
            .env("SURABUS_STORAGE__DATABASE_PATH", &self.db)
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .args(args)
            .args(["--format", "json"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn first_package_id(&self, travel_type: &str) -> String {
        let options = self.run_json(&["packages", "--type", travel_type]);
        options["options"][0]["value"]
            .as_str()
            .expect("package option value")
            .to_string()
    }
}
