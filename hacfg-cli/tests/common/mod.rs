//! Common test utilities for CLI integration tests.
//!
//! Each test gets an isolated directory with its own settings file, so the
//! binary never reads the real cluster configuration.

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const COROSYNC_CONF: &str = "\
totem {
    version: 2
    cluster_name: test
}

nodelist {
    node {
        ring0_addr: 10.0.0.1
        name: node1
        nodeid: 1
    }

    node {
        ring0_addr: 10.0.0.2
        name: node2
        nodeid: 2
    }
}

quorum {
    provider: corosync_votequorum

    device {
        model: net

        net {
            tie_breaker: 2
        }
    }
}
";

pub const BOOTH_CONF: &str = "\
transport = UDP
site = 10.1.0.1
site = 10.2.0.1
arbitrator = 10.3.0.1
ticket = \"ticketA\"
  expire = 600
";

pub const PERMISSIONS: &str = r#"{
  "format_version": 2,
  "data_version": 1,
  "clusters": [{"name": "east", "nodes": ["node1", "node2"]}],
  "permissions": {
    "local_cluster": [
      {"name": "haclient", "type": "group", "allow": ["grant", "read", "write"]},
      {"name": "alice", "type": "user", "allow": ["read"]}
    ]
  }
}"#;

pub const KNOWN_HOSTS: &str = r#"{
  "format_version": 1,
  "data_version": 1,
  "known_hosts": {
    "node1": {"token": "t1", "dest_list": [{"addr": "10.0.0.1", "port": 2224}]}
  }
}"#;

/// Test environment with isolated configuration files.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Settings file pointing at the files in the temporary directory
    pub settings_path: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with all configuration files.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let booth_dir = temp_path.join("booth");
        fs::create_dir(&booth_dir).unwrap();

        fs::write(temp_path.join("corosync.conf"), COROSYNC_CONF).unwrap();
        fs::write(booth_dir.join("booth.conf"), BOOTH_CONF).unwrap();
        fs::write(temp_path.join("permissions.json"), PERMISSIONS).unwrap();
        fs::write(temp_path.join("known-hosts"), KNOWN_HOSTS).unwrap();

        let settings_path = temp_path.join("settings.yaml");
        fs::write(
            &settings_path,
            format!(
                "corosync_conf_path: {}\nbooth_config_dir: {}\npermissions_path: {}\nknown_hosts_path: {}\n",
                temp_path.join("corosync.conf").display(),
                booth_dir.display(),
                temp_path.join("permissions.json").display(),
                temp_path.join("known-hosts").display(),
            ),
        )
        .unwrap();

        Self {
            temp_dir,
            temp_path,
            settings_path,
        }
    }

    /// A command using this environment's settings.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("hacfg").expect("Failed to find hacfg binary");
        for var in [
            "HACFG_SETTINGS",
            "HACFG_COROSYNC_CONF_PATH",
            "HACFG_BOOTH_CONFIG_DIR",
            "HACFG_PERMISSIONS_PATH",
            "HACFG_KNOWN_HOSTS_PATH",
            "HACFG_SUPERUSER",
            "HACFG_ADMIN_GROUP",
            "HACFG_BOOTH_ENABLE_AUTHFILE_SET",
            "HACFG_BOOTH_ENABLE_AUTHFILE_UNSET",
            "HACFG_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd.arg("--settings").arg(&self.settings_path);
        cmd
    }

    /// Path of a file in the environment.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_path.join(name)
    }

    /// Content of a file in the environment.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path(name)).unwrap()
    }

    /// Write a file in the environment.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }
}
