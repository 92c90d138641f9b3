//! Common test utilities for integration tests.
//!
//! Fixture access, temporary files and a table-driven address resolver.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use hacfg::corosync::AddressResolver;
use hacfg::reports::ReportItem;

/// Path to a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Content of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).unwrap()
}

/// Writes `content` to `dir/name` and returns the path.
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Codes of the reports, in order.
#[allow(dead_code)]
pub fn codes(reports: &[ReportItem]) -> Vec<&'static str> {
    reports.iter().map(ReportItem::code).collect()
}

/// Resolves exactly the listed host names.
#[allow(dead_code)]
pub struct StaticResolver {
    known: HashSet<String>,
}

impl StaticResolver {
    #[allow(dead_code)]
    pub fn new(known: &[&str]) -> Self {
        Self {
            known: known.iter().map(|name| (*name).to_string()).collect(),
        }
    }
}

impl AddressResolver for StaticResolver {
    fn resolves(&self, address: &str) -> bool {
        self.known.contains(address)
    }
}
