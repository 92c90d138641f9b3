//! Reading booth configurations from a directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::reports::{ReportItem, ReportItemMessage};

/// Extension of booth configuration files.
pub const CONFIG_EXTENSION: &str = "conf";

/// Reads all booth configs in `dir`.
///
/// Returns the contents keyed by file name. A config which cannot be read
/// is skipped and reported as a warning.
///
/// # Errors
///
/// Returns an I/O error if the directory itself cannot be listed.
pub fn read_configs(dir: &Path) -> Result<(BTreeMap<String, String>, Vec<ReportItem>)> {
    let mut configs = BTreeMap::new();
    let mut reports = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(CONFIG_EXTENSION) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        match fs::read_to_string(&path) {
            Ok(content) => {
                configs.insert(name.to_string(), content);
            }
            Err(e) => {
                log::warn!("Unable to read booth config '{}': {e}", path.display());
                reports.push(ReportItem::warning(ReportItemMessage::BoothConfigReadError {
                    name: name.to_string(),
                    reason: e.to_string(),
                }));
            }
        }
    }

    Ok((configs, reports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_conf_files_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.conf"), "site = 2.2.2.2\n").unwrap();
        fs::write(dir.path().join("a.conf"), "site = 1.1.1.1\n").unwrap();
        fs::write(dir.path().join("a.key"), "secret").unwrap();

        let (configs, reports) = read_configs(dir.path()).unwrap();
        assert!(reports.is_empty());
        assert_eq!(
            configs.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a.conf", "b.conf"]
        );
        assert_eq!(configs["a.conf"], "site = 1.1.1.1\n");
    }

    #[test]
    fn test_unreadable_config_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ok.conf"), "site = 1.1.1.1\n").unwrap();
        // A directory cannot be read as a file.
        fs::create_dir(dir.path().join("broken.conf")).unwrap();

        let (configs, reports) = read_configs(dir.path()).unwrap();
        assert_eq!(configs.len(), 1);
        assert!(configs.contains_key("ok.conf"));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].code(), "BOOTH_CONFIG_READ_ERROR");
        assert!(!reports[0].is_error());
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        assert!(read_configs(&dir.path().join("missing")).is_err());
    }
}
