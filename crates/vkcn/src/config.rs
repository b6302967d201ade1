//! Configuration file loading for vkcn.
//!
//! Reads `vkcn.config.json` from the current working directory, or the file
//! given with `--config`.

use std::path::{Path, PathBuf};
use vkcn_patina::LintConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "vkcn.config.json";

fn warn(path: &Path, error: impl std::fmt::Display) {
    eprintln!(
        "\x1b[33mWarning:\x1b[0m Failed to load {}: {}",
        path.display(),
        error
    );
}

/// Load the config, falling back to defaults with a warning when the file
/// can not be read or parsed. A missing default file is silently ignored.
pub fn load_config(explicit: Option<&Path>) -> LintConfig {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let base = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let path = base.join(CONFIG_FILE);
            if !path.exists() {
                tracing::debug!("no {CONFIG_FILE}, using defaults");
                return LintConfig::default();
            }
            path
        }
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => match LintConfig::from_json(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded config");
                config
            }
            Err(e) => {
                warn(&path, e);
                LintConfig::default()
            }
        },
        Err(e) => {
            warn(&path, e);
            LintConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("vkcn-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_explicit() {
        let path = temp_file(
            "explicit.json",
            r#"{ "rules": { "vkcn/no-dynamic-class-names": "off" } }"#,
        );
        let config = load_config(Some(&path));
        assert_eq!(config.rules.len(), 1);
    }

    #[test]
    fn test_malformed_falls_back() {
        let path = temp_file("malformed.json", "{ rules: ");
        assert!(load_config(Some(&path)).rules.is_empty());
    }

    #[test]
    fn test_missing_explicit_falls_back() {
        let path = std::env::temp_dir().join("vkcn-does-not-exist.json");
        assert!(load_config(Some(&path)).rules.is_empty());
    }
}
