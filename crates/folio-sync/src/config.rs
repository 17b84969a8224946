use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Exports copied into the artifact, in output order.
pub const DEFAULT_INCLUDE_KEYS: [&str; 6] = [
    "skills",
    "skillCategories",
    "experiences",
    "projects",
    "aboutSkills",
    "services",
];

pub const DEFAULT_OUTPUT: &str = "public/portfolioData.json";

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sync.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Artifact path.
    pub output: PathBuf,
    /// Exports to emit, in order.
    pub include: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            include: DEFAULT_INCLUDE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Parse a config from a RON string. Missing fields take their defaults.
pub fn parse_config(ron_str: &str) -> Result<SyncConfig, SyncError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| SyncError::Config(e.to_string()))
}

/// Load the config at `path`, or `sync.ron` if present, or the defaults.
///
/// An explicit path must exist; the implicit one may be absent.
pub fn load_config(path: Option<&Path>) -> Result<SyncConfig, SyncError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let implicit = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !implicit.is_file() {
                log::debug!("No {DEFAULT_CONFIG_FILE}; using defaults");
                return Ok(SyncConfig::default());
            }
            implicit
        }
    };
    let text = std::fs::read_to_string(&path).map_err(SyncError::io(&path))?;
    let config = parse_config(&text)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"(
                output: "dist/data.json",
                include: ["projects", "skills"],
            )"#,
        )
        .expect("valid config");
        assert_eq!(config.output, PathBuf::from("dist/data.json"));
        assert_eq!(config.include, ["projects", "skills"]);
    }

    #[test]
    fn test_missing_fields_default() {
        let config = parse_config(r#"(output: "out.json")"#).expect("valid config");
        assert_eq!(config.output, PathBuf::from("out.json"));
        assert_eq!(config.include, SyncConfig::default().include);

        assert_eq!(parse_config("()").expect("empty config"), SyncConfig::default());
    }

    #[test]
    fn test_bad_ron_is_config_error() {
        let err = parse_config("(output: 42").unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("folio-sync-no-such-config.ron");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("folio-sync-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("sync.ron");
        std::fs::write(&path, r#"(include: ["services"])"#).expect("write config");

        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.include, ["services"]);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_default_include_order() {
        assert_eq!(
            SyncConfig::default().include,
            [
                "skills",
                "skillCategories",
                "experiences",
                "projects",
                "aboutSkills",
                "services"
            ]
        );
    }
}
