use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::SyncError;
use crate::format::ArtifactFormatter;

/// Pretty-print with a two-space indent, no trailing newline. Numbers are
/// written as [`crate::format::js_number`] spells them.
pub fn render(data: &Value) -> Result<String, SyncError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, ArtifactFormatter::default());
    data.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write the artifact atomically.
///
/// The whole document is rendered first, written to a sibling temp file and
/// renamed over `path`. A failure at any step leaves the previous artifact
/// untouched.
pub fn write_artifact(path: &Path, data: &Value) -> Result<(), SyncError> {
    let json = render(data)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(SyncError::io(parent))?;
    }

    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, json.as_bytes()) {
        std::fs::remove_file(&tmp).ok();
        return Err(SyncError::io(&tmp)(e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        std::fs::remove_file(&tmp).ok();
        return Err(SyncError::io(path)(e));
    }
    log::debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("folio-sync-{tag}-{}", std::process::id()));
        std::fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_render_two_space_indent() {
        let data = json!({ "skills": [{ "name": "Rust", "level": 90 }] });
        let text = render(&data).expect("render");
        let expected = "{\n  \"skills\": [\n    {\n      \"name\": \"Rust\",\n      \"level\": 90\n    }\n  ]\n}";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_empty_containers() {
        let text = render(&json!({ "skills": [], "services": {} })).expect("render");
        assert_eq!(text, "{\n  \"skills\": [],\n  \"services\": {}\n}");
    }

    #[test]
    fn test_write_creates_parents_and_leaves_no_temp() {
        let dir = temp_dir("write");
        let path = dir.join("public").join("portfolioData.json");
        let data = json!({ "projects": ["folio"] });

        write_artifact(&path, &data).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(text, render(&data).expect("render"));
        assert!(!temp_path(&path).exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overwrite_replaces_content() {
        let dir = temp_dir("overwrite");
        let path = dir.join("data.json");

        write_artifact(&path, &json!({ "skills": ["old"] })).expect("first write");
        write_artifact(&path, &json!({ "skills": ["new"] })).expect("second write");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.contains("new"));
        assert!(!text.contains("old"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_write_keeps_previous_artifact() {
        let dir = temp_dir("keep");
        let path = dir.join("data.json");
        write_artifact(&path, &json!({ "skills": ["kept"] })).expect("first write");

        // A directory squatting on the temp name makes the write fail.
        std::fs::create_dir_all(temp_path(&path)).expect("block temp path");
        let err = write_artifact(&path, &json!({ "skills": ["lost"] })).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.contains("kept"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = Path::new("public/portfolioData.json");
        assert_eq!(temp_path(path), Path::new("public/.portfolioData.json.tmp"));
    }
}
