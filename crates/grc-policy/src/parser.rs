//! Shared YAML/JSON record loading.
//!
//! Library records (templates, client profiles) are stored one per file as
//! YAML or JSON. Every loader goes through these functions so a missing
//! file, a parse failure, or an unsupported extension reports the path.

use std::path::{Path, PathBuf};

use crate::error::{PolicyError, PolicyResult};

/// File extensions recognized as library records.
pub const RECORD_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

fn read_file(path: &Path) -> PolicyResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PolicyError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PolicyError::Io(e)
        }
    })
}

/// Load a YAML file into a strongly-typed struct.
pub fn load_yaml_typed<T: serde::de::DeserializeOwned>(path: &Path) -> PolicyResult<T> {
    let content = read_file(path)?;
    serde_yaml::from_str(&content).map_err(|e| PolicyError::YamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a JSON file into a strongly-typed struct.
pub fn load_json_typed<T: serde::de::DeserializeOwned>(path: &Path) -> PolicyResult<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content).map_err(|e| PolicyError::JsonParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a record, choosing the format from the file extension.
pub fn load_record<T: serde::de::DeserializeOwned>(path: &Path) -> PolicyResult<T> {
    match extension(path).as_deref() {
        Some("json") => load_json_typed(path),
        Some("yaml") | Some("yml") => load_yaml_typed(path),
        _ => Err(PolicyError::Validation(format!(
            "unsupported record file {}: expected one of {}",
            path.display(),
            RECORD_EXTENSIONS.join(", ")
        ))),
    }
}

/// Record files directly inside `dir`, sorted by path.
///
/// A missing directory yields an empty list. Files with other extensions
/// and subdirectories are ignored.
pub fn record_files(dir: &Path) -> PolicyResult<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::debug!(dir = %dir.display(), "record directory absent, treating as empty");
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match extension(&path) {
            Some(ext) if RECORD_EXTENSIONS.contains(&ext.as_str()) => files.push(path),
            _ => tracing::debug!(path = %path.display(), "ignoring non-record file"),
        }
    }
    files.sort();
    Ok(files)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
