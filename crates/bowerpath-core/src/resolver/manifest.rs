//! Per-package manifest (`.bower.json` / `bower.json`) reading.

use crate::error::Error;
use crate::paths::{BOWER_JSON, HIDDEN_BOWER_JSON};
use bowerpath_util::fs::read_to_string_lossy;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The `main` field of a package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainField {
    Single(String),
    List(Vec<String>),
}

impl MainField {
    /// Interpret a raw JSON `main` value.
    ///
    /// Strings and arrays are accepted; non-string array items are skipped.
    /// Any other JSON type yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Single(s.clone())),
            Value::Array(items) => Some(Self::List(
                items
                    .iter()
                    .filter_map(|item| {
                        let entry = item.as_str();
                        if entry.is_none() {
                            tracing::debug!(?item, "skipping non-string main entry");
                        }
                        entry.map(str::to_string)
                    })
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Parsed per-package manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    /// File the manifest was read from.
    pub path: PathBuf,
    /// `name` field, if present.
    pub name: Option<String>,
    /// `main` field, if present and of a usable type.
    pub main: Option<MainField>,
}

impl PackageManifest {
    #[must_use]
    pub fn from_value(path: PathBuf, value: &Value) -> Self {
        Self {
            path,
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
            main: value.get("main").and_then(MainField::from_value),
        }
    }
}

/// Read and parse a JSON file.
///
/// # Errors
/// Returns `Error::FileRead` or `Error::JsonParse`.
pub fn read_json_file(path: &Path) -> Result<Value, Error> {
    let content = read_to_string_lossy(path).map_err(|source| Error::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Locate the manifest for a package directory, preferring the hidden
/// `.bower.json` over `bower.json`.
#[must_use]
pub fn find_manifest(pkg_dir: &Path) -> Option<PathBuf> {
    [HIDDEN_BOWER_JSON, BOWER_JSON]
        .iter()
        .map(|name| pkg_dir.join(name))
        .find(|path| path.exists())
}

/// Read the manifest for a package directory as raw JSON.
///
/// `Ok(None)` when neither manifest file exists.
///
/// # Errors
/// Returns the read or parse error of the manifest that was found.
pub fn read_manifest_value(pkg_dir: &Path) -> Result<Option<(PathBuf, Value)>, Error> {
    let Some(path) = find_manifest(pkg_dir) else {
        return Ok(None);
    };
    let value = read_json_file(&path)?;
    Ok(Some((path, value)))
}

/// Read the manifest for a package directory.
///
/// # Errors
/// Returns the read or parse error of the manifest that was found.
pub fn read_manifest(pkg_dir: &Path) -> Result<Option<PackageManifest>, Error> {
    Ok(read_manifest_value(pkg_dir)?.map(|(path, value)| PackageManifest::from_value(path, &value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_main_single() {
        let main = MainField::from_value(&json!("dist/jquery.js")).unwrap();
        assert_eq!(main, MainField::Single("dist/jquery.js".to_string()));
        assert_eq!(main.entries(), vec!["dist/jquery.js"]);
    }

    #[test]
    fn test_main_list_skips_non_strings() {
        let main = MainField::from_value(&json!(["a.js", 3, null, "b.css"])).unwrap();
        assert_eq!(main.entries(), vec!["a.js", "b.css"]);
    }

    #[test]
    fn test_main_other_types_ignored() {
        assert!(MainField::from_value(&json!(42)).is_none());
        assert!(MainField::from_value(&json!({"js": "a.js"})).is_none());
        assert!(MainField::from_value(&Value::Null).is_none());
    }

    #[test]
    fn test_hidden_manifest_preferred() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(HIDDEN_BOWER_JSON),
            r#"{"name": "widget", "main": "hidden.js"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(BOWER_JSON),
            r#"{"name": "widget", "main": "visible.js"}"#,
        )
        .unwrap();

        let manifest = read_manifest(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.path, dir.path().join(HIDDEN_BOWER_JSON));
        assert_eq!(manifest.main, Some(MainField::Single("hidden.js".to_string())));
    }

    #[test]
    fn test_visible_manifest_used_when_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BOWER_JSON), r#"{"name": "widget"}"#).unwrap();

        let manifest = read_manifest(dir.path()).unwrap().unwrap();
        assert_eq!(manifest.name.as_deref(), Some("widget"));
        assert!(manifest.main.is_none());
    }

    #[test]
    fn test_no_manifest() {
        let dir = tempdir().unwrap();
        assert!(read_manifest(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_manifest_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(HIDDEN_BOWER_JSON), "{ broken").unwrap();

        let err = read_manifest(dir.path()).unwrap_err();
        assert!(matches!(err, Error::JsonParse { .. }));
    }
}
