//! Resolve every dependency listed in a project manifest.

use super::manifest::read_json_file;
use super::resolve::resolve_one_with_reference;
use super::resolved::ResolvedPaths;
use crate::config::ResolveOptions;
use crate::error::Error;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Package name → resolved entry files, sorted by name.
pub type DependencyPaths = BTreeMap<String, ResolvedPaths>;

/// Resolve each entry of `manifest.dependencies`.
///
/// The dependency value is passed along as the reference string (used only
/// when no project root exists); non-string values count as no reference.
/// A manifest without a `dependencies` object yields an empty map.
///
/// # Errors
/// Returns `Error::InvalidPackageName` if a dependency name contains a path separator.
pub fn resolve_all(manifest: &Value, options: &ResolveOptions) -> Result<DependencyPaths, Error> {
    let mut result = DependencyPaths::new();

    let Some(dependencies) = manifest.get("dependencies") else {
        tracing::debug!("manifest has no dependencies");
        return Ok(result);
    };
    let Some(dependencies) = dependencies.as_object() else {
        tracing::warn!("manifest 'dependencies' is not an object, ignoring it");
        return Ok(result);
    };

    for (name, reference) in dependencies {
        let paths = resolve_one_with_reference(name, reference.as_str(), options)?;
        tracing::debug!(package = %name, count = paths.len(), "resolved dependency");
        result.insert(name.clone(), paths);
    }

    Ok(result)
}

/// Read a `bower.json` and [`resolve_all`] its dependencies.
///
/// An unreadable or unparsable manifest is logged and yields an empty map.
///
/// # Errors
/// Returns `Error::InvalidPackageName` if a dependency name contains a path separator.
pub fn resolve_all_from_file(path: &Path, options: &ResolveOptions) -> Result<DependencyPaths, Error> {
    match read_json_file(path) {
        Ok(manifest) => resolve_all(&manifest, options),
        Err(e) => {
            tracing::warn!(error = %e, "cannot read project manifest");
            Ok(DependencyPaths::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{BOWER_JSON, DEFAULT_DIRECTORY};
    use serde_json::json;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn create_project() -> TempDir {
        let dir = tempdir().unwrap();
        let manifest = json!({
            "name": "app",
            "dependencies": {
                "jquery": "~3.7.0",
                "ghost": "1.0.0"
            }
        });
        fs::write(
            dir.path().join(BOWER_JSON),
            serde_json::to_string_pretty(&manifest).unwrap(),
        )
        .unwrap();

        let jquery = dir.path().join(DEFAULT_DIRECTORY).join("jquery");
        fs::create_dir_all(jquery.join("dist")).unwrap();
        fs::write(jquery.join("dist").join("jquery.js"), "").unwrap();
        fs::write(jquery.join(".bower.json"), r#"{"main": "dist/jquery.js"}"#).unwrap();

        dir
    }

    #[test]
    fn test_unresolvable_dependency_maps_to_empty() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(DEFAULT_DIRECTORY)).unwrap();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let result = resolve_all(&json!({"dependencies": {"x": "1.0.0"}}), &options).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result["x"].is_empty());
    }

    #[test]
    fn test_resolve_all_from_file() {
        let dir = create_project();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let result = resolve_all_from_file(&dir.path().join(BOWER_JSON), &options).unwrap();
        assert_eq!(result.keys().collect::<Vec<_>>(), vec!["ghost", "jquery"]);
        assert_eq!(
            result["jquery"].as_slice(),
            &[dir
                .path()
                .join(DEFAULT_DIRECTORY)
                .join("jquery")
                .join("dist")
                .join("jquery.js")]
        );
        assert!(result["ghost"].is_empty());
    }

    #[test]
    fn test_missing_manifest_file_is_empty() {
        let dir = tempdir().unwrap();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let result = resolve_all_from_file(&dir.path().join(BOWER_JSON), &options).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_invalid_manifest_file_is_empty() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(BOWER_JSON), "{ nope").unwrap();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let result = resolve_all_from_file(&dir.path().join(BOWER_JSON), &options).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_dependencies_section() {
        let options = ResolveOptions::new();
        assert!(resolve_all(&json!({"name": "app"}), &options).unwrap().is_empty());
        assert!(resolve_all(&json!({"dependencies": ["jquery"]}), &options)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_dependency_name_is_hard_error() {
        let dir = create_project();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let err = resolve_all(&json!({"dependencies": {"org/pkg": "1.0.0"}}), &options)
            .unwrap_err();
        assert!(err.is_precondition());
    }

    #[test]
    fn test_non_string_reference_is_tolerated() {
        let dir = create_project();
        let options = ResolveOptions::new().with_cwd(dir.path());

        let result = resolve_all(&json!({"dependencies": {"jquery": {"version": "3"}}}), &options)
            .unwrap();
        assert_eq!(result["jquery"].len(), 1);
    }
}
