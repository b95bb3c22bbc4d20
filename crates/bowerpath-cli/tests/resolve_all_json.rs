//! Integration tests for `bowerpath resolve-all --json` output.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn bowerpath(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bowerpath"))
        .arg("--cwd")
        .arg(cwd)
        .args(args)
        .output()
        .expect("Failed to run bowerpath")
}

#[test]
fn test_resolve_all_dependencies() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bower.json"),
        r#"{"name": "app", "dependencies": {"lodash": "^4.0.0", "ghost": "1.0.0"}}"#,
    )
    .unwrap();
    let lodash = dir.path().join("bower_components/lodash");
    fs::create_dir_all(lodash.join("dist")).unwrap();
    fs::write(lodash.join("dist/lodash.js"), "").unwrap();
    fs::write(lodash.join("bower.json"), r#"{"main": "lodash.js"}"#).unwrap();

    let output = bowerpath(dir.path(), &["--json", "resolve-all"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["ok"], true);
    let expected = lodash.join("dist/lodash.js");
    assert_eq!(
        json["dependencies"]["lodash"],
        serde_json::json!([expected.to_string_lossy()])
    );
    assert_eq!(json["dependencies"]["ghost"], serde_json::json!([]));
}

#[test]
fn test_resolve_all_missing_manifest() {
    let dir = tempdir().unwrap();

    let output = bowerpath(dir.path(), &["--json", "resolve-all"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["ok"], true);
    assert_eq!(json["dependencies"], serde_json::json!({}));
}

#[test]
fn test_resolve_all_invalid_dependency_name() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("bower.json"),
        r#"{"dependencies": {"org/pkg": "1.0.0"}}"#,
    )
    .unwrap();

    let output = bowerpath(dir.path(), &["--json", "resolve-all"]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "BOWER_NAME_INVALID");
}
