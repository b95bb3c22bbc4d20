//! Integration tests for `bowerpath explain --json` output.

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

fn step_names(json: &serde_json::Value) -> Vec<String> {
    json["trace"]["steps"]
        .as_array()
        .expect("trace.steps should be an array")
        .iter()
        .map(|s| s["step"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_explain_records_cascade() {
    let dir = tempdir().unwrap();
    let pkg = dir.path().join("bower_components/widget");
    fs::create_dir_all(pkg.join("dist")).unwrap();
    fs::write(pkg.join("dist/widget.js"), "").unwrap();
    fs::write(pkg.join(".bower.json"), r#"{"main": "widget.js"}"#).unwrap();

    let output = bowerpath(dir.path(), &["--json", "explain", "widget"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(json["ok"], true);
    assert_eq!(json["schema_version"], 1);
    assert_eq!(json["root"], dir.path().to_string_lossy().as_ref());
    assert_eq!(json["paths"].as_array().unwrap().len(), 1);

    let steps = step_names(&json);
    assert!(steps.contains(&"find_project_root".to_string()), "{steps:?}");
    assert!(steps.contains(&"dist_fallback".to_string()), "{steps:?}");
    assert!(steps.contains(&"final_path".to_string()), "{steps:?}");
}

#[test]
fn test_explain_without_project_root() {
    let dir = tempdir().unwrap();

    let output = bowerpath(
        dir.path(),
        &[
            "--json",
            "--ceiling",
            dir.path().to_str().unwrap(),
            "explain",
            "widget",
            "--reference",
            "https://cdn.example.com/widget.js",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert!(json["root"].is_null());
    let warnings: Vec<&str> = json["trace"]["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["code"].as_str().unwrap())
        .collect();
    assert!(warnings.contains(&"speculative_path"), "{warnings:?}");

    let expected = dir.path().join("bower_components/widget/index.js");
    assert_eq!(json["paths"], serde_json::json!([expected.to_string_lossy()]));
}
