//! `bowerpath resolve-all` command implementation.

use super::fail;
use bowerpath_core::{resolve_all_from_file, ResolveOptions};
use miette::Result;
use std::path::Path;

/// Resolve every dependency of a `bower.json`.
pub fn run(manifest: &Path, options: &ResolveOptions, json: bool) -> Result<()> {
    let deps = match resolve_all_from_file(manifest, options) {
        Ok(deps) => deps,
        Err(e) => fail(&e, json),
    };

    if json {
        let dependencies: serde_json::Map<String, serde_json::Value> = deps
            .iter()
            .map(|(name, paths)| {
                let paths: Vec<_> = paths
                    .iter()
                    .map(|p| serde_json::Value::from(p.to_string_lossy().into_owned()))
                    .collect();
                (name.clone(), serde_json::Value::Array(paths))
            })
            .collect();

        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "manifest": manifest.to_string_lossy(),
                "dependencies": dependencies
            })
        );
        return Ok(());
    }

    if deps.is_empty() {
        println!("No dependencies resolved from {}", manifest.display());
        return Ok(());
    }

    for (name, paths) in &deps {
        if paths.is_empty() {
            println!("{name}: (unresolved)");
            continue;
        }
        for path in paths {
            println!("{name}: {}", path.display());
        }
    }

    Ok(())
}
