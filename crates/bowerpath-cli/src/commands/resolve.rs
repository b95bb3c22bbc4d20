//! `bowerpath resolve` command implementation.

use super::fail;
use bowerpath_core::{resolve_one_with_reference, ResolveOptions};
use miette::Result;

/// Resolve one package (or `*`) and print its entry files.
///
/// Human output is one path per line; nothing is printed when the package
/// resolves to no files.
pub fn run(name: &str, reference: Option<&str>, options: &ResolveOptions, json: bool) -> Result<()> {
    let paths = match resolve_one_with_reference(name, reference, options) {
        Ok(paths) => paths,
        Err(e) => fail(&e, json),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "name": name,
                "paths": paths
                    .iter()
                    .map(|p| p.to_string_lossy())
                    .collect::<Vec<_>>()
            })
        );
    } else {
        if paths.is_empty() {
            tracing::info!(package = name, "no entry files resolved");
        }
        for path in &paths {
            println!("{}", path.display());
        }
    }

    Ok(())
}
