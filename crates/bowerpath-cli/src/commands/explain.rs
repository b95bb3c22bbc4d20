//! `bowerpath explain` command implementation.

use super::fail;
use bowerpath_core::resolver::EXPLAIN_SCHEMA_VERSION;
use bowerpath_core::{resolve_with_trace, ResolveOptions, ResolveResultWithTrace};
use miette::Result;

/// Resolve a package and print each step of the cascade.
pub fn run(name: &str, reference: Option<&str>, options: &ResolveOptions, json: bool) -> Result<()> {
    let result = match resolve_with_trace(name, reference, options) {
        Ok(result) => result,
        Err(e) => fail(&e, json),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "schema_version": EXPLAIN_SCHEMA_VERSION,
                "name": name,
                "root": result.root.as_ref().map(|r| r.dir.to_string_lossy().into_owned()),
                "paths": result.paths,
                "trace": result.trace
            })
        );
    } else {
        print_explain_human(name, &result);
    }

    Ok(())
}

fn print_explain_human(name: &str, result: &ResolveResultWithTrace) {
    println!("Package: {name}");
    match &result.root {
        Some(root) => println!("Root: {}", root.dir.display()),
        None => println!("Root: (not found)"),
    }
    println!();

    if result.paths.is_empty() {
        println!("Status: UNRESOLVED");
    } else {
        println!("Resolved:");
        for path in &result.paths {
            println!("  {}", path.display());
        }
    }
    println!();

    println!("Resolution trace:");
    for (i, step) in result.trace.steps.iter().enumerate() {
        let status = if step.ok { "OK" } else { "FAIL" };
        println!("  {}. [{}] {}: {}", i + 1, status, step.step, step.detail);

        if let Some(ref package) = step.package {
            println!("      package: {package}");
        }
        if let Some(ref path) = step.path {
            println!("      path: {}", path.display());
        }
        for note in &step.notes {
            println!("      note: {note}");
        }
    }

    if !result.trace.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.trace.warnings {
            println!("  [{}] {}", warning.code, warning.message);
        }
    }
}
