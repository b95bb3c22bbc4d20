//! `bowerpath installed` command implementation.
//!
//! Resolves through the installed-package registry instead of the
//! filesystem cascade.

use super::fail;
use bowerpath_core::{BowerListLister, InstalledLister, LiveRegistry, ScanLister};
use miette::Result;
use std::path::Path;

/// Where the registry gets its package list from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `bower list --json`
    Bower { offline: bool },
    /// Scan the components directory.
    Scan,
}

pub fn run(cwd: &Path, name: &str, source: Source, json: bool) -> Result<()> {
    let lister: Box<dyn InstalledLister> = match source {
        Source::Bower { offline } => Box::new(BowerListLister::new(cwd).with_offline(offline)),
        Source::Scan => Box::new(ScanLister::new(cwd)),
    };

    let mut registry = LiveRegistry::new();
    if let Err(e) = registry.init(lister.as_ref()) {
        fail(&e, json);
    }

    let main = match registry.resolve(name) {
        Ok(main) => main,
        Err(e) => fail(&e, json),
    };

    if json {
        println!(
            "{}",
            serde_json::json!({
                "ok": true,
                "name": name,
                "main": main.as_ref().map(|p| p.to_string_lossy().into_owned())
            })
        );
    } else {
        match main {
            Some(path) => println!("{}", path.display()),
            None => tracing::info!(package = name, "package is not installed"),
        }
    }

    Ok(())
}
