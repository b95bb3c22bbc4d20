//! Lookup through already-queried installed-package metadata.
//!
//! Unlike the resolver cascade, this never scans the filesystem at lookup
//! time: a [`LiveRegistry`] is populated once from an [`InstalledLister`]
//! (normally `bower list --json`) and answered from memory afterwards.

use crate::error::Error;
use crate::paths::find_project_root;
use crate::resolver::manifest::read_manifest_value;
use bowerpath_util::fs::list_entry_names;
use bowerpath_util::path::normalize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One installed package as reported by the package manager.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledPackage {
    /// Directory the package is installed in.
    pub canonical_dir: PathBuf,
    /// Package metadata (the installed manifest), if known.
    pub pkg_meta: Option<Value>,
}

/// Package name → installed package.
pub type InstalledMap = BTreeMap<String, InstalledPackage>;

/// Source of installed-package metadata.
pub trait InstalledLister {
    /// List every installed package.
    fn list(&self) -> Result<InstalledMap, Error>;
}

/// In-memory installed-package registry.
///
/// Must be initialized with [`LiveRegistry::init`] before lookups.
#[derive(Debug, Clone, Default)]
pub struct LiveRegistry {
    initialized: bool,
    dependencies: InstalledMap,
}

impl LiveRegistry {
    /// An uninitialized registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An initialized registry over an existing map.
    #[must_use]
    pub fn from_installed(dependencies: InstalledMap) -> Self {
        Self {
            initialized: true,
            dependencies,
        }
    }

    /// Populate from `lister`, replacing any previous state.
    ///
    /// On error the registry is left as it was.
    pub fn init(&mut self, lister: &dyn InstalledLister) -> Result<(), Error> {
        let dependencies = lister.list()?;
        tracing::debug!(count = dependencies.len(), "initialized installed-package registry");
        self.dependencies = dependencies;
        self.initialized = true;
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The installed packages.
    ///
    /// # Errors
    /// Returns `Error::RegistryNotInitialized` before [`LiveRegistry::init`].
    pub fn dependencies(&self) -> Result<&InstalledMap, Error> {
        if !self.initialized {
            return Err(Error::RegistryNotInitialized);
        }
        Ok(&self.dependencies)
    }

    /// Main file of an installed package: `<canonicalDir>/<main>`.
    ///
    /// `Ok(None)` for packages that are not installed, or whose array `main`
    /// has no `.js` entry.
    ///
    /// # Errors
    /// Returns `Error::RegistryNotInitialized` before [`LiveRegistry::init`].
    pub fn resolve(&self, name: &str) -> Result<Option<PathBuf>, Error> {
        let Some(package) = self.dependencies()?.get(name) else {
            return Ok(None);
        };

        let main = main_file_for(name, package.pkg_meta.as_ref());
        Ok(main.map(|main| normalize(&package.canonical_dir.join(main))))
    }
}

/// Pick the main file from package metadata.
///
/// - array `main`: the first entry ending in `.js`
/// - string `main`: used as-is
/// - otherwise: `<name>.js`
#[must_use]
pub fn main_file_for(name: &str, pkg_meta: Option<&Value>) -> Option<String> {
    match pkg_meta.and_then(|meta| meta.get("main")) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .find(|file| file.ends_with(".js"))
            .map(str::to_string),
        Some(Value::String(main)) if !main.is_empty() => Some(main.clone()),
        _ => Some(format!("{name}.js")),
    }
}

/// Parse `bower list --json` output into an [`InstalledMap`].
///
/// Entries without a `canonicalDir` (declared but not installed) are skipped.
///
/// # Errors
/// Returns `Error::ListerFailed` if the output is not JSON or has no
/// `dependencies` object.
pub fn parse_bower_list(output: &str) -> Result<InstalledMap, Error> {
    let root: Value = serde_json::from_str(output)
        .map_err(|e| Error::ListerFailed(format!("invalid bower list output: {e}")))?;

    let dependencies = root
        .get("dependencies")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::ListerFailed("bower list output has no dependencies".to_string()))?;

    let mut map = InstalledMap::new();
    for (name, entry) in dependencies {
        let Some(dir) = entry.get("canonicalDir").and_then(Value::as_str) else {
            tracing::warn!(package = %name, "package is not installed, skipping");
            continue;
        };
        map.insert(
            name.clone(),
            InstalledPackage {
                canonical_dir: PathBuf::from(dir),
                pkg_meta: entry.get("pkgMeta").cloned(),
            },
        );
    }

    Ok(map)
}

/// Lists installed packages by running `bower list --json`.
#[derive(Debug, Clone)]
pub struct BowerListLister {
    /// Directory to run `bower` in.
    pub cwd: PathBuf,
    /// Pass `--offline` so bower does not check the registry.
    pub offline: bool,
    /// Program to run.
    pub program: String,
}

impl BowerListLister {
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            offline: false,
            program: "bower".to_string(),
        }
    }

    #[must_use]
    pub fn with_offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> Vec<&'static str> {
        let mut args = vec!["list", "--json"];
        if self.offline {
            args.push("--offline");
        }
        args
    }
}

impl InstalledLister for BowerListLister {
    fn list(&self) -> Result<InstalledMap, Error> {
        let output = Command::new(&self.program)
            .args(self.args())
            .current_dir(&self.cwd)
            .output()
            .map_err(|e| Error::ListerFailed(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::ListerFailed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        parse_bower_list(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Lists installed packages by scanning the components directory.
#[derive(Debug, Clone)]
pub struct ScanLister {
    /// Directory to start project-root discovery from.
    pub start: PathBuf,
}

impl ScanLister {
    #[must_use]
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }
}

impl InstalledLister for ScanLister {
    fn list(&self) -> Result<InstalledMap, Error> {
        let root = find_project_root(&self.start).ok_or_else(|| Error::ProjectNotFound {
            start: self.start.clone(),
        })?;
        let components = root.components_dir();

        let names = match list_entry_names(&components) {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(dir = %components.display(), error = %e, "cannot list components directory");
                return Ok(InstalledMap::new());
            }
        };

        let mut map = InstalledMap::new();
        for name in names {
            let dir = components.join(&name);
            if !dir.is_dir() {
                continue;
            }
            map.insert(
                name.to_string_lossy().into_owned(),
                InstalledPackage {
                    pkg_meta: scan_pkg_meta(&dir),
                    canonical_dir: dir,
                },
            );
        }

        Ok(map)
    }
}

fn scan_pkg_meta(dir: &Path) -> Option<Value> {
    match read_manifest_value(dir) {
        Ok(found) => found.map(|(_, value)| value),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unusable manifest");
            None
        }
    }
}
