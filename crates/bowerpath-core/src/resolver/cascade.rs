//! Per-package resolution cascade.
//!
//! Strategies run in [`CASCADE`] order; the first one producing a non-empty
//! set wins and the rest are never evaluated.

use super::manifest::{read_manifest, MainField, PackageManifest};
use super::resolved::ResolvedPaths;
use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use crate::paths::ProjectRoot;
use bowerpath_util::path::{join_under, normalize};
use std::path::{Path, PathBuf};

/// Build-output subdirectory retried when a declared main file is missing.
pub const DIST_DIR: &str = "dist";

/// Whether `name` contains a path separator.
#[must_use]
pub fn has_path_separator(name: &str) -> bool {
    name.contains(['/', '\\'])
}

/// Everything a strategy needs to know about one package.
#[derive(Debug, Clone)]
pub struct PackageContext<'a> {
    /// Package name as requested.
    pub name: &'a str,
    /// `<root>/<directory>/<name>`.
    pub dir: PathBuf,
    /// Manifest, or `None` when absent or unusable.
    pub manifest: Option<PackageManifest>,
}

impl<'a> PackageContext<'a> {
    /// Locate the package under `root` and read its manifest.
    ///
    /// An unreadable or unparsable manifest is logged and treated as absent.
    pub fn load(root: &ProjectRoot, name: &'a str, trace: &mut ResolveTrace) -> Self {
        let dir = normalize(&root.package_dir(name));

        let manifest = match read_manifest(&dir) {
            Ok(Some(manifest)) => {
                trace.add_step(
                    ResolveTraceStep::new(steps::READ_MANIFEST, true, "Read package manifest")
                        .with_package(name)
                        .with_path(&manifest.path),
                );
                Some(manifest)
            }
            Ok(None) => {
                trace.add_step(
                    ResolveTraceStep::new(
                        steps::READ_MANIFEST,
                        false,
                        "No .bower.json or bower.json",
                    )
                    .with_package(name)
                    .with_path(&dir),
                );
                None
            }
            Err(e) => {
                tracing::warn!(package = name, error = %e, "treating manifest as absent");
                trace.add_warning(TraceWarning::new(
                    warning_codes::MANIFEST_INVALID,
                    e.to_string(),
                ));
                trace.add_step(
                    ResolveTraceStep::new(steps::READ_MANIFEST, false, "Manifest unusable")
                        .with_package(name),
                );
                None
            }
        };

        Self {
            name,
            dir,
            manifest,
        }
    }
}

/// One fallback in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Manifest `main`, each entry retried under `dist/`.
    MainField,
    /// No manifest; the name itself is a path inside the package dir.
    PathLikeName,
    /// No manifest; probe `<name>.js`, `dist/<name>.min.js`, `dist/<name>.js`.
    BareNameProbe,
}

/// Strategies in priority order.
pub const CASCADE: &[Strategy] = &[
    Strategy::MainField,
    Strategy::PathLikeName,
    Strategy::BareNameProbe,
];

impl Strategy {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::MainField => steps::RESOLVE_MAIN,
            Self::PathLikeName => steps::PATH_LIKE_NAME,
            Self::BareNameProbe => steps::BARE_NAME_PROBE,
        }
    }

    /// Run this strategy. An empty set means "not applicable or nothing found".
    pub fn apply(self, pkg: &PackageContext<'_>, trace: &mut ResolveTrace) -> ResolvedPaths {
        match self {
            Self::MainField => match &pkg.manifest {
                Some(manifest) => resolve_main_field(pkg, manifest.main.as_ref(), trace),
                None => ResolvedPaths::new(),
            },
            Self::PathLikeName => {
                if pkg.manifest.is_some() || !has_path_separator(pkg.name) {
                    return ResolvedPaths::new();
                }
                resolve_path_like_name(pkg, trace)
            }
            Self::BareNameProbe => {
                if pkg.manifest.is_some() || has_path_separator(pkg.name) {
                    return ResolvedPaths::new();
                }
                probe_bare_name(pkg, trace)
            }
        }
    }
}

/// Resolve one package under `root` through the cascade.
pub fn resolve_package(root: &ProjectRoot, name: &str, trace: &mut ResolveTrace) -> ResolvedPaths {
    let pkg = PackageContext::load(root, name, trace);

    CASCADE
        .iter()
        .map(|strategy| strategy.apply(&pkg, trace))
        .find(|paths| !paths.is_empty())
        .unwrap_or_default()
}

fn resolve_main_field(
    pkg: &PackageContext<'_>,
    main: Option<&MainField>,
    trace: &mut ResolveTrace,
) -> ResolvedPaths {
    let mut paths = ResolvedPaths::new();

    let Some(main) = main else {
        trace.add_step(
            ResolveTraceStep::new(steps::RESOLVE_MAIN, false, "Manifest has no usable main field")
                .with_package(pkg.name),
        );
        return paths;
    };

    trace.add_step(
        ResolveTraceStep::new(
            steps::RESOLVE_MAIN,
            true,
            format!("Using main field: {}", main.entries().join(", ")),
        )
        .with_package(pkg.name),
    );

    for entry in main.entries() {
        if let Some(path) = existing_or_dist(pkg, entry, trace) {
            paths.insert(path);
        }
    }

    paths
}

/// `<dir>/<entry>` if it exists, else `<dir>/dist/<entry>` if that exists.
///
/// A leading `/` on `entry` is ignored; candidates always stay under `<dir>`.
fn existing_or_dist(
    pkg: &PackageContext<'_>,
    entry: &str,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    let candidate = join_under(&pkg.dir, entry);
    if candidate.exists() {
        record_hit(pkg, &candidate, trace);
        return Some(candidate);
    }

    let dist = join_under(&pkg.dir.join(DIST_DIR), entry);
    if dist.exists() {
        trace.add_step(
            ResolveTraceStep::new(steps::DIST_FALLBACK, true, format!("{entry} found under dist/"))
                .with_package(pkg.name)
                .with_path(&dist),
        );
        record_hit(pkg, &dist, trace);
        return Some(dist);
    }

    tracing::debug!(package = pkg.name, entry, "main entry not found, dropping");
    trace.add_warning(TraceWarning::new(
        warning_codes::MAIN_ENTRY_MISSING,
        format!("{}: main entry '{entry}' not found", pkg.name),
    ));
    trace.add_step(
        ResolveTraceStep::new(steps::FILE_EXISTS, false, format!("Dropped main entry {entry}"))
            .with_package(pkg.name)
            .with_path(&candidate)
            .with_note(format!("also tried {}", dist.display())),
    );
    None
}

fn resolve_path_like_name(pkg: &PackageContext<'_>, trace: &mut ResolveTrace) -> ResolvedPaths {
    let candidate = join_under(&pkg.dir, pkg.name);
    if candidate.exists() {
        record_hit(pkg, &candidate, trace);
        return std::iter::once(candidate).collect();
    }

    trace.add_step(
        ResolveTraceStep::new(steps::PATH_LIKE_NAME, false, "Name is a path but nothing exists there")
            .with_package(pkg.name)
            .with_path(&candidate),
    );
    ResolvedPaths::new()
}

/// Candidate files for a package without a manifest, in probe order.
#[must_use]
pub fn bare_name_candidates(dir: &Path, name: &str) -> [PathBuf; 3] {
    [
        dir.join(format!("{name}.js")),
        dir.join(DIST_DIR).join(format!("{name}.min.js")),
        dir.join(DIST_DIR).join(format!("{name}.js")),
    ]
}

fn probe_bare_name(pkg: &PackageContext<'_>, trace: &mut ResolveTrace) -> ResolvedPaths {
    for candidate in bare_name_candidates(&pkg.dir, pkg.name) {
        let candidate = normalize(&candidate);
        if candidate.exists() {
            record_hit(pkg, &candidate, trace);
            return std::iter::once(candidate).collect();
        }
    }

    trace.add_step(
        ResolveTraceStep::new(steps::BARE_NAME_PROBE, false, "No conventional entry file found")
            .with_package(pkg.name)
            .with_path(&pkg.dir),
    );
    ResolvedPaths::new()
}

fn record_hit(pkg: &PackageContext<'_>, path: &Path, trace: &mut ResolveTrace) {
    tracing::debug!(package = pkg.name, path = %path.display(), "resolved entry file");
    trace.add_step(
        ResolveTraceStep::new(steps::FILE_EXISTS, true, "Entry file exists")
            .with_package(pkg.name)
            .with_path(path),
    );
}
