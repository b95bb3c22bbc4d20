//! Resolution entry points.

use super::cascade::{has_path_separator, resolve_package};
use super::resolved::ResolvedPaths;
use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use crate::config::ResolveOptions;
use crate::error::Error;
use crate::paths::{find_project_root_until, ProjectRoot, DEFAULT_DIRECTORY};
use bowerpath_util::fs::list_entry_names;
use bowerpath_util::path::normalize;
use std::path::Path;
use std::thread::JoinHandle;

/// Package name meaning "every installed package".
pub const WILDCARD: &str = "*";

/// Result of a traced resolution.
#[derive(Debug, Clone)]
pub struct ResolveResultWithTrace {
    /// Project root, if one was discovered.
    pub root: Option<ProjectRoot>,
    /// Resolved entry files.
    pub paths: ResolvedPaths,
    /// Step-by-step trace.
    pub trace: ResolveTrace,
}

/// Resolve the entry file(s) of `name` (or every package, for `*`).
///
/// # Errors
/// Returns `Error::InvalidPackageName` if `name` contains a path separator.
/// Every other problem degrades to fewer (or no) paths.
pub fn resolve_one(name: &str, options: &ResolveOptions) -> Result<ResolvedPaths, Error> {
    resolve_one_with_reference(name, None, options)
}

/// Like [`resolve_one`], with the dependency's version/reference string.
///
/// The reference only matters when no project root exists: an `http(s)://`
/// URL ending in `.js` then yields the conventional
/// `<base>/bower_components/<name>/index.js`, unchecked.
///
/// # Errors
/// Returns `Error::InvalidPackageName` if `name` contains a path separator.
pub fn resolve_one_with_reference(
    name: &str,
    reference: Option<&str>,
    options: &ResolveOptions,
) -> Result<ResolvedPaths, Error> {
    resolve_with_trace(name, reference, options).map(|r| r.paths)
}

/// Resolve with a full step-by-step trace.
///
/// # Errors
/// Returns `Error::InvalidPackageName` if `name` contains a path separator.
pub fn resolve_with_trace(
    name: &str,
    reference: Option<&str>,
    options: &ResolveOptions,
) -> Result<ResolveResultWithTrace, Error> {
    let mut trace = ResolveTrace::new();

    if has_path_separator(name) {
        trace.failure(steps::VALIDATE_NAME, format!("'{name}' has more than one segment"));
        return Err(Error::InvalidPackageName {
            name: name.to_string(),
        });
    }
    trace.success(steps::VALIDATE_NAME, format!("'{name}' is a single segment"));

    let base = options.base_path();
    let _span = tracing::debug_span!("resolve", package = name, base = %base.display()).entered();

    let Some(root) = find_project_root_until(&base, options.ceiling_path().as_deref()) else {
        trace.add_step(
            ResolveTraceStep::new(steps::FIND_PROJECT_ROOT, false, "No bower project root found")
                .with_path(&base),
        );
        trace.add_warning(TraceWarning::new(
            warning_codes::NO_PROJECT_ROOT,
            format!("no bower.json, .bowerrc or bower_components above {}", base.display()),
        ));
        let paths = resolve_url_reference(&base, name, reference, &mut trace);
        return Ok(ResolveResultWithTrace {
            root: None,
            paths,
            trace,
        });
    };

    trace.add_step(
        ResolveTraceStep::new(steps::FIND_PROJECT_ROOT, true, "Found project root")
            .with_path(&root.dir),
    );
    if root.from_bowerrc {
        trace.add_step(
            ResolveTraceStep::new(
                steps::READ_BOWERRC,
                true,
                format!("Dependency directory: {}", root.directory),
            )
            .with_path(root.components_dir()),
        );
    }

    let mut paths = ResolvedPaths::new();
    if name == WILDCARD {
        for package in list_packages(&root, &mut trace) {
            paths.union(resolve_package(&root, &package, &mut trace));
        }
    } else {
        paths = resolve_package(&root, name, &mut trace);
    }

    for path in &paths {
        trace.add_step(ResolveTraceStep::new(steps::FINAL_PATH, true, "Resolved").with_path(path));
    }
    if paths.is_empty() {
        trace.failure(steps::FINAL_PATH, "Nothing resolved");
    }

    Ok(ResolveResultWithTrace {
        root: Some(root),
        paths,
        trace,
    })
}

/// Every entry directly under the components directory, as a package name.
fn list_packages(root: &ProjectRoot, trace: &mut ResolveTrace) -> Vec<String> {
    let components = root.components_dir();

    match list_entry_names(&components) {
        Ok(names) => {
            let names: Vec<String> = names
                .into_iter()
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            trace.add_step(
                ResolveTraceStep::new(
                    steps::LIST_COMPONENTS,
                    true,
                    format!("{} entries", names.len()),
                )
                .with_path(&components),
            );
            names
        }
        Err(e) => {
            tracing::warn!(dir = %components.display(), error = %e, "cannot list components directory");
            trace.add_warning(TraceWarning::new(
                warning_codes::COMPONENTS_DIR_MISSING,
                format!("{}: {e}", components.display()),
            ));
            trace.add_step(
                ResolveTraceStep::new(steps::LIST_COMPONENTS, false, "Cannot list components")
                    .with_path(&components),
            );
            Vec::new()
        }
    }
}

/// Whether `reference` is an `http(s)://` URL to a `.js` file.
#[must_use]
pub fn is_script_url(reference: &str) -> bool {
    (reference.starts_with("http://") || reference.starts_with("https://"))
        && reference.ends_with(".js")
}

fn resolve_url_reference(
    base: &Path,
    name: &str,
    reference: Option<&str>,
    trace: &mut ResolveTrace,
) -> ResolvedPaths {
    let mut paths = ResolvedPaths::new();

    match reference {
        Some(reference) if is_script_url(reference) => {
            let path = normalize(&base.join(DEFAULT_DIRECTORY).join(name).join("index.js"));
            tracing::debug!(package = name, path = %path.display(), "assuming index.js for url dependency");
            trace.add_warning(TraceWarning::new(
                warning_codes::SPECULATIVE_PATH,
                format!("{} was not checked on disk", path.display()),
            ));
            trace.add_step(
                ResolveTraceStep::new(steps::URL_REFERENCE, true, "Single-file url dependency")
                    .with_package(name)
                    .with_path(&path)
                    .with_note(reference.to_string()),
            );
            paths.insert(path);
        }
        _ => {
            trace.failure(steps::URL_REFERENCE, "No script url reference to fall back on");
        }
    }

    paths
}

/// Run [`resolve_one`] on a new thread and hand the result to `callback`.
///
/// Purely a calling-convention adapter: the work is the same blocking
/// cascade, with no cancellation.
pub fn resolve_deferred<F>(name: impl Into<String>, options: ResolveOptions, callback: F) -> JoinHandle<()>
where
    F: FnOnce(Result<ResolvedPaths, Error>) + Send + 'static,
{
    let name = name.into();
    std::thread::spawn(move || callback(resolve_one(&name, &options)))
}

/// Run [`resolve_one`] on tokio's blocking pool.
///
/// # Errors
/// Returns the resolver error, or `Error::Other` if the blocking task panicked.
pub async fn resolve_async(name: impl Into<String>, options: ResolveOptions) -> Result<ResolvedPaths, Error> {
    let name = name.into();
    tokio::task::spawn_blocking(move || resolve_one(&name, &options))
        .await
        .map_err(|e| Error::other(format!("resolver task failed: {e}")))?
}
