//! Entry-file resolver for bower packages.
//!
//! Walks up to the project root, reads `.bowerrc`, then runs the per-package
//! cascade: manifest `main` (with `dist/` fallback), path-like names, and
//! conventional file probing. Tracing records each step for `explain`.

mod batch;
pub mod cascade;
pub mod manifest;
mod resolve;
mod resolved;
pub mod trace;

pub use batch::{resolve_all, resolve_all_from_file, DependencyPaths};
pub use cascade::{resolve_package, PackageContext, Strategy, CASCADE, DIST_DIR};
pub use manifest::{MainField, PackageManifest};
pub use resolve::{
    is_script_url, resolve_async, resolve_deferred, resolve_one, resolve_one_with_reference,
    resolve_with_trace, ResolveResultWithTrace, WILDCARD,
};
pub use resolved::ResolvedPaths;
pub use trace::{
    steps as trace_steps, warning_codes as trace_warning_codes, ResolveTrace, ResolveTraceStep,
    TraceWarning, EXPLAIN_SCHEMA_VERSION,
};
