//! Resolution tracing for the explain command.
//!
//! Records each step of the cascade so callers can see why a package
//! resolved to a particular set of files (or to none).

use serde::Serialize;
use std::path::PathBuf;

/// Schema version for the explain output format.
/// Bump when the trace structure changes incompatibly.
pub const EXPLAIN_SCHEMA_VERSION: u32 = 1;

/// A single step in the resolution trace.
#[derive(Debug, Clone, Serialize)]
pub struct ResolveTraceStep {
    /// Step name (e.g., "find_project_root", "read_manifest", "file_exists")
    pub step: &'static str,
    /// Whether this step succeeded
    pub ok: bool,
    /// Human-readable description of what happened
    pub detail: String,
    /// Package the step applies to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// File path involved in this step, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Additional notes for this step
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ResolveTraceStep {
    /// Create a new trace step.
    pub fn new(step: &'static str, ok: bool, detail: impl Into<String>) -> Self {
        Self {
            step,
            ok,
            detail: detail.into(),
            package: None,
            path: None,
            notes: Vec::new(),
        }
    }

    /// Set the package for this step.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    /// Set the path for this step.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add a note to this step.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

/// Warning generated during resolution.
#[derive(Debug, Clone, Serialize)]
pub struct TraceWarning {
    /// Warning code (e.g., "manifest_invalid", "speculative_path")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
}

impl TraceWarning {
    /// Create a new warning.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Complete resolution trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveTrace {
    /// Ordered list of resolution steps
    pub steps: Vec<ResolveTraceStep>,
    /// Warnings generated during resolution
    pub warnings: Vec<TraceWarning>,
}

impl ResolveTrace {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step to the trace.
    pub fn add_step(&mut self, step: ResolveTraceStep) {
        self.steps.push(step);
    }

    /// Add a warning to the trace.
    pub fn add_warning(&mut self, warning: TraceWarning) {
        self.warnings.push(warning);
    }

    /// Add a simple success step.
    pub fn success(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, true, detail));
    }

    /// Add a simple failure step.
    pub fn failure(&mut self, step: &'static str, detail: impl Into<String>) {
        self.steps.push(ResolveTraceStep::new(step, false, detail));
    }

    /// Whether any recorded step has the given name.
    #[must_use]
    pub fn has_step(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s.step == step)
    }

    /// Whether any recorded warning has the given code.
    #[must_use]
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// Step names used in resolution tracing.
pub mod steps {
    pub const VALIDATE_NAME: &str = "validate_name";
    pub const FIND_PROJECT_ROOT: &str = "find_project_root";
    pub const READ_BOWERRC: &str = "read_bowerrc";
    pub const LIST_COMPONENTS: &str = "list_components";
    pub const READ_MANIFEST: &str = "read_manifest";
    pub const RESOLVE_MAIN: &str = "resolve_main";
    pub const DIST_FALLBACK: &str = "dist_fallback";
    pub const PATH_LIKE_NAME: &str = "path_like_name";
    pub const BARE_NAME_PROBE: &str = "bare_name_probe";
    pub const URL_REFERENCE: &str = "url_reference";
    pub const FILE_EXISTS: &str = "file_exists";
    pub const FINAL_PATH: &str = "final_path";
}

/// Warning codes used in resolution tracing.
pub mod warning_codes {
    pub const MANIFEST_INVALID: &str = "manifest_invalid";
    pub const MAIN_ENTRY_MISSING: &str = "main_entry_missing";
    pub const COMPONENTS_DIR_MISSING: &str = "components_dir_missing";
    pub const SPECULATIVE_PATH: &str = "speculative_path";
    pub const NO_PROJECT_ROOT: &str = "no_project_root";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builders() {
        let step = ResolveTraceStep::new(steps::FILE_EXISTS, true, "found")
            .with_package("jquery")
            .with_path("/p/bower_components/jquery/dist/jquery.js")
            .with_note("via dist fallback");

        assert_eq!(step.package.as_deref(), Some("jquery"));
        assert!(step.path.is_some());
        assert_eq!(step.notes, vec!["via dist fallback".to_string()]);
    }

    #[test]
    fn test_trace_queries() {
        let mut trace = ResolveTrace::new();
        trace.success(steps::FIND_PROJECT_ROOT, "found /p");
        trace.add_warning(TraceWarning::new(
            warning_codes::MANIFEST_INVALID,
            "bad json",
        ));

        assert!(trace.has_step(steps::FIND_PROJECT_ROOT));
        assert!(!trace.has_step(steps::FINAL_PATH));
        assert!(trace.has_warning(warning_codes::MANIFEST_INVALID));
    }

    #[test]
    fn test_trace_serializes_without_empty_fields() {
        let mut trace = ResolveTrace::new();
        trace.failure(steps::READ_MANIFEST, "no manifest");

        let json = serde_json::to_value(&trace).unwrap();
        let step = &json["steps"][0];
        assert_eq!(step["step"], "read_manifest");
        assert_eq!(step["ok"], false);
        assert!(step.get("path").is_none());
        assert!(step.get("notes").is_none());
    }
}
