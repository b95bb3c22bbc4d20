use crate::rc::{load_bowerrc, BOWERRC};
use std::path::{Path, PathBuf};

/// Project manifest file name; also the visible per-package manifest.
pub const BOWER_JSON: &str = "bower.json";

/// Hidden per-package manifest written by the package manager on install.
pub const HIDDEN_BOWER_JSON: &str = ".bower.json";

/// Dependency directory used when `.bowerrc` does not override it.
pub const DEFAULT_DIRECTORY: &str = "bower_components";

/// A discovered project root and the dependency directory in effect for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    /// Directory containing the marker.
    pub dir: PathBuf,
    /// Dependency directory name, relative to `dir`.
    pub directory: String,
    /// Whether `directory` came from `.bowerrc`.
    pub from_bowerrc: bool,
}

impl ProjectRoot {
    /// `<dir>/<directory>`.
    #[must_use]
    pub fn components_dir(&self) -> PathBuf {
        self.dir.join(&self.directory)
    }

    /// `<dir>/<directory>/<name>`.
    #[must_use]
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.components_dir().join(name)
    }
}

/// Whether `dir` holds any project marker: `bower.json`, `.bowerrc`, or the
/// default dependency directory.
#[must_use]
pub fn has_project_marker(dir: &Path) -> bool {
    [BOWER_JSON, BOWERRC, DEFAULT_DIRECTORY]
        .iter()
        .any(|marker| dir.join(marker).exists())
}

/// Find the project root by walking up from `start`.
///
/// Returns the nearest directory holding a marker (see [`has_project_marker`]),
/// or `None` once the filesystem root has been checked without a match.
/// A `.bowerrc` at that level may override the dependency directory; if it
/// cannot be read or parsed the default is kept.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<ProjectRoot> {
    find_project_root_until(start, None)
}

/// Like [`find_project_root`], but the walk stops after checking `ceiling`.
///
/// A `ceiling` that is not an ancestor of `start` has no effect.
#[must_use]
pub fn find_project_root_until(start: &Path, ceiling: Option<&Path>) -> Option<ProjectRoot> {
    let mut current = start.to_path_buf();

    loop {
        if has_project_marker(&current) {
            return Some(read_root(current));
        }

        if ceiling == Some(current.as_path()) || !current.pop() {
            tracing::debug!(start = %start.display(), "no bower project root found");
            return None;
        }
    }
}

fn read_root(dir: PathBuf) -> ProjectRoot {
    let mut root = ProjectRoot {
        dir,
        directory: DEFAULT_DIRECTORY.to_string(),
        from_bowerrc: false,
    };

    if root.dir.join(BOWERRC).is_file() {
        match load_bowerrc(&root.dir) {
            Ok(rc) => {
                if let Some(directory) = rc.directory() {
                    root.directory = directory.to_string();
                    root.from_bowerrc = true;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unusable .bowerrc");
            }
        }
    }

    tracing::debug!(
        root = %root.dir.display(),
        directory = %root.directory,
        "found bower project root"
    );
    root
}
