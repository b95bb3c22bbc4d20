use bowerpath_util::path::{absolutize, normalize};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the bowerpath CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Current working directory.
    pub cwd: PathBuf,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = WARN, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Stop project-root discovery after this directory.
    pub ceiling: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json_logs: false,
            verbosity: 0,
            ceiling: None,
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Set the project-root discovery ceiling.
    #[must_use]
    pub fn with_ceiling(mut self, ceiling: Option<PathBuf>) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Resolve options rooted at this config's working directory.
    #[must_use]
    pub fn resolve_options(&self, basedir: Option<PathBuf>) -> ResolveOptions {
        ResolveOptions {
            basedir,
            cwd: Some(self.cwd.clone()),
            ceiling: self.ceiling.clone(),
        }
    }
}

/// Options for a single resolution call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Directory to start project-root discovery from. Relative paths are
    /// taken against `cwd`.
    pub basedir: Option<PathBuf>,

    /// Working directory override; the process cwd when unset.
    pub cwd: Option<PathBuf>,

    /// Last directory project-root discovery may check.
    pub ceiling: Option<PathBuf>,
}

impl ResolveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_basedir(mut self, basedir: impl Into<PathBuf>) -> Self {
        self.basedir = Some(basedir.into());
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn with_ceiling(mut self, ceiling: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(ceiling.into());
        self
    }

    /// The absolute, lexically normalized directory resolution starts from.
    #[must_use]
    pub fn base_path(&self) -> PathBuf {
        let cwd = self.effective_cwd();
        match &self.basedir {
            Some(basedir) => absolutize(&cwd, basedir),
            None => normalize(&cwd),
        }
    }

    /// The ceiling, absolute and normalized like [`ResolveOptions::base_path`].
    #[must_use]
    pub fn ceiling_path(&self) -> Option<PathBuf> {
        self.ceiling
            .as_ref()
            .map(|ceiling| absolutize(&self.effective_cwd(), ceiling))
    }

    fn effective_cwd(&self) -> PathBuf {
        self.cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
