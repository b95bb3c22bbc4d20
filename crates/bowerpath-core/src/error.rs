use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes, surfaced in `--json` output.
pub mod codes {
    pub const BOWER_NAME_INVALID: &str = "BOWER_NAME_INVALID";
    pub const BOWER_REGISTRY_UNINITIALIZED: &str = "BOWER_REGISTRY_UNINITIALIZED";
    pub const BOWER_FILE_READ_FAILED: &str = "BOWER_FILE_READ_FAILED";
    pub const BOWER_JSON_INVALID: &str = "BOWER_JSON_INVALID";
    pub const BOWER_PROJECT_NOT_FOUND: &str = "BOWER_PROJECT_NOT_FOUND";
    pub const BOWER_LIST_FAILED: &str = "BOWER_LIST_FAILED";
    pub const BOWER_ERROR: &str = "BOWER_ERROR";
}

/// Core error type for bowerpath operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Cannot resolve '{name}': bower resolve cannot resolve relative paths, \
         pass a single package name with an optional extension"
    )]
    InvalidPackageName { name: String },

    #[error("Installed-package registry is not initialized; call LiveRegistry::init first")]
    RegistryNotInitialized,

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bower project root not found from {start}")]
    ProjectNotFound { start: PathBuf },

    #[error("Listing installed packages failed: {0}")]
    ListerFailed(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether this error is one of the two hard preconditions
    /// (bad package name, uninitialized registry).
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidPackageName { .. } | Self::RegistryNotInitialized
        )
    }

    /// Stable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPackageName { .. } => codes::BOWER_NAME_INVALID,
            Self::RegistryNotInitialized => codes::BOWER_REGISTRY_UNINITIALIZED,
            Self::FileRead { .. } => codes::BOWER_FILE_READ_FAILED,
            Self::JsonParse { .. } => codes::BOWER_JSON_INVALID,
            Self::ProjectNotFound { .. } => codes::BOWER_PROJECT_NOT_FOUND,
            Self::ListerFailed(_) => codes::BOWER_LIST_FAILED,
            Self::Other(_) => codes::BOWER_ERROR,
        }
    }
}
