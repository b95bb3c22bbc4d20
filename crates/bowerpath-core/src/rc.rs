//! `.bowerrc` project configuration.
//!
//! Only the `directory` key is consumed; every other key is ignored.

use crate::error::Error;
use bowerpath_util::fs::read_to_string_lossy;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// File name of the hidden project configuration.
pub const BOWERRC: &str = ".bowerrc";

/// Parsed `.bowerrc` configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BowerRc {
    /// Raw `directory` value. Kept untyped so a non-string value is ignored
    /// instead of rejecting the whole file.
    #[serde(default)]
    directory: Option<Value>,
}

impl BowerRc {
    /// The dependency directory override, if it is a non-empty string.
    #[must_use]
    pub fn directory(&self) -> Option<&str> {
        self.directory
            .as_ref()
            .and_then(Value::as_str)
            .filter(|d| !d.is_empty())
    }
}

/// Parse `.bowerrc` content.
///
/// # Errors
/// Returns the JSON error if the content is not a JSON object.
pub fn parse_bowerrc(content: &str) -> Result<BowerRc, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse `<dir>/.bowerrc`.
///
/// # Errors
/// Returns `Error::FileRead` or `Error::JsonParse` if the file is unreadable or invalid.
pub fn load_bowerrc(dir: &Path) -> Result<BowerRc, Error> {
    let path = dir.join(BOWERRC);
    let content = read_to_string_lossy(&path).map_err(|source| Error::FileRead {
        path: path.clone(),
        source,
    })?;
    parse_bowerrc(&content).map_err(|source| Error::JsonParse { path, source })
}
