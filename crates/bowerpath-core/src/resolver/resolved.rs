//! Insertion-ordered, de-duplicated set of resolved paths.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Ordered set of absolute entry-file paths.
///
/// Keeps discovery order; inserting a path already present is a no-op.
/// Sets are small (a handful of entries per package), so membership is a
/// linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedPaths {
    paths: Vec<PathBuf>,
}

impl ResolvedPaths {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, path: PathBuf) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Union `other` into `self`, keeping the order of first appearance.
    pub fn union(&mut self, other: ResolvedPaths) {
        for path in other.paths {
            self.insert(path);
        }
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl FromIterator<PathBuf> for ResolvedPaths {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

impl IntoIterator for ResolvedPaths {
    type Item = PathBuf;
    type IntoIter = std::vec::IntoIter<PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedPaths {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
