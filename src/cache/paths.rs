// Cache path resolution.
// Maps a fact key (or an explicit source file) to the cache file and its directory.

use std::path::{Path, PathBuf};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::host::ExternalFacts;

use super::fs::Filesystem;

/// Target file for a key and the directory that must exist before writing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub file: PathBuf,
    /// `None` when an explicit source has no parent; directory creation is skipped.
    pub dir: Option<PathBuf>,
}

/// Finds cache locations using the host's external facts directories.
pub struct Resolver<'a> {
    pub config: &'a CacheConfig,
    pub facts: &'a dyn ExternalFacts,
    pub fs: &'a dyn Filesystem,
    pub extension: &'a str,
}

impl Resolver<'_> {
    /// Resolve the cache location for `key`.
    ///
    /// An explicit `source` is used as-is and never triggers a directory search.
    pub fn resolve(&self, key: Option<&str>, source: Option<&Path>) -> Result<ResolvedPath> {
        let Some(key) = key else {
            return Err(CacheError::invalid_argument("no key provided"));
        };

        if let Some(source) = source {
            return Ok(ResolvedPath {
                file: source.to_path_buf(),
                dir: parent_dir(source),
            });
        }

        let dir = self.search_dir();
        Ok(ResolvedPath {
            file: dir.join(format!("{}.{}", key, self.extension)),
            dir: Some(dir),
        })
    }

    /// First existing, non-excluded external path, else the default directory.
    fn search_dir(&self) -> PathBuf {
        if self.facts.external_facts_available() {
            let found = self
                .facts
                .search_external_path()
                .into_iter()
                .find(|dir| self.fs.exists(dir) && !self.config.is_excluded(dir));
            if let Some(dir) = found {
                return dir;
            }
        }
        self.config.default_dir.clone()
    }
}

/// Parent directory of an explicit source. A bare file name lives in ".".
fn parent_dir(source: &Path) -> Option<PathBuf> {
    match source.parent() {
        Some(parent) if parent.as_os_str().is_empty() => Some(PathBuf::from(".")),
        Some(parent) => Some(parent.to_path_buf()),
        None => None,
    }
}
