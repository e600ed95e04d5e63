// Cache configuration.
// Well-known host directories and the default TTL, overridable from a YAML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL;
use crate::error::{CacheError, Result};

/// Directory used when no external search path qualifies.
pub const DEFAULT_FACTS_DIR: &str = "/etc/facter/facts.d";

/// Pluginsync facts directory, wiped on every agent run.
pub const PLUGINSYNC_FACTS_DIR: &str = "/opt/puppetlabs/puppet/cache/facts.d";

/// Facts directory probed by the feature check when external facts are unsupported.
pub const LEGACY_FACTS_DIR: &str = "/var/lib/puppet/facts.d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Fallback directory for cache files.
    pub default_dir: PathBuf,
    /// External search paths that are never chosen as the cache directory.
    pub excluded_dirs: Vec<PathBuf>,
    /// TTL applied when a reader does not pass one.
    pub default_ttl_secs: u64,
    /// Directory checked by the feature probe without external facts.
    pub legacy_dir: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from(DEFAULT_FACTS_DIR),
            excluded_dirs: vec![PathBuf::from(PLUGINSYNC_FACTS_DIR)],
            default_ttl_secs: DEFAULT_TTL.as_secs(),
            legacy_dir: PathBuf::from(LEGACY_FACTS_DIR),
        }
    }
}

impl CacheConfig {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_secs)
    }

    /// Whether `dir` is excluded from the external path search.
    pub fn is_excluded(&self, dir: &Path) -> bool {
        self.excluded_dirs.iter().any(|excluded| excluded == dir)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: CacheConfig = serde_yaml::from_str(contents)?;
        if config.default_dir.as_os_str().is_empty() {
            return Err(CacheError::Config("default_dir must not be empty".into()));
        }
        Ok(config)
    }

    /// Load configuration from a YAML file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.default_dir, PathBuf::from("/etc/facter/facts.d"));
        assert_eq!(config.default_ttl(), Duration::from_secs(3600));
        assert!(config.is_excluded(Path::new("/opt/puppetlabs/puppet/cache/facts.d")));
        assert!(!config.is_excluded(Path::new("/etc/puppetlabs/facter/facts.d")));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = CacheConfig::from_yaml_str("default_ttl_secs: 60\n").unwrap();
        assert_eq!(config.default_ttl(), Duration::from_secs(60));
        assert_eq!(config.default_dir, PathBuf::from(DEFAULT_FACTS_DIR));
        assert_eq!(config.excluded_dirs, vec![PathBuf::from(PLUGINSYNC_FACTS_DIR)]);
    }

    #[test]
    fn test_empty_default_dir_rejected() {
        let err = CacheConfig::from_yaml_str("default_dir: ''\n").unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("cache.yaml");
        fs::write(
            &path,
            "default_dir: /srv/facts\nexcluded_dirs:\n  - /var/cache/facts\n",
        )
        .unwrap();

        let config = CacheConfig::load(&path).unwrap();
        assert_eq!(config.default_dir, PathBuf::from("/srv/facts"));
        assert!(config.is_excluded(Path::new("/var/cache/facts")));
        assert!(!config.is_excluded(Path::new(PLUGINSYNC_FACTS_DIR)));
    }
}
