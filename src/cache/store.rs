// Cache store for reading and writing cached facts.
// Handles TTL checking, tolerant decoding, and best-effort writes.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::host::{ExternalFacts, NoExternalFacts};

use super::clock::{Clock, SystemClock};
use super::codec::{Codec, Mapping, Value, YamlCodec, normalize};
use super::fs::{Filesystem, OsFilesystem, make_cache_path};
use super::paths::{ResolvedPath, Resolver};

/// Default TTL for cached facts: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Whether an entry modified at `modified` is still fresh at `now`.
///
/// The boundary is inclusive: an entry exactly `ttl` old is fresh.
pub fn is_fresh(now: DateTime<Utc>, modified: DateTime<Utc>, ttl: Duration) -> bool {
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => now.signed_duration_since(modified) <= ttl,
        Err(_) => true,
    }
}

/// On-disk fact cache.
///
/// Reads never fail except for a missing key: expired, corrupt and missing
/// entries are all a plain miss. Writes are best-effort.
pub struct CacheStore {
    config: CacheConfig,
    facts: Box<dyn ExternalFacts>,
    fs: Box<dyn Filesystem>,
    clock: Box<dyn Clock>,
    codec: Box<dyn Codec>,
}

impl CacheStore {
    /// Create a store using the real filesystem, the wall clock and YAML files.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            facts: Box::new(NoExternalFacts),
            fs: Box::new(OsFilesystem),
            clock: Box::new(SystemClock),
            codec: Box::new(YamlCodec),
        }
    }

    pub fn with_external_facts(mut self, facts: impl ExternalFacts + 'static) -> Self {
        self.facts = Box::new(facts);
        self
    }

    pub fn with_filesystem(mut self, fs: impl Filesystem + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_codec(mut self, codec: impl Codec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Resolve where `key` is cached, or `source` if given.
    pub fn resolve<'k>(
        &self,
        key: impl Into<Option<&'k str>>,
        source: Option<&Path>,
    ) -> Result<ResolvedPath> {
        Resolver {
            config: &self.config,
            facts: self.facts.as_ref(),
            fs: self.fs.as_ref(),
            extension: self.codec.extension(),
        }
        .resolve(key.into(), source)
    }

    /// Read the cached mapping for `key` if it is fresh under `ttl`.
    ///
    /// `ttl` defaults to the configured TTL. Returns the whole single-entry
    /// mapping as stored on disk.
    pub fn get<'k>(
        &self,
        key: impl Into<Option<&'k str>>,
        ttl: Option<Duration>,
        source: Option<&Path>,
    ) -> Result<Option<Mapping>> {
        let resolved = self.resolve(key, source)?;
        let file = resolved.file.as_path();
        if !self.fs.exists(file) {
            return Ok(None);
        }

        let Some(mapping) = self.load(file) else {
            return Ok(None);
        };

        let modified = match self.fs.modified(file) {
            Ok(time) => DateTime::<Utc>::from(time),
            Err(e) => {
                debug!("failed to read mtime of {}: {}", file.display(), e);
                DateTime::<Utc>::UNIX_EPOCH
            }
        };

        let ttl = ttl.unwrap_or_else(|| self.config.default_ttl());
        if !is_fresh(self.clock.now(), modified, ttl) {
            debug!("cache entry {} is stale", file.display());
            return Ok(None);
        }

        Ok(Some(mapping))
    }

    /// Read only the value stored under `key`, if the entry is fresh.
    pub fn get_value(
        &self,
        key: &str,
        ttl: Option<Duration>,
        source: Option<&Path>,
    ) -> Result<Option<Value>> {
        let mapping = self.get(key, ttl, source)?;
        Ok(mapping.and_then(|mut mapping| mapping.remove(key)))
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// Only a missing key or value is an error. Failures creating the
    /// directory or writing the file are logged and ignored.
    pub fn put<'k, V: Serialize + ?Sized>(
        &self,
        key: impl Into<Option<&'k str>>,
        value: Option<&V>,
        source: Option<&Path>,
    ) -> Result<()> {
        let (Some(key), Some(value)) = (key.into(), value) else {
            return Err(CacheError::invalid_argument("missing key or value to store"));
        };

        let resolved = self.resolve(key, source)?;
        if let Err(e) = self.store(key, value, &resolved) {
            debug!("failed to cache {}: {}", resolved.file.display(), e);
        }
        Ok(())
    }

    /// Decode a cache file into its normalized mapping.
    fn load(&self, file: &Path) -> Option<Mapping> {
        let decoded = self
            .fs
            .read(file)
            .map_err(CacheError::from)
            .and_then(|bytes| self.codec.decode(&bytes));

        match decoded {
            Ok(value) => {
                let mapping = normalize(value);
                if mapping.is_none() {
                    debug!("cache entry {} is not a mapping", file.display());
                }
                mapping
            }
            Err(e) => {
                debug!("failed to load cache entry {}: {}", file.display(), e);
                None
            }
        }
    }

    fn store<V: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &V,
        resolved: &ResolvedPath,
    ) -> Result<()> {
        if let Some(dir) = &resolved.dir {
            make_cache_path(self.fs.as_ref(), dir)?;
        }

        let mut entry = Mapping::new();
        entry.insert(Value::from(key), serde_yaml::to_value(value)?);
        let bytes = self.codec.encode(&entry)?;
        self.fs.write(&resolved.file, &bytes)?;
        Ok(())
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
