// On-disk TTL cache for discovered facts.
// Each key is persisted as a single-entry YAML mapping under a facts directory.

pub mod cache;
pub mod config;
pub mod error;
pub mod host;

pub use cache::{
    CacheStore, Codec, DEFAULT_TTL, JsonCodec, Mapping, ResolvedPath, Value, YamlCodec,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use host::{ExternalFacts, NoExternalFacts, StaticExternalFacts};
