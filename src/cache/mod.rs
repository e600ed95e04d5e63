// Cache module for on-disk fact caching.
// Resolves per-key file locations and reads/writes single-entry mappings with a TTL.

pub mod clock;
pub mod codec;
pub mod fs;
pub mod paths;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use codec::{Codec, JsonCodec, Mapping, Value, YamlCodec, normalize};
pub use fs::{Filesystem, OsFilesystem, make_cache_path};
pub use paths::{Resolver, ResolvedPath};
pub use store::{CacheStore, DEFAULT_TTL, is_fresh};
