// Feature probe for the cacheable utility.
// Reports whether the host has somewhere to keep cached facts.

use crate::cache::Filesystem;
use crate::config::CacheConfig;

use super::ExternalFacts;

/// Whether fact caching is usable on this host.
///
/// With external facts, any existing search path qualifies. Without them, the
/// legacy facts directory must exist, and Windows hosts never qualify.
pub fn is_available(facts: &dyn ExternalFacts, fs: &dyn Filesystem, config: &CacheConfig) -> bool {
    if facts.external_facts_available() {
        facts
            .search_external_path()
            .iter()
            .any(|dir| fs.exists(dir))
    } else if cfg!(windows) {
        false
    } else {
        fs.exists(&config.legacy_dir)
    }
}
