// Serialization codecs for cache entries.
// YAML is the canonical on-disk format; JSON is available for hosts that prefer it.

use serde::Deserialize;

use crate::error::Result;

pub use serde_yaml::{Mapping, Value};

/// Encodes a single-entry mapping to bytes and decodes bytes back to a value.
pub trait Codec {
    /// File extension used for resolved cache files, without the dot.
    fn extension(&self) -> &'static str;

    fn encode(&self, entry: &Mapping) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn extension(&self) -> &'static str {
        "yaml"
    }

    fn encode(&self, entry: &Mapping) -> Result<Vec<u8>> {
        Ok(serde_yaml::to_string(entry)?.into_bytes())
    }

    /// A stream of several documents decodes to a sequence of them.
    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        let mut documents = serde_yaml::Deserializer::from_slice(bytes)
            .map(Value::deserialize)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(match documents.len() {
            0 => Value::Null,
            1 => documents.remove(0),
            _ => Value::Sequence(documents),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, entry: &Mapping) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(entry)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Reduce a decoded value to the top-level mapping of a cache entry.
///
/// A sequence contributes its first element. Anything that is still not a
/// mapping after that is corrupt and yields `None`.
pub fn normalize(value: Value) -> Option<Mapping> {
    let value = match value {
        Value::Sequence(items) => items.into_iter().next()?,
        other => other,
    };
    match value {
        Value::Mapping(mapping) => Some(mapping),
        _ => None,
    }
}
