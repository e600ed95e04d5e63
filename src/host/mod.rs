// Host integration module.
// External-facts discovery and the feature probe for the cacheable utility.

pub mod facts;
pub mod feature;

pub use facts::{ExternalFacts, NoExternalFacts, StaticExternalFacts};
pub use feature::is_available;
