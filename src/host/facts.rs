// External facts discovery.
// The host decides whether external facts are supported and where they live.

use std::path::PathBuf;

/// Host-supplied external facts directories.
pub trait ExternalFacts {
    /// Whether the host supports external facts at all.
    fn external_facts_available(&self) -> bool;

    /// Candidate directories, in priority order.
    fn search_external_path(&self) -> Vec<PathBuf>;
}

/// Host without external facts support.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalFacts;

impl ExternalFacts for NoExternalFacts {
    fn external_facts_available(&self) -> bool {
        false
    }

    fn search_external_path(&self) -> Vec<PathBuf> {
        Vec::new()
    }
}

/// Fixed list of external search paths.
#[derive(Debug, Clone, Default)]
pub struct StaticExternalFacts {
    paths: Vec<PathBuf>,
}

impl StaticExternalFacts {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl ExternalFacts for StaticExternalFacts {
    fn external_facts_available(&self) -> bool {
        true
    }

    fn search_external_path(&self) -> Vec<PathBuf> {
        self.paths.clone()
    }
}
