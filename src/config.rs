//! Resolver configuration

use crate::base::ClassName;
use crate::base::constants::METADATA_MARKER;

/// Options for a [`crate::MetadataResolver`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolverConfig {
    /// Annotation whose presence on a type means it carries a metadata blob
    pub metadata_marker: ClassName,
    /// Log a warning when metadata claims a synthetic annotation accessor
    /// that the host does not have
    pub warn_on_missing_accessor: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            metadata_marker: ClassName::new(METADATA_MARKER),
            warn_on_missing_accessor: true,
        }
    }
}

impl ResolverConfig {
    pub fn with_metadata_marker(mut self, marker: impl Into<ClassName>) -> Self {
        self.metadata_marker = marker.into();
        self
    }

    pub fn with_warn_on_missing_accessor(mut self, warn: bool) -> Self {
        self.warn_on_missing_accessor = warn;
        self
    }
}
