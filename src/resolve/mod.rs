//! Metadata resolution: the query surface over decoded metadata.
//!
//! A [`MetadataResolver`] is created at the start of a processing run and
//! dropped at its end. It borrows the host, owns the run's
//! [`MetadataCache`], and answers every query by pulling metadata through
//! that cache:
//!
//! ```text
//! query(decl)
//!     │
//!     ▼
//! closest_enclosing_type(decl)   ← walk `enclosing` links to a Type
//!     │
//!     ▼
//! has marker?  ── no ──▶ false / None
//!     │ yes
//!     ▼
//! cache.get_or_decode(type)      ← decode + index members, once per type
//!     │
//!     ▼
//! classify / reconcile
//! ```
//!
//! ## Key Types
//!
//! - [`MetadataResolver`] - Run-scoped query surface
//! - [`MetadataCache`], [`CacheStats`] - Identity-keyed memo
//! - [`TypeMetadata`], [`AccessorLookup`] - Decoded metadata joined with host members
//! - [`ResolveError`] - Decode failures and contract violations

mod annotations;
mod cache;
mod classify;
mod error;
mod view;

pub use cache::{CacheStats, MetadataCache};
pub use error::ResolveError;
pub use view::{AccessorLookup, TypeMetadata};

use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::base::DeclId;
use crate::config::ResolverConfig;
use crate::host::{DeclarationHost, ElementKind};
use crate::metadata::decode;

/// Run-scoped metadata queries over a host program.
pub struct MetadataResolver<'h, H: ?Sized> {
    host: &'h H,
    config: ResolverConfig,
    cache: MetadataCache,
}

impl<'h, H> MetadataResolver<'h, H>
where
    H: DeclarationHost + ?Sized,
{
    pub fn new(host: &'h H) -> Self {
        Self::with_config(host, ResolverConfig::default())
    }

    pub fn with_config(host: &'h H, config: ResolverConfig) -> Self {
        Self {
            host,
            config,
            cache: MetadataCache::new(),
        }
    }

    pub fn host(&self) -> &'h H {
        self.host
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The declaration itself if it is a type, else its nearest enclosing type.
    pub fn closest_enclosing_type(&self, decl: DeclId) -> Result<DeclId, ResolveError> {
        let mut current = Some(decl);
        while let Some(candidate) = current {
            if self.host.kind(candidate) == ElementKind::Type {
                return Ok(candidate);
            }
            current = self.host.enclosing(candidate);
        }
        Err(ResolveError::MissingEnclosingType(decl))
    }

    /// `true` if `decl` or its closest enclosing type carries the metadata
    /// marker.
    pub fn has_metadata(&self, decl: DeclId) -> Result<bool, ResolveError> {
        let ty = self.closest_enclosing_type(decl)?;
        Ok(self.host.has_annotation(ty, &self.config.metadata_marker))
    }

    /// Metadata governing `decl`, decoded at most once per type.
    ///
    /// `Ok(None)` when the closest enclosing type has no metadata marker.
    pub fn get_or_decode(&self, decl: DeclId) -> Result<Option<Arc<TypeMetadata>>, ResolveError> {
        let ty = self.closest_enclosing_type(decl)?;
        if !self.host.has_annotation(ty, &self.config.metadata_marker) {
            return Ok(None);
        }
        let blob = self
            .host
            .metadata_blob(ty)
            .ok_or(ResolveError::MissingBlob(ty))?;
        self.cache
            .get_or_decode(ty, || {
                decode(blob).map(|decoded| TypeMetadata::index(self.host, ty, decoded))
            })
            .map(Some)
            .map_err(|source| ResolveError::decode(ty, source))
    }

    /// Decode the metadata governing each of `decls` ahead of queries, in
    /// parallel. Returns how many of them have metadata.
    pub fn prefetch(&self, decls: &[DeclId]) -> Result<usize, ResolveError>
    where
        H: Sync,
    {
        let found = decls
            .par_iter()
            .map(|&decl| self.get_or_decode(decl).map(|m| usize::from(m.is_some())))
            .try_reduce(|| 0, |a, b| Ok(a + b))?;
        debug!(
            "prefetched {} declarations ({} with metadata, {} types decoded)",
            decls.len(),
            found,
            self.cache.stats().decodes
        );
        Ok(found)
    }
}
