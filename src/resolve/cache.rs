//! Per-run metadata cache.
//!
//! One slot per type declaration. The slot map is only locked long enough to
//! find or insert a slot; the decode itself runs inside the slot's
//! `OnceLock`, so concurrent callers for the same type block on the single
//! in-flight decode and all observe its result, while callers for other types
//! proceed in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::base::DeclId;
use crate::metadata::DecodeError;

use super::view::TypeMetadata;

type Entry = Result<Arc<TypeMetadata>, DecodeError>;
type Slot = Arc<OnceLock<Entry>>;

/// Counters describing cache activity so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Distinct types with a slot.
    pub entries: usize,
    /// Decodes actually performed (successful or not).
    pub decodes: usize,
    /// Lookups answered from an already-filled slot.
    pub hits: usize,
}

/// Identity-keyed memo of decoded metadata. Never evicts.
#[derive(Debug, Default)]
pub struct MetadataCache {
    slots: RwLock<FxHashMap<DeclId, Slot>>,
    decodes: AtomicUsize,
    hits: AtomicUsize,
}

impl MetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `ty`, running `decode` only if no caller
    /// has done so yet. Failures are cached like successes.
    pub fn get_or_decode<F>(&self, ty: DeclId, decode: F) -> Result<Arc<TypeMetadata>, DecodeError>
    where
        F: FnOnce() -> Result<TypeMetadata, DecodeError>,
    {
        let slot = self.slot(ty);
        let mut decoded_here = false;
        let entry = slot.get_or_init(|| {
            decoded_here = true;
            self.decodes.fetch_add(1, Ordering::Relaxed);
            debug!("decoding metadata for {}", ty);
            decode().map(Arc::new)
        });
        if !decoded_here {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!("metadata cache hit for {}", ty);
        }
        entry.clone()
    }

    /// Cached entry for `ty`, without decoding.
    pub fn get(&self, ty: DeclId) -> Option<Result<Arc<TypeMetadata>, DecodeError>> {
        self.slots.read().get(&ty)?.get().cloned()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            decodes: self.decodes.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, ty: DeclId) -> Slot {
        if let Some(slot) = self.slots.read().get(&ty) {
            return Arc::clone(slot);
        }
        Arc::clone(self.slots.write().entry(ty).or_default())
    }
}
