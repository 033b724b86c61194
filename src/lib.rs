//! # kmeta
//!
//! Decoding, caching and querying of compiled-class metadata for annotation
//! processors running on a host compiler that erases source-level semantics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! resolve   → MetadataResolver: cache, classifier queries, annotation reconciler
//!   ↓
//! host      → DeclarationHost trait, Annotation values, in-memory ProgramModel
//!   ↓
//! metadata  → Blob decoder/encoder, decoded model, flag words
//!   ↓
//! base      → Primitives (DeclId, ClassName, constants)
//! ```
//!
//! [`config`] sits beside `resolve` and only depends on `base`.

// ============================================================================
// MODULES (dependency order: base → metadata → host → resolve)
// ============================================================================

/// Foundation types: DeclId, ClassName, constants
pub mod base;

/// Metadata blob format and decoded model
pub mod metadata;

/// Host program introspection
pub mod host;

/// Resolver options
pub mod config;

/// Run-scoped metadata queries
pub mod resolve;

// Re-export foundation types
pub use base::{ClassName, DeclId};

// Re-export the query surface
pub use config::ResolverConfig;
pub use host::{
    Annotation, AnnotationValue, DeclarationHost, ElementKind, ProgramBuilder, ProgramModel,
};
pub use metadata::{DecodeError, DecodedMetadata, decode, encode};
pub use resolve::{AccessorLookup, CacheStats, MetadataResolver, ResolveError};
