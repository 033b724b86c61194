//! Error types for metadata resolution.

use thiserror::Error;

use crate::base::DeclId;
use crate::metadata::DecodeError;

/// Errors returned by resolver queries.
///
/// "No metadata" is not an error: queries answer `false`/`None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The type's metadata blob is malformed or from an unsupported version.
    #[error("Malformed metadata on {decl}: {source}")]
    Decode {
        decl: DeclId,
        #[source]
        source: DecodeError,
    },

    /// No type-level declaration encloses the given declaration.
    #[error("There is no enclosing type for: {0}")]
    MissingEnclosingType(DeclId),

    /// The type carries the metadata marker but the host has no blob for it.
    #[error("Metadata marker on {0} without a metadata blob")]
    MissingBlob(DeclId),
}

impl ResolveError {
    /// Create a decode error for the type `decl`.
    pub fn decode(decl: DeclId, source: DecodeError) -> Self {
        Self::Decode { decl, source }
    }

    /// The underlying decode failure, if this is one.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::MissingEnclosingType(_) | Self::MissingBlob(_) => None,
        }
    }
}
