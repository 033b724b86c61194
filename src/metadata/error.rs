//! Error types for metadata decoding.

use thiserror::Error;

use super::model::MetadataVersion;

/// Errors that can occur while decoding a metadata blob.
///
/// Decoding either yields complete metadata or one of these; there is no
/// partial result. The type is `Clone` so a cached failure can be handed to
/// every caller that asks for the same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The blob does not start with the format magic.
    #[error("Bad metadata magic: {found:02x?}")]
    BadMagic { found: Vec<u8> },

    /// Major version this decoder does not understand.
    #[error("Unsupported metadata version: {0}")]
    UnsupportedVersion(MetadataVersion),

    /// Unknown metadata kind code.
    #[error("Unknown metadata kind: {0}")]
    UnknownKind(u8),

    /// Input ended in the middle of a structure.
    #[error("Unexpected end of metadata at offset {offset} while reading {context}")]
    UnexpectedEof {
        offset: usize,
        context: &'static str,
    },

    /// A varint did not terminate within 64 bits.
    #[error("Varint overflow at offset {offset}")]
    VarintOverflow { offset: usize },

    /// A string reference points past the end of the string table.
    #[error("String index {index} out of range ({len} strings) at offset {offset}")]
    StringIndexOutOfRange {
        index: u64,
        len: usize,
        offset: usize,
    },

    /// A string table entry is not valid UTF-8.
    #[error("Invalid UTF-8 in string table entry {index}")]
    InvalidUtf8 { index: usize },

    /// Bytes left over after the body was fully read.
    #[error("{count} trailing bytes after metadata body")]
    TrailingBytes { count: usize },
}

impl DecodeError {
    /// Create an end-of-input error.
    pub fn eof(offset: usize, context: &'static str) -> Self {
        Self::UnexpectedEof { offset, context }
    }

    /// `true` if the blob's version or kind is one this decoder predates,
    /// as opposed to a structurally broken blob.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedVersion(_) | Self::UnknownKind(_))
    }
}
