//! Domain constants shared across the crate.

/// Annotation that marks a compiled type as carrying a metadata blob.
pub const METADATA_MARKER: &str = "kotlin.Metadata";

/// Magic bytes at the start of every metadata blob.
pub const BLOB_MAGIC: [u8; 2] = *b"KM";

/// Major metadata versions the decoder understands.
pub const SUPPORTED_MAJOR_VERSIONS: &[u8] = &[1, 2];
