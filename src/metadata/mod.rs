//! Metadata blob format: decoding, encoding and the decoded model.
//!
//! A metadata blob is attached (through the marker annotation) to every
//! compiled type that originated from source with richer semantics than the
//! host compiler keeps. It records what the host erased: object and companion
//! forms, `internal` visibility, default-valued parameters, and how each
//! property maps onto physical fields and methods.
//!
//! ## Key Types
//!
//! - [`decode`] - Blob → [`DecodedMetadata`]
//! - [`encode`] - [`DecodedMetadata`] → blob
//! - [`ClassFlags`], [`FunctionFlags`], [`PropertyFlags`], ... - Flag words
//! - [`DecodeError`] - Malformed or unsupported blobs

mod error;
mod flags;
mod model;
mod reader;
mod writer;

pub use error::DecodeError;
pub use flags::{
    ClassFlag, ClassFlags, ClassKind, ClassModifiers, ConstructorFlags, ConstructorModifiers,
    FunctionFlags, FunctionModifiers, MemberKind, Modality, ParameterFlags, ParameterModifiers,
    PropertyFlags, PropertyModifiers, Visibility,
};
pub use model::{
    ClassMetadata, ConstructorMetadata, DecodedMetadata, FunctionMetadata, MetadataBody,
    MetadataKind, MetadataVersion, PackageMetadata, PropertyMetadata, ValueParameter,
};
pub use reader::decode;
pub use writer::encode;
