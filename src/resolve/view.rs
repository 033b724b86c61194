//! Per-type metadata correlated with the host's members.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::DeclId;
use crate::host::{DeclarationHost, ElementKind};
use crate::metadata::{ConstructorMetadata, DecodedMetadata, FunctionMetadata, PropertyMetadata};

/// What became of the synthetic annotation accessor of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorLookup {
    /// Metadata does not claim an accessor (or the field is no property).
    NotClaimed,
    /// Claimed and retained by the host.
    Present(DeclId),
    /// Claimed, but the host does not have it.
    Missing,
}

/// Decoded metadata of one type plus an index of its retained methods.
///
/// This is the cached unit: built once per type and shared by every query
/// against the type or any of its members.
#[derive(Debug)]
pub struct TypeMetadata {
    decl: DeclId,
    decoded: DecodedMetadata,
    methods_by_signature: FxHashMap<SmolStr, DeclId>,
}

impl TypeMetadata {
    pub(crate) fn new(
        decl: DeclId,
        decoded: DecodedMetadata,
        methods_by_signature: FxHashMap<SmolStr, DeclId>,
    ) -> Self {
        Self {
            decl,
            decoded,
            methods_by_signature,
        }
    }

    /// Index the methods `host` retained for `ty`.
    pub(crate) fn index<H>(host: &H, ty: DeclId, decoded: DecodedMetadata) -> Self
    where
        H: DeclarationHost + ?Sized,
    {
        let methods_by_signature = host
            .members(ty)
            .iter()
            .filter(|&&member| host.kind(member) == ElementKind::Method)
            .filter_map(|&member| {
                host.jvm_signature(member)
                    .map(|signature| (SmolStr::new(signature), member))
            })
            .collect();
        Self::new(ty, decoded, methods_by_signature)
    }

    /// The type-level declaration the blob belongs to.
    pub fn decl(&self) -> DeclId {
        self.decl
    }

    pub fn decoded(&self) -> &DecodedMetadata {
        &self.decoded
    }

    /// Retained method with the given JVM signature.
    pub fn method(&self, signature: &str) -> Option<DeclId> {
        self.methods_by_signature.get(signature).copied()
    }

    pub fn function_for_signature(&self, signature: &str) -> Option<&FunctionMetadata> {
        self.decoded.function_by_signature(signature)
    }

    pub fn constructor_for_signature(&self, signature: &str) -> Option<&ConstructorMetadata> {
        self.decoded.constructor_by_signature(signature)
    }

    pub fn property_for_field(&self, field_name: &str) -> Option<&PropertyMetadata> {
        self.decoded.property_by_field(field_name)
    }

    /// Getter method of the property backed by `field_name`.
    pub fn property_getter(&self, field_name: &str) -> Option<DeclId> {
        let getter = self.property_for_field(field_name)?.getter.as_deref()?;
        self.method(getter)
    }

    pub fn synthetic_accessor(&self, field_name: &str) -> AccessorLookup {
        let Some(signature) = self
            .property_for_field(field_name)
            .and_then(|p| p.annotations_accessor.as_deref())
        else {
            return AccessorLookup::NotClaimed;
        };
        match self.method(signature) {
            Some(method) => AccessorLookup::Present(method),
            None => AccessorLookup::Missing,
        }
    }
}
