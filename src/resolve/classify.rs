//! Declaration classification queries.
//!
//! Every query first checks that `decl` has an enclosing type carrying the
//! metadata marker. A declaration with no enclosing type at all is a caller
//! error (`MissingEnclosingType`) for every query alike; one whose type has
//! no marker answers `false`/`None`. Past that, only a missing blob or a
//! decode failure is an error.

use std::sync::Arc;

use crate::base::DeclId;
use crate::host::{DeclarationHost, ElementKind};
use crate::metadata::{ClassFlag, ConstructorMetadata, FunctionMetadata};

use super::{AccessorLookup, MetadataResolver, ResolveError, TypeMetadata};

impl<H> MetadataResolver<'_, H>
where
    H: DeclarationHost + ?Sized,
{
    /// `true` if `ty` was declared as a singleton `object`.
    pub fn is_singleton_object(&self, ty: DeclId) -> Result<bool, ResolveError> {
        self.class_flag(ty, ClassFlag::IsObject)
    }

    /// `true` if `ty` was declared as a `companion object`.
    pub fn is_companion_object(&self, ty: DeclId) -> Result<bool, ResolveError> {
        self.class_flag(ty, ClassFlag::IsCompanionObject)
    }

    pub fn is_singleton_or_companion(&self, ty: DeclId) -> Result<bool, ResolveError> {
        Ok(self.is_singleton_object(ty)? || self.is_companion_object(ty)?)
    }

    /// `true` if `decl` was declared `internal` in source.
    ///
    /// Types read their class flags. Methods read the function matched by JVM
    /// signature, falling back to the constructor with that signature. Fields
    /// read the property they back.
    pub fn is_restricted_visibility(&self, decl: DeclId) -> Result<bool, ResolveError> {
        let Some(metadata) = self.get_or_decode(decl)? else {
            return Ok(false);
        };
        match self.host.kind(decl) {
            ElementKind::Type => Ok(metadata
                .decoded()
                .class_metadata()
                .is_some_and(|class| class.flags.contains(ClassFlag::IsInternal))),
            ElementKind::Method => {
                let Some(signature) = self.host.jvm_signature(decl) else {
                    return Ok(false);
                };
                if let Some(function) = metadata.function_for_signature(&signature) {
                    return Ok(function.flags.is_internal());
                }
                Ok(metadata
                    .constructor_for_signature(&signature)
                    .is_some_and(|constructor| constructor.flags.is_internal()))
            }
            ElementKind::Field => Ok(metadata
                .property_for_field(self.host.name(decl))
                .is_some_and(|property| property.flags.is_internal())),
            ElementKind::Other => Ok(false),
        }
    }

    /// `true` if any constructor of `ty` declares a default-valued parameter.
    pub fn has_constructor_with_default_param(&self, ty: DeclId) -> Result<bool, ResolveError> {
        let Some(metadata) = self.get_or_decode(ty)? else {
            return Ok(false);
        };
        Ok(self.host.kind(ty) == ElementKind::Type
            && metadata.decoded().has_constructor_with_default_param())
    }

    /// Function metadata of a method, matched by JVM signature.
    pub fn function_metadata(
        &self,
        method: DeclId,
    ) -> Result<Option<FunctionMetadata>, ResolveError> {
        Ok(self.method_lookup(method)?.and_then(|(metadata, signature)| {
            metadata.function_for_signature(&signature).cloned()
        }))
    }

    /// Constructor metadata of a method, matched by JVM signature.
    pub fn constructor_metadata(
        &self,
        method: DeclId,
    ) -> Result<Option<ConstructorMetadata>, ResolveError> {
        Ok(self.method_lookup(method)?.and_then(|(metadata, signature)| {
            metadata.constructor_for_signature(&signature).cloned()
        }))
    }

    /// Getter method of the property backed by `field`.
    pub fn get_property_getter(&self, field: DeclId) -> Result<Option<DeclId>, ResolveError> {
        let Some(metadata) = self.get_or_decode(field)? else {
            return Ok(None);
        };
        if self.host.kind(field) != ElementKind::Field {
            return Ok(None);
        }
        Ok(metadata.property_getter(self.host.name(field)))
    }

    /// Where the synthetic annotation accessor of `field`'s property stands.
    pub fn synthetic_accessor(&self, field: DeclId) -> Result<AccessorLookup, ResolveError> {
        let Some(metadata) = self.get_or_decode(field)? else {
            return Ok(AccessorLookup::NotClaimed);
        };
        if self.host.kind(field) != ElementKind::Field {
            return Ok(AccessorLookup::NotClaimed);
        }
        Ok(metadata.synthetic_accessor(self.host.name(field)))
    }

    /// `true` if metadata claims a synthetic annotation accessor for
    /// `field`'s property but the host does not have that method, typically
    /// because it was dropped as synthetic.
    pub fn is_missing_synthetic_accessor_for_annotations(
        &self,
        field: DeclId,
    ) -> Result<bool, ResolveError> {
        Ok(self.synthetic_accessor(field)? == AccessorLookup::Missing)
    }

    fn class_flag(&self, ty: DeclId, flag: ClassFlag) -> Result<bool, ResolveError> {
        let Some(metadata) = self.get_or_decode(ty)? else {
            return Ok(false);
        };
        Ok(self.host.kind(ty) == ElementKind::Type
            && metadata
                .decoded()
                .class_metadata()
                .is_some_and(|class| class.flags.contains(flag)))
    }

    fn method_lookup(
        &self,
        method: DeclId,
    ) -> Result<Option<(Arc<TypeMetadata>, String)>, ResolveError> {
        let Some(metadata) = self.get_or_decode(method)? else {
            return Ok(None);
        };
        if self.host.kind(method) != ElementKind::Method {
            return Ok(None);
        }
        Ok(self
            .host
            .jvm_signature(method)
            .map(|signature| (metadata, signature)))
    }
}
