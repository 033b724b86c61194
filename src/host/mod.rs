//! Host program introspection.
//!
//! The resolver never owns declarations. Everything it knows about the
//! analyzed program comes through [`DeclarationHost`], implemented by the
//! compiler plugin harness (or by [`ProgramModel`] for embedding and tests).
//!
//! ## Key Types
//!
//! - [`DeclarationHost`] - Introspection trait consumed by the resolver
//! - [`ElementKind`] - Closed set of declaration kinds
//! - [`Annotation`], [`AnnotationValue`] - Annotation instances
//! - [`ProgramModel`], [`ProgramBuilder`] - In-memory host

mod annotation;
mod model;

pub use annotation::{Annotation, AnnotationValue};
pub use model::{ProgramBuilder, ProgramModel};

use crate::base::{ClassName, DeclId};

/// The kind of a host declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A class, interface, object, annotation type, ...
    Type,
    /// A method or constructor.
    Method,
    /// A field.
    Field,
    /// Anything else (packages, parameters, ...).
    Other,
}

/// Read-only view of the host program, fixed for the duration of a run.
///
/// Implementations may panic when handed a `DeclId` they did not allocate.
pub trait DeclarationHost {
    fn kind(&self, decl: DeclId) -> ElementKind;

    /// Simple (JVM) name of the declaration.
    fn name(&self, decl: DeclId) -> &str;

    /// The declaration directly enclosing `decl`, if any.
    fn enclosing(&self, decl: DeclId) -> Option<DeclId>;

    /// Annotations physically attached to `decl`, in host order.
    fn annotations(&self, decl: DeclId) -> &[Annotation];

    fn is_static(&self, decl: DeclId) -> bool;

    /// Declarations directly enclosed by a type that the host retained.
    /// Synthetic members the host chose to ignore are absent here.
    fn members(&self, ty: DeclId) -> &[DeclId];

    /// JVM descriptor of a method, e.g. `()Ljava/lang/String;`.
    fn descriptor(&self, decl: DeclId) -> Option<&str>;

    /// Raw metadata blob attached to a type.
    fn metadata_blob(&self, ty: DeclId) -> Option<&[u8]>;

    /// Annotations declared on the annotation type `annotation_type`.
    fn annotations_of_type(&self, annotation_type: &ClassName) -> &[Annotation];

    fn has_annotation(&self, decl: DeclId, annotation_type: &ClassName) -> bool {
        self.annotations(decl)
            .iter()
            .any(|a| a.type_name() == annotation_type)
    }

    /// JVM signature of a method: name followed by descriptor.
    fn jvm_signature(&self, decl: DeclId) -> Option<String> {
        self.descriptor(decl)
            .map(|descriptor| format!("{}{}", self.name(decl), descriptor))
    }
}
