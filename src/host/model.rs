//! In-memory host program.
//!
//! `ProgramModel` is an owned snapshot of declarations, built once through
//! [`ProgramBuilder`] and then only read. It is what embedders without a
//! compiler of their own hand to the resolver, and what the tests use.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::constants::METADATA_MARKER;
use crate::base::{ClassName, DeclId};
use crate::metadata::{DecodedMetadata, encode};

use super::{Annotation, DeclarationHost, ElementKind};

#[derive(Debug, Clone)]
struct Declaration {
    name: SmolStr,
    kind: ElementKind,
    enclosing: Option<DeclId>,
    annotations: Vec<Annotation>,
    is_static: bool,
    members: Vec<DeclId>,
    descriptor: Option<SmolStr>,
    metadata: Option<Box<[u8]>>,
}

impl Declaration {
    fn new(name: SmolStr, kind: ElementKind, enclosing: Option<DeclId>) -> Self {
        Self {
            name,
            kind,
            enclosing,
            annotations: Vec::new(),
            is_static: false,
            members: Vec::new(),
            descriptor: None,
            metadata: None,
        }
    }
}

/// Immutable declaration snapshot implementing [`DeclarationHost`].
#[derive(Debug, Clone, Default)]
pub struct ProgramModel {
    decls: Vec<Declaration>,
    annotation_types: FxHashMap<ClassName, Vec<Annotation>>,
}

impl ProgramModel {
    pub fn builder() -> ProgramBuilder {
        ProgramBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// All declarations in allocation order.
    pub fn declarations(&self) -> impl Iterator<Item = DeclId> + '_ {
        (0..self.decls.len() as u32).map(DeclId::new)
    }

    fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }
}

impl DeclarationHost for ProgramModel {
    fn kind(&self, decl: DeclId) -> ElementKind {
        self.decl(decl).kind
    }

    fn name(&self, decl: DeclId) -> &str {
        &self.decl(decl).name
    }

    fn enclosing(&self, decl: DeclId) -> Option<DeclId> {
        self.decl(decl).enclosing
    }

    fn annotations(&self, decl: DeclId) -> &[Annotation] {
        &self.decl(decl).annotations
    }

    fn is_static(&self, decl: DeclId) -> bool {
        self.decl(decl).is_static
    }

    fn members(&self, ty: DeclId) -> &[DeclId] {
        &self.decl(ty).members
    }

    fn descriptor(&self, decl: DeclId) -> Option<&str> {
        self.decl(decl).descriptor.as_deref()
    }

    fn metadata_blob(&self, ty: DeclId) -> Option<&[u8]> {
        self.decl(ty).metadata.as_deref()
    }

    fn annotations_of_type(&self, annotation_type: &ClassName) -> &[Annotation] {
        self.annotation_types
            .get(annotation_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`ProgramModel`].
///
/// Members are registered with their owner as they are added; leaving a
/// method out models a synthetic member the host discarded.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    model: ProgramModel,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId::new(self.model.decls.len() as u32);
        if let Some(owner) = decl.enclosing {
            self.model.decls[owner.index()].members.push(id);
        }
        self.model.decls.push(decl);
        id
    }

    /// Add a type, top-level when `enclosing` is `None`.
    pub fn add_type(&mut self, name: impl Into<SmolStr>, enclosing: Option<DeclId>) -> DeclId {
        self.push(Declaration::new(name.into(), ElementKind::Type, enclosing))
    }

    pub fn add_method(
        &mut self,
        owner: DeclId,
        name: impl Into<SmolStr>,
        descriptor: impl Into<SmolStr>,
    ) -> DeclId {
        let mut decl = Declaration::new(name.into(), ElementKind::Method, Some(owner));
        decl.descriptor = Some(descriptor.into());
        self.push(decl)
    }

    pub fn add_field(&mut self, owner: DeclId, name: impl Into<SmolStr>) -> DeclId {
        self.push(Declaration::new(name.into(), ElementKind::Field, Some(owner)))
    }

    pub fn add_static_field(&mut self, owner: DeclId, name: impl Into<SmolStr>) -> DeclId {
        let id = self.add_field(owner, name);
        self.set_static(id, true);
        id
    }

    /// Add a declaration that is neither type, method nor field.
    pub fn add_other(&mut self, name: impl Into<SmolStr>, enclosing: Option<DeclId>) -> DeclId {
        self.push(Declaration::new(name.into(), ElementKind::Other, enclosing))
    }

    pub fn set_static(&mut self, decl: DeclId, is_static: bool) -> &mut Self {
        self.model.decls[decl.index()].is_static = is_static;
        self
    }

    pub fn annotate(&mut self, decl: DeclId, annotation: Annotation) -> &mut Self {
        self.model.decls[decl.index()].annotations.push(annotation);
        self
    }

    /// Encode `metadata`, attach it to `ty` and mark `ty` with the default
    /// metadata marker.
    pub fn attach_metadata(&mut self, ty: DeclId, metadata: &DecodedMetadata) -> &mut Self {
        self.attach_raw_metadata(ty, encode(metadata))
    }

    /// Attach an already-encoded (possibly malformed) blob.
    pub fn attach_raw_metadata(&mut self, ty: DeclId, blob: Vec<u8>) -> &mut Self {
        self.annotate(ty, Annotation::new(METADATA_MARKER));
        self.model.decls[ty.index()].metadata = Some(blob.into_boxed_slice());
        self
    }

    /// Declare the meta-annotations of an annotation type.
    pub fn declare_annotation_type(
        &mut self,
        annotation_type: impl Into<ClassName>,
        meta_annotations: Vec<Annotation>,
    ) -> &mut Self {
        self.model
            .annotation_types
            .insert(annotation_type.into(), meta_annotations);
        self
    }

    pub fn build(self) -> ProgramModel {
        self.model
    }
}
