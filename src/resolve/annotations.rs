//! Annotation reconciliation for split properties.
//!
//! A property compiles into a backing field plus, when annotated, a synthetic
//! `get<Name>$annotations()V` method. Annotations targeting the property land
//! on that method rather than the field. Reconciling folds them back onto the
//! field so callers see one logical annotation set.

use indexmap::IndexSet;
use tracing::{trace, warn};

use crate::base::{ClassName, DeclId};
use crate::host::{Annotation, DeclarationHost, ElementKind};

use super::{AccessorLookup, MetadataResolver, ResolveError};

impl<H> MetadataResolver<'_, H>
where
    H: DeclarationHost + ?Sized,
{
    /// Annotations that logically apply to `decl`.
    ///
    /// For a non-static field this is the field's own annotations followed by
    /// those of its synthetic annotation accessor, with structural duplicates
    /// removed. Everything else, static fields included, gets exactly its own
    /// annotations. Properties of `object` declarations have static backing
    /// fields, so they never merge.
    pub fn logical_annotations(&self, decl: DeclId) -> Result<Vec<Annotation>, ResolveError> {
        let own = self.host.annotations(decl);
        match self.host.kind(decl) {
            ElementKind::Field if !self.host.is_static(decl) => {
                let accessor = self.accessor_annotations(decl)?;
                let merged: IndexSet<&Annotation> = own.iter().chain(accessor).collect();
                Ok(merged.into_iter().cloned().collect())
            }
            ElementKind::Field | ElementKind::Type | ElementKind::Method | ElementKind::Other => {
                Ok(own.to_vec())
            }
        }
    }

    /// Logical annotations of `decl` whose annotation type is itself
    /// annotated with `target_type`.
    ///
    /// Meta-annotations are compared by fully qualified name, not by simple
    /// name, so a same-named annotation from another package does not match.
    pub fn annotations_matching(
        &self,
        decl: DeclId,
        target_type: &ClassName,
    ) -> Result<Vec<Annotation>, ResolveError> {
        Ok(self
            .logical_annotations(decl)?
            .into_iter()
            .filter(|annotation| {
                self.host
                    .annotations_of_type(annotation.type_name())
                    .iter()
                    .any(|meta| meta.type_name() == target_type)
            })
            .collect())
    }

    fn accessor_annotations(&self, field: DeclId) -> Result<&[Annotation], ResolveError> {
        match self.synthetic_accessor(field)? {
            AccessorLookup::Present(accessor) => {
                trace!("merging annotations of {} into {}", accessor, field);
                Ok(self.host.annotations(accessor))
            }
            AccessorLookup::Missing => {
                if self.config.warn_on_missing_accessor {
                    warn!(
                        "metadata claims a synthetic annotation accessor for field `{}` ({}) \
                         but the host does not have it",
                        self.host.name(field),
                        field
                    );
                }
                Ok(&[])
            }
            AccessorLookup::NotClaimed => Ok(&[]),
        }
    }
}
