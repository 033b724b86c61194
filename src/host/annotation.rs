//! Annotation instances as seen through the host.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

use crate::base::ClassName;

/// An annotation applied to a declaration.
///
/// Equality is structural: same annotation type and same named values. Values
/// are kept sorted by name, so the order in which a host reports them does not
/// matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    type_name: ClassName,
    values: BTreeMap<SmolStr, AnnotationValue>,
}

impl Annotation {
    /// Marker annotation with no values.
    pub fn new(type_name: impl Into<ClassName>) -> Self {
        Self {
            type_name: type_name.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, name: impl Into<SmolStr>, value: AnnotationValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values.get(name)
    }

    /// Named values in name order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &AnnotationValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A single annotation element value.
#[derive(Debug, Clone)]
pub enum AnnotationValue {
    Bool(bool),
    Char(char),
    Int(i64),
    /// Compared bitwise, so `NaN` equals itself and `0.0` differs from `-0.0`.
    Float(f64),
    String(SmolStr),
    Class(ClassName),
    Enum { type_name: ClassName, entry: SmolStr },
    Annotation(Box<Annotation>),
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn string(s: impl Into<SmolStr>) -> Self {
        Self::String(s.into())
    }

    pub fn class(name: impl Into<ClassName>) -> Self {
        Self::Class(name.into())
    }

    pub fn enum_entry(type_name: impl Into<ClassName>, entry: impl Into<SmolStr>) -> Self {
        Self::Enum {
            type_name: type_name.into(),
            entry: entry.into(),
        }
    }

    /// For nested annotation values, the annotation type they denote.
    pub fn annotation_type(&self) -> Option<&ClassName> {
        match self {
            Self::Annotation(annotation) => Some(annotation.type_name()),
            _ => None,
        }
    }
}

impl PartialEq for AnnotationValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Class(a), Self::Class(b)) => a == b,
            (
                Self::Enum {
                    type_name: ta,
                    entry: ea,
                },
                Self::Enum {
                    type_name: tb,
                    entry: eb,
                },
            ) => ta == tb && ea == eb,
            (Self::Annotation(a), Self::Annotation(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AnnotationValue {}

impl Hash for AnnotationValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::Char(v) => v.hash(state),
            Self::Int(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Class(v) => v.hash(state),
            Self::Enum { type_name, entry } => {
                type_name.hash(state);
                entry.hash(state);
            }
            Self::Annotation(v) => v.hash(state),
            Self::Array(v) => v.hash(state),
        }
    }
}
