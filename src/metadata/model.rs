//! Decoded metadata model.
//!
//! Everything here is immutable once produced by the reader. The same types
//! are accepted by [`super::writer::encode`], so hosts and fixtures can build
//! a model first and serialize it afterwards.

use std::fmt;

use smol_str::SmolStr;

use super::flags::{
    ClassFlags, ConstructorFlags, FunctionFlags, ParameterFlags, PropertyFlags, Visibility,
};

// ============================================================================
// HEADER
// ============================================================================

/// Metadata format version as recorded in the blob header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl MetadataVersion {
    /// Version written by this crate.
    pub const CURRENT: Self = Self::new(2, 0, 0);

    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for MetadataVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What kind of compiled type the blob describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataKind {
    /// A source-level class, interface, object, ...
    Class,
    /// The facade holding a file's top-level functions and properties.
    FileFacade,
    /// A compiler-generated class (lambda bodies and the like).
    SyntheticClass,
}

impl MetadataKind {
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Class),
            2 => Some(Self::FileFacade),
            3 => Some(Self::SyntheticClass),
            _ => None,
        }
    }

    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Class => 1,
            Self::FileFacade => 2,
            Self::SyntheticClass => 3,
        }
    }
}

// ============================================================================
// DECODED METADATA
// ============================================================================

/// The structured view of one metadata blob.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecodedMetadata {
    pub version: MetadataVersion,
    pub body: MetadataBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetadataBody {
    Class(ClassMetadata),
    FileFacade(PackageMetadata),
    SyntheticClass,
}

impl DecodedMetadata {
    pub fn class(class: ClassMetadata) -> Self {
        Self {
            version: MetadataVersion::CURRENT,
            body: MetadataBody::Class(class),
        }
    }

    pub fn file_facade(package: PackageMetadata) -> Self {
        Self {
            version: MetadataVersion::CURRENT,
            body: MetadataBody::FileFacade(package),
        }
    }

    pub fn synthetic_class() -> Self {
        Self {
            version: MetadataVersion::CURRENT,
            body: MetadataBody::SyntheticClass,
        }
    }

    pub fn with_version(mut self, version: MetadataVersion) -> Self {
        self.version = version;
        self
    }

    pub fn kind(&self) -> MetadataKind {
        match self.body {
            MetadataBody::Class(_) => MetadataKind::Class,
            MetadataBody::FileFacade(_) => MetadataKind::FileFacade,
            MetadataBody::SyntheticClass => MetadataKind::SyntheticClass,
        }
    }

    /// Class-level metadata, if the blob describes a class.
    pub fn class_metadata(&self) -> Option<&ClassMetadata> {
        match &self.body {
            MetadataBody::Class(class) => Some(class),
            MetadataBody::FileFacade(_) | MetadataBody::SyntheticClass => None,
        }
    }

    pub fn functions(&self) -> &[FunctionMetadata] {
        match &self.body {
            MetadataBody::Class(class) => &class.functions,
            MetadataBody::FileFacade(package) => &package.functions,
            MetadataBody::SyntheticClass => &[],
        }
    }

    pub fn properties(&self) -> &[PropertyMetadata] {
        match &self.body {
            MetadataBody::Class(class) => &class.properties,
            MetadataBody::FileFacade(package) => &package.properties,
            MetadataBody::SyntheticClass => &[],
        }
    }

    pub fn constructors(&self) -> &[ConstructorMetadata] {
        match &self.body {
            MetadataBody::Class(class) => &class.constructors,
            MetadataBody::FileFacade(_) | MetadataBody::SyntheticClass => &[],
        }
    }

    /// `true` if any constructor declares at least one default-valued parameter.
    pub fn has_constructor_with_default_param(&self) -> bool {
        self.constructors()
            .iter()
            .any(ConstructorMetadata::has_default_param)
    }

    /// Function whose JVM signature (`name` + descriptor) equals `signature`.
    pub fn function_by_signature(&self, signature: &str) -> Option<&FunctionMetadata> {
        self.functions()
            .iter()
            .find(|f| f.signature.as_deref() == Some(signature))
    }

    /// Constructor whose JVM signature (`<init>` + descriptor) equals
    /// `signature`.
    pub fn constructor_by_signature(&self, signature: &str) -> Option<&ConstructorMetadata> {
        self.constructors()
            .iter()
            .find(|c| c.signature.as_deref() == Some(signature))
    }

    /// Property whose backing field is named `field_name`.
    pub fn property_by_field(&self, field_name: &str) -> Option<&PropertyMetadata> {
        self.properties()
            .iter()
            .find(|p| p.field.as_deref() == Some(field_name))
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Metadata for a class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassMetadata {
    /// Source name, `/`-separated package (`com/example/Foo`).
    pub name: SmolStr,
    pub flags: ClassFlags,
    pub constructors: Vec<ConstructorMetadata>,
    pub functions: Vec<FunctionMetadata>,
    pub properties: Vec<PropertyMetadata>,
    /// Simple name of the companion object, if the class declares one.
    pub companion_object: Option<SmolStr>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<SmolStr>, flags: ClassFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            ..Self::default()
        }
    }

    pub fn with_constructor(mut self, constructor: ConstructorMetadata) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_function(mut self, function: FunctionMetadata) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_property(mut self, property: PropertyMetadata) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_companion_object(mut self, name: impl Into<SmolStr>) -> Self {
        self.companion_object = Some(name.into());
        self
    }
}

/// Top-level functions and properties of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackageMetadata {
    pub functions: Vec<FunctionMetadata>,
    pub properties: Vec<PropertyMetadata>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorMetadata {
    pub flags: ConstructorFlags,
    /// JVM signature, e.g. `<init>(ILjava/lang/String;)V`.
    pub signature: Option<SmolStr>,
    pub parameters: Vec<ValueParameter>,
}

impl ConstructorMetadata {
    pub fn new(flags: ConstructorFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn with_signature(mut self, signature: impl Into<SmolStr>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_parameter(mut self, parameter: ValueParameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn has_default_param(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.flags.declares_default_value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueParameter {
    pub name: SmolStr,
    pub flags: ParameterFlags,
}

impl ValueParameter {
    pub fn required(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            flags: ParameterFlags::required(),
        }
    }

    pub fn defaulted(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            flags: ParameterFlags::defaulted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionMetadata {
    pub name: SmolStr,
    pub flags: FunctionFlags,
    /// JVM signature (`name` + descriptor), absent for functions with no
    /// physical method.
    pub signature: Option<SmolStr>,
}

impl FunctionMetadata {
    pub fn new(name: impl Into<SmolStr>, flags: FunctionFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            signature: None,
        }
    }

    pub fn with_signature(mut self, signature: impl Into<SmolStr>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.flags.visibility
    }
}

/// Metadata for a property and the physical members it was compiled into.
///
/// Every physical reference is optional: a property may have no backing
/// field (computed), no getter (`@JvmField`), and only annotated properties
/// get a synthetic annotation accessor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyMetadata {
    pub name: SmolStr,
    pub flags: PropertyFlags,
    /// Name of the backing field.
    pub field: Option<SmolStr>,
    /// JVM signature of the getter.
    pub getter: Option<SmolStr>,
    /// JVM signature of the setter.
    pub setter: Option<SmolStr>,
    /// JVM signature of the synthetic method holding the property's
    /// annotations (`getFoo$annotations()V`).
    pub annotations_accessor: Option<SmolStr>,
}

impl PropertyMetadata {
    pub fn new(name: impl Into<SmolStr>, flags: PropertyFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: impl Into<SmolStr>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_getter(mut self, signature: impl Into<SmolStr>) -> Self {
        self.getter = Some(signature.into());
        self
    }

    pub fn with_setter(mut self, signature: impl Into<SmolStr>) -> Self {
        self.setter = Some(signature.into());
        self
    }

    pub fn with_annotations_accessor(mut self, signature: impl Into<SmolStr>) -> Self {
        self.annotations_accessor = Some(signature.into());
        self
    }
}
