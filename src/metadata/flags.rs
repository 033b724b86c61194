//! Flag words of the metadata format.
//!
//! Every declaration in a blob carries one varint flag word. Multi-bit fields
//! (visibility, modality, kinds) decode into enums; single-bit modifiers decode
//! into `bitflags` sets. Bits outside the known layout are preserved in
//! `unknown_bits` so a newer writer cannot corrupt the fields we understand.
//! Encoding is held to the same rule: `unknown_bits` overlapping the layout are
//! dropped, and an `Unknown` code the field cannot carry is written as the
//! field's highest reserved code.
//!
//! ```text
//! common      bit 0      HAS_ANNOTATIONS
//!             bits 1..=3 visibility
//!             bits 4..=5 modality            (not on constructors)
//! class       bits 6..=8 class kind, bits 9..   modifiers
//! function    bits 6..=7 member kind, bits 8..  modifiers
//! property    bits 6..=7 member kind, bits 8..  modifiers
//! constructor bits 4..   modifiers
//! parameter   bit 0 HAS_ANNOTATIONS, bits 1.. modifiers
//! ```

use bitflags::bitflags;

const HAS_ANNOTATIONS: u64 = 1;

const VISIBILITY_SHIFT: u32 = 1;
const VISIBILITY_MASK: u64 = 0b111;

const MODALITY_SHIFT: u32 = 4;
const MODALITY_MASK: u64 = 0b11;

const CLASS_KIND_SHIFT: u32 = 6;
const CLASS_KIND_MASK: u64 = 0b111;
const CLASS_MODIFIERS_SHIFT: u32 = 9;

const MEMBER_KIND_SHIFT: u32 = 6;
const MEMBER_KIND_MASK: u64 = 0b11;
const MEMBER_MODIFIERS_SHIFT: u32 = 8;

const CONSTRUCTOR_MODIFIERS_SHIFT: u32 = 4;

const PARAMETER_MODIFIERS_SHIFT: u32 = 1;

// ============================================================================
// MULTI-BIT FIELDS
// ============================================================================

/// Declared visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    Internal,
    Private,
    Protected,
    #[default]
    Public,
    PrivateToThis,
    Local,
    /// A code this decoder does not know. Never treated as internal.
    ///
    /// Encodes as itself only when it is a reserved 3-bit code (6 or 7),
    /// otherwise as 7.
    Unknown(u8),
}

impl Visibility {
    fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Internal,
            1 => Self::Private,
            2 => Self::Protected,
            3 => Self::Public,
            4 => Self::PrivateToThis,
            5 => Self::Local,
            other => Self::Unknown(other as u8),
        }
    }

    fn code(self) -> u64 {
        match self {
            Self::Internal => 0,
            Self::Private => 1,
            Self::Protected => 2,
            Self::Public => 3,
            Self::PrivateToThis => 4,
            Self::Local => 5,
            Self::Unknown(code) => match u64::from(code) {
                reserved @ 6..=VISIBILITY_MASK => reserved,
                _ => VISIBILITY_MASK,
            },
        }
    }
}

/// Inheritance modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Modality {
    #[default]
    Final,
    Open,
    Abstract,
    Sealed,
}

impl Modality {
    fn from_code(code: u64) -> Self {
        match code & MODALITY_MASK {
            0 => Self::Final,
            1 => Self::Open,
            2 => Self::Abstract,
            _ => Self::Sealed,
        }
    }

    fn code(self) -> u64 {
        match self {
            Self::Final => 0,
            Self::Open => 1,
            Self::Abstract => 2,
            Self::Sealed => 3,
        }
    }
}

/// Source-level form of a class declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    EnumClass,
    EnumEntry,
    AnnotationClass,
    /// A singleton `object` declaration.
    Object,
    /// A `companion object` nested in another class.
    CompanionObject,
    /// A code this decoder does not know. Always encodes as the one reserved
    /// code, 7.
    Unknown(u8),
}

impl ClassKind {
    fn from_code(code: u64) -> Self {
        match code {
            0 => Self::Class,
            1 => Self::Interface,
            2 => Self::EnumClass,
            3 => Self::EnumEntry,
            4 => Self::AnnotationClass,
            5 => Self::Object,
            6 => Self::CompanionObject,
            other => Self::Unknown(other as u8),
        }
    }

    fn code(self) -> u64 {
        match self {
            Self::Class => 0,
            Self::Interface => 1,
            Self::EnumClass => 2,
            Self::EnumEntry => 3,
            Self::AnnotationClass => 4,
            Self::Object => 5,
            Self::CompanionObject => 6,
            Self::Unknown(_) => CLASS_KIND_MASK,
        }
    }
}

/// How a function or property came to be declared in its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    #[default]
    Declaration,
    FakeOverride,
    Delegation,
    Synthesized,
}

impl MemberKind {
    fn from_code(code: u64) -> Self {
        match code & MEMBER_KIND_MASK {
            0 => Self::Declaration,
            1 => Self::FakeOverride,
            2 => Self::Delegation,
            _ => Self::Synthesized,
        }
    }

    fn code(self) -> u64 {
        match self {
            Self::Declaration => 0,
            Self::FakeOverride => 1,
            Self::Delegation => 2,
            Self::Synthesized => 3,
        }
    }
}

// ============================================================================
// MODIFIER SETS
// ============================================================================

bitflags! {
    /// Single-bit class modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClassModifiers: u32 {
        const INNER = 1 << 0;
        const DATA = 1 << 1;
        const EXTERNAL = 1 << 2;
        const EXPECT = 1 << 3;
        const VALUE = 1 << 4;
        const FUN = 1 << 5;
    }

    /// Single-bit function modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FunctionModifiers: u32 {
        const OPERATOR = 1 << 0;
        const INFIX = 1 << 1;
        const INLINE = 1 << 2;
        const TAILREC = 1 << 3;
        const EXTERNAL = 1 << 4;
        const SUSPEND = 1 << 5;
        const EXPECT = 1 << 6;
    }

    /// Single-bit property modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PropertyModifiers: u32 {
        const VAR = 1 << 0;
        const HAS_GETTER = 1 << 1;
        const HAS_SETTER = 1 << 2;
        const CONST = 1 << 3;
        const LATEINIT = 1 << 4;
        const HAS_CONSTANT = 1 << 5;
        const EXTERNAL = 1 << 6;
        const DELEGATED = 1 << 7;
        const EXPECT = 1 << 8;
    }

    /// Single-bit constructor modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ConstructorModifiers: u32 {
        const SECONDARY = 1 << 0;
        const HAS_NON_STABLE_PARAMETER_NAMES = 1 << 1;
    }

    /// Single-bit value parameter modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ParameterModifiers: u32 {
        const DECLARES_DEFAULT_VALUE = 1 << 0;
        const CROSSINLINE = 1 << 1;
        const NOINLINE = 1 << 2;
    }
}

/// Extracts `width` modifier bits starting at `shift`.
fn modifier_bits(raw: u64, shift: u32, width: u32) -> u32 {
    ((raw >> shift) & ((1 << width) - 1)) as u32
}

const fn field_mask(shift: u32, width: u32) -> u64 {
    ((1u64 << width) - 1) << shift
}

/// Places modifier `bits` at `shift`, dropping anything wider than `width`.
fn modifier_field(bits: u32, shift: u32, width: u32) -> u64 {
    (u64::from(bits) << shift) & field_mask(shift, width)
}

fn common_bits(has_annotations: bool, visibility: Visibility) -> u64 {
    let mut raw = visibility.code() << VISIBILITY_SHIFT;
    if has_annotations {
        raw |= HAS_ANNOTATIONS;
    }
    raw
}

// ============================================================================
// CLASS FLAGS
// ============================================================================

/// A single queryable class-level flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassFlag {
    HasAnnotations,
    IsInternal,
    IsPrivate,
    IsProtected,
    IsPublic,
    IsFinal,
    IsOpen,
    IsAbstract,
    IsSealed,
    IsClass,
    IsInterface,
    IsEnumClass,
    IsEnumEntry,
    IsAnnotationClass,
    IsObject,
    IsCompanionObject,
    IsInner,
    IsData,
    IsExternal,
    IsExpect,
    IsValue,
    IsFun,
}

/// Decoded class flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassFlags {
    pub has_annotations: bool,
    pub visibility: Visibility,
    pub modality: Modality,
    pub kind: ClassKind,
    pub modifiers: ClassModifiers,
    /// Bits beyond the known layout, kept so re-encoding is lossless. Bits
    /// inside the layout are ignored when encoding.
    pub unknown_bits: u64,
}

impl ClassFlags {
    const MODIFIER_WIDTH: u32 = 6;
    const KNOWN: u64 = HAS_ANNOTATIONS
        | (VISIBILITY_MASK << VISIBILITY_SHIFT)
        | (MODALITY_MASK << MODALITY_SHIFT)
        | (CLASS_KIND_MASK << CLASS_KIND_SHIFT)
        | field_mask(CLASS_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH);

    /// Public final class of the given kind.
    pub fn new(kind: ClassKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ClassModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            has_annotations: raw & HAS_ANNOTATIONS != 0,
            visibility: Visibility::from_code((raw >> VISIBILITY_SHIFT) & VISIBILITY_MASK),
            modality: Modality::from_code(raw >> MODALITY_SHIFT),
            kind: ClassKind::from_code((raw >> CLASS_KIND_SHIFT) & CLASS_KIND_MASK),
            modifiers: ClassModifiers::from_bits_truncate(modifier_bits(
                raw,
                CLASS_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )),
            unknown_bits: raw & !Self::KNOWN,
        }
    }

    pub fn to_raw(&self) -> u64 {
        common_bits(self.has_annotations, self.visibility)
            | (self.modality.code() << MODALITY_SHIFT)
            | (self.kind.code() << CLASS_KIND_SHIFT)
            | modifier_field(self.modifiers.bits(), CLASS_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH)
            | (self.unknown_bits & !Self::KNOWN)
    }

    pub fn contains(&self, flag: ClassFlag) -> bool {
        match flag {
            ClassFlag::HasAnnotations => self.has_annotations,
            ClassFlag::IsInternal => self.visibility == Visibility::Internal,
            ClassFlag::IsPrivate => self.visibility == Visibility::Private,
            ClassFlag::IsProtected => self.visibility == Visibility::Protected,
            ClassFlag::IsPublic => self.visibility == Visibility::Public,
            ClassFlag::IsFinal => self.modality == Modality::Final,
            ClassFlag::IsOpen => self.modality == Modality::Open,
            ClassFlag::IsAbstract => self.modality == Modality::Abstract,
            ClassFlag::IsSealed => self.modality == Modality::Sealed,
            ClassFlag::IsClass => self.kind == ClassKind::Class,
            ClassFlag::IsInterface => self.kind == ClassKind::Interface,
            ClassFlag::IsEnumClass => self.kind == ClassKind::EnumClass,
            ClassFlag::IsEnumEntry => self.kind == ClassKind::EnumEntry,
            ClassFlag::IsAnnotationClass => self.kind == ClassKind::AnnotationClass,
            ClassFlag::IsObject => self.kind == ClassKind::Object,
            ClassFlag::IsCompanionObject => self.kind == ClassKind::CompanionObject,
            ClassFlag::IsInner => self.modifiers.contains(ClassModifiers::INNER),
            ClassFlag::IsData => self.modifiers.contains(ClassModifiers::DATA),
            ClassFlag::IsExternal => self.modifiers.contains(ClassModifiers::EXTERNAL),
            ClassFlag::IsExpect => self.modifiers.contains(ClassModifiers::EXPECT),
            ClassFlag::IsValue => self.modifiers.contains(ClassModifiers::VALUE),
            ClassFlag::IsFun => self.modifiers.contains(ClassModifiers::FUN),
        }
    }
}

// ============================================================================
// MEMBER FLAGS
// ============================================================================

/// Decoded function flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionFlags {
    pub has_annotations: bool,
    pub visibility: Visibility,
    pub modality: Modality,
    pub kind: MemberKind,
    pub modifiers: FunctionModifiers,
    pub unknown_bits: u64,
}

impl FunctionFlags {
    const MODIFIER_WIDTH: u32 = 7;
    const KNOWN: u64 = HAS_ANNOTATIONS
        | (VISIBILITY_MASK << VISIBILITY_SHIFT)
        | (MODALITY_MASK << MODALITY_SHIFT)
        | (MEMBER_KIND_MASK << MEMBER_KIND_SHIFT)
        | field_mask(MEMBER_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH);

    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: FunctionModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            has_annotations: raw & HAS_ANNOTATIONS != 0,
            visibility: Visibility::from_code((raw >> VISIBILITY_SHIFT) & VISIBILITY_MASK),
            modality: Modality::from_code(raw >> MODALITY_SHIFT),
            kind: MemberKind::from_code(raw >> MEMBER_KIND_SHIFT),
            modifiers: FunctionModifiers::from_bits_truncate(modifier_bits(
                raw,
                MEMBER_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )),
            unknown_bits: raw & !Self::KNOWN,
        }
    }

    pub fn to_raw(&self) -> u64 {
        common_bits(self.has_annotations, self.visibility)
            | (self.modality.code() << MODALITY_SHIFT)
            | (self.kind.code() << MEMBER_KIND_SHIFT)
            | modifier_field(self.modifiers.bits(), MEMBER_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH)
            | (self.unknown_bits & !Self::KNOWN)
    }

    pub fn is_internal(&self) -> bool {
        self.visibility == Visibility::Internal
    }
}

/// Decoded property flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyFlags {
    pub has_annotations: bool,
    pub visibility: Visibility,
    pub modality: Modality,
    pub kind: MemberKind,
    pub modifiers: PropertyModifiers,
    pub unknown_bits: u64,
}

impl PropertyFlags {
    const MODIFIER_WIDTH: u32 = 9;
    const KNOWN: u64 = HAS_ANNOTATIONS
        | (VISIBILITY_MASK << VISIBILITY_SHIFT)
        | (MODALITY_MASK << MODALITY_SHIFT)
        | (MEMBER_KIND_MASK << MEMBER_KIND_SHIFT)
        | field_mask(MEMBER_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH);

    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: PropertyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the property as carrying annotations, which is what makes the
    /// compiler emit a synthetic annotation accessor for it.
    pub fn with_annotations(mut self) -> Self {
        self.has_annotations = true;
        self
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            has_annotations: raw & HAS_ANNOTATIONS != 0,
            visibility: Visibility::from_code((raw >> VISIBILITY_SHIFT) & VISIBILITY_MASK),
            modality: Modality::from_code(raw >> MODALITY_SHIFT),
            kind: MemberKind::from_code(raw >> MEMBER_KIND_SHIFT),
            modifiers: PropertyModifiers::from_bits_truncate(modifier_bits(
                raw,
                MEMBER_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )),
            unknown_bits: raw & !Self::KNOWN,
        }
    }

    pub fn to_raw(&self) -> u64 {
        common_bits(self.has_annotations, self.visibility)
            | (self.modality.code() << MODALITY_SHIFT)
            | (self.kind.code() << MEMBER_KIND_SHIFT)
            | modifier_field(self.modifiers.bits(), MEMBER_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH)
            | (self.unknown_bits & !Self::KNOWN)
    }

    pub fn is_internal(&self) -> bool {
        self.visibility == Visibility::Internal
    }
}

/// Decoded constructor flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorFlags {
    pub has_annotations: bool,
    pub visibility: Visibility,
    pub modifiers: ConstructorModifiers,
    pub unknown_bits: u64,
}

impl ConstructorFlags {
    const MODIFIER_WIDTH: u32 = 2;
    const KNOWN: u64 = HAS_ANNOTATIONS
        | (VISIBILITY_MASK << VISIBILITY_SHIFT)
        | field_mask(CONSTRUCTOR_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH);

    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            ..Self::default()
        }
    }

    pub fn secondary(mut self) -> Self {
        self.modifiers |= ConstructorModifiers::SECONDARY;
        self
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            has_annotations: raw & HAS_ANNOTATIONS != 0,
            visibility: Visibility::from_code((raw >> VISIBILITY_SHIFT) & VISIBILITY_MASK),
            modifiers: ConstructorModifiers::from_bits_truncate(modifier_bits(
                raw,
                CONSTRUCTOR_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )),
            unknown_bits: raw & !Self::KNOWN,
        }
    }

    pub fn to_raw(&self) -> u64 {
        common_bits(self.has_annotations, self.visibility)
            | modifier_field(
                self.modifiers.bits(),
                CONSTRUCTOR_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )
            | (self.unknown_bits & !Self::KNOWN)
    }

    pub fn is_internal(&self) -> bool {
        self.visibility == Visibility::Internal
    }
}

/// Decoded value parameter flag word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterFlags {
    pub has_annotations: bool,
    pub modifiers: ParameterModifiers,
    pub unknown_bits: u64,
}

impl ParameterFlags {
    const MODIFIER_WIDTH: u32 = 3;
    const KNOWN: u64 =
        HAS_ANNOTATIONS | field_mask(PARAMETER_MODIFIERS_SHIFT, Self::MODIFIER_WIDTH);

    pub fn required() -> Self {
        Self::default()
    }

    pub fn defaulted() -> Self {
        Self {
            modifiers: ParameterModifiers::DECLARES_DEFAULT_VALUE,
            ..Self::default()
        }
    }

    pub fn from_raw(raw: u64) -> Self {
        Self {
            has_annotations: raw & HAS_ANNOTATIONS != 0,
            modifiers: ParameterModifiers::from_bits_truncate(modifier_bits(
                raw,
                PARAMETER_MODIFIERS_SHIFT,
                Self::MODIFIER_WIDTH,
            )),
            unknown_bits: raw & !Self::KNOWN,
        }
    }

    pub fn to_raw(&self) -> u64 {
        let mut raw = modifier_field(
            self.modifiers.bits(),
            PARAMETER_MODIFIERS_SHIFT,
            Self::MODIFIER_WIDTH,
        ) | (self.unknown_bits & !Self::KNOWN);
        if self.has_annotations {
            raw |= HAS_ANNOTATIONS;
        }
        raw
    }

    pub fn declares_default_value(&self) -> bool {
        self.modifiers
            .contains(ParameterModifiers::DECLARES_DEFAULT_VALUE)
    }
}
