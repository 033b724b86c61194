//! Declaration identity.

use std::fmt;

/// Identity of a declaration (type, method, field, ...) in the host program.
///
/// Ids are allocated and deduplicated by the host: two ids are equal iff they
/// name the same declaration. Structurally similar declarations still get
/// distinct ids, which is what makes `DeclId` usable as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclId(u32);

impl DeclId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw index, for hosts that store declarations in a vector.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "decl#{}", self.0)
    }
}

impl From<u32> for DeclId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}
