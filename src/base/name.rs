//! Qualified class names.

use std::fmt;

use smol_str::SmolStr;

/// A fully qualified type name such as `kotlin.Metadata` or
/// `dagger.hilt.InstallIn`.
///
/// Nested types use `.` as well (`Outer.Inner`); the simple name is whatever
/// follows the last dot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassName(SmolStr);

impl ClassName {
    pub fn new(qualified: impl Into<SmolStr>) -> Self {
        Self(qualified.into())
    }

    /// The full dotted name.
    pub fn qualified_name(&self) -> &str {
        &self.0
    }

    /// The name after the last `.`.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(dot) => &self.0[dot + 1..],
            None => &self.0,
        }
    }

    /// The package part, empty for the default package.
    pub fn package_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(dot) => &self.0[..dot],
            None => "",
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ClassName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
