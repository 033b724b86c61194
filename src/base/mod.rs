//! Foundation types for the kmeta toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`DeclId`] - Host-allocated declaration identity
//! - [`ClassName`] - Qualified type names (annotation types, metadata marker)
//! - Domain constants (metadata marker, blob magic, supported versions)
//!
//! This module has NO dependencies on other kmeta modules.

pub mod constants;
mod decl_id;
mod name;

pub use decl_id::DeclId;
pub use name::ClassName;
