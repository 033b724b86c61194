//! Metadata blob decoder.
//!
//! ```text
//! blob     := magic version kind strings body
//! strings  := count (len utf8){count}
//! body     := class-body | package-body | ε
//! ```
//!
//! All integers are unsigned LEB128 varints. String references index into the
//! string table; optional references use `0` for "absent" and `n` for
//! `strings[n - 1]`.

use smol_str::SmolStr;
use tracing::trace;

use crate::base::constants::{BLOB_MAGIC, SUPPORTED_MAJOR_VERSIONS};

use super::error::DecodeError;
use super::flags::{ClassFlags, ConstructorFlags, FunctionFlags, ParameterFlags, PropertyFlags};
use super::model::{
    ClassMetadata, ConstructorMetadata, DecodedMetadata, FunctionMetadata, MetadataBody,
    MetadataKind, MetadataVersion, PackageMetadata, PropertyMetadata, ValueParameter,
};

/// Decode a metadata blob.
///
/// Deterministic and total over well-formed blobs. Anything else, including
/// trailing bytes, is a [`DecodeError`].
pub fn decode(blob: &[u8]) -> Result<DecodedMetadata, DecodeError> {
    let mut reader = Reader::new(blob);

    let magic = reader.bytes(BLOB_MAGIC.len(), "magic")?;
    if magic != BLOB_MAGIC {
        return Err(DecodeError::BadMagic {
            found: magic.to_vec(),
        });
    }

    let version = MetadataVersion::new(
        reader.byte("major version")?,
        reader.byte("minor version")?,
        reader.byte("patch version")?,
    );
    if !SUPPORTED_MAJOR_VERSIONS.contains(&version.major) {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let kind_code = reader.byte("kind")?;
    let kind = MetadataKind::from_code(kind_code).ok_or(DecodeError::UnknownKind(kind_code))?;

    reader.read_string_table()?;

    let body = match kind {
        MetadataKind::Class => MetadataBody::Class(reader.read_class()?),
        MetadataKind::FileFacade => MetadataBody::FileFacade(reader.read_package()?),
        MetadataKind::SyntheticClass => MetadataBody::SyntheticClass,
    };

    let remaining = reader.remaining();
    if remaining != 0 {
        return Err(DecodeError::TrailingBytes { count: remaining });
    }

    trace!(
        "decoded {:?} metadata v{} ({} bytes, {} strings)",
        kind,
        version,
        blob.len(),
        reader.strings.len()
    );
    Ok(DecodedMetadata { version, body })
}

// ============================================================================
// READER
// ============================================================================

struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
    strings: Vec<SmolStr>,
}

impl<'a> Reader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            strings: Vec::new(),
        }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let b = *self
            .input
            .get(self.pos)
            .ok_or(DecodeError::eof(self.pos, context))?;
        self.pos += 1;
        Ok(b)
    }

    fn bytes(&mut self, len: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining() {
            return Err(DecodeError::eof(self.pos, context));
        }
        let slice = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let start = self.pos;
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let b = self.byte(context)?;
            if shift == 63 && b > 1 {
                return Err(DecodeError::VarintOverflow { offset: start });
            }
            value |= u64::from(b & 0x7f) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(DecodeError::VarintOverflow { offset: start });
            }
        }
    }

    /// A count prefix. Every element takes at least one byte, so a count
    /// larger than the remaining input is reported as truncation up front.
    fn count(&mut self, context: &'static str) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let count = self.varint(context)?;
        if count > self.remaining() as u64 {
            return Err(DecodeError::eof(offset, context));
        }
        Ok(count as usize)
    }

    fn read_string_table(&mut self) -> Result<(), DecodeError> {
        let count = self.count("string table")?;
        self.strings.reserve(count);
        for index in 0..count {
            let len = self.count("string length")?;
            let raw = self.bytes(len, "string bytes")?;
            let s = std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidUtf8 { index })?;
            self.strings.push(SmolStr::new(s));
        }
        Ok(())
    }

    fn string(&mut self, context: &'static str) -> Result<SmolStr, DecodeError> {
        let offset = self.pos;
        let index = self.varint(context)?;
        self.lookup(index, offset)
    }

    fn opt_string(&mut self, context: &'static str) -> Result<Option<SmolStr>, DecodeError> {
        let offset = self.pos;
        match self.varint(context)? {
            0 => Ok(None),
            n => self.lookup(n - 1, offset).map(Some),
        }
    }

    fn lookup(&self, index: u64, offset: usize) -> Result<SmolStr, DecodeError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.strings.get(i))
            .cloned()
            .ok_or(DecodeError::StringIndexOutOfRange {
                index,
                len: self.strings.len(),
                offset,
            })
    }

    fn list<T>(
        &mut self,
        context: &'static str,
        mut item: impl FnMut(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<Vec<T>, DecodeError> {
        let count = self.count(context)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(item(self)?);
        }
        Ok(items)
    }

    // ------------------------------------------------------------------------
    // Bodies
    // ------------------------------------------------------------------------

    fn read_class(&mut self) -> Result<ClassMetadata, DecodeError> {
        let flags = ClassFlags::from_raw(self.varint("class flags")?);
        let name = self.string("class name")?;
        let constructors = self.list("constructors", Self::read_constructor)?;
        let functions = self.list("functions", Self::read_function)?;
        let properties = self.list("properties", Self::read_property)?;
        let companion_object = self.opt_string("companion object")?;
        Ok(ClassMetadata {
            name,
            flags,
            constructors,
            functions,
            properties,
            companion_object,
        })
    }

    fn read_package(&mut self) -> Result<PackageMetadata, DecodeError> {
        let functions = self.list("functions", Self::read_function)?;
        let properties = self.list("properties", Self::read_property)?;
        Ok(PackageMetadata {
            functions,
            properties,
        })
    }

    fn read_constructor(&mut self) -> Result<ConstructorMetadata, DecodeError> {
        let flags = ConstructorFlags::from_raw(self.varint("constructor flags")?);
        let signature = self.opt_string("constructor signature")?;
        let parameters = self.list("value parameters", |r| {
            let flags = ParameterFlags::from_raw(r.varint("parameter flags")?);
            let name = r.string("parameter name")?;
            Ok(ValueParameter { name, flags })
        })?;
        Ok(ConstructorMetadata {
            flags,
            signature,
            parameters,
        })
    }

    fn read_function(&mut self) -> Result<FunctionMetadata, DecodeError> {
        let flags = FunctionFlags::from_raw(self.varint("function flags")?);
        let name = self.string("function name")?;
        let signature = self.opt_string("function signature")?;
        Ok(FunctionMetadata {
            name,
            flags,
            signature,
        })
    }

    fn read_property(&mut self) -> Result<PropertyMetadata, DecodeError> {
        let flags = PropertyFlags::from_raw(self.varint("property flags")?);
        let name = self.string("property name")?;
        Ok(PropertyMetadata {
            name,
            flags,
            field: self.opt_string("property field")?,
            getter: self.opt_string("property getter")?,
            setter: self.opt_string("property setter")?,
            annotations_accessor: self.opt_string("property annotations accessor")?,
        })
    }
}
