//! Metadata blob encoder.
//!
//! Produces blobs in the format read by [`super::reader::decode`]. Strings are
//! interned into the string table in first-use order, so encoding the same
//! model twice yields identical bytes.

use indexmap::IndexSet;
use smol_str::SmolStr;

use crate::base::constants::BLOB_MAGIC;

use super::model::{
    ClassMetadata, ConstructorMetadata, DecodedMetadata, FunctionMetadata, MetadataBody,
    PackageMetadata, PropertyMetadata,
};

/// Encode decoded metadata back into a blob.
pub fn encode(metadata: &DecodedMetadata) -> Vec<u8> {
    let mut writer = MetadataWriter::default();
    match &metadata.body {
        MetadataBody::Class(class) => writer.write_class(class),
        MetadataBody::FileFacade(package) => writer.write_package(package),
        MetadataBody::SyntheticClass => {}
    }
    writer.finish(metadata)
}

/// Accumulates a body and its string table.
#[derive(Default)]
struct MetadataWriter {
    strings: IndexSet<SmolStr>,
    body: Vec<u8>,
}

impl MetadataWriter {
    fn finish(self, metadata: &DecodedMetadata) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 64);
        out.extend_from_slice(&BLOB_MAGIC);
        out.extend([
            metadata.version.major,
            metadata.version.minor,
            metadata.version.patch,
            metadata.kind().code(),
        ]);
        put_varint(&mut out, self.strings.len() as u64);
        for s in &self.strings {
            put_varint(&mut out, s.len() as u64);
            out.extend_from_slice(s.as_bytes());
        }
        out.extend_from_slice(&self.body);
        out
    }

    fn varint(&mut self, value: u64) {
        put_varint(&mut self.body, value);
    }

    fn string(&mut self, s: &SmolStr) {
        let (index, _) = self.strings.insert_full(s.clone());
        self.varint(index as u64);
    }

    fn opt_string(&mut self, s: Option<&SmolStr>) {
        match s {
            Some(s) => {
                let (index, _) = self.strings.insert_full(s.clone());
                self.varint(index as u64 + 1);
            }
            None => self.varint(0),
        }
    }

    fn write_class(&mut self, class: &ClassMetadata) {
        self.varint(class.flags.to_raw());
        self.string(&class.name);
        self.varint(class.constructors.len() as u64);
        for constructor in &class.constructors {
            self.write_constructor(constructor);
        }
        self.write_members(&class.functions, &class.properties);
        self.opt_string(class.companion_object.as_ref());
    }

    fn write_package(&mut self, package: &PackageMetadata) {
        self.write_members(&package.functions, &package.properties);
    }

    fn write_members(&mut self, functions: &[FunctionMetadata], properties: &[PropertyMetadata]) {
        self.varint(functions.len() as u64);
        for function in functions {
            self.varint(function.flags.to_raw());
            self.string(&function.name);
            self.opt_string(function.signature.as_ref());
        }
        self.varint(properties.len() as u64);
        for property in properties {
            self.varint(property.flags.to_raw());
            self.string(&property.name);
            self.opt_string(property.field.as_ref());
            self.opt_string(property.getter.as_ref());
            self.opt_string(property.setter.as_ref());
            self.opt_string(property.annotations_accessor.as_ref());
        }
    }

    fn write_constructor(&mut self, constructor: &ConstructorMetadata) {
        self.varint(constructor.flags.to_raw());
        self.opt_string(constructor.signature.as_ref());
        self.varint(constructor.parameters.len() as u64);
        for parameter in &constructor.parameters {
            self.varint(parameter.flags.to_raw());
            self.string(&parameter.name);
        }
    }
}

fn put_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let low = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(low);
            return;
        }
        out.push(low | 0x80);
    }
}
