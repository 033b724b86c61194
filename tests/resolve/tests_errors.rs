//! Error propagation: malformed blobs and broken enclosing chains.

use kmeta::metadata::MetadataVersion;
use kmeta::{DecodeError, MetadataResolver, ProgramBuilder, ResolveError};

use crate::helpers::program_fixtures::*;

fn assert_unsupported(err: ResolveError, ty: kmeta::DeclId) {
    assert_eq!(
        err,
        ResolveError::decode(
            ty,
            DecodeError::UnsupportedVersion(MetadataVersion::new(9, 0, 0))
        )
    );
}

#[test]
fn test_classifiers_propagate_decode_errors() {
    let future = malformed_program();
    let resolver = MetadataResolver::new(&future.program);

    assert!(resolver.has_metadata(future.ty).unwrap());
    assert_unsupported(resolver.is_singleton_object(future.ty).unwrap_err(), future.ty);
    assert_unsupported(resolver.is_companion_object(future.ty).unwrap_err(), future.ty);
    assert_unsupported(
        resolver.is_restricted_visibility(future.method).unwrap_err(),
        future.ty,
    );
    assert_unsupported(
        resolver
            .has_constructor_with_default_param(future.ty)
            .unwrap_err(),
        future.ty,
    );
    assert_unsupported(resolver.logical_annotations(future.field).unwrap_err(), future.ty);
}

#[test]
fn test_decode_failure_is_cached() {
    let future = malformed_program();
    let resolver = MetadataResolver::new(&future.program);

    for _ in 0..5 {
        let err = resolver.get_or_decode(future.method).unwrap_err();
        assert!(err.decode_error().is_some_and(DecodeError::is_unsupported));
    }
    assert_eq!(resolver.cache_stats().decodes, 1);
}

#[test]
fn test_truncated_blob() {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Broken", None);
    builder.attach_raw_metadata(ty, vec![b'K', b'M', 2, 0]);
    let program = builder.build();
    let resolver = MetadataResolver::new(&program);

    let err = resolver.is_singleton_object(ty).unwrap_err();
    assert!(matches!(
        err.decode_error(),
        Some(DecodeError::UnexpectedEof { .. })
    ));
}

#[test]
fn test_prefetch_surfaces_the_failure() {
    let future = malformed_program();
    let resolver = MetadataResolver::new(&future.program);
    assert!(resolver.prefetch(&[future.ty, future.method]).is_err());
}

#[test]
fn test_declaration_without_enclosing_type() {
    let mut builder = ProgramBuilder::new();
    let package = builder.add_other("com.example", None);
    let program = builder.build();
    let resolver = MetadataResolver::new(&program);

    assert_eq!(
        resolver.has_metadata(package),
        Err(ResolveError::MissingEnclosingType(package))
    );
    assert_eq!(
        resolver.is_restricted_visibility(package),
        Err(ResolveError::MissingEnclosingType(package))
    );
    assert_eq!(
        resolver.is_companion_object(package),
        Err(ResolveError::MissingEnclosingType(package))
    );
    assert!(matches!(
        resolver.get_or_decode(package),
        Err(ResolveError::MissingEnclosingType(_))
    ));
}

#[test]
fn test_marker_without_blob() {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Odd", None);
    builder.annotate(ty, kmeta::Annotation::new("kotlin.Metadata"));
    let program = builder.build();
    let resolver = MetadataResolver::new(&program);

    assert_eq!(
        resolver.is_singleton_object(ty),
        Err(ResolveError::MissingBlob(ty))
    );
}
