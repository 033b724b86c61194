//! Annotation reconciliation for property-backing fields.

use kmeta::{
    AccessorLookup, Annotation, AnnotationValue, ClassName, MetadataResolver, ResolverConfig,
};
use rstest::rstest;

use crate::helpers::annotation_fixtures::*;
use crate::helpers::program_fixtures::*;

// =============================================================================
// DEDUPLICATION
// =============================================================================

#[test]
fn test_identical_annotations_appear_once() {
    let module = property_program(
        AccessorSetup::Retained,
        vec![named("primary")],
        vec![named("primary")],
    );
    let resolver = MetadataResolver::new(&module.program);

    let annotations = resolver.logical_annotations(module.field).unwrap();
    assert_eq!(annotations, vec![named("primary")]);
}

#[test]
fn test_differing_values_are_not_equivalent() {
    let module = property_program(
        AccessorSetup::Retained,
        vec![named("primary")],
        vec![named("replica")],
    );
    let resolver = MetadataResolver::new(&module.program);

    let annotations = resolver.logical_annotations(module.field).unwrap();
    assert_eq!(annotations, vec![named("primary"), named("replica")]);
    assert_eq!(type_names(&annotations), vec![NAMED, NAMED]);
}

#[test]
fn test_accessor_only_annotations_are_folded_onto_field() {
    let module = property_program(
        AccessorSetup::Retained,
        vec![],
        vec![marker("javax.inject.Inject"), named("primary")],
    );
    let resolver = MetadataResolver::new(&module.program);

    let annotations = resolver.logical_annotations(module.field).unwrap();
    assert_eq!(
        type_names(&annotations),
        vec!["javax.inject.Inject", NAMED]
    );
}

#[test]
fn test_reconciliation_is_idempotent() {
    let module = property_program(
        AccessorSetup::Retained,
        vec![named("a"), marker("javax.inject.Inject")],
        vec![marker("javax.inject.Inject"), named("b")],
    );
    let resolver = MetadataResolver::new(&module.program);

    let first = resolver.logical_annotations(module.field).unwrap();
    let second = resolver.logical_annotations(module.field).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_getter_and_type_keep_own_annotations() {
    let module = property_program(AccessorSetup::Retained, vec![], vec![named("x")]);
    let resolver = MetadataResolver::new(&module.program);

    assert!(resolver.logical_annotations(module.getter).unwrap().is_empty());
    let own = resolver.logical_annotations(module.ty).unwrap();
    assert_eq!(type_names(&own), vec!["kotlin.Metadata"]);
}

// =============================================================================
// STATIC EXCLUSION
// =============================================================================

#[test]
fn test_static_backing_field_never_merges() {
    let object = object_program(vec![named("x")], vec![named("y")]);
    let resolver = MetadataResolver::new(&object.program);

    assert_eq!(
        resolver.logical_annotations(object.items).unwrap(),
        vec![named("x")]
    );
    assert_eq!(
        resolver.logical_annotations(object.items_accessor).unwrap(),
        vec![named("y")]
    );
}

// =============================================================================
// SYNTHETIC ACCESSOR STATES
// =============================================================================

#[rstest]
#[case(AccessorSetup::NotClaimed, false)]
#[case(AccessorSetup::Retained, false)]
#[case(AccessorSetup::Dropped, true)]
fn test_missing_accessor_truth_table(#[case] setup: AccessorSetup, #[case] missing: bool) {
    let module = property_program(setup, vec![named("a")], vec![named("b")]);
    let resolver = MetadataResolver::new(&module.program);

    assert_eq!(
        resolver
            .is_missing_synthetic_accessor_for_annotations(module.field)
            .unwrap(),
        missing
    );

    let expected = match (setup, module.accessor) {
        (AccessorSetup::Retained, Some(accessor)) => AccessorLookup::Present(accessor),
        (AccessorSetup::Dropped, None) => AccessorLookup::Missing,
        _ => AccessorLookup::NotClaimed,
    };
    assert_eq!(resolver.synthetic_accessor(module.field).unwrap(), expected);
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_dropped_accessor_degrades_to_field_annotations(#[case] warn: bool) {
    let module = property_program(AccessorSetup::Dropped, vec![named("a")], vec![]);
    let resolver = MetadataResolver::with_config(
        &module.program,
        ResolverConfig::default().with_warn_on_missing_accessor(warn),
    );

    assert_eq!(
        resolver.logical_annotations(module.field).unwrap(),
        vec![named("a")]
    );
}

// =============================================================================
// META-ANNOTATION FILTERING
// =============================================================================

#[test]
fn test_annotations_matching_sees_accessor_annotations() {
    let mut builder = kmeta::ProgramBuilder::new();
    let ty = builder.add_type("com.example.Module", None);
    let field = builder.add_field(ty, "db");
    let accessor = builder.add_method(ty, "getDb$annotations", "()V");
    builder
        .annotate(field, marker("javax.inject.Inject"))
        .annotate(accessor, named("primary"))
        .declare_annotation_type(NAMED, vec![marker(QUALIFIER)])
        .attach_metadata(
            ty,
            &kmeta::DecodedMetadata::class(
                kmeta::metadata::ClassMetadata::new(
                    "com/example/Module",
                    kmeta::metadata::ClassFlags::new(kmeta::metadata::ClassKind::Class),
                )
                .with_property(
                    kmeta::metadata::PropertyMetadata::new(
                        "db",
                        kmeta::metadata::PropertyFlags::default().with_annotations(),
                    )
                    .with_field("db")
                    .with_annotations_accessor("getDb$annotations()V"),
                ),
            ),
        );
    let program = builder.build();
    let resolver = MetadataResolver::new(&program);

    assert_eq!(
        resolver
            .annotations_matching(field, &ClassName::new(QUALIFIER))
            .unwrap(),
        vec![named("primary")]
    );
}

#[test]
fn test_annotations_matching_compares_qualified_names() {
    let mut builder = kmeta::ProgramBuilder::new();
    let ty = builder.add_type("com.example.Module", None);
    let method = builder.add_method(ty, "provide", "()V");
    builder
        .annotate(method, named("primary"))
        .declare_annotation_type(NAMED, vec![marker("com.example.Qualifier")]);
    let program = builder.build();
    let resolver = MetadataResolver::new(&program);

    assert!(
        resolver
            .annotations_matching(method, &ClassName::new(QUALIFIER))
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        resolver
            .annotations_matching(method, &ClassName::new("com.example.Qualifier"))
            .unwrap(),
        vec![named("primary")]
    );
}

#[test]
fn test_nested_annotation_values_survive_reconciliation() {
    let installed = Annotation::new("dagger.hilt.InstallIn").with_value(
        "scope",
        AnnotationValue::Annotation(Box::new(marker("javax.inject.Singleton"))),
    );
    let module = property_program(AccessorSetup::Retained, vec![], vec![installed.clone()]);
    let resolver = MetadataResolver::new(&module.program);

    let annotations = resolver.logical_annotations(module.field).unwrap();
    assert_eq!(annotations, vec![installed]);
    let nested = annotations[0]
        .value("scope")
        .and_then(AnnotationValue::annotation_type);
    assert_eq!(nested.map(ClassName::simple_name), Some("Singleton"));
}
