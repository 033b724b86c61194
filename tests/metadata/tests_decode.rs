//! Decoder behaviour on encoder output and on foreign blobs.

use kmeta::metadata::{
    ClassFlag, ClassFlags, ClassKind, ClassMetadata, ClassModifiers, ConstructorFlags,
    ConstructorMetadata, DecodedMetadata, FunctionFlags, FunctionMetadata, MetadataKind,
    MetadataVersion, PropertyFlags, PropertyMetadata, ValueParameter, Visibility,
};
use kmeta::{DecodeError, decode, encode};
use rstest::rstest;

fn data_class() -> DecodedMetadata {
    DecodedMetadata::class(
        ClassMetadata::new(
            "com/example/User",
            ClassFlags::new(ClassKind::Class)
                .with_visibility(Visibility::Internal)
                .with_modifiers(ClassModifiers::DATA),
        )
        .with_constructor(
            ConstructorMetadata::new(ConstructorFlags::new(Visibility::Public))
                .with_signature("<init>(Ljava/lang/String;I)V")
                .with_parameter(ValueParameter::required("name"))
                .with_parameter(ValueParameter::defaulted("age")),
        )
        .with_function(
            FunctionMetadata::new("greet", FunctionFlags::new(Visibility::Public))
                .with_signature("greet()Ljava/lang/String;"),
        )
        .with_property(
            PropertyMetadata::new("name", PropertyFlags::default().with_annotations())
                .with_field("name")
                .with_getter("getName()Ljava/lang/String;")
                .with_annotations_accessor("getName$annotations()V"),
        )
        .with_companion_object("Companion"),
    )
}

#[test]
fn test_encoded_class_decodes_to_same_model() {
    let metadata = data_class();
    let decoded = decode(&encode(&metadata)).unwrap();

    assert_eq!(decoded, metadata);
    assert_eq!(decoded.kind(), MetadataKind::Class);
    assert!(decoded.has_constructor_with_default_param());

    let class = decoded.class_metadata().unwrap();
    assert!(class.flags.contains(ClassFlag::IsInternal));
    assert!(class.flags.contains(ClassFlag::IsData));
    assert!(!class.flags.contains(ClassFlag::IsObject));
    assert_eq!(
        decoded
            .property_by_field("name")
            .and_then(|p| p.annotations_accessor.as_deref()),
        Some("getName$annotations()V")
    );
}

#[test]
fn test_encoding_is_deterministic() {
    assert_eq!(encode(&data_class()), encode(&data_class()));
}

#[test]
fn test_unknown_flag_bits_survive() {
    let raw = ClassFlags::new(ClassKind::Object).to_raw() | (1 << 40);
    let flags = ClassFlags::from_raw(raw);
    assert_eq!(flags.kind, ClassKind::Object);
    assert_eq!(flags.unknown_bits, 1 << 40);

    let metadata = DecodedMetadata::class(ClassMetadata::new("Foo", flags));
    let decoded = decode(&encode(&metadata)).unwrap();
    let class = decoded.class_metadata().unwrap();
    assert!(class.flags.contains(ClassFlag::IsObject));
    assert_eq!(class.flags.to_raw(), raw);
}

#[test]
fn test_unrepresentable_kind_does_not_decode_as_object() {
    let flags = ClassFlags::new(ClassKind::Unknown(13)).with_visibility(Visibility::Unknown(8));
    let metadata = DecodedMetadata::class(ClassMetadata::new("Foo", flags));
    let decoded = decode(&encode(&metadata)).unwrap();
    let class = decoded.class_metadata().unwrap();

    assert_eq!(class.flags.kind, ClassKind::Unknown(7));
    assert!(!class.flags.contains(ClassFlag::IsObject));
    assert!(!class.flags.contains(ClassFlag::IsCompanionObject));
    assert!(!class.flags.contains(ClassFlag::IsInternal));
}

#[rstest]
#[case(MetadataVersion::new(1, 4, 0), true)]
#[case(MetadataVersion::new(2, 1, 0), true)]
#[case(MetadataVersion::new(0, 9, 0), false)]
#[case(MetadataVersion::new(3, 0, 0), false)]
fn test_supported_versions(#[case] version: MetadataVersion, #[case] supported: bool) {
    let blob = encode(&data_class().with_version(version));
    match decode(&blob) {
        Ok(decoded) => {
            assert!(supported);
            assert_eq!(decoded.version, version);
        }
        Err(err) => {
            assert!(!supported);
            assert_eq!(err, DecodeError::UnsupportedVersion(version));
            assert!(err.is_unsupported());
        }
    }
}

#[test]
fn test_every_truncation_is_an_error() {
    let blob = encode(&data_class());
    for len in 0..blob.len() {
        assert!(decode(&blob[..len]).is_err(), "prefix of {len} bytes decoded");
    }
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = decode(b"XY\x02\x00\x00\x01\x00").unwrap_err();
    assert!(matches!(err, DecodeError::BadMagic { .. }));

    let err = decode(b"KM\x02\x00\x00\x07\x00").unwrap_err();
    assert_eq!(err, DecodeError::UnknownKind(7));
    assert!(err.to_string().contains('7'));
}
