//! Host programs for resolver tests.
//!
//! Each fixture returns the built `ProgramModel` together with the ids of the
//! declarations a test wants to query.

use kmeta::metadata::{
    ClassFlags, ClassKind, ClassMetadata, ConstructorFlags, ConstructorMetadata, DecodedMetadata,
    FunctionFlags, FunctionMetadata, MetadataVersion, PropertyFlags, PropertyMetadata,
    ValueParameter, Visibility,
};
use kmeta::{Annotation, DeclId, ProgramBuilder, ProgramModel};

/// A plain type with members and no metadata anywhere.
pub struct PlainProgram {
    pub program: ProgramModel,
    pub ty: DeclId,
    pub nested: DeclId,
    pub field: DeclId,
    pub method: DeclId,
    pub parameter: DeclId,
}

pub fn plain_program() -> PlainProgram {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Plain", None);
    let nested = builder.add_type("Inner", Some(ty));
    let field = builder.add_field(ty, "value");
    let method = builder.add_method(ty, "getValue", "()I");
    let parameter = builder.add_other("arg0", Some(method));
    let accessor = builder.add_method(ty, "getValue$annotations", "()V");
    builder.annotate(accessor, Annotation::new("javax.inject.Named"));
    PlainProgram {
        program: builder.build(),
        ty,
        nested,
        field,
        method,
        parameter,
    }
}

/// `object Registry { val items: List<String> }`, compiled with a static
/// `INSTANCE` field and a static backing field.
pub struct ObjectProgram {
    pub program: ProgramModel,
    pub ty: DeclId,
    pub instance: DeclId,
    pub items: DeclId,
    pub items_accessor: DeclId,
}

pub fn object_program(
    items_annotations: Vec<Annotation>,
    accessor_annotations: Vec<Annotation>,
) -> ObjectProgram {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Registry", None);
    let instance = builder.add_static_field(ty, "INSTANCE");
    let items = builder.add_static_field(ty, "items");
    let items_accessor = builder.add_method(ty, "getItems$annotations", "()V");
    for annotation in items_annotations {
        builder.annotate(items, annotation);
    }
    for annotation in accessor_annotations {
        builder.annotate(items_accessor, annotation);
    }
    builder.attach_metadata(
        ty,
        &DecodedMetadata::class(
            ClassMetadata::new("com/example/Registry", ClassFlags::new(ClassKind::Object))
                .with_property(
                    PropertyMetadata::new("items", PropertyFlags::default().with_annotations())
                        .with_field("items")
                        .with_getter("getItems()Ljava/util/List;")
                        .with_annotations_accessor("getItems$annotations()V"),
                ),
        ),
    );
    ObjectProgram {
        program: builder.build(),
        ty,
        instance,
        items,
        items_accessor,
    }
}

/// How a property's synthetic annotation accessor is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorSetup {
    /// Metadata does not mention an accessor.
    NotClaimed,
    /// Metadata claims it and the host retained it.
    Retained,
    /// Metadata claims it but the host dropped it.
    Dropped,
}

/// `class Module(val db: Database)` with an instance field `db`.
pub struct PropertyProgram {
    pub program: ProgramModel,
    pub ty: DeclId,
    pub field: DeclId,
    pub getter: DeclId,
    pub accessor: Option<DeclId>,
}

pub fn property_program(
    setup: AccessorSetup,
    field_annotations: Vec<Annotation>,
    accessor_annotations: Vec<Annotation>,
) -> PropertyProgram {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Module", None);
    let field = builder.add_field(ty, "db");
    let getter = builder.add_method(ty, "getDb", "()Lcom/example/Database;");
    let accessor = (setup == AccessorSetup::Retained)
        .then(|| builder.add_method(ty, "getDb$annotations", "()V"));

    for annotation in field_annotations {
        builder.annotate(field, annotation);
    }
    if let Some(accessor) = accessor {
        for annotation in accessor_annotations {
            builder.annotate(accessor, annotation);
        }
    }

    let mut property = PropertyMetadata::new("db", PropertyFlags::default().with_annotations())
        .with_field("db")
        .with_getter("getDb()Lcom/example/Database;");
    if setup != AccessorSetup::NotClaimed {
        property = property.with_annotations_accessor("getDb$annotations()V");
    }
    builder.attach_metadata(
        ty,
        &DecodedMetadata::class(
            ClassMetadata::new("com/example/Module", ClassFlags::new(ClassKind::Class))
                .with_property(property),
        ),
    );

    PropertyProgram {
        program: builder.build(),
        ty,
        field,
        getter,
        accessor,
    }
}

/// `class Config(a: Int, b: Int) { constructor(a: Int, b: Int = 0) }`.
pub struct ConstructorProgram {
    pub program: ProgramModel,
    pub ty: DeclId,
}

pub fn constructor_program(defaulted: bool) -> ConstructorProgram {
    let second_b = if defaulted {
        ValueParameter::defaulted("b")
    } else {
        ValueParameter::required("b")
    };
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Config", None);
    builder.attach_metadata(
        ty,
        &DecodedMetadata::class(
            ClassMetadata::new("com/example/Config", ClassFlags::new(ClassKind::Class))
                .with_constructor(
                    ConstructorMetadata::new(ConstructorFlags::new(Visibility::Public))
                        .with_parameter(ValueParameter::required("a"))
                        .with_parameter(ValueParameter::required("b")),
                )
                .with_constructor(
                    ConstructorMetadata::new(ConstructorFlags::new(Visibility::Public).secondary())
                        .with_parameter(ValueParameter::required("a"))
                        .with_parameter(second_b),
                ),
        ),
    );
    ConstructorProgram {
        program: builder.build(),
        ty,
    }
}

/// A type whose blob has an unsupported major version, with one member.
pub struct MalformedProgram {
    pub program: ProgramModel,
    pub ty: DeclId,
    pub method: DeclId,
    pub field: DeclId,
}

pub fn malformed_program() -> MalformedProgram {
    let mut builder = ProgramBuilder::new();
    let ty = builder.add_type("com.example.Future", None);
    let method = builder.add_method(ty, "run", "()V");
    let field = builder.add_field(ty, "state");
    builder.attach_metadata(
        ty,
        &DecodedMetadata::class(
            ClassMetadata::new("com/example/Future", ClassFlags::new(ClassKind::Object))
                .with_function(
                    FunctionMetadata::new("run", FunctionFlags::new(Visibility::Internal))
                        .with_signature("run()V"),
                ),
        )
        .with_version(MetadataVersion::new(9, 0, 0)),
    );
    MalformedProgram {
        program: builder.build(),
        ty,
        method,
        field,
    }
}

/// `count` independent object types, each with one method.
pub fn many_objects(count: usize) -> (ProgramModel, Vec<DeclId>) {
    let mut builder = ProgramBuilder::new();
    let mut decls = Vec::with_capacity(count * 2);
    for i in 0..count {
        let ty = builder.add_type(format!("com.example.Object{i}"), None);
        let method = builder.add_method(ty, "run", "()V");
        builder.attach_metadata(
            ty,
            &DecodedMetadata::class(ClassMetadata::new(
                format!("com/example/Object{i}"),
                ClassFlags::new(ClassKind::Object),
            )),
        );
        decls.push(ty);
        decls.push(method);
    }
    (builder.build(), decls)
}
