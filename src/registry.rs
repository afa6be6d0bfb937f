//! Entity schema registry - static field tables driving the diff engine.
//!
//! The registry replaces runtime reflection with one declarative
//! [`EntitySchema`] row per entity kind: the ordered field list, which
//! fields are identifier-like (namespace-normalized for display), and the
//! identity key used to match list elements across contract versions.
//!
//! The table is fixed at compile time and read-only; nothing registers
//! kinds at runtime.

use serde::Serialize;

use crate::error::DiffError;

/// Every entity kind subject to diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Request,
    TypeDef,
    Param,
    ResponseCode,
    ResponseType,
    Element,
    Annotation,
    AnnotationElement,
    EnumConstant,
    Property,
}

impl EntityKind {
    /// All kinds, in registry order.
    pub const ALL: &'static [EntityKind] = &[
        EntityKind::Request,
        EntityKind::TypeDef,
        EntityKind::Param,
        EntityKind::ResponseCode,
        EntityKind::ResponseType,
        EntityKind::Element,
        EntityKind::Annotation,
        EntityKind::AnnotationElement,
        EntityKind::EnumConstant,
        EntityKind::Property,
    ];
}

/// Whether a field holds a scalar value or a nested list of subentities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar field, rendered to text for comparison. `identifier` marks
    /// fields whose values are namespace-qualified identifiers and should be
    /// displayed with the path stripped.
    Scalar { identifier: bool },
    /// An ordered collection of subentities of the given kind.
    List { element: EntityKind },
}

/// Static metadata for one field of an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// The registered schema of one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub kind: EntityKind,
    /// Field used to match corresponding list elements across versions.
    pub identity_key: Option<&'static str>,
    /// Fields in declaration order; diff output follows this order.
    pub fields: &'static [FieldDescriptor],
}

const fn scalar(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Scalar { identifier: false },
    }
}

const fn ident(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Scalar { identifier: true },
    }
}

const fn list(name: &'static str, element: EntityKind) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::List { element },
    }
}

/// The process-wide schema table. Fields named `name` or `type` carry
/// namespace-qualified values in the contract format and are flagged as
/// identifiers.
static REGISTRY: &[EntitySchema] = &[
    EntitySchema {
        kind: EntityKind::Request,
        identity_key: Some("name"),
        fields: &[
            ident("name"),
            scalar("http_verb"),
            scalar("classification"),
            scalar("bucket_requirement"),
            scalar("object_requirement"),
            scalar("action"),
            scalar("resource"),
            scalar("resource_type"),
            scalar("operation"),
            scalar("include_in_path"),
            list("response_codes", EntityKind::ResponseCode),
            list("optional_query_params", EntityKind::Param),
            list("required_query_params", EntityKind::Param),
        ],
    },
    EntitySchema {
        kind: EntityKind::TypeDef,
        identity_key: Some("name"),
        fields: &[
            ident("name"),
            scalar("name_to_marshal"),
            list("elements", EntityKind::Element),
            list("enum_constants", EntityKind::EnumConstant),
        ],
    },
    EntitySchema {
        kind: EntityKind::Param,
        identity_key: Some("name"),
        fields: &[ident("name"), ident("type"), scalar("nullable")],
    },
    EntitySchema {
        kind: EntityKind::ResponseCode,
        identity_key: Some("code"),
        fields: &[
            scalar("code"),
            list("response_types", EntityKind::ResponseType),
        ],
    },
    EntitySchema {
        kind: EntityKind::ResponseType,
        identity_key: Some("type"),
        fields: &[
            ident("type"),
            scalar("component_type"),
            scalar("original_type_name"),
        ],
    },
    EntitySchema {
        kind: EntityKind::Element,
        identity_key: Some("name"),
        fields: &[
            ident("name"),
            ident("type"),
            scalar("component_type"),
            list("annotations", EntityKind::Annotation),
            scalar("nullable"),
        ],
    },
    EntitySchema {
        kind: EntityKind::Annotation,
        identity_key: Some("name"),
        fields: &[ident("name"), list("elements", EntityKind::AnnotationElement)],
    },
    EntitySchema {
        kind: EntityKind::AnnotationElement,
        identity_key: Some("name"),
        fields: &[ident("name"), scalar("value"), scalar("value_type")],
    },
    EntitySchema {
        kind: EntityKind::EnumConstant,
        identity_key: Some("name"),
        fields: &[ident("name"), list("properties", EntityKind::Property)],
    },
    EntitySchema {
        kind: EntityKind::Property,
        identity_key: Some("name"),
        fields: &[ident("name"), scalar("value"), scalar("value_type")],
    },
];

/// Look up the registered schema for an entity kind.
///
/// # Errors
///
/// Returns [`DiffError::UnknownType`] if the kind has no registry row.
pub fn schema_of(kind: EntityKind) -> Result<&'static EntitySchema, DiffError> {
    REGISTRY
        .iter()
        .find(|s| s.kind == kind)
        .ok_or(DiffError::UnknownType { kind })
}

/// The ordered field list for an entity kind.
///
/// # Errors
///
/// Returns [`DiffError::UnknownType`] if the kind has no registry row.
pub fn fields_of(kind: EntityKind) -> Result<&'static [FieldDescriptor], DiffError> {
    Ok(schema_of(kind)?.fields)
}

/// The configured identity key for an entity kind, or `None` if the kind
/// has no natural discriminator (list diffing then degrades to positional
/// pairing).
///
/// # Errors
///
/// Returns [`DiffError::UnknownType`] if the kind has no registry row.
pub fn identity_key_of(kind: EntityKind) -> Result<Option<&'static str>, DiffError> {
    Ok(schema_of(kind)?.identity_key)
}

/// A value the diff engine can walk: exposes its registered kind and its
/// fields by registry field name.
///
/// Implementations return `None`/empty for field names outside their
/// registry row; the engine only asks for registered names.
pub trait Entity {
    /// The registered kind of this entity.
    fn kind(&self) -> EntityKind;

    /// The named scalar field rendered to its canonical text form, or
    /// `None` if the field has no value. No namespace normalization is
    /// applied here; that is a display concern.
    fn scalar(&self, field: &str) -> Option<String>;

    /// The elements of the named list field, empty if the field is empty
    /// or not a list.
    fn elements(&self, field: &str) -> Vec<&dyn Entity>;
}
