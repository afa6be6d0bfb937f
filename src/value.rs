//! Scalar value extraction and identifier normalization.

use crate::registry::{Entity, FieldDescriptor, FieldKind};

/// Strip the namespace path from a qualified identifier.
///
/// Returns the substring after the final `.`, or the input unchanged when it
/// carries no separator.
pub fn normalize_identifier(value: &str) -> &str {
    match value.rfind('.') {
        Some(idx) => &value[idx + 1..],
        None => value,
    }
}

/// Read a scalar field's canonical text value from a possibly-absent entity.
///
/// Identifier-flagged fields are normalized for display; all other fields
/// pass through unchanged. Returns `None` when the entity is absent, the
/// field has no value, or the descriptor is not a scalar.
pub fn string_value(entity: Option<&dyn Entity>, field: &FieldDescriptor) -> Option<String> {
    let FieldKind::Scalar { identifier } = field.kind else {
        return None;
    };
    let raw = entity?.scalar(field.name)?;
    if identifier {
        Some(normalize_identifier(&raw).to_string())
    } else {
        Some(raw)
    }
}

/// Read a scalar field's value without display normalization.
///
/// List matching keys off raw values so that two differently-qualified
/// identifiers never collide after normalization.
pub fn raw_value(entity: Option<&dyn Entity>, field_name: &str) -> Option<String> {
    entity?.scalar(field_name)
}
