//! The recursive field diff algorithm.
//!
//! Walks two instances of a schema-registered entity kind field by field and
//! emits an ordered tree of classified [`DiffNode`]s. Nested collections are
//! matched element-by-element on the element kind's identity key; when no key
//! is registered the walk degrades to positional pairing and reports a
//! warning-level [`Diagnostic`] instead of failing.
//!
//! Output order is deterministic: registry declaration order for fields, and
//! first-seen-in-old-then-new order for matched list elements.

use serde::Serialize;

use crate::error::DiffError;
use crate::registry::{identity_key_of, schema_of, Entity, FieldKind};
use crate::value::{raw_value, string_value};

/// Classification of one diff node or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    Added,
    Deleted,
    Modified,
    NoChange,
}

/// One classified unit in the diff tree.
///
/// Leaves carry the old/new scalar values; containers carry the per-element
/// diffs as children and are themselves `NoChange` with no values. A node
/// with both values absent is never materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffNode {
    pub label: &'static str,
    pub depth: usize,
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffNode>,
}

impl DiffNode {
    /// Returns true for collection containers (as opposed to scalar leaves).
    pub fn is_section(&self) -> bool {
        self.old_value.is_none() && self.new_value.is_none()
    }
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A structured diagnostic raised during a comparison run.
///
/// Diagnostics report degraded-but-complete results (currently only the
/// positional-pairing fallback); hard failures surface as [`DiffError`].
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: &'static str,
    /// Slash-separated path to the affected collection, rooted at the
    /// compared entity (e.g. "/elements/BlobStoreEntry/annotations").
    pub path: String,
    pub message: String,
}

/// Missing identity key: list elements paired by position.
pub const MISSING_IDENTITY_KEY: &str = "W001";

/// Diff two versions of one entity into an ordered list of classified nodes.
///
/// Either side may be absent (an added or deleted entity); the present side
/// determines the entity kind. `depth` seeds the indentation level of the
/// emitted nodes: the identity-key field is emitted at `depth` and every
/// other field one level deeper, so a list element's header lines up with
/// its siblings.
///
/// Warning-level conditions are appended to `diagnostics`.
///
/// # Errors
///
/// Returns [`DiffError::InvalidComparison`] if both sides are absent,
/// [`DiffError::UnknownType`] on registry drift, and
/// [`DiffError::DuplicateIdentityKey`] when one side of a collection has two
/// elements with the same key value.
pub fn diff_entity(
    old: Option<&dyn Entity>,
    new: Option<&dyn Entity>,
    depth: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<DiffNode>, DiffError> {
    diff_fields(old, new, depth, "", diagnostics)
}

fn diff_fields(
    old: Option<&dyn Entity>,
    new: Option<&dyn Entity>,
    depth: usize,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<DiffNode>, DiffError> {
    let present = old.or(new).ok_or(DiffError::InvalidComparison)?;
    let schema = schema_of(present.kind())?;
    let key = schema.identity_key;

    // Once the identity key has been emitted at `depth`, every other field
    // sits one level deeper.
    let base_depth = depth + usize::from(key.is_some());

    let mut nodes = Vec::new();
    for field in schema.fields {
        match field.kind {
            FieldKind::Scalar { .. } => {
                let old_value = string_value(old, field);
                let new_value = string_value(new, field);
                if old_value.is_none() && new_value.is_none() {
                    continue;
                }
                let kind = match (&old_value, &new_value) {
                    (Some(o), Some(n)) if o == n => DiffKind::NoChange,
                    (Some(_), Some(_)) => DiffKind::Modified,
                    (None, _) => DiffKind::Added,
                    (_, None) => DiffKind::Deleted,
                };
                let field_depth = if Some(field.name) == key {
                    depth
                } else {
                    base_depth
                };
                nodes.push(DiffNode {
                    label: field.name,
                    depth: field_depth,
                    kind,
                    old_value,
                    new_value,
                    children: Vec::new(),
                });
            }
            FieldKind::List { element } => {
                let old_list = old.map(|e| e.elements(field.name)).unwrap_or_default();
                let new_list = new.map(|e| e.elements(field.name)).unwrap_or_default();
                let list_path = format!("{}/{}", path, field.name);

                let children = if old_list.is_empty() && new_list.is_empty() {
                    Vec::new()
                } else {
                    diff_elements(
                        &old_list,
                        &new_list,
                        identity_key_of(element)?,
                        field.name,
                        base_depth + 1,
                        &list_path,
                        diagnostics,
                    )?
                };

                nodes.push(DiffNode {
                    label: field.name,
                    depth: base_depth,
                    kind: DiffKind::NoChange,
                    old_value: None,
                    new_value: None,
                    children,
                });
            }
        }
    }
    Ok(nodes)
}

/// Match two element lists and diff each matched pair.
///
/// With an identity key, elements are paired by raw key value in
/// first-seen-in-old-then-new order; without one, pairing falls back to
/// list position and a [`MISSING_IDENTITY_KEY`] warning is recorded.
fn diff_elements(
    old_list: &[&dyn Entity],
    new_list: &[&dyn Entity],
    key: Option<&'static str>,
    field: &'static str,
    depth: usize,
    path: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<DiffNode>, DiffError> {
    let Some(key) = key else {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            code: MISSING_IDENTITY_KEY,
            path: path.to_string(),
            message: format!(
                "no identity key registered for elements of {field}; pairing by position"
            ),
        });
        let mut children = Vec::new();
        for i in 0..old_list.len().max(new_list.len()) {
            let child_path = format!("{}/{}", path, i);
            children.extend(diff_fields(
                old_list.get(i).copied(),
                new_list.get(i).copied(),
                depth,
                &child_path,
                diagnostics,
            )?);
        }
        return Ok(children);
    };

    let old_keyed = keyed_elements(old_list, key, field)?;
    let new_keyed = keyed_elements(new_list, key, field)?;

    let mut union: Vec<&str> = Vec::new();
    for (k, _) in old_keyed.iter().chain(new_keyed.iter()) {
        if !union.contains(&k.as_str()) {
            union.push(k.as_str());
        }
    }

    let mut children = Vec::new();
    for k in union {
        let old_elem = lookup(&old_keyed, k);
        let new_elem = lookup(&new_keyed, k);
        let child_path = format!("{}/{}", path, k);
        children.extend(diff_fields(
            old_elem,
            new_elem,
            depth,
            &child_path,
            diagnostics,
        )?);
    }
    Ok(children)
}

/// Pair each element with its raw identity-key value, failing fast on
/// duplicates within the one list.
fn keyed_elements<'a>(
    list: &[&'a dyn Entity],
    key: &str,
    field: &str,
) -> Result<Vec<(String, &'a dyn Entity)>, DiffError> {
    let mut keyed: Vec<(String, &'a dyn Entity)> = Vec::with_capacity(list.len());
    for &elem in list {
        let value = raw_value(Some(elem), key).unwrap_or_default();
        if keyed.iter().any(|(k, _)| *k == value) {
            return Err(DiffError::DuplicateIdentityKey {
                field: field.to_string(),
                key: value,
            });
        }
        keyed.push((value, elem));
    }
    Ok(keyed)
}

fn lookup<'a>(keyed: &[(String, &'a dyn Entity)], key: &str) -> Option<&'a dyn Entity> {
    keyed.iter().find(|(k, _)| k == key).map(|(_, e)| *e)
}
