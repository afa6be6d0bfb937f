//! Entity-set comparison and the whole-spec aggregate.
//!
//! Matches top-level named entities (requests, type declarations) across two
//! contract versions, classifies each as added, deleted, modified or
//! unchanged, and delegates the field-level walk to [`diff_entity`] for
//! everything but the unchanged case.

use serde::Serialize;

use crate::differ::{diff_entity, Diagnostic, DiffKind, DiffNode};
use crate::error::DiffError;
use crate::registry::{identity_key_of, Entity};
use crate::types::{ApiSpec, Request, TypeDef};
use crate::value::raw_value;

/// Classification and diff tree for one named entity across two versions.
///
/// `old` is absent for added entities and `new` for deleted ones. `tree` is
/// populated for everything but `NoChange`, where walking an identical pair
/// would only restate the entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDiff<T> {
    pub key: String,
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<T>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tree: Vec<DiffNode>,
}

/// The full result of comparing two contract specifications.
#[derive(Debug, Clone, Serialize)]
pub struct SpecDiff {
    pub request_diffs: Vec<EntityDiff<Request>>,
    pub type_diffs: Vec<EntityDiff<TypeDef>>,
    /// Warning-level diagnostics from both comparison runs.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl SpecDiff {
    /// Returns true if any request or type differs between the versions.
    pub fn has_changes(&self) -> bool {
        self.request_diffs
            .iter()
            .map(|d| d.kind)
            .chain(self.type_diffs.iter().map(|d| d.kind))
            .any(|kind| kind != DiffKind::NoChange)
    }
}

/// Compare two sets of named entities.
///
/// The result covers the union of names from both sides, ordered by first
/// appearance in the old set and then the new (the same union policy nested
/// list matching uses). `set` names the collection in error and diagnostic
/// messages. Warning-level diagnostics from the field walks are appended to
/// `diagnostics` with their paths rooted at the owning entity.
///
/// # Errors
///
/// Returns [`DiffError::DuplicateIdentityKey`] if one side contains two
/// entities with the same name, or any error surfaced by the field walk.
pub fn compare_entity_sets<T>(
    old: &[T],
    new: &[T],
    set: &'static str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Vec<EntityDiff<T>>, DiffError>
where
    T: Entity + Clone + PartialEq,
{
    let old_keyed = keyed_set(old, set)?;
    let new_keyed = keyed_set(new, set)?;

    let mut union: Vec<&str> = Vec::new();
    for (k, _) in old_keyed.iter().chain(new_keyed.iter()) {
        if !union.contains(&k.as_str()) {
            union.push(k.as_str());
        }
    }

    let mut diffs = Vec::with_capacity(union.len());
    for key in union {
        let old_entity = lookup(&old_keyed, key);
        let new_entity = lookup(&new_keyed, key);

        let mut entity_diagnostics = Vec::new();
        let diff = match (old_entity, new_entity) {
            (None, None) => return Err(DiffError::InvalidComparison),
            (None, Some(n)) => EntityDiff {
                key: key.to_string(),
                kind: DiffKind::Added,
                old: None,
                new: Some(n.clone()),
                tree: diff_entity(None, Some(n as &dyn Entity), 0, &mut entity_diagnostics)?,
            },
            (Some(o), None) => EntityDiff {
                key: key.to_string(),
                kind: DiffKind::Deleted,
                old: Some(o.clone()),
                new: None,
                tree: diff_entity(Some(o as &dyn Entity), None, 0, &mut entity_diagnostics)?,
            },
            (Some(o), Some(n)) if o == n => EntityDiff {
                key: key.to_string(),
                kind: DiffKind::NoChange,
                old: Some(o.clone()),
                new: Some(n.clone()),
                tree: Vec::new(),
            },
            (Some(o), Some(n)) => EntityDiff {
                key: key.to_string(),
                kind: DiffKind::Modified,
                old: Some(o.clone()),
                new: Some(n.clone()),
                tree: diff_entity(
                    Some(o as &dyn Entity),
                    Some(n as &dyn Entity),
                    0,
                    &mut entity_diagnostics,
                )?,
            },
        };

        diagnostics.extend(entity_diagnostics.into_iter().map(|mut d| {
            d.path = format!("/{}/{}{}", set, key, d.path);
            d
        }));
        diffs.push(diff);
    }
    Ok(diffs)
}

/// Compare two contract specifications: requests then types.
///
/// # Errors
///
/// Propagates the first [`DiffError`] from either entity-set run.
pub fn compare_specs(old: &ApiSpec, new: &ApiSpec) -> Result<SpecDiff, DiffError> {
    let mut diagnostics = Vec::new();
    let request_diffs =
        compare_entity_sets(&old.requests, &new.requests, "requests", &mut diagnostics)?;
    let type_diffs = compare_entity_sets(&old.types, &new.types, "types", &mut diagnostics)?;
    Ok(SpecDiff {
        request_diffs,
        type_diffs,
        diagnostics,
    })
}

/// Pair every entity with its raw identity value, failing fast on
/// duplicate names within one side.
fn keyed_set<'a, T: Entity>(
    entities: &'a [T],
    set: &'static str,
) -> Result<Vec<(String, &'a T)>, DiffError> {
    let mut keyed: Vec<(String, &'a T)> = Vec::with_capacity(entities.len());
    for entity in entities {
        let key = match identity_key_of(entity.kind())? {
            Some(field) => raw_value(Some(entity), field).unwrap_or_default(),
            None => String::new(),
        };
        if keyed.iter().any(|(k, _)| *k == key) {
            return Err(DiffError::DuplicateIdentityKey {
                field: set.to_string(),
                key,
            });
        }
        keyed.push((key, entity));
    }
    Ok(keyed)
}

fn lookup<'a, T>(keyed: &[(String, &'a T)], key: &str) -> Option<&'a T> {
    keyed.iter().find(|(k, _)| k == key).map(|(_, e)| *e)
}
