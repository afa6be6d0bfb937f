//! Contract Diff
//!
//! Structural comparison of two versions of an API contract specification.
//!
//! A contract is a set of named request definitions and named type
//! declarations with nested scalar and list-valued fields. Comparing two
//! versions classifies every entity as added, deleted, modified or
//! unchanged, and produces an ordered tree of classified diff nodes for
//! everything that changed. Nested collections are matched
//! element-by-element on each entity kind's identity key, so a reordered
//! parameter list diffs cleanly instead of as a delete/re-add cascade.
//!
//! # Example
//!
//! ```
//! use contract_diff::{compare_specs, load_spec_str, DiffKind};
//!
//! let old = load_spec_str(r#"{
//!     "requests": [{ "name": "com.test.GetBucketRequest", "http_verb": "GET" }]
//! }"#).unwrap();
//! let new = load_spec_str(r#"{
//!     "requests": [{ "name": "com.test.GetBucketRequest", "http_verb": "HEAD" }]
//! }"#).unwrap();
//!
//! let diff = compare_specs(&old, &new).unwrap();
//! assert_eq!(diff.request_diffs[0].kind, DiffKind::Modified);
//!
//! let verb = diff.request_diffs[0].tree.iter()
//!     .find(|node| node.label == "http_verb")
//!     .unwrap();
//! assert_eq!(verb.old_value.as_deref(), Some("GET"));
//! assert_eq!(verb.new_value.as_deref(), Some("HEAD"));
//! ```
//!
//! # Output shape
//!
//! Every [`DiffNode`] carries a label, a depth for indentation, the old and
//! new values (absent on the missing side) and, for collection fields, the
//! per-element diffs as children. The identity-key field of an entity stays
//! at its parent's depth so a list element's header lines up with its
//! siblings; every other field sits one level deeper.
//!
//! Renderers ([`render_text`], [`render_html`], or JSON via serde) only walk
//! the tree; what to show is their concern, what changed is decided here.

mod comparator;
mod differ;
mod error;
mod html;
mod loader;
mod registry;
mod simple;
mod types;
mod value;

pub use comparator::{compare_entity_sets, compare_specs, EntityDiff, SpecDiff};
pub use differ::{
    diff_entity, Diagnostic, DiffKind, DiffNode, Severity, MISSING_IDENTITY_KEY,
};
pub use error::{DiffError, LoadError};
pub use html::render_html;
pub use loader::{load_spec, load_spec_str};
pub use registry::{
    fields_of, identity_key_of, schema_of, Entity, EntityKind, EntitySchema, FieldDescriptor,
    FieldKind,
};
pub use simple::{render_text, ReportOptions};
pub use types::{
    Annotation, AnnotationElement, ApiSpec, Classification, Element, EnumConstant, HttpVerb,
    Param, Property, Request, Requirement, ResourceType, ResponseCode, ResponseType, TypeDef,
};
pub use value::{normalize_identifier, string_value};
