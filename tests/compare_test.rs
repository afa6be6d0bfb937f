//! Integration tests for contract comparison over the public API.

use contract_diff::{
    compare_entity_sets, compare_specs, diff_entity, fields_of, load_spec_str, DiffKind, DiffNode,
    Entity, EntityKind, FieldKind, HttpVerb, Param, Request,
};

fn request(name: &str, verb: HttpVerb) -> Request {
    Request {
        name: name.into(),
        http_verb: Some(verb),
        ..Default::default()
    }
}

fn param(name: &str, type_name: &str) -> Param {
    Param {
        name: name.into(),
        type_name: Some(type_name.into()),
        nullable: false,
    }
}

/// Collect every leaf of a tree in order.
fn leaves(nodes: &[DiffNode]) -> Vec<&DiffNode> {
    let mut out = Vec::new();
    for node in nodes {
        if node.is_section() {
            out.extend(leaves(&node.children));
        } else {
            out.push(node);
        }
    }
    out
}

mod spec_properties {
    use super::*;

    #[test]
    fn reflexivity() {
        let entity = request("com.test.GetRequest", HttpVerb::Get);
        let mut diagnostics = Vec::new();
        let diffs =
            compare_entity_sets(&[entity.clone()], &[entity], "requests", &mut diagnostics)
                .unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].kind, DiffKind::NoChange);
        assert!(diffs[0].tree.is_empty());
    }

    #[test]
    fn symmetry_of_classification() {
        let mut a = request("com.test.R", HttpVerb::Get);
        a.action = Some("SHOW".into());
        a.optional_query_params = vec![param("A", "int"), param("B", "int")];
        let mut b = request("com.test.R", HttpVerb::Head);
        b.resource = Some("BUCKET".into());
        b.optional_query_params = vec![param("B", "long"), param("C", "int")];

        let mut diagnostics = Vec::new();
        let forward = diff_entity(Some(&a), Some(&b), 0, &mut diagnostics).unwrap();
        let backward = diff_entity(Some(&b), Some(&a), 0, &mut diagnostics).unwrap();

        let forward_leaves = leaves(&forward);
        let backward_leaves = leaves(&backward);
        assert_eq!(forward_leaves.len(), backward_leaves.len());

        let mut backward_sorted: Vec<&DiffNode> = backward_leaves.clone();
        for fwd in &forward_leaves {
            let idx = backward_sorted
                .iter()
                .position(|bwd| {
                    bwd.label == fwd.label
                        && bwd.old_value == fwd.new_value
                        && bwd.new_value == fwd.old_value
                })
                .unwrap_or_else(|| panic!("no mirrored leaf for {}", fwd.label));
            let bwd = backward_sorted.remove(idx);
            let expected = match fwd.kind {
                DiffKind::Added => DiffKind::Deleted,
                DiffKind::Deleted => DiffKind::Added,
                other => other,
            };
            assert_eq!(bwd.kind, expected, "leaf {}", fwd.label);
        }
    }

    #[test]
    fn completeness_of_modified_tree() {
        let mut old = request("com.test.R", HttpVerb::Get);
        old.action = Some("SHOW".into());
        old.optional_query_params = vec![param("A", "int")];
        let mut new = request("com.test.R", HttpVerb::Head);
        new.resource = Some("BUCKET".into());

        let mut diagnostics = Vec::new();
        let tree = diff_entity(Some(&old), Some(&new), 0, &mut diagnostics).unwrap();

        for field in fields_of(EntityKind::Request).unwrap() {
            let populated = match field.kind {
                FieldKind::Scalar { .. } => {
                    old.scalar(field.name).is_some() || new.scalar(field.name).is_some()
                }
                // List fields always materialize their container
                FieldKind::List { .. } => true,
            };
            let count = tree.iter().filter(|n| n.label == field.name).count();
            assert_eq!(
                count,
                usize::from(populated),
                "field {} appears {count} times",
                field.name
            );
        }
    }

    #[test]
    fn idempotence() {
        let mut old = request("com.test.R", HttpVerb::Get);
        old.optional_query_params = vec![param("A", "int"), param("B", "int")];
        let mut new = request("com.test.R", HttpVerb::Head);
        new.optional_query_params = vec![param("B", "long")];

        let mut diagnostics = Vec::new();
        let first = diff_entity(Some(&old), Some(&new), 0, &mut diagnostics).unwrap();
        let second = diff_entity(Some(&old), Some(&new), 0, &mut diagnostics).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn union_correctness() {
        let mut old = request("com.test.R", HttpVerb::Get);
        old.optional_query_params = vec![param("A", "int"), param("B", "int")];
        let mut new = request("com.test.R", HttpVerb::Get);
        new.optional_query_params = vec![param("B", "int"), param("C", "int")];

        let mut diagnostics = Vec::new();
        let tree = diff_entity(Some(&old), Some(&new), 0, &mut diagnostics).unwrap();
        let params = tree
            .iter()
            .find(|n| n.label == "optional_query_params")
            .unwrap();

        let mut names: Vec<&str> = params
            .children
            .iter()
            .filter(|n| n.label == "name")
            .map(|n| n.old_value.as_deref().or(n.new_value.as_deref()).unwrap())
            .collect();
        names.sort_unstable();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn depth_invariant() {
        let mut old = request("com.test.R", HttpVerb::Get);
        old.optional_query_params = vec![param("A", "int")];

        let mut diagnostics = Vec::new();
        let tree = diff_entity(Some(&old), None, 3, &mut diagnostics).unwrap();

        // Seeded at depth 3: key at 3, everything else at 4
        assert_eq!(tree.iter().find(|n| n.label == "name").unwrap().depth, 3);
        for node in tree.iter().filter(|n| n.label != "name") {
            assert_eq!(node.depth, 4, "node {}", node.label);
        }
    }
}

mod scenarios {
    use super::*;

    #[test]
    fn modified_verb_yields_one_modified_leaf() {
        let old = load_spec_str(r#"{ "requests": [{ "name": "Get", "http_verb": "GET" }] }"#)
            .unwrap();
        let new = load_spec_str(r#"{ "requests": [{ "name": "Get", "http_verb": "HEAD" }] }"#)
            .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        assert_eq!(diff.request_diffs.len(), 1);
        assert_eq!(diff.request_diffs[0].kind, DiffKind::Modified);

        let modified: Vec<&DiffNode> = leaves(&diff.request_diffs[0].tree)
            .into_iter()
            .filter(|n| n.kind == DiffKind::Modified)
            .collect();
        assert_eq!(modified.len(), 1);
        assert_eq!(modified[0].label, "http_verb");
        assert_eq!(modified[0].old_value.as_deref(), Some("GET"));
        assert_eq!(modified[0].new_value.as_deref(), Some("HEAD"));
    }

    #[test]
    fn new_type_is_added_with_added_leaves() {
        let old = load_spec_str("{}").unwrap();
        let new = load_spec_str(
            r#"{ "types": [{ "name": "Foo", "name_to_marshal": "FooMarshal" }] }"#,
        )
        .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        assert_eq!(diff.type_diffs.len(), 1);
        let added = &diff.type_diffs[0];
        assert_eq!(added.kind, DiffKind::Added);
        assert_eq!(added.key, "Foo");
        assert!(!added.tree.is_empty());
        assert!(leaves(&added.tree)
            .iter()
            .all(|n| n.kind == DiffKind::Added && n.old_value.is_none()));
    }

    #[test]
    fn param_sets_diff_in_union_order() {
        let old = load_spec_str(
            r#"{ "requests": [{ "name": "R", "optional_query_params": [
                { "name": "A" }, { "name": "B" }
            ] }] }"#,
        )
        .unwrap();
        let new = load_spec_str(
            r#"{ "requests": [{ "name": "R", "optional_query_params": [
                { "name": "B" }, { "name": "C" }
            ] }] }"#,
        )
        .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        let params = diff.request_diffs[0]
            .tree
            .iter()
            .find(|n| n.label == "optional_query_params")
            .unwrap();

        let headers: Vec<(&str, DiffKind)> = params
            .children
            .iter()
            .filter(|n| n.label == "name")
            .map(|n| {
                (
                    n.old_value.as_deref().or(n.new_value.as_deref()).unwrap(),
                    n.kind,
                )
            })
            .collect();
        assert_eq!(
            headers,
            vec![
                ("A", DiffKind::Deleted),
                ("B", DiffKind::NoChange),
                ("C", DiffKind::Added),
            ]
        );
    }

    #[test]
    fn qualified_identifiers_display_normalized() {
        let old = load_spec_str(
            r#"{ "types": [{ "name": "com.acme.Widget", "name_to_marshal": "W" }] }"#,
        )
        .unwrap();
        let new = load_spec_str(
            r#"{ "types": [{ "name": "com.acme.Widget", "name_to_marshal": "W2" }] }"#,
        )
        .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        // Matching uses the raw qualified name
        assert_eq!(diff.type_diffs[0].key, "com.acme.Widget");
        // Displayed values are normalized on both sides
        let name = diff.type_diffs[0]
            .tree
            .iter()
            .find(|n| n.label == "name")
            .unwrap();
        assert_eq!(name.old_value.as_deref(), Some("Widget"));
        assert_eq!(name.new_value.as_deref(), Some("Widget"));
        assert_eq!(name.kind, DiffKind::NoChange);
    }

    #[test]
    fn reordered_lists_modify_entity_but_not_elements() {
        let old = load_spec_str(
            r#"{ "requests": [{ "name": "R", "required_query_params": [
                { "name": "A" }, { "name": "B" }
            ] }] }"#,
        )
        .unwrap();
        let new = load_spec_str(
            r#"{ "requests": [{ "name": "R", "required_query_params": [
                { "name": "B" }, { "name": "A" }
            ] }] }"#,
        )
        .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        // Top-level shortcut is order-sensitive structural equality
        assert_eq!(diff.request_diffs[0].kind, DiffKind::Modified);

        // Per-key matching classifies each element unchanged
        let params = diff.request_diffs[0]
            .tree
            .iter()
            .find(|n| n.label == "required_query_params")
            .unwrap();
        assert!(params.children.iter().all(|n| n.kind == DiffKind::NoChange));
    }

    #[test]
    fn nested_type_structure_diffs_recursively() {
        let old = load_spec_str(
            r#"{ "types": [{ "name": "com.test.Bucket", "elements": [
                { "name": "Size", "type": "long", "nullable": false },
                { "name": "Owner", "type": "com.test.User", "nullable": true }
            ] }] }"#,
        )
        .unwrap();
        let new = load_spec_str(
            r#"{ "types": [{ "name": "com.test.Bucket", "elements": [
                { "name": "Size", "type": "long", "nullable": true }
            ] }] }"#,
        )
        .unwrap();

        let diff = compare_specs(&old, &new).unwrap();
        let elements = diff.type_diffs[0]
            .tree
            .iter()
            .find(|n| n.label == "elements")
            .unwrap();

        let nullable = elements
            .children
            .iter()
            .find(|n| n.label == "nullable")
            .unwrap();
        assert_eq!(nullable.kind, DiffKind::Modified);
        assert_eq!(nullable.old_value.as_deref(), Some("false"));
        assert_eq!(nullable.new_value.as_deref(), Some("true"));

        let owner_leaves: Vec<&DiffNode> = leaves(&elements.children)
            .into_iter()
            .filter(|n| {
                n.old_value.as_deref() == Some("Owner") || n.new_value.as_deref() == Some("Owner")
            })
            .collect();
        assert_eq!(owner_leaves.len(), 1);
        assert_eq!(owner_leaves[0].kind, DiffKind::Deleted);
    }
}
