//! Property-based tests for the generator tree.
//!
//! These tests verify the behavioral contracts of tree construction:
//! - Equality: reflexive and symmetric over arbitrary trees
//! - Order invariance: declaration order of children never changes output
//! - Deduplication: the import block never lists a path twice

use proptest::prelude::*;
use schemagen_codegen::GeneratorNode;
use schemagen_spec::Attribute;
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

// =============================================================================
// Strategies for generating test data
// =============================================================================

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}".prop_map(String::from)
}

fn cor_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("computed"),
        Just("computed_optional"),
        Just("optional"),
        Just("required"),
    ]
}

fn import_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("example.com/validate".to_string()),
        Just("example.com/stringvalidator".to_string()),
        "example\\.com/[a-z]{1,6}".prop_map(String::from),
    ]
}

/// Scalar attribute body keyed by its kind
fn scalar_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just("bool"),
            Just("float64"),
            Just("int64"),
            Just("number"),
            Just("string"),
        ],
        cor_strategy(),
        proptest::option::of("[A-Za-z ]{1,20}"),
        any::<bool>(),
        prop::collection::vec(import_path_strategy(), 0..4),
    )
        .prop_map(|(kind, cor, description, sensitive, validator_imports)| {
            let validators: Vec<Value> = validator_imports
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    json!({"custom": {"imports": [{"path": path}], "schema_definition": format!("v{i}()")}})
                })
                .collect();
            let mut body = json!({
                "computed_optional_required": cor,
                "sensitive": sensitive,
                "validators": validators,
            });
            if let Some(description) = description {
                body["description"] = json!(description);
            }
            let mut attribute = Map::new();
            attribute.insert(kind.to_string(), body);
            Value::Object(attribute)
        })
}

/// Single nested attribute with uniquely named scalar children
fn nested_strategy() -> impl Strategy<Value = (String, Vec<(String, Value)>)> {
    (
        name_strategy(),
        prop::collection::btree_map(name_strategy(), scalar_strategy(), 0..6),
    )
        .prop_map(|(name, children)| (name, children.into_iter().collect()))
}

fn build(name: &str, children: &[(String, Value)]) -> GeneratorNode {
    let attributes: Vec<Value> = children
        .iter()
        .map(|(child, body)| {
            let mut attribute = body.clone();
            attribute["name"] = json!(child);
            attribute
        })
        .collect();
    let attribute: Attribute = serde_json::from_value(json!({
        "name": name,
        "single_nested": {
            "computed_optional_required": "optional",
            "attributes": attributes,
        }
    }))
    .unwrap();
    GeneratorNode::from_attribute(&attribute).unwrap()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn test_equal_is_reflexive((name, children) in nested_strategy()) {
        let node = build(&name, &children);
        prop_assert!(node.equal(&node));
        prop_assert!(node.equal(&build(&name, &children)));
    }

    #[test]
    fn test_equal_is_symmetric(
        (name_a, children_a) in nested_strategy(),
        (name_b, children_b) in nested_strategy(),
    ) {
        let a = build(&name_a, &children_a);
        let b = build(&name_b, &children_b);
        prop_assert_eq!(a.equal(&b), b.equal(&a));
    }

    #[test]
    fn test_child_order_does_not_change_output((name, children) in nested_strategy()) {
        let mut reversed = children.clone();
        reversed.reverse();

        let a = build(&name, &children);
        let b = build(&name, &reversed);
        prop_assert!(a.equal(&b));
        prop_assert_eq!(a.schema(&name), b.schema(&name));
        prop_assert_eq!(a.imports(), b.imports());
        prop_assert_eq!(
            a.custom_type_and_value(&name).unwrap(),
            b.custom_type_and_value(&name).unwrap()
        );
    }

    #[test]
    fn test_imports_have_no_duplicate_paths((name, children) in nested_strategy()) {
        let imports = build(&name, &children).imports();
        let go = imports.to_go();
        let lines: Vec<_> = go.lines().filter(|l| l.starts_with('\t')).collect();
        let unique: BTreeSet<_> = lines.iter().collect();
        prop_assert_eq!(lines.len(), unique.len());
        prop_assert_eq!(lines.len(), imports.len());
    }
}
