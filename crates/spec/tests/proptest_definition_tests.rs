//! Property-based tests for custom definitions and specification parsing.
//!
//! - Import order never affects definition equality
//! - A parsed specification survives a serialize/parse cycle unchanged

use proptest::prelude::*;
use schemagen_spec::{CustomDefinition, Import, Specification};

fn import_strategy() -> impl Strategy<Value = Import> {
    (
        "example\\.com/[a-z]{1,8}",
        proptest::option::of("[a-z]{1,6}"),
    )
        .prop_map(|(path, alias)| match alias {
            Some(alias) => Import::aliased(path, alias),
            None => Import::new(path),
        })
}

proptest! {
    #[test]
    fn test_import_order_does_not_affect_equality(
        expr in "[a-z]{1,10}\\(\\)",
        imports in prop::collection::vec(import_strategy(), 0..6),
    ) {
        let mut reversed = imports.clone();
        reversed.reverse();

        let a = CustomDefinition::new(expr.clone(), imports);
        let b = CustomDefinition::new(expr, reversed);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&b, &a);
    }

    #[test]
    fn test_different_expressions_are_not_equal(
        a in "[a-z]{1,10}",
        b in "[a-z]{1,10}",
        imports in prop::collection::vec(import_strategy(), 0..3),
    ) {
        prop_assume!(a != b);
        let lhs = CustomDefinition::new(a, imports.clone());
        let rhs = CustomDefinition::new(b, imports);
        prop_assert_ne!(lhs, rhs);
    }

    #[test]
    fn test_specification_reparses_unchanged(
        names in prop::collection::btree_set("[a-z][a-z_]{0,10}", 1..5),
        description in proptest::option::of("[A-Za-z ]{0,20}"),
    ) {
        let resources: Vec<_> = names
            .iter()
            .map(|name| serde_json::json!({
                "name": name,
                "schema": {
                    "attributes": [
                        {"name": "enabled", "bool": {"computed_optional_required": "optional"}}
                    ],
                    "description": description,
                }
            }))
            .collect();
        let text = serde_json::json!({ "resources": resources }).to_string();

        let parsed = Specification::from_json(&text).unwrap();
        let reparsed =
            Specification::from_json(&serde_json::to_string(&parsed).unwrap()).unwrap();
        prop_assert_eq!(parsed, reparsed);
    }
}
