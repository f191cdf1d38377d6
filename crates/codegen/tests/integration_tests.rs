use schemagen_codegen::imports::{ATTR_IMPORT, TYPES_IMPORT, VALIDATOR_IMPORT};
use schemagen_codegen::{
    GenerateOptions, GeneratorNode, Imports, ResourceGenerator, generate_all,
};
use schemagen_spec::{Attribute, AttributeKind, Block, Import, Specification};
use std::collections::BTreeSet;

fn attribute(json: &str) -> GeneratorNode {
    GeneratorNode::from_attribute(&serde_json::from_str::<Attribute>(json).unwrap()).unwrap()
}

fn block(json: &str) -> GeneratorNode {
    GeneratorNode::from_block(&serde_json::from_str::<Block>(json).unwrap()).unwrap()
}

#[test]
fn test_bool_attribute_end_to_end() {
    let node = attribute(r#"{"name":"enabled","bool":{"computed_optional_required":"required"}}"#);

    assert_eq!(
        node.model_field("enabled").render(),
        "Enabled types.Bool `tfsdk:\"enabled\"`"
    );
    assert_eq!(
        node.imports().iter().cloned().collect::<Vec<_>>(),
        vec![Import::new(TYPES_IMPORT)]
    );
    assert_eq!(node.custom_type_and_value("enabled").unwrap(), "");
    assert_eq!(node.to_from_functions("enabled").unwrap(), "");
}

#[test]
fn test_set_nested_block_custom_type() {
    let node = block(
        r#"{"name":"rule","set_nested":{"nested_object":{"attributes":[
            {"name":"id","string":{"computed_optional_required":"required"}},
            {"name":"tags","set":{"computed_optional_required":"optional","element_type":{"string":{}}}}
        ]}}}"#,
    );

    let out = node.custom_type_and_value("rule").unwrap();
    assert!(out.contains("type RuleType struct"));
    assert!(out.contains("type RuleValue struct"));
    assert!(out.contains("Id basetypes.StringValue `tfsdk:\"id\"`"));
    assert!(out.contains("Tags basetypes.SetValue `tfsdk:\"tags\"`"));
    assert_eq!(node.to_from_functions("rule").unwrap(), "");

    let imports = node.imports();
    assert!(imports.contains_path(ATTR_IMPORT));
    assert!(imports.contains_path(TYPES_IMPORT));
}

#[test]
fn test_bound_list_nested_block_is_unimplemented() {
    let node = block(
        r#"{"name":"rules","list_nested":{"nested_object":{
            "associated_external_type":{"type":"*apisdk.Rule"},
            "attributes":[{"name":"id","string":{"computed_optional_required":"required"}}]
        }}}"#,
    );
    assert!(node.to_from_functions("rules").unwrap_err().is_unimplemented());
}

#[test]
fn test_validator_imports_deduplicated() {
    let node = attribute(
        r#"{"name":"name","string":{"computed_optional_required":"required","validators":[
            {"custom":{"imports":[{"path":"example.com/validate"}],"schema_definition":"validate.A()"}},
            {"custom":{"imports":[{"path":"example.com/validate"}],"schema_definition":"validate.B()"}}
        ]}}"#,
    );
    let imports: Imports = node.imports();
    assert_eq!(imports.len(), 3);
    assert!(imports.contains_path("example.com/validate"));
    assert!(imports.contains_path(VALIDATOR_IMPORT));
    assert!(imports.contains_path(TYPES_IMPORT));
    assert_eq!(
        imports.to_go().matches("\"example.com/validate\"").count(),
        1
    );
}

#[test]
fn test_external_type_adapters_in_file() {
    let spec = Specification::from_json(
        r#"{"resources":[{"name":"widget","schema":{"attributes":[
            {"name":"config","single_nested":{"computed_optional_required":"optional",
                "associated_external_type":{"import":{"path":"example.com/apisdk"},"type":"*apisdk.Config"},
                "attributes":[
                    {"name":"name","string":{"computed_optional_required":"required"}},
                    {"name":"port","int64":{"computed_optional_required":"optional"}}
                ]}}
        ]}}]}"#,
    )
    .unwrap();

    let generator = ResourceGenerator::new(&spec.resources[0]).unwrap();
    let file = generator.generate(&GenerateOptions::default()).unwrap();

    assert!(file.imports.contains_path("example.com/apisdk"));
    assert!(file.to_from_functions.contains("func (v ConfigValue) ToApisdkConfig("));
    assert!(file.to_from_functions.contains("Port: v.Port.ValueInt64Pointer(),"));
    assert!(file.content.contains("type ConfigValue struct"));
    assert!(file.content.contains("func (v ConfigValue) FromApisdkConfig("));
}

#[test]
fn test_build_is_deterministic() {
    let json = r#"{"resources":[{"name":"firewall","schema":{
        "attributes":[
            {"name":"zone","string":{"computed_optional_required":"required"}},
            {"name":"labels","map":{"computed_optional_required":"optional","element_type":{"string":{}}}}
        ],
        "blocks":[
            {"name":"rule","list_nested":{"nested_object":{
                "attributes":[
                    {"name":"port","int64":{"computed_optional_required":"optional","default":{"static":443}}},
                    {"name":"action","string":{"computed_optional_required":"required"}}
                ],
                "blocks":[{"name":"match","single_nested":{"attributes":[
                    {"name":"cidr","string":{"computed_optional_required":"optional"}}
                ]}}]
            }}}
        ]
    }}]}"#;

    let first = Specification::from_json(json).unwrap();
    let second = Specification::from_json(json).unwrap();
    let a = ResourceGenerator::new(&first.resources[0]).unwrap();
    let b = ResourceGenerator::new(&second.resources[0]).unwrap();
    assert!(a.equal(&b));

    let options = GenerateOptions::default();
    let file_a = a.generate(&options).unwrap();
    let file_b = b.generate(&options).unwrap();
    assert_eq!(file_a.content, file_b.content);
    assert_eq!(file_a.imports, file_b.imports);

    let schema = &file_a.schema;
    assert!(schema.find("\"labels\"").unwrap() < schema.find("\"zone\"").unwrap());
    assert!(schema.find("\"action\"").unwrap() < schema.find("\"port\"").unwrap());
}

#[test]
fn test_different_trees_are_not_equal() {
    let a = block(r#"{"name":"rule","single_nested":{"attributes":[{"name":"id","string":{"computed_optional_required":"required"}}]}}"#);
    let b = block(r#"{"name":"rule","single_nested":{"attributes":[{"name":"id","string":{"computed_optional_required":"optional"}}]}}"#);
    assert!(a.equal(&a));
    assert!(!a.equal(&b));
    assert!(!b.equal(&a));
}

#[test]
fn test_generate_all() {
    let spec = Specification::from_json(
        r#"{"version":"0.1","resources":[
            {"name":"alpha","schema":{"attributes":[{"name":"id","string":{"computed_optional_required":"computed"}}]}},
            {"name":"beta","schema":{"blocks":[{"name":"timeouts","single_nested":{}}]}}
        ]}"#,
    )
    .unwrap();

    let files = generate_all(&spec, &GenerateOptions::default()).unwrap();
    let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["alpha_resource_gen.go", "beta_resource_gen.go"]);
    assert!(files[0].custom_types.is_empty());
    assert!(files[1].custom_types.contains("type TimeoutsType struct"));
}

#[test]
fn test_construction_error_propagates() {
    let spec = Specification::from_json(
        r#"{"resources":[{"name":"alpha","schema":{"attributes":[
            {"name":"tags","list":{"computed_optional_required":"optional"}}
        ]}}]}"#,
    )
    .unwrap();
    let err = generate_all(&spec, &GenerateOptions::default()).unwrap_err();
    assert!(!err.is_unimplemented());
    assert!(err.to_string().contains("tags"));
}

// =============================================================================
// Whole-file consistency
// =============================================================================

// Generated object types referenced from schema fragments and field types,
// e.g. `CustomType: InnerType{` and `InnerValue{}.AttributeTypes(ctx)`.
// Qualified names such as `c.ConfigType{}` come from overrides and are skipped.
fn generated_references(content: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for (at, marker) in content.match_indices("CustomType: ") {
        let rest = &content[at + marker.len()..];
        if let Some(end) = rest.find("Type{") {
            let name = &rest[..end];
            if name.chars().all(|c| c.is_ascii_alphanumeric()) {
                names.insert(name.to_string());
            }
        }
    }
    for (at, _) in content.match_indices("Value{}.") {
        let head = &content[..at];
        let start = head
            .rfind(|c: char| !c.is_ascii_alphanumeric())
            .map_or(0, |p| p + 1);
        if !head[..start].ends_with('.') && start < head.len() {
            names.insert(head[start..].to_string());
        }
    }
    names
}

fn assert_consistent(file: &schemagen_codegen::GeneratedResource) {
    let references = generated_references(&file.content);
    for name in &references {
        assert!(
            file.content.contains(&format!("type {name}Type struct")),
            "{name}Type is referenced but not defined in {}",
            file.file_name
        );
        assert!(
            file.content.contains(&format!("type {name}Value struct")),
            "{name}Value is referenced but not defined in {}",
            file.file_name
        );
    }
    assert_eq!(
        !references.is_empty(),
        file.imports.contains_path(ATTR_IMPORT),
        "attr import does not match generated types in {}",
        file.file_name
    );
}

#[test]
fn test_overrides_and_generated_objects_stay_consistent() {
    let spec = Specification::from_json(
        r#"{"resources":[
            {"name":"mixed","schema":{
                "attributes":[
                    {"name":"config","single_nested":{"computed_optional_required":"optional",
                        "custom_type":{"import":{"path":"example.com/c"},"type":"c.ConfigType{}","value_type":"c.Config"},
                        "attributes":[
                            {"name":"inner","single_nested":{"computed_optional_required":"optional",
                                "attributes":[
                                    {"name":"pools","set_nested":{"computed_optional_required":"optional",
                                        "nested_object":{
                                            "custom_type":{"import":{"path":"example.com/p"},"type":"p.PoolType{}","value_type":"p.Pool"},
                                            "attributes":[
                                                {"name":"deep","single_nested":{"computed_optional_required":"optional",
                                                    "attributes":[{"name":"id","string":{"computed_optional_required":"required"}}]}}
                                            ]}}}
                                ]}}
                        ]}}
                ],
                "blocks":[
                    {"name":"rule","list_nested":{"nested_object":{
                        "attributes":[{"name":"action","string":{"computed_optional_required":"required"}}],
                        "blocks":[
                            {"name":"match","single_nested":{
                                "custom_type":{"import":{"path":"example.com/m"},"type":"m.MatchType{}","value_type":"m.Match"},
                                "attributes":[
                                    {"name":"criteria","single_nested":{"computed_optional_required":"optional",
                                        "attributes":[{"name":"cidr","string":{"computed_optional_required":"optional"}}]}}
                                ]}}
                        ]
                    }}}
                ]
            }},
            {"name":"plain","schema":{"attributes":[
                {"name":"config","single_nested":{"computed_optional_required":"optional",
                    "custom_type":{"import":{"path":"example.com/c"},"type":"c.ConfigType{}","value_type":"c.Config"},
                    "attributes":[{"name":"id","string":{"computed_optional_required":"required"}}]}}
            ]}}
        ]}"#,
    )
    .unwrap();

    let files = generate_all(&spec, &GenerateOptions::default()).unwrap();
    for file in &files {
        assert_consistent(file);
    }

    let mixed = &files[0];
    let references = generated_references(&mixed.content);
    let expected: BTreeSet<String> = ["Criteria", "Deep", "Inner", "Rule"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(references, expected);
    for path in ["example.com/c", "example.com/p", "example.com/m"] {
        assert!(mixed.imports.contains_path(path));
    }
    assert!(!mixed.content.contains("type ConfigType struct"));
    assert!(!mixed.content.contains("type PoolsType struct"));
    assert!(!mixed.content.contains("type MatchType struct"));

    let plain = &files[1];
    assert!(generated_references(&plain.content).is_empty());
    assert!(!plain.imports.contains_path(ATTR_IMPORT));
}

// =============================================================================
// Deep trees
// =============================================================================

const DEPTH: usize = 10_000;

fn level(json: &str) -> Attribute {
    serde_json::from_str(json).unwrap()
}

// `DEPTH` single nested levels named `level` around `innermost`, which holds
// one string leaf.
fn deep_chain(level_json: &str, innermost_json: &str) -> Attribute {
    let mut chain = level(innermost_json);
    if let AttributeKind::SingleNested(single) = &mut chain.kind {
        single.attributes.push(level(
            r#"{"name":"leaf","string":{"computed_optional_required":"optional"}}"#,
        ));
    }
    for _ in 0..DEPTH {
        let mut parent = level(level_json);
        if let AttributeKind::SingleNested(single) = &mut parent.kind {
            single.attributes.push(chain);
        }
        chain = parent;
    }
    chain
}

#[test]
fn test_deep_overridden_chain() {
    let level_json = r#"{"name":"level","single_nested":{"computed_optional_required":"optional",
        "custom_type":{"import":{"path":"example.com/c"},"type":"c.LevelType{}","value_type":"c.Level"}}}"#;
    let innermost_json =
        r#"{"name":"innermost","single_nested":{"computed_optional_required":"optional"}}"#;
    let spec = deep_chain(level_json, innermost_json);

    let node = GeneratorNode::from_attribute(&spec).unwrap();
    let again = GeneratorNode::from_attribute(&spec).unwrap();
    assert!(node.equal(&again));
    assert!(node == again);

    let shorter = GeneratorNode::from_attribute(match &spec.kind {
        AttributeKind::SingleNested(single) => &single.attributes[0],
        _ => unreachable!(),
    })
    .unwrap();
    assert!(!node.equal(&shorter));

    assert_eq!(node.attributes().unwrap().len(), 1);
    assert!(node.blocks().is_none());
    assert_eq!(node.model_field("level").value_type, "c.Level");

    let imports = node.imports();
    assert!(imports.contains_path(ATTR_IMPORT));
    assert!(imports.contains_path(TYPES_IMPORT));
    assert!(imports.contains_path("example.com/c"));

    let schema = node.schema("level");
    assert_eq!(
        schema.matches("schema.SingleNestedAttribute{").count(),
        DEPTH + 1
    );
    assert!(schema.contains("CustomType: InnermostType{"));

    let custom_types = node.custom_type_and_value("level").unwrap();
    assert_eq!(custom_types.matches("type InnermostType struct").count(), 1);
    assert!(!custom_types.contains("type LevelType struct"));

    assert_eq!(node.to_from_functions("level").unwrap(), "");
}

#[test]
fn test_deep_bound_chain() {
    let level_json = r#"{"name":"level","single_nested":{"computed_optional_required":"optional",
        "associated_external_type":{"import":{"path":"example.com/apisdk"},"type":"*apisdk.Level"}}}"#;
    let innermost_json = r#"{"name":"innermost","single_nested":{"computed_optional_required":"optional",
        "associated_external_type":{"import":{"path":"example.com/apisdk"},"type":"*apisdk.Innermost"}}}"#;
    let spec = deep_chain(level_json, innermost_json);

    let node = GeneratorNode::from_attribute(&spec).unwrap();
    let adapters = node.to_from_functions("level").unwrap();
    assert_eq!(
        adapters.matches("func (v LevelValue) ToApisdkLevel(").count(),
        DEPTH
    );
    assert_eq!(
        adapters
            .matches("func (v InnermostValue) ToApisdkInnermost(")
            .count(),
        1
    );
}

