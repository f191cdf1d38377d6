//! Model struct fields

use crate::identifier::FrameworkIdentifier;
use crate::node::GeneratorNode;
use serde::Serialize;

/// One field of a generated model struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelField {
    /// Go field name, e.g. `SourcePort`
    pub name: String,
    /// Key in the `tfsdk` struct tag, e.g. `source_port`
    pub tfsdk_name: String,
    /// Go value type, e.g. `types.Int64`
    pub value_type: String,
}

impl ModelField {
    /// Struct field line, e.g. ``Enabled types.Bool `tfsdk:"enabled"` ``
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} {} `tfsdk:\"{}\"`",
            self.name, self.value_type, self.tfsdk_name
        )
    }
}

impl GeneratorNode {
    /// Model field for this node under `name`
    #[must_use]
    pub fn model_field(&self, name: &str) -> ModelField {
        let default = match self {
            Self::Bool(_) => "types.Bool",
            Self::Float64(_) => "types.Float64",
            Self::Int64(_) => "types.Int64",
            Self::Number(_) => "types.Number",
            Self::String(_) => "types.String",
            Self::List(_) | Self::ListNested(_) | Self::ListNestedBlock(_) => "types.List",
            Self::Map(_) | Self::MapNested(_) => "types.Map",
            Self::Set(_) | Self::SetNested(_) | Self::SetNestedBlock(_) => "types.Set",
            Self::Object(_) | Self::SingleNested(_) | Self::SingleNestedBlock(_) => "types.Object",
        };

        let identifier = FrameworkIdentifier::new(name);
        ModelField {
            name: identifier.to_pascal_case(),
            tfsdk_name: name.to_string(),
            value_type: self
                .custom_type()
                .map_or_else(|| default.to_string(), |ct| ct.value_type.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_spec::{Attribute, Block};

    fn attribute(json: &str) -> GeneratorNode {
        GeneratorNode::from_attribute(&serde_json::from_str::<Attribute>(json).unwrap()).unwrap()
    }

    #[test]
    fn test_bool_model_field() {
        let node = attribute(r#"{"name":"enabled","bool":{"computed_optional_required":"required"}}"#);
        let field = node.model_field("enabled");
        assert_eq!(
            field,
            ModelField {
                name: "Enabled".to_string(),
                tfsdk_name: "enabled".to_string(),
                value_type: "types.Bool".to_string(),
            }
        );
        assert_eq!(field.render(), "Enabled types.Bool `tfsdk:\"enabled\"`");
    }

    #[test]
    fn test_custom_type_value_type_verbatim() {
        let node = attribute(
            r#"{"name":"created_at","string":{"computed_optional_required":"computed",
                "custom_type":{"type":"timetypes.RFC3339Type{}","value_type":"timetypes.RFC3339"}}}"#,
        );
        let field = node.model_field("created_at");
        assert_eq!(field.name, "CreatedAt");
        assert_eq!(field.value_type, "timetypes.RFC3339");
    }

    #[test]
    fn test_nested_kinds_default_value_types() {
        let set_block = GeneratorNode::from_block(
            &serde_json::from_str::<Block>(r#"{"name":"rule","set_nested":{"nested_object":{}}}"#)
                .unwrap(),
        )
        .unwrap();
        assert_eq!(set_block.model_field("rule").value_type, "types.Set");

        let single = attribute(
            r#"{"name":"config","single_nested":{"computed_optional_required":"optional"}}"#,
        );
        assert_eq!(single.model_field("config").value_type, "types.Object");

        let map_nested = attribute(
            r#"{"name":"labels","map_nested":{"computed_optional_required":"optional","nested_object":{}}}"#,
        );
        assert_eq!(map_nested.model_field("labels").value_type, "types.Map");
    }

    #[test]
    fn test_nested_object_override_does_not_change_collection_field() {
        let node = attribute(
            r#"{"name":"rules","list_nested":{"computed_optional_required":"optional","nested_object":{
                "custom_type":{"type":"r.RuleType{}","value_type":"r.Rule"}}}}"#,
        );
        assert_eq!(node.model_field("rules").value_type, "types.List");
    }
}
