//! Custom object type and value emission
//!
//! Every nested object without a user-supplied override gets a generated
//! `<Name>Type`/`<Name>Value` pair. The pair is built from one
//! [`FieldDescriptor`] per child attribute and block.

use crate::Result;
use crate::identifier::FrameworkIdentifier;
use crate::nested::NestedObject;
use crate::node::GeneratorNode;
use crate::templates::{self, Template};
use serde::Serialize;
use std::collections::BTreeMap;

/// Collection conversion needed by `ToObjectValue` for list, map and set attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionConversion {
    /// `List`, `Map` or `Set`
    pub kind: &'static str,
    /// Element type expression, e.g. `types.StringType`
    pub element_type: String,
}

/// How one child appears in the generated type and value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Key in the object and `tfsdk` tag
    pub name: String,
    /// Struct field name
    pub pascal: String,
    /// Local variable prefix
    pub camel: String,
    /// Go value type of the field, e.g. `basetypes.BoolValue`
    pub value_type: String,
    /// `attr.Type` expression, e.g. `basetypes.BoolType{}`
    pub attr_type: String,
    /// Set for list, map and set attributes without a custom type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionConversion>,
}

#[derive(Serialize)]
struct ObjectContext<'a> {
    name: &'a str,
    fields: &'a [FieldDescriptor],
}

impl GeneratorNode {
    /// Field descriptor for this node as a child named `name`
    #[must_use]
    pub fn field_descriptor(&self, name: &str) -> FieldDescriptor {
        let identifier = FrameworkIdentifier::new(name);
        let mut collection = None;

        let (value_type, attr_type) = match self {
            Self::Bool(_) => basetype("Bool", "basetypes.BoolType{}".to_string()),
            Self::Float64(_) => basetype("Float64", "basetypes.Float64Type{}".to_string()),
            Self::Int64(_) => basetype("Int64", "basetypes.Int64Type{}".to_string()),
            Self::Number(_) => basetype("Number", "basetypes.NumberType{}".to_string()),
            Self::String(_) => basetype("String", "basetypes.StringType{}".to_string()),
            Self::List(n) | Self::Map(n) | Self::Set(n) => {
                let kind = self.kind().collection_kind().framework_type();
                let element_type = n.element_type.type_expr();
                let attr_type = format!("basetypes.{kind}Type{{\nElemType: {element_type},\n}}");
                if n.facets.custom_type.get().is_none() {
                    collection = Some(CollectionConversion { kind, element_type });
                }
                basetype(kind, attr_type)
            }
            Self::Object(n) => basetype(
                "Object",
                format!(
                    "basetypes.ObjectType{{\nAttrTypes: {},\n}}",
                    n.attribute_types.type_expr()
                ),
            ),
            Self::ListNested(n)
            | Self::MapNested(n)
            | Self::SetNested(n)
            | Self::ListNestedBlock(n)
            | Self::SetNestedBlock(n) => {
                let kind = self.kind().collection_kind().framework_type();
                let element_type = n.nested_object.custom_type.as_ref().map_or_else(
                    || format!("{}Value{{}}.Type(ctx)", identifier.to_pascal_case()),
                    |ct| ct.type_expr.clone(),
                );
                basetype(
                    kind,
                    format!("basetypes.{kind}Type{{\nElemType: {element_type},\n}}"),
                )
            }
            Self::SingleNested(_) | Self::SingleNestedBlock(_) => basetype(
                "Object",
                format!(
                    "basetypes.ObjectType{{\nAttrTypes: {}Value{{}}.AttributeTypes(ctx),\n}}",
                    identifier.to_pascal_case()
                ),
            ),
        };

        let (value_type, attr_type) = match self.custom_type() {
            Some(ct) => (ct.value_type.clone(), ct.type_expr.clone()),
            None => (value_type, attr_type),
        };

        FieldDescriptor {
            name: name.to_string(),
            pascal: identifier.to_pascal_case(),
            camel: identifier.to_camel_case(),
            value_type,
            attr_type,
            collection,
        }
    }

    /// `<Name>Type`/`<Name>Value` definitions for this node's nested object
    /// and every nested descendant that needs one.
    ///
    /// Empty for scalar kinds. An object with a custom type override gets no
    /// pair of its own, but its descendants still do. Descendants follow in
    /// sorted order, attributes before blocks.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Render`] if a template fails; nothing is
    /// returned for the other nodes in that case
    pub fn custom_type_and_value(&self, name: &str) -> Result<String> {
        let mut out = String::new();
        let mut stack: Vec<(&str, &Self)> = vec![(name, self)];

        while let Some((name, node)) = stack.pop() {
            let Some(object) = node.nested_object() else {
                continue;
            };

            if object.generates_custom_type() {
                let type_name = FrameworkIdentifier::new(name).to_pascal_case();
                let fields = object.field_descriptors();
                let context = ObjectContext {
                    name: &type_name,
                    fields: &fields,
                };
                out.push_str(&templates::render(Template::ObjectType, name, &context)?);
                out.push_str(&templates::render(Template::ObjectValue, name, &context)?);
            }

            let children = object.attributes.iter().chain(object.blocks.iter());
            for (child_name, child) in children.rev() {
                if child.nested_object().is_some() {
                    stack.push((child_name.as_str(), child));
                }
            }
        }

        Ok(out)
    }
}

impl NestedObject {
    /// Descriptors of every child, sorted by name
    #[must_use]
    pub fn field_descriptors(&self) -> Vec<FieldDescriptor> {
        let mut fields: BTreeMap<&str, FieldDescriptor> = BTreeMap::new();
        for (name, block) in &self.blocks {
            fields.insert(name, block.field_descriptor(name));
        }
        for (name, attribute) in &self.attributes {
            fields.insert(name, attribute.field_descriptor(name));
        }
        fields.into_values().collect()
    }
}

fn basetype(kind: &str, attr_type: String) -> (String, String) {
    (format!("basetypes.{kind}Value"), attr_type)
}
