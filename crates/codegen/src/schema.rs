//! Schema fragment emission
//!
//! Every fragment follows one fixed clause order: kind line, element type /
//! attribute types / nested object, custom type, computed-optional-required,
//! sensitive, description, deprecation message, plan modifiers, validators,
//! default, closing brace.

use crate::convert::{CustomTypeNestedObject, go_string};
use crate::identifier::FrameworkIdentifier;
use crate::nested::NestedObject;
use crate::node::{Facets, GeneratorNode};

/// Piece of a fragment still to be written: literal text, or a child node
/// expanded when it is reached.
enum Part<'a> {
    Text(String),
    Node(&'a str, &'a GeneratorNode),
}

impl GeneratorNode {
    /// Schema fragment declaring this node under `name`, e.g.
    /// `"enabled": schema.BoolAttribute{ ... },`
    ///
    /// Children are expanded from an explicit stack, so nesting depth is
    /// bounded by memory only.
    #[must_use]
    pub fn schema(&self, name: &str) -> String {
        let mut out = String::new();
        let mut stack = vec![Part::Node(name, self)];

        while let Some(part) = stack.pop() {
            match part {
                Part::Text(text) => out.push_str(&text),
                Part::Node(name, node) => stack.extend(node.schema_parts(name).into_iter().rev()),
            }
        }

        out
    }

    // One level of this node's fragment, with children left unexpanded.
    fn schema_parts<'a>(&'a self, name: &'a str) -> Vec<Part<'a>> {
        let kind = self.kind();
        let facets = self.facets();
        let mut parts = vec![Part::Text(format!(
            "{}: schema.{}{{\n",
            go_string(name),
            kind.schema_type()
        ))];

        let custom_type = match self {
            Self::Bool(_) | Self::Float64(_) | Self::Int64(_) | Self::Number(_) | Self::String(_) => {
                facets.custom_type.schema()
            }
            Self::List(n) | Self::Map(n) | Self::Set(n) => {
                parts.push(Part::Text(n.element_type.schema()));
                facets.custom_type.schema()
            }
            Self::Object(n) => {
                parts.push(Part::Text(n.attribute_types.schema()));
                facets.custom_type.schema()
            }
            Self::ListNested(n) | Self::MapNested(n) | Self::SetNested(n) => {
                nested_object_parts("NestedAttributeObject", name, &n.nested_object, false, &mut parts);
                facets.custom_type.schema()
            }
            Self::ListNestedBlock(n) | Self::SetNestedBlock(n) => {
                nested_object_parts("NestedBlockObject", name, &n.nested_object, true, &mut parts);
                facets.custom_type.schema()
            }
            Self::SingleNested(n) => {
                children_parts(&n.nested_object, false, &mut parts);
                object_custom_type(name, &n.nested_object)
            }
            Self::SingleNestedBlock(n) => {
                children_parts(&n.nested_object, true, &mut parts);
                object_custom_type(name, &n.nested_object)
            }
        };

        let mut tail = custom_type;
        tail.push_str(&facet_clauses(facets));
        tail.push_str("},\n");
        parts.push(Part::Text(tail));
        parts
    }
}

fn facet_clauses(facets: &Facets) -> String {
    let mut out = String::new();
    out.push_str(&facets.computed_optional_required.schema());
    out.push_str(&facets.sensitive.schema());
    out.push_str(&facets.description.schema());
    out.push_str(&facets.deprecation_message.schema());
    out.push_str(&facets.plan_modifiers.schema());
    out.push_str(&facets.validators.schema());
    if let Some(default) = &facets.default {
        out.push_str(&default.schema());
    }
    out
}

fn object_custom_type(name: &str, object: &NestedObject) -> String {
    let type_name = FrameworkIdentifier::new(name).to_pascal_case();
    CustomTypeNestedObject::new(&type_name, object.custom_type.as_ref()).schema()
}

// `Attributes:` always, `Blocks:` only for block kinds with child blocks.
fn children_parts<'a>(object: &'a NestedObject, with_blocks: bool, parts: &mut Vec<Part<'a>>) {
    parts.push(Part::Text("Attributes: map[string]schema.Attribute{\n".to_string()));
    for (name, child) in &object.attributes {
        parts.push(Part::Node(name, child));
    }
    parts.push(Part::Text("},\n".to_string()));

    if with_blocks && !object.blocks.is_empty() {
        parts.push(Part::Text("Blocks: map[string]schema.Block{\n".to_string()));
        for (name, child) in &object.blocks {
            parts.push(Part::Node(name, child));
        }
        parts.push(Part::Text("},\n".to_string()));
    }
}

fn nested_object_parts<'a>(
    object_type: &str,
    name: &str,
    object: &'a NestedObject,
    with_blocks: bool,
    parts: &mut Vec<Part<'a>>,
) {
    parts.push(Part::Text(format!("NestedObject: schema.{object_type}{{\n")));
    children_parts(object, with_blocks, parts);

    let mut tail = object_custom_type(name, object);
    tail.push_str(&object.plan_modifiers.schema());
    tail.push_str(&object.validators.schema());
    tail.push_str("},\n");
    parts.push(Part::Text(tail));
}
