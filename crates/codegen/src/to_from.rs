//! Adapters between generated values and associated external types
//!
//! A single nested attribute or block bound to an external type gets
//! `To<Ext>`/`From<Ext>` methods on its generated `<Name>Value`, with one
//! conversion per child attribute. Collection kinds are not supported yet.

use crate::external::AssocExtType;
use crate::identifier::FrameworkIdentifier;
use crate::node::GeneratorNode;
use crate::templates::{self, Template};
use crate::{Error, Result};
use serde::Serialize;

/// Conversion of one child between its framework value and the external field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToFromConversion {
    /// Child name
    pub name: String,
    /// Struct field name, shared by the value and the external type
    pub pascal: String,
    /// Local variable prefix
    pub camel: String,
    /// Whether the child converts through its own adapters
    pub object: bool,
    /// Value method producing the external field, e.g. `ValueBoolPointer`
    pub to: &'static str,
    /// `types` function building the value, e.g. `BoolPointerValue`
    pub from: &'static str,
    /// Framework base type embedded in a custom value type, e.g. `Bool`
    pub base: &'static str,
    /// Custom value type wrapping the framework value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_value_type: Option<String>,
    /// Generated type name of an object child
    pub type_name: String,
    /// Adapter suffix of an object child
    pub suffix: String,
}

#[derive(Serialize)]
struct ToFromContext<'a> {
    name: &'a str,
    external_type: &'a str,
    type_reference: &'a str,
    pointer: bool,
    zero: String,
    suffix: String,
    fields: &'a [ToFromConversion],
}

const FEATURE: &str = "Associated external type";

impl GeneratorNode {
    /// Adapter functions for this node and every bound descendant.
    ///
    /// Empty when the node has no external type binding.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unimplemented`] for bound collection kinds and for
    /// children without a defined conversion, and [`Error::Render`] if a
    /// template fails. Nothing is returned for the other nodes in either case.
    /// A block inside a bound object is one such child, so it aborts the whole
    /// buffer rather than being skipped.
    pub fn to_from_functions(&self, name: &str) -> Result<String> {
        let mut out = String::new();
        let mut stack: Vec<(&str, &Self)> = vec![(name, self)];

        while let Some((name, node)) = stack.pop() {
            let Some(object) = node.nested_object() else {
                continue;
            };
            let Some(external) = &object.associated_external_type else {
                continue;
            };

            match node {
                Self::SingleNested(_) | Self::SingleNestedBlock(_) => {}
                Self::ListNested(_)
                | Self::MapNested(_)
                | Self::SetNested(_)
                | Self::ListNestedBlock(_)
                | Self::SetNestedBlock(_) => {
                    return Err(Error::unimplemented(name, node.kind().as_str(), FEATURE));
                }
                Self::Bool(_)
                | Self::Float64(_)
                | Self::Int64(_)
                | Self::Number(_)
                | Self::String(_)
                | Self::List(_)
                | Self::Map(_)
                | Self::Set(_)
                | Self::Object(_) => continue,
            }

            // Adapters are methods on the generated value type.
            if !object.generates_custom_type() {
                return Err(Error::unimplemented(
                    name,
                    node.kind().as_str(),
                    "Associated external type with a custom type override",
                ));
            }

            if let Some((block_name, block)) = object.blocks.iter().next() {
                return Err(Error::unimplemented(
                    block_name,
                    block.kind().as_str(),
                    "Conversion to an associated external type field",
                ));
            }

            let fields = object
                .attributes
                .iter()
                .map(|(child_name, child)| child.to_from_conversion(child_name))
                .collect::<Result<Vec<_>>>()?;

            out.push_str(&render_adapters(name, external, &fields)?);

            for (child_name, child) in object.attributes.iter().rev() {
                if child
                    .nested_object()
                    .is_some_and(|o| o.associated_external_type.is_some())
                {
                    stack.push((child_name.as_str(), child));
                }
            }
        }

        Ok(out)
    }

    /// Conversion of this node as a field of a bound parent
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unimplemented`] when no conversion is defined for the kind
    pub fn to_from_conversion(&self, name: &str) -> Result<ToFromConversion> {
        let identifier = FrameworkIdentifier::new(name);
        let mut conversion = ToFromConversion {
            name: name.to_string(),
            pascal: identifier.to_pascal_case(),
            camel: identifier.to_camel_case(),
            object: false,
            to: "",
            from: "",
            base: "",
            custom_value_type: None,
            type_name: String::new(),
            suffix: String::new(),
        };

        let unsupported = || {
            Error::unimplemented(
                name,
                self.kind().as_str(),
                "Conversion to an associated external type field",
            )
        };

        let (to, from, base) = match self {
            Self::Bool(_) => ("ValueBoolPointer", "BoolPointerValue", "Bool"),
            Self::Float64(_) => ("ValueFloat64Pointer", "Float64PointerValue", "Float64"),
            Self::Int64(_) => ("ValueInt64Pointer", "Int64PointerValue", "Int64"),
            Self::Number(_) => ("ValueBigFloat", "NumberValue", "Number"),
            Self::String(_) => ("ValueStringPointer", "StringPointerValue", "String"),
            Self::SingleNested(n) => {
                let object = &n.nested_object;
                let external = object
                    .associated_external_type
                    .as_ref()
                    .filter(|_| object.generates_custom_type())
                    .ok_or_else(unsupported)?;
                conversion.object = true;
                conversion.type_name = identifier.to_pascal_case();
                conversion.suffix = external.function_suffix();
                return Ok(conversion);
            }
            Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_)
            | Self::ListNested(_)
            | Self::MapNested(_)
            | Self::SetNested(_)
            | Self::ListNestedBlock(_)
            | Self::SetNestedBlock(_)
            | Self::SingleNestedBlock(_) => return Err(unsupported()),
        };

        conversion.to = to;
        conversion.from = from;
        conversion.base = base;
        conversion.custom_value_type = self.custom_type().map(|ct| ct.value_type.clone());
        Ok(conversion)
    }
}

fn render_adapters(name: &str, external: &AssocExtType, fields: &[ToFromConversion]) -> Result<String> {
    let type_name = FrameworkIdentifier::new(name).to_pascal_case();
    let zero = if external.is_pointer() {
        "nil".to_string()
    } else {
        format!("{}{{}}", external.type_reference())
    };

    let context = ToFromContext {
        name: &type_name,
        external_type: external.type_expr(),
        type_reference: external.type_reference(),
        pointer: external.is_pointer(),
        zero,
        suffix: external.function_suffix(),
        fields,
    };

    tracing::debug!(
        name,
        external_type = external.type_expr(),
        fields = fields.len(),
        "Rendering external type adapters"
    );
    templates::render(Template::ToFrom, name, &context)
}
