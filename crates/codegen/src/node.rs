//! Generator node hierarchy
//!
//! One [`GeneratorNode`] variant per attribute and block kind. Variants share
//! a handful of payload shapes; every operation on the tree is an exhaustive
//! `match`, so a new kind cannot be added without handling it everywhere.

use crate::convert::{
    AttributeTypesFacet, CollectionKind, ComputedOptionalRequired, CustomTypeFacet, DefaultFacet,
    DeprecationMessage, Description, ElementTypeFacet, PlanModifiersCustom, Sensitive,
    StaticDefault, ValidatorsCustom,
};
use crate::nested::{NestedObject, Pending, Shell};
use crate::{Error, Result};
use schemagen_spec::resource::{
    CollectionAttribute, NestedAttribute, NestedBlock, ObjectAttribute,
};
use schemagen_spec::schema::NoStatic;
use schemagen_spec::{Attribute, AttributeKind, Block, BlockKind, CustomType};
use std::collections::BTreeMap;
use std::fmt;

/// Concrete kind of a generator node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Boolean attribute
    Bool,
    /// 64-bit float attribute
    Float64,
    /// 64-bit integer attribute
    Int64,
    /// Number attribute
    Number,
    /// String attribute
    String,
    /// List attribute
    List,
    /// Map attribute
    Map,
    /// Set attribute
    Set,
    /// Object attribute
    Object,
    /// List nested attribute
    ListNested,
    /// Map nested attribute
    MapNested,
    /// Set nested attribute
    SetNested,
    /// Single nested attribute
    SingleNested,
    /// List nested block
    ListNestedBlock,
    /// Set nested block
    SetNestedBlock,
    /// Single nested block
    SingleNestedBlock,
}

impl NodeKind {
    /// Name used in diagnostics, matching the specification key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::Number => "number",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::Object => "object",
            Self::ListNested => "list_nested",
            Self::MapNested => "map_nested",
            Self::SetNested => "set_nested",
            Self::SingleNested => "single_nested",
            Self::ListNestedBlock => "list_nested_block",
            Self::SetNestedBlock => "set_nested_block",
            Self::SingleNestedBlock => "single_nested_block",
        }
    }

    /// Framework schema type, e.g. `BoolAttribute`
    #[must_use]
    pub const fn schema_type(self) -> &'static str {
        match self {
            Self::Bool => "BoolAttribute",
            Self::Float64 => "Float64Attribute",
            Self::Int64 => "Int64Attribute",
            Self::Number => "NumberAttribute",
            Self::String => "StringAttribute",
            Self::List => "ListAttribute",
            Self::Map => "MapAttribute",
            Self::Set => "SetAttribute",
            Self::Object => "ObjectAttribute",
            Self::ListNested => "ListNestedAttribute",
            Self::MapNested => "MapNestedAttribute",
            Self::SetNested => "SetNestedAttribute",
            Self::SingleNested => "SingleNestedAttribute",
            Self::ListNestedBlock => "ListNestedBlock",
            Self::SetNestedBlock => "SetNestedBlock",
            Self::SingleNestedBlock => "SingleNestedBlock",
        }
    }

    /// Framework value kind the node holds
    #[must_use]
    pub const fn collection_kind(self) -> CollectionKind {
        match self {
            Self::Bool => CollectionKind::Bool,
            Self::Float64 => CollectionKind::Float64,
            Self::Int64 => CollectionKind::Int64,
            Self::Number => CollectionKind::Number,
            Self::String => CollectionKind::String,
            Self::List | Self::ListNested | Self::ListNestedBlock => CollectionKind::List,
            Self::Map | Self::MapNested => CollectionKind::Map,
            Self::Set | Self::SetNested | Self::SetNestedBlock => CollectionKind::Set,
            Self::Object | Self::SingleNested | Self::SingleNestedBlock => CollectionKind::Object,
        }
    }

    /// Whether the node is a block rather than an attribute
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(
            self,
            Self::ListNestedBlock | Self::SetNestedBlock | Self::SingleNestedBlock
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facets every attribute and block carries
#[derive(Debug, Clone, PartialEq)]
pub struct Facets {
    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,
    /// Custom type of the node itself; nested objects keep their own
    pub custom_type: CustomTypeFacet,
    /// Default value
    pub default: Option<DefaultFacet>,
    /// Deprecation message
    pub deprecation_message: DeprecationMessage,
    /// Description
    pub description: Description,
    /// Custom plan modifiers
    pub plan_modifiers: PlanModifiersCustom,
    /// Sensitive flag
    pub sensitive: Sensitive,
    /// Custom validators
    pub validators: ValidatorsCustom,
}

// Specification structs share field names but not a type.
macro_rules! facets {
    ($spec:expr, $kind:expr, $cor:expr, $custom_type:expr, $default:expr) => {
        Facets {
            computed_optional_required: ComputedOptionalRequired::new($cor),
            custom_type: CustomTypeFacet::new($custom_type),
            default: $default,
            deprecation_message: DeprecationMessage::new($spec.deprecation_message.as_deref()),
            description: Description::new($spec.description.as_deref()),
            plan_modifiers: PlanModifiersCustom::new($kind.collection_kind(), &$spec.plan_modifiers),
            sensitive: Sensitive::new($spec.sensitive),
            validators: ValidatorsCustom::new($kind.collection_kind(), &$spec.validators),
        }
    };
}

fn no_static(never: &NoStatic) -> StaticDefault {
    match *never {}
}

/// Scalar attribute
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveNode {
    /// Shared facets
    pub facets: Facets,
}

/// List, map or set attribute
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNode {
    /// Shared facets
    pub facets: Facets,
    /// Element type
    pub element_type: ElementTypeFacet,
}

impl CollectionNode {
    fn new(name: &str, kind: NodeKind, attribute: &CollectionAttribute) -> Result<Self> {
        let element_type = attribute
            .element_type
            .clone()
            .ok_or_else(|| Error::construction(name, kind.as_str(), "element_type"))?;

        Ok(Self {
            facets: facets!(
                attribute,
                kind,
                Some(attribute.computed_optional_required),
                attribute.custom_type.as_ref(),
                DefaultFacet::from_spec(attribute.default.as_ref(), no_static)
            ),
            element_type: ElementTypeFacet::new(element_type),
        })
    }
}

/// Object attribute
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    /// Shared facets
    pub facets: Facets,
    /// Attribute types
    pub attribute_types: AttributeTypesFacet,
}

impl ObjectNode {
    fn new(name: &str, attribute: &ObjectAttribute) -> Result<Self> {
        let kind = NodeKind::Object;
        let attribute_types = attribute
            .attribute_types
            .clone()
            .ok_or_else(|| Error::construction(name, kind.as_str(), "attribute_types"))?;

        Ok(Self {
            facets: facets!(
                attribute,
                kind,
                Some(attribute.computed_optional_required),
                attribute.custom_type.as_ref(),
                DefaultFacet::from_spec(attribute.default.as_ref(), no_static)
            ),
            attribute_types: AttributeTypesFacet::new(attribute_types),
        })
    }
}

/// Nested attribute or block
#[derive(Debug, Clone, PartialEq)]
pub struct NestedNode {
    /// Shared facets; `custom_type` is the collection override for
    /// list/map/set kinds and always absent for single nested kinds
    pub facets: Facets,
    /// The nested object
    pub nested_object: NestedObject,
}

impl NestedNode {
    fn attribute_pending<'a>(
        name: &'a str,
        kind: NodeKind,
        wrap: fn(Self) -> GeneratorNode,
        attribute: &'a NestedAttribute,
    ) -> Result<Shell<'a>> {
        let object = attribute
            .nested_object
            .as_ref()
            .ok_or_else(|| Error::construction(name, kind.as_str(), "nested_object"))?;

        let nested_object = NestedObject::empty()
            .with_associated_external_type(object.associated_external_type.as_ref())
            .with_custom_type(object.custom_type.as_ref())
            .with_plan_modifiers(&object.plan_modifiers)
            .with_validators(&object.validators);

        let facets = facets!(
            attribute,
            kind,
            Some(attribute.computed_optional_required),
            attribute.custom_type.as_ref(),
            DefaultFacet::from_spec(attribute.default.as_ref(), no_static)
        );

        Ok(Shell::Nested(Pending::new(
            name,
            wrap,
            facets,
            nested_object,
            &object.attributes,
            &[],
        )))
    }

    fn block_pending<'a>(
        name: &'a str,
        kind: NodeKind,
        wrap: fn(Self) -> GeneratorNode,
        block: &'a NestedBlock,
    ) -> Result<Shell<'a>> {
        let object = block
            .nested_object
            .as_ref()
            .ok_or_else(|| Error::construction(name, kind.as_str(), "nested_object"))?;

        let nested_object = NestedObject::empty()
            .with_associated_external_type(object.associated_external_type.as_ref())
            .with_custom_type(object.custom_type.as_ref())
            .with_plan_modifiers(&object.plan_modifiers)
            .with_validators(&object.validators);

        let facets = facets!(
            block,
            kind,
            block.computed_optional_required,
            block.custom_type.as_ref(),
            None
        );

        Ok(Shell::Nested(Pending::new(
            name,
            wrap,
            facets,
            nested_object,
            &object.attributes,
            &object.blocks,
        )))
    }
}

/// One attribute or block of a resource, with its nested children
#[derive(Debug, Clone)]
pub enum GeneratorNode {
    /// Boolean attribute
    Bool(PrimitiveNode),
    /// 64-bit float attribute
    Float64(PrimitiveNode),
    /// 64-bit integer attribute
    Int64(PrimitiveNode),
    /// Number attribute
    Number(PrimitiveNode),
    /// String attribute
    String(PrimitiveNode),
    /// List attribute
    List(CollectionNode),
    /// Map attribute
    Map(CollectionNode),
    /// Set attribute
    Set(CollectionNode),
    /// Object attribute
    Object(ObjectNode),
    /// List nested attribute
    ListNested(NestedNode),
    /// Map nested attribute
    MapNested(NestedNode),
    /// Set nested attribute
    SetNested(NestedNode),
    /// Single nested attribute
    SingleNested(NestedNode),
    /// List nested block
    ListNestedBlock(NestedNode),
    /// Set nested block
    SetNestedBlock(NestedNode),
    /// Single nested block
    SingleNestedBlock(NestedNode),
}

impl GeneratorNode {
    /// Build the node for a specification attribute, with all its children
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] when a required sub-object is missing
    /// and [`Error::DuplicateName`] when two children of an object collide
    pub fn from_attribute(attribute: &Attribute) -> Result<Self> {
        match Self::attribute_shell(attribute)? {
            Shell::Leaf(node) => Ok(node),
            Shell::Nested(pending) => pending.build(),
        }
    }

    /// Build the node for a specification block, with all its children
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] when a required sub-object is missing
    /// and [`Error::DuplicateName`] when two children of an object collide
    pub fn from_block(block: &Block) -> Result<Self> {
        match Self::block_shell(block)? {
            Shell::Leaf(node) => Ok(node),
            Shell::Nested(pending) => pending.build(),
        }
    }

    // The node without its children; nested kinds come back pending.
    pub(crate) fn attribute_shell(attribute: &Attribute) -> Result<Shell<'_>> {
        let name = attribute.name.as_str();
        tracing::trace!(attribute = name, "Building attribute node");

        let node = match &attribute.kind {
            AttributeKind::Bool(a) => Self::Bool(PrimitiveNode {
                facets: facets!(
                    a,
                    NodeKind::Bool,
                    Some(a.computed_optional_required),
                    a.custom_type.as_ref(),
                    DefaultFacet::from_spec(a.default.as_ref(), |v| StaticDefault::Bool(*v))
                ),
            }),
            AttributeKind::Float64(a) => Self::Float64(PrimitiveNode {
                facets: facets!(
                    a,
                    NodeKind::Float64,
                    Some(a.computed_optional_required),
                    a.custom_type.as_ref(),
                    DefaultFacet::from_spec(a.default.as_ref(), |v| StaticDefault::Float64(*v))
                ),
            }),
            AttributeKind::Int64(a) => Self::Int64(PrimitiveNode {
                facets: facets!(
                    a,
                    NodeKind::Int64,
                    Some(a.computed_optional_required),
                    a.custom_type.as_ref(),
                    DefaultFacet::from_spec(a.default.as_ref(), |v| StaticDefault::Int64(*v))
                ),
            }),
            AttributeKind::Number(a) => Self::Number(PrimitiveNode {
                facets: facets!(
                    a,
                    NodeKind::Number,
                    Some(a.computed_optional_required),
                    a.custom_type.as_ref(),
                    DefaultFacet::from_spec(a.default.as_ref(), no_static)
                ),
            }),
            AttributeKind::String(a) => Self::String(PrimitiveNode {
                facets: facets!(
                    a,
                    NodeKind::String,
                    Some(a.computed_optional_required),
                    a.custom_type.as_ref(),
                    DefaultFacet::from_spec(a.default.as_ref(), |v| {
                        StaticDefault::String(v.clone())
                    })
                ),
            }),
            AttributeKind::List(a) => Self::List(CollectionNode::new(name, NodeKind::List, a)?),
            AttributeKind::Map(a) => Self::Map(CollectionNode::new(name, NodeKind::Map, a)?),
            AttributeKind::Set(a) => Self::Set(CollectionNode::new(name, NodeKind::Set, a)?),
            AttributeKind::Object(a) => Self::Object(ObjectNode::new(name, a)?),
            AttributeKind::ListNested(a) => {
                return NestedNode::attribute_pending(name, NodeKind::ListNested, Self::ListNested, a);
            }
            AttributeKind::MapNested(a) => {
                return NestedNode::attribute_pending(name, NodeKind::MapNested, Self::MapNested, a);
            }
            AttributeKind::SetNested(a) => {
                return NestedNode::attribute_pending(name, NodeKind::SetNested, Self::SetNested, a);
            }
            AttributeKind::SingleNested(a) => {
                let nested_object = NestedObject::empty()
                    .with_associated_external_type(a.associated_external_type.as_ref())
                    .with_custom_type(a.custom_type.as_ref());
                let facets = facets!(
                    a,
                    NodeKind::SingleNested,
                    Some(a.computed_optional_required),
                    None,
                    DefaultFacet::from_spec(a.default.as_ref(), no_static)
                );
                return Ok(Shell::Nested(Pending::new(
                    name,
                    Self::SingleNested,
                    facets,
                    nested_object,
                    &a.attributes,
                    &[],
                )));
            }
        };

        Ok(Shell::Leaf(node))
    }

    pub(crate) fn block_shell(block: &Block) -> Result<Shell<'_>> {
        let name = block.name.as_str();
        tracing::trace!(block = name, "Building block node");

        match &block.kind {
            BlockKind::ListNested(b) => {
                NestedNode::block_pending(name, NodeKind::ListNestedBlock, Self::ListNestedBlock, b)
            }
            BlockKind::SetNested(b) => {
                NestedNode::block_pending(name, NodeKind::SetNestedBlock, Self::SetNestedBlock, b)
            }
            BlockKind::SingleNested(b) => {
                let nested_object = NestedObject::empty()
                    .with_associated_external_type(b.associated_external_type.as_ref())
                    .with_custom_type(b.custom_type.as_ref());
                let facets = facets!(
                    b,
                    NodeKind::SingleNestedBlock,
                    b.computed_optional_required,
                    None,
                    None
                );
                Ok(Shell::Nested(Pending::new(
                    name,
                    Self::SingleNestedBlock,
                    facets,
                    nested_object,
                    &b.attributes,
                    &b.blocks,
                )))
            }
        }
    }

    /// Concrete kind
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Bool(_) => NodeKind::Bool,
            Self::Float64(_) => NodeKind::Float64,
            Self::Int64(_) => NodeKind::Int64,
            Self::Number(_) => NodeKind::Number,
            Self::String(_) => NodeKind::String,
            Self::List(_) => NodeKind::List,
            Self::Map(_) => NodeKind::Map,
            Self::Set(_) => NodeKind::Set,
            Self::Object(_) => NodeKind::Object,
            Self::ListNested(_) => NodeKind::ListNested,
            Self::MapNested(_) => NodeKind::MapNested,
            Self::SetNested(_) => NodeKind::SetNested,
            Self::SingleNested(_) => NodeKind::SingleNested,
            Self::ListNestedBlock(_) => NodeKind::ListNestedBlock,
            Self::SetNestedBlock(_) => NodeKind::SetNestedBlock,
            Self::SingleNestedBlock(_) => NodeKind::SingleNestedBlock,
        }
    }

    /// Facets shared by every kind
    #[must_use]
    pub const fn facets(&self) -> &Facets {
        match self {
            Self::Bool(n) | Self::Float64(n) | Self::Int64(n) | Self::Number(n) | Self::String(n) => {
                &n.facets
            }
            Self::List(n) | Self::Map(n) | Self::Set(n) => &n.facets,
            Self::Object(n) => &n.facets,
            Self::ListNested(n)
            | Self::MapNested(n)
            | Self::SetNested(n)
            | Self::SingleNested(n)
            | Self::ListNestedBlock(n)
            | Self::SetNestedBlock(n)
            | Self::SingleNestedBlock(n) => &n.facets,
        }
    }

    /// The nested object of nested kinds
    #[must_use]
    pub const fn nested_object(&self) -> Option<&NestedObject> {
        match self {
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_) => None,
            Self::ListNested(n)
            | Self::MapNested(n)
            | Self::SetNested(n)
            | Self::SingleNested(n)
            | Self::ListNestedBlock(n)
            | Self::SetNestedBlock(n)
            | Self::SingleNestedBlock(n) => Some(&n.nested_object),
        }
    }

    pub(crate) fn nested_object_mut(&mut self) -> Option<&mut NestedObject> {
        match self {
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_) => None,
            Self::ListNested(n)
            | Self::MapNested(n)
            | Self::SetNested(n)
            | Self::SingleNested(n)
            | Self::ListNestedBlock(n)
            | Self::SetNestedBlock(n)
            | Self::SingleNestedBlock(n) => Some(&mut n.nested_object),
        }
    }

    /// Child attributes; `None` for kinds without a nested object
    #[must_use]
    pub fn attributes(&self) -> Option<&BTreeMap<String, Self>> {
        self.nested_object().map(|object| &object.attributes)
    }

    /// Child blocks; `None` for kinds that cannot contain blocks
    #[must_use]
    pub fn blocks(&self) -> Option<&BTreeMap<String, Self>> {
        match self {
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_)
            | Self::ListNested(_)
            | Self::MapNested(_)
            | Self::SetNested(_)
            | Self::SingleNested(_) => None,
            Self::ListNestedBlock(n) | Self::SetNestedBlock(n) | Self::SingleNestedBlock(n) => {
                Some(&n.nested_object.blocks)
            }
        }
    }

    /// The override that replaces the node's value type in the model.
    ///
    /// For single nested kinds this is the nested object's custom type.
    #[must_use]
    pub fn custom_type(&self) -> Option<&CustomType> {
        match self {
            Self::SingleNested(n) | Self::SingleNestedBlock(n) => {
                n.nested_object.custom_type.as_ref()
            }
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_)
            | Self::ListNested(_)
            | Self::MapNested(_)
            | Self::SetNested(_)
            | Self::ListNestedBlock(_)
            | Self::SetNestedBlock(_) => self.facets().custom_type.get(),
        }
    }

    /// Structural equality; kinds must match and every facet and child must be equal
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];

        while let Some((a, b)) = stack.pop() {
            if !a.shallow_eq(b) {
                return false;
            }
            match (a.nested_object(), b.nested_object()) {
                (Some(x), Some(y)) => {
                    if !x.shallow_eq(y) {
                        return false;
                    }
                    stack.extend(x.children().zip(y.children()));
                }
                (None, None) => {}
                _ => return false,
            }
        }

        true
    }

    // Kind, facets and leaf payload; nested objects are compared by the caller.
    fn shallow_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b))
            | (Self::Map(a), Self::Map(b))
            | (Self::Set(a), Self::Set(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => self.kind() == other.kind() && self.facets() == other.facets(),
        }
    }
}

impl PartialEq for GeneratorNode {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}
