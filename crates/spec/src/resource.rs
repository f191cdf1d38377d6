//! Resource attributes and blocks.
//!
//! Each attribute or block is a name plus exactly one kind object, e.g.
//!
//! ```json
//! { "name": "enabled", "bool": { "computed_optional_required": "required" } }
//! ```

use crate::schema::{
    AssociatedExternalType, ComputedOptionalRequired, CustomType, DefaultValue, ElementType,
    NoStatic, ObjectAttributeType, PlanModifier, Validator,
};
use serde::{Deserialize, Serialize};

/// A named resource attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name as it appears in configuration
    pub name: String,

    /// Attribute kind and facets
    #[serde(flatten)]
    pub kind: AttributeKind,
}

/// The kind of an attribute with its kind-specific facets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Boolean attribute
    Bool(BoolAttribute),
    /// 64-bit float attribute
    Float64(Float64Attribute),
    /// 64-bit integer attribute
    Int64(Int64Attribute),
    /// Arbitrary-precision number attribute
    Number(NumberAttribute),
    /// String attribute
    String(StringAttribute),
    /// List of elements
    List(CollectionAttribute),
    /// Map of elements
    Map(CollectionAttribute),
    /// Set of elements
    Set(CollectionAttribute),
    /// Object with fixed attribute types
    Object(ObjectAttribute),
    /// List of nested objects
    ListNested(NestedAttribute),
    /// Map of nested objects
    MapNested(NestedAttribute),
    /// Set of nested objects
    SetNested(NestedAttribute),
    /// Single nested object
    SingleNested(SingleNestedAttribute),
}

/// Facets common to scalar attributes; `T` is the static default type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct PrimitiveAttribute<T> {
    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,

    /// Custom type override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue<T>>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Boolean attribute
pub type BoolAttribute = PrimitiveAttribute<bool>;
/// 64-bit float attribute
pub type Float64Attribute = PrimitiveAttribute<f64>;
/// 64-bit integer attribute
pub type Int64Attribute = PrimitiveAttribute<i64>;
/// Number attribute; defaults must be custom
pub type NumberAttribute = PrimitiveAttribute<NoStatic>;
/// String attribute
pub type StringAttribute = PrimitiveAttribute<String>;

/// List, map or set attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionAttribute {
    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,

    /// Custom type override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue<NoStatic>>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Element type; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<ElementType>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Object attribute with fixed attribute types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttribute {
    /// Object attribute types; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_types: Option<Vec<ObjectAttributeType>>,

    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,

    /// Custom type override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue<NoStatic>>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// List, map or set of nested objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedAttribute {
    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,

    /// Custom type override for the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue<NoStatic>>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested object; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_object: Option<NestedAttributeObject>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Object nested inside a collection attribute
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestedAttributeObject {
    /// External type the object converts to and from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_external_type: Option<AssociatedExternalType>,

    /// Object attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Custom type override for the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Object plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Object validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Single nested object attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleNestedAttribute {
    /// External type the object converts to and from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_external_type: Option<AssociatedExternalType>,

    /// Object attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Computed/optional/required
    pub computed_optional_required: ComputedOptionalRequired,

    /// Custom type override for the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue<NoStatic>>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// A named resource block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block name as it appears in configuration
    pub name: String,

    /// Block kind and facets
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// The kind of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// List of nested block objects
    ListNested(NestedBlock),
    /// Set of nested block objects
    SetNested(NestedBlock),
    /// Single nested block object
    SingleNested(SingleNestedBlock),
}

/// List or set nested block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    /// Computed/optional/required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_optional_required: Option<ComputedOptionalRequired>,

    /// Custom type override for the collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested object; required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_object: Option<NestedBlockObject>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Object nested inside a block, which may itself contain blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NestedBlockObject {
    /// External type the object converts to and from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_external_type: Option<AssociatedExternalType>,

    /// Object attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Object blocks
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Custom type override for the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Object plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Object validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

/// Single nested block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleNestedBlock {
    /// External type the object converts to and from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associated_external_type: Option<AssociatedExternalType>,

    /// Block attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Nested blocks
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Computed/optional/required
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_optional_required: Option<ComputedOptionalRequired>,

    /// Custom type override for the object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Plan modifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plan_modifiers: Vec<PlanModifier>,

    /// Sensitive flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitive: Option<bool>,

    /// Validators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

// Children are moved onto work lists before a node goes away, so dropping a
// deep tree does not recurse.
impl Drop for Attribute {
    fn drop(&mut self) {
        let mut attributes = Vec::new();
        let mut blocks = Vec::new();
        self.kind.take_children(&mut attributes, &mut blocks);
        release(attributes, blocks);
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        let mut attributes = Vec::new();
        let mut blocks = Vec::new();
        self.kind.take_children(&mut attributes, &mut blocks);
        release(attributes, blocks);
    }
}

impl AttributeKind {
    fn take_children(&mut self, attributes: &mut Vec<Attribute>, _blocks: &mut Vec<Block>) {
        match self {
            Self::ListNested(a) | Self::MapNested(a) | Self::SetNested(a) => {
                if let Some(object) = &mut a.nested_object {
                    attributes.append(&mut object.attributes);
                }
            }
            Self::SingleNested(a) => attributes.append(&mut a.attributes),
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::List(_)
            | Self::Map(_)
            | Self::Set(_)
            | Self::Object(_) => {}
        }
    }
}

impl BlockKind {
    fn take_children(&mut self, attributes: &mut Vec<Attribute>, blocks: &mut Vec<Block>) {
        match self {
            Self::ListNested(b) | Self::SetNested(b) => {
                if let Some(object) = &mut b.nested_object {
                    attributes.append(&mut object.attributes);
                    blocks.append(&mut object.blocks);
                }
            }
            Self::SingleNested(b) => {
                attributes.append(&mut b.attributes);
                blocks.append(&mut b.blocks);
            }
        }
    }
}

fn release(mut attributes: Vec<Attribute>, mut blocks: Vec<Block>) {
    loop {
        if let Some(mut attribute) = attributes.pop() {
            attribute.kind.take_children(&mut attributes, &mut blocks);
        } else if let Some(mut block) = blocks.pop() {
            block.kind.take_children(&mut attributes, &mut blocks);
        } else {
            break;
        }
    }
}
