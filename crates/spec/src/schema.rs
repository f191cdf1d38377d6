//! Facets shared by every attribute and block kind.

use crate::code::Import;
use serde::{Deserialize, Serialize};

/// Whether a value is computed by the provider, supplied by the practitioner, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedOptionalRequired {
    /// Set only by the provider
    Computed,
    /// May be set by the practitioner, otherwise computed
    ComputedOptional,
    /// May be set by the practitioner
    Optional,
    /// Must be set by the practitioner
    Required,
}

/// User-supplied replacement for the framework type of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomType {
    /// Import required by `type` and `value_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<Import>,

    /// Schema type expression, e.g. `mytypes.TimestampType{}`
    #[serde(rename = "type")]
    pub type_expr: String,

    /// Value type used in model structs, e.g. `mytypes.Timestamp`
    pub value_type: String,
}

impl CustomType {
    /// Whether the custom type requires an import
    #[must_use]
    pub fn has_import(&self) -> bool {
        self.import.as_ref().is_some_and(Import::has_path)
    }
}

/// A literal schema expression supplied by the user together with its imports.
///
/// Used for custom validators, plan modifiers and defaults. Equality ignores
/// the order of `imports` but not their content (paths and aliases).
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct CustomDefinition {
    /// Imports the expression depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<Import>,

    /// Expression inserted verbatim into the schema
    pub schema_definition: String,
}

impl CustomDefinition {
    /// Create a definition from an expression and its imports
    pub fn new(schema_definition: impl Into<String>, imports: Vec<Import>) -> Self {
        Self {
            imports,
            schema_definition: schema_definition.into(),
        }
    }

    /// Whether any import carries a usable path
    #[must_use]
    pub fn has_import(&self) -> bool {
        self.imports.iter().any(Import::has_path)
    }

    /// Imports with a usable path, in declaration order
    pub fn imports_with_path(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter(|i| i.has_path())
    }
}

impl PartialEq for CustomDefinition {
    fn eq(&self, other: &Self) -> bool {
        if self.schema_definition != other.schema_definition
            || self.imports.len() != other.imports.len()
        {
            return false;
        }

        let mut lhs: Vec<&Import> = self.imports.iter().collect();
        let mut rhs: Vec<&Import> = other.imports.iter().collect();
        lhs.sort();
        rhs.sort();
        lhs == rhs
    }
}

/// A validator entry; only custom validators influence generation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Validator {
    /// Custom validator definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomDefinition>,
}

/// A plan modifier entry; only custom plan modifiers influence generation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanModifier {
    /// Custom plan modifier definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomDefinition>,
}

/// Marker for kinds whose default can only be a custom expression.
///
/// Uninhabited, so a `static` default for such a kind fails to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoStatic {}

/// Default value of an attribute: a static literal or a custom expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct DefaultValue<T> {
    /// Static value rendered through the framework default package
    #[serde(rename = "static", default, skip_serializing_if = "Option::is_none")]
    pub static_value: Option<T>,

    /// Custom default expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomDefinition>,
}

impl<T> DefaultValue<T> {
    /// Static default
    pub const fn static_value(value: T) -> Self {
        Self {
            static_value: Some(value),
            custom: None,
        }
    }

    /// Custom default
    pub const fn custom(definition: CustomDefinition) -> Self {
        Self {
            static_value: None,
            custom: Some(definition),
        }
    }
}

/// External (API SDK) type a nested object converts to and from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedExternalType {
    /// Import providing the type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<Import>,

    /// Fully-qualified type reference, e.g. `*apisdk.Widget`
    #[serde(rename = "type")]
    pub type_expr: String,
}

/// Element type of a collection attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Boolean elements
    Bool(PrimitiveElement),
    /// 64-bit float elements
    Float64(PrimitiveElement),
    /// 64-bit integer elements
    Int64(PrimitiveElement),
    /// Arbitrary-precision number elements
    Number(PrimitiveElement),
    /// String elements
    String(PrimitiveElement),
    /// List elements
    List(CollectionElement),
    /// Map elements
    Map(CollectionElement),
    /// Set elements
    Set(CollectionElement),
    /// Object elements
    Object(ObjectElement),
}

/// Scalar element type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrimitiveElement {
    /// Custom element type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,
}

/// Collection element type with its own element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionElement {
    /// Custom element type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Type of the nested elements
    pub element_type: Box<ElementType>,
}

/// Object element type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectElement {
    /// Custom element type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<CustomType>,

    /// Object attribute types
    #[serde(default)]
    pub attribute_types: Vec<ObjectAttributeType>,
}

/// Named attribute type inside an object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectAttributeType {
    /// Attribute name
    pub name: String,

    /// Attribute type
    #[serde(flatten)]
    pub element_type: ElementType,
}
