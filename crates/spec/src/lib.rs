//! # schemagen-spec
//!
//! Typed, already-parsed resource specification consumed by
//! `schemagen-codegen`.
//!
//! The tree mirrors the specification document: a list of resources, each
//! with a schema of named attributes and blocks. Attributes and blocks carry
//! their facets (computed/optional/required, custom types, defaults,
//! validators, plan modifiers) and, for nested kinds, the nested object.
//!
//! Reading specification files is left to callers; [`Specification::from_json`]
//! is provided for callers that already hold the document text.

pub mod code;
pub mod resource;
pub mod schema;

pub use code::Import;
pub use resource::{Attribute, AttributeKind, Block, BlockKind};
pub use schema::{
    AssociatedExternalType, ComputedOptionalRequired, CustomDefinition, CustomType, DefaultValue,
    ElementType, PlanModifier, Validator,
};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while reading a specification
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The document is not a valid specification
    #[error("Invalid specification: {source}")]
    #[diagnostic(
        code(schemagen::spec::invalid),
        help("Check the document against the specification schema")
    )]
    Invalid {
        /// Underlying JSON error, with line and column
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for specification operations
pub type Result<T> = std::result::Result<T, Error>;

/// Root specification document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Specification {
    /// Specification format version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Resources to generate
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Specification {
    /// Parse a specification from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the text is not a valid specification
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| Error::Invalid { source })
    }
}

/// A managed resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource name, e.g. `example_widget`
    pub name: String,

    /// Resource schema; required for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Top-level schema of a resource
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Top-level attributes
    #[serde(default)]
    pub attributes: Vec<Attribute>,

    /// Top-level blocks
    #[serde(default)]
    pub blocks: Vec<Block>,

    /// Schema description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema deprecation message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecation_message: Option<String>,
}
