//! # schemagen-codegen
//!
//! Compiles a parsed resource specification into Go source for a
//! Terraform-plugin-framework-style provider.
//!
//! This crate provides a generator tree that:
//! - Mirrors every attribute and block of a resource as a [`GeneratorNode`]
//! - Renders schema fragments and model struct fields per node
//! - Emits custom object type/value definitions for nested objects
//! - Synthesizes To/From adapters for associated external types
//! - Aggregates the imports the emitted code needs
//!
//! ## How it works
//!
//! A [`ResourceGenerator`] is built from a [`schemagen_spec::Resource`]. Each
//! top-level attribute and block becomes a node; nested objects own their
//! children in sorted maps so every emission is deterministic. The output is
//! unformatted Go source, handed to an external formatter by the caller.
//!
//! ## Example
//!
//! ```no_run
//! use schemagen_codegen::{GenerateOptions, ResourceGenerator};
//! use schemagen_spec::Specification;
//!
//! let spec = Specification::from_json(
//!     r#"{"resources":[{"name":"example","schema":{"attributes":[
//!         {"name":"enabled","bool":{"computed_optional_required":"required"}}
//!     ]}}]}"#,
//! )?;
//! let generator = ResourceGenerator::new(&spec.resources[0])?;
//! let file = generator.generate(&GenerateOptions::default())?;
//! assert!(file.content.contains("\"enabled\": schema.BoolAttribute{"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Rust 1.92 compiler bug: false positive unused_assignments in thiserror/miette derive macros
// https://github.com/rust-lang/rust/issues/147648
#![allow(unused_assignments)]

pub mod convert;
pub mod custom_type;
pub mod external;
pub mod generator;
pub mod identifier;
pub mod imports;
pub mod model;
pub mod nested;
pub mod node;
pub mod schema;
pub mod templates;
pub mod to_from;

pub use generator::{GenerateOptions, GeneratedResource, ResourceGenerator, generate_all};
pub use identifier::FrameworkIdentifier;
pub use imports::Imports;
pub use model::ModelField;
pub use nested::NestedObject;
pub use node::{GeneratorNode, NodeKind};

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during code generation
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A required sub-object of an attribute or block is absent
    #[error("Cannot build {kind} '{name}': {field} is missing")]
    #[diagnostic(
        code(schemagen::codegen::construction),
        help("Add the missing field to the specification")
    )]
    Construction {
        /// Attribute, block or resource name
        name: String,
        /// Kind being built, e.g. `list_nested`
        kind: &'static str,
        /// Missing field, e.g. `nested_object`
        field: &'static str,
    },

    /// Two children of one object share a name
    #[error("Duplicate name '{name}' in '{parent}'")]
    #[diagnostic(
        code(schemagen::codegen::duplicate_name),
        help("Attribute and block names must be unique within an object")
    )]
    DuplicateName {
        /// Colliding child name
        name: String,
        /// Owning attribute, block or resource
        parent: String,
    },

    /// Generation is not supported for this combination of facets
    #[error("{feature} is not supported for {kind} '{name}'")]
    #[diagnostic(
        code(schemagen::codegen::unimplemented),
        help(
            "Associated external types are supported on single nested attributes and blocks whose children are scalars or bound single nested attributes"
        )
    )]
    Unimplemented {
        /// Attribute or block name
        name: String,
        /// Kind of the attribute or block
        kind: &'static str,
        /// Unsupported feature
        feature: &'static str,
    },

    /// A Go source template failed to render
    #[error("Failed to render template '{template}' for '{name}'")]
    #[diagnostic(code(schemagen::codegen::render))]
    Render {
        /// Template name
        template: &'static str,
        /// Attribute or block name
        name: String,
        /// Template engine error
        #[source]
        source: minijinja::Error,
    },
}

impl Error {
    /// Create a construction error for a missing field
    pub fn construction(name: impl Into<String>, kind: &'static str, field: &'static str) -> Self {
        Self::Construction {
            name: name.into(),
            kind,
            field,
        }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::DuplicateName {
            name: name.into(),
            parent: parent.into(),
        }
    }

    /// Create an unsupported-feature error
    pub fn unimplemented(
        name: impl Into<String>,
        kind: &'static str,
        feature: &'static str,
    ) -> Self {
        Self::Unimplemented {
            name: name.into(),
            kind,
            feature,
        }
    }

    /// Whether the error reports an unsupported feature rather than bad input
    #[must_use]
    pub const fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_error_display() {
        let error = Error::construction("rules", "list_nested", "nested_object");
        assert_eq!(
            error.to_string(),
            "Cannot build list_nested 'rules': nested_object is missing"
        );
        assert!(!error.is_unimplemented());
    }

    #[test]
    fn test_duplicate_name_display() {
        let error = Error::duplicate_name("tags", "config");
        assert_eq!(error.to_string(), "Duplicate name 'tags' in 'config'");
    }

    #[test]
    fn test_unimplemented_is_detectable() {
        let error = Error::unimplemented("rules", "list_nested", "Associated external type");
        assert!(error.is_unimplemented());
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("schemagen::codegen::unimplemented".to_string())
        );
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_codes() {
        let error = Error::construction("x", "list", "element_type");
        assert_eq!(
            error.code().map(|c| c.to_string()),
            Some("schemagen::codegen::construction".to_string())
        );
    }
}
