//! Resource generation
//!
//! This module drives one resource through the generator tree:
//! - Building a node per top-level attribute and block
//! - Assembling the schema function and model struct
//! - Collecting custom types, adapters and imports into one Go file

use crate::convert::{DeprecationMessage, Description};
use crate::imports::{
    ATTR_IMPORT, BASE_TYPES_IMPORT, DIAG_IMPORT, SCHEMA_IMPORT, TFTYPES_IMPORT,
};
use crate::nested::NestedObject;
use crate::node::GeneratorNode;
use crate::{Error, FrameworkIdentifier, Imports, ModelField, Result};
use schemagen_spec::{Resource, Specification};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem;

const HEADER: &str = "// Code generated by schemagen; DO NOT EDIT.\n";

/// Options for resource generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    /// Go package the generated files belong to
    pub package_name: String,
    /// Suffix appended to the resource name to form the file name
    pub file_suffix: String,
    /// Skip resources with unsupported adapter shapes instead of failing
    pub skip_unimplemented: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package_name: "provider".to_string(),
            file_suffix: "_resource_gen.go".to_string(),
            skip_unimplemented: false,
        }
    }
}

/// Generated source for one resource
#[derive(Debug, Clone)]
pub struct GeneratedResource {
    /// Resource name
    pub name: String,
    /// Output file name, e.g. `example_resource_gen.go`
    pub file_name: String,
    /// Everything the file imports
    pub imports: Imports,
    /// Schema function
    pub schema: String,
    /// Model struct fields, sorted by name
    pub model_fields: Vec<ModelField>,
    /// Custom object types and values
    pub custom_types: String,
    /// Adapters for associated external types
    pub to_from_functions: String,
    /// Complete, unformatted file content
    pub content: String,
}

/// Generator tree for one resource
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGenerator {
    name: String,
    attributes: BTreeMap<String, GeneratorNode>,
    blocks: BTreeMap<String, GeneratorNode>,
    description: Description,
    deprecation_message: DeprecationMessage,
}

impl ResourceGenerator {
    /// Build the tree for a resource
    ///
    /// # Errors
    ///
    /// Returns [`Error::Construction`] when the resource or one of its
    /// descendants misses a required field, and [`Error::DuplicateName`] when
    /// two siblings share a name
    #[tracing::instrument(
        name = "resource_generator_new",
        skip(resource),
        fields(resource = %resource.name)
    )]
    pub fn new(resource: &Resource) -> Result<Self> {
        let schema = resource
            .schema
            .as_ref()
            .ok_or_else(|| Error::construction(&resource.name, "resource", "schema"))?;

        let mut object = NestedObject::new(&resource.name, &schema.attributes, &schema.blocks)?;
        tracing::debug!(
            attributes = object.attributes.len(),
            blocks = object.blocks.len(),
            "Built resource tree"
        );

        Ok(Self {
            name: resource.name.clone(),
            attributes: mem::take(&mut object.attributes),
            blocks: mem::take(&mut object.blocks),
            description: Description::new(schema.description.as_deref()),
            deprecation_message: DeprecationMessage::new(schema.deprecation_message.as_deref()),
        })
    }

    /// Resource name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level attributes, sorted by name
    #[must_use]
    pub const fn attributes(&self) -> &BTreeMap<String, GeneratorNode> {
        &self.attributes
    }

    /// Top-level blocks, sorted by name
    #[must_use]
    pub const fn blocks(&self) -> &BTreeMap<String, GeneratorNode> {
        &self.blocks
    }

    /// Structural equality of two resource trees
    #[must_use]
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    /// Every top-level node, attributes and blocks merged by name
    fn nodes(&self) -> impl Iterator<Item = (&String, &GeneratorNode)> {
        let merged: BTreeMap<&String, &GeneratorNode> =
            self.attributes.iter().chain(self.blocks.iter()).collect();
        merged.into_iter()
    }

    /// `func <Name>ResourceSchema(ctx context.Context) schema.Schema`
    #[must_use]
    pub fn schema(&self) -> String {
        let pascal = FrameworkIdentifier::new(&self.name).to_pascal_case();
        let mut out = format!(
            "func {pascal}ResourceSchema(ctx context.Context) schema.Schema {{\nreturn schema.Schema{{\n"
        );

        out.push_str("Attributes: map[string]schema.Attribute{\n");
        for (name, node) in &self.attributes {
            out.push_str(&node.schema(name));
        }
        out.push_str("},\n");

        if !self.blocks.is_empty() {
            out.push_str("Blocks: map[string]schema.Block{\n");
            for (name, node) in &self.blocks {
                out.push_str(&node.schema(name));
            }
            out.push_str("},\n");
        }

        out.push_str(&self.description.schema());
        out.push_str(&self.deprecation_message.schema());
        out.push_str("}\n}\n");
        out
    }

    /// Model fields of every top-level node, sorted by name
    #[must_use]
    pub fn model_fields(&self) -> Vec<ModelField> {
        self.nodes()
            .map(|(name, node)| node.model_field(name))
            .collect()
    }

    /// `type <Name>Model struct`
    #[must_use]
    pub fn model(&self) -> String {
        let pascal = FrameworkIdentifier::new(&self.name).to_pascal_case();
        let mut out = format!("type {pascal}Model struct {{\n");
        for field in self.model_fields() {
            out.push('\t');
            out.push_str(&field.render());
            out.push('\n');
        }
        out.push_str("}\n");
        out
    }

    /// Custom object types and values for every nested object in the tree
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a template fails
    pub fn custom_types_and_values(&self) -> Result<String> {
        let mut out = String::new();
        for (name, node) in self.nodes() {
            out.push_str(&node.custom_type_and_value(name)?);
        }
        Ok(out)
    }

    /// Adapters for every top-level node bound to an external type
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unimplemented`] for unsupported bound shapes and
    /// [`Error::Render`] if a template fails
    pub fn to_from_functions(&self) -> Result<String> {
        let mut out = String::new();
        for (name, node) in self.nodes() {
            out.push_str(&node.to_from_functions(name)?);
        }
        Ok(out)
    }

    /// Imports needed by the schema, model, custom types and adapters
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        for (_, node) in self.nodes() {
            imports.append(node.imports());
        }
        imports
    }

    /// Assemble the Go file for this resource
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unimplemented`] for unsupported adapter shapes and
    /// [`Error::Render`] if a template fails
    #[tracing::instrument(name = "resource_generate", skip(self, options), fields(resource = %self.name))]
    pub fn generate(&self, options: &GenerateOptions) -> Result<GeneratedResource> {
        let schema = self.schema();
        let model = self.model();
        let custom_types = self.custom_types_and_values()?;
        let to_from_functions = self.to_from_functions()?;

        let mut imports = self.imports();
        imports.add_path("context");
        imports.add_path(SCHEMA_IMPORT);
        if !custom_types.is_empty() {
            for path in [
                "fmt",
                ATTR_IMPORT,
                BASE_TYPES_IMPORT,
                DIAG_IMPORT,
                TFTYPES_IMPORT,
            ] {
                imports.add_path(path);
            }
        }
        if !to_from_functions.is_empty() {
            imports.add_path(DIAG_IMPORT);
        }

        let mut content = String::from(HEADER);
        content.push_str(&format!("\npackage {}\n\n", options.package_name));
        content.push_str(&imports.to_go());
        for section in [&schema, &model, &custom_types, &to_from_functions] {
            if !section.is_empty() {
                content.push('\n');
                content.push_str(section);
            }
        }

        tracing::debug!(
            imports = imports.len(),
            bytes = content.len(),
            "Generated resource file"
        );

        Ok(GeneratedResource {
            name: self.name.clone(),
            file_name: format!("{}{}", self.name, options.file_suffix),
            imports,
            schema,
            model_fields: self.model_fields(),
            custom_types,
            to_from_functions,
            content,
        })
    }
}

/// Generate every resource of a specification, in declaration order
///
/// # Errors
///
/// Returns the first construction or generation error. Unsupported adapter
/// shapes are skipped instead when [`GenerateOptions::skip_unimplemented`]
/// is set.
pub fn generate_all(
    specification: &Specification,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedResource>> {
    let mut generated = Vec::with_capacity(specification.resources.len());

    for resource in &specification.resources {
        let result = ResourceGenerator::new(resource).and_then(|g| g.generate(options));
        match result {
            Ok(file) => generated.push(file),
            Err(e) if options.skip_unimplemented && e.is_unimplemented() => {
                tracing::warn!(resource = %resource.name, error = %e, "Skipping resource");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(generated)
}
