//! Import aggregation
//!
//! Imports are derived from the tree on every call rather than stored, so
//! the set always matches the code the same tree emits.

use crate::convert::value_type_imports;
use crate::node::GeneratorNode;
use schemagen_spec::Import;
use std::collections::BTreeSet;
use std::collections::btree_set;

/// `attr` package, needed by generated object types and `AttributeTypes` maps
pub const ATTR_IMPORT: &str = "github.com/hashicorp/terraform-plugin-framework/attr";
/// `types` package, holding the default value types
pub const TYPES_IMPORT: &str = "github.com/hashicorp/terraform-plugin-framework/types";
/// `basetypes` package
pub const BASE_TYPES_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/types/basetypes";
/// `validator` package
pub const VALIDATOR_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/schema/validator";
/// `planmodifier` package
pub const PLAN_MODIFIER_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/resource/schema/planmodifier";
/// Resource `schema` package
pub const SCHEMA_IMPORT: &str = "github.com/hashicorp/terraform-plugin-framework/resource/schema";
/// `diag` package
pub const DIAG_IMPORT: &str = "github.com/hashicorp/terraform-plugin-framework/diag";
/// `tftypes` package
pub const TFTYPES_IMPORT: &str = "github.com/hashicorp/terraform-plugin-go/tftypes";
/// `booldefault` package
pub const BOOL_DEFAULT_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/resource/schema/booldefault";
/// `float64default` package
pub const FLOAT64_DEFAULT_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/resource/schema/float64default";
/// `int64default` package
pub const INT64_DEFAULT_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/resource/schema/int64default";
/// `stringdefault` package
pub const STRING_DEFAULT_IMPORT: &str =
    "github.com/hashicorp/terraform-plugin-framework/resource/schema/stringdefault";

/// Deduplicated imports in emission order (path, then alias)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports(BTreeSet<Import>);

impl Imports {
    /// Empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Add an import; duplicates are ignored
    pub fn add(&mut self, import: Import) {
        self.0.insert(import);
    }

    /// Add an unaliased import by path
    pub fn add_path(&mut self, path: &str) {
        self.add(Import::new(path));
    }

    /// Merge another set into this one
    pub fn append(&mut self, mut other: Self) {
        self.0.append(&mut other.0);
    }

    /// Whether the exact import (path and alias) is present
    #[must_use]
    pub fn contains(&self, import: &Import) -> bool {
        self.0.contains(import)
    }

    /// Whether any import with `path` is present, regardless of alias
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.0.iter().any(|i| i.path == path)
    }

    /// Number of imports
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Imports in emission order
    pub fn iter(&self) -> btree_set::Iter<'_, Import> {
        self.0.iter()
    }

    /// Go `import (...)` block; empty when there is nothing to import
    #[must_use]
    pub fn to_go(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let mut out = String::from("import (\n");
        for import in &self.0 {
            match &import.alias {
                Some(alias) => out.push_str(&format!("\t{alias} \"{}\"\n", import.path)),
                None => out.push_str(&format!("\t\"{}\"\n", import.path)),
            }
        }
        out.push_str(")\n");
        out
    }
}

impl Extend<Import> for Imports {
    fn extend<I: IntoIterator<Item = Import>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Import> for Imports {
    fn from_iter<I: IntoIterator<Item = Import>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Imports {
    type Item = Import;
    type IntoIter = btree_set::IntoIter<Import>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Imports {
    type Item = &'a Import;
    type IntoIter = btree_set::Iter<'a, Import>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl GeneratorNode {
    /// Imports required by the node's schema, model and generated types,
    /// including every descendant.
    ///
    /// The tree is walked with an explicit stack. Every nested object
    /// without an override gets a generated type, whatever its ancestors do.
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        let mut stack: Vec<&Self> = vec![self];

        while let Some(node) = stack.pop() {
            imports.append(node.own_imports());

            let Some(object) = node.nested_object() else {
                continue;
            };

            if object.generates_custom_type() {
                imports.add_path(ATTR_IMPORT);
            }

            imports.append(value_type_imports(object.custom_type.as_ref()));
            imports.append(object.plan_modifiers.imports());
            imports.append(object.validators.imports());
            if let Some(external) = &object.associated_external_type {
                imports.append(external.imports());
            }

            stack.extend(object.attributes.values().chain(object.blocks.values()));
        }

        imports
    }

    // Facet imports of this node alone.
    fn own_imports(&self) -> Imports {
        let facets = self.facets();
        let mut imports = match self {
            Self::SingleNested(_) | Self::SingleNestedBlock(_) => Imports::new(),
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
            | Self::SetNestedBlock(_) => facets.custom_type.imports(),
        };

        match self {
            Self::List(n) | Self::Map(n) | Self::Set(n) => {
                imports.append(n.element_type.imports());
            }
            Self::Object(n) => imports.append(n.attribute_types.imports()),
            Self::Bool(_)
            | Self::Float64(_)
            | Self::Int64(_)
            | Self::Number(_)
            | Self::String(_)
            | Self::ListNested(_)
            | Self::MapNested(_)
            | Self::SetNested(_)
            | Self::SingleNested(_)
            | Self::ListNestedBlock(_)
            | Self::SetNestedBlock(_)
            | Self::SingleNestedBlock(_) => {}
        }

        if let Some(default) = &facets.default {
            imports.append(default.imports());
        }
        imports.append(facets.plan_modifiers.imports());
        imports.append(facets.validators.imports());
        imports
    }
}
