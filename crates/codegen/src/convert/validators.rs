use crate::imports::{Imports, PLAN_MODIFIER_IMPORT, VALIDATOR_IMPORT};
use schemagen_spec::{CustomDefinition, PlanModifier, Validator};

/// Framework value kind a validator or plan modifier list decorates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// `Bool`
    Bool,
    /// `Float64`
    Float64,
    /// `Int64`
    Int64,
    /// `Number`
    Number,
    /// `String`
    String,
    /// `List`
    List,
    /// `Map`
    Map,
    /// `Set`
    Set,
    /// `Object`
    Object,
}

impl CollectionKind {
    /// Type name used in `[]validator.<T>` and `[]planmodifier.<T>`
    #[must_use]
    pub const fn framework_type(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Float64 => "Float64",
            Self::Int64 => "Int64",
            Self::Number => "Number",
            Self::String => "String",
            Self::List => "List",
            Self::Map => "Map",
            Self::Set => "Set",
            Self::Object => "Object",
        }
    }
}

/// Custom validators of one attribute, block or nested object
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorsCustom {
    kind: CollectionKind,
    definitions: Vec<CustomDefinition>,
}

impl ValidatorsCustom {
    /// Keep the custom entries of `validators`, in order
    #[must_use]
    pub fn new(kind: CollectionKind, validators: &[Validator]) -> Self {
        Self {
            kind,
            definitions: validators.iter().filter_map(|v| v.custom.clone()).collect(),
        }
    }

    /// Custom definitions in declaration order
    #[must_use]
    pub fn definitions(&self) -> &[CustomDefinition] {
        &self.definitions
    }

    /// Decorated kind
    #[must_use]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        render_list("Validators", "validator", self.kind, &self.definitions)
    }

    /// Category import plus each definition's imports
    #[must_use]
    pub fn imports(&self) -> Imports {
        definition_imports(VALIDATOR_IMPORT, &self.definitions)
    }
}

/// Custom plan modifiers of one attribute, block or nested object
#[derive(Debug, Clone, PartialEq)]
pub struct PlanModifiersCustom {
    kind: CollectionKind,
    definitions: Vec<CustomDefinition>,
}

impl PlanModifiersCustom {
    /// Keep the custom entries of `plan_modifiers`, in order
    #[must_use]
    pub fn new(kind: CollectionKind, plan_modifiers: &[PlanModifier]) -> Self {
        Self {
            kind,
            definitions: plan_modifiers
                .iter()
                .filter_map(|p| p.custom.clone())
                .collect(),
        }
    }

    /// Custom definitions in declaration order
    #[must_use]
    pub fn definitions(&self) -> &[CustomDefinition] {
        &self.definitions
    }

    /// Decorated kind
    #[must_use]
    pub const fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        render_list("PlanModifiers", "planmodifier", self.kind, &self.definitions)
    }

    /// Category import plus each definition's imports
    #[must_use]
    pub fn imports(&self) -> Imports {
        definition_imports(PLAN_MODIFIER_IMPORT, &self.definitions)
    }
}

fn render_list(
    field: &str,
    package: &str,
    kind: CollectionKind,
    definitions: &[CustomDefinition],
) -> String {
    if definitions.is_empty() {
        return String::new();
    }

    let mut out = format!("{field}: []{package}.{}{{\n", kind.framework_type());
    for definition in definitions {
        out.push_str(&definition.schema_definition);
        out.push_str(",\n");
    }
    out.push_str("},\n");
    out
}

// The category package is only needed when some definition brings its own
// import; a definition without imports refers to code in the provider package.
fn definition_imports(category: &str, definitions: &[CustomDefinition]) -> Imports {
    let mut imports = Imports::new();
    for definition in definitions.iter().filter(|d| d.has_import()) {
        imports.add_path(category);
        imports.extend(definition.imports_with_path().cloned());
    }
    imports
}
