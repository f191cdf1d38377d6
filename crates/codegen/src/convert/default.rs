use super::go_string;
use crate::imports::{
    BOOL_DEFAULT_IMPORT, FLOAT64_DEFAULT_IMPORT, INT64_DEFAULT_IMPORT, Imports,
    STRING_DEFAULT_IMPORT,
};
use schemagen_spec::{CustomDefinition, DefaultValue};

/// Static default literal of a scalar attribute
#[derive(Debug, Clone, PartialEq)]
pub enum StaticDefault {
    /// `booldefault.StaticBool`
    Bool(bool),
    /// `float64default.StaticFloat64`
    Float64(f64),
    /// `int64default.StaticInt64`
    Int64(i64),
    /// `stringdefault.StaticString`
    String(String),
}

impl StaticDefault {
    fn expression(&self) -> String {
        match self {
            Self::Bool(v) => format!("booldefault.StaticBool({v})"),
            Self::Float64(v) => format!("float64default.StaticFloat64({v:?})"),
            Self::Int64(v) => format!("int64default.StaticInt64({v})"),
            Self::String(v) => format!("stringdefault.StaticString({})", go_string(v)),
        }
    }

    const fn import_path(&self) -> &'static str {
        match self {
            Self::Bool(_) => BOOL_DEFAULT_IMPORT,
            Self::Float64(_) => FLOAT64_DEFAULT_IMPORT,
            Self::Int64(_) => INT64_DEFAULT_IMPORT,
            Self::String(_) => STRING_DEFAULT_IMPORT,
        }
    }
}

/// Default value of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultFacet {
    /// Literal rendered through the framework default package
    Static(StaticDefault),
    /// User-supplied expression
    Custom(CustomDefinition),
}

impl DefaultFacet {
    /// Convert a specification default; a static value wins over a custom one
    pub fn from_spec<T>(
        value: Option<&DefaultValue<T>>,
        to_static: impl FnOnce(&T) -> StaticDefault,
    ) -> Option<Self> {
        let value = value?;
        if let Some(literal) = &value.static_value {
            return Some(Self::Static(to_static(literal)));
        }
        value.custom.clone().map(Self::Custom)
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        let expression = match self {
            Self::Static(literal) => literal.expression(),
            Self::Custom(definition) => definition.schema_definition.clone(),
        };
        format!("Default: {expression},\n")
    }

    /// The default package for static values, the definition's own imports otherwise
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        match self {
            Self::Static(literal) => imports.add_path(literal.import_path()),
            Self::Custom(definition) => imports.extend(definition.imports_with_path().cloned()),
        }
        imports
    }
}
