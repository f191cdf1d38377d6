//! Identifier casing for generated Go names.
//!
//! Specification names are snake_case (`source_port`). Generated type and
//! field names use PascalCase (`SourcePort`), local variables camelCase.

use std::fmt;

/// A snake_case name from the specification
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameworkIdentifier(String);

impl FrameworkIdentifier {
    /// Wrap a specification name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as written in the specification
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `source_port` -> `SourcePort`
    #[must_use]
    pub fn to_pascal_case(&self) -> String {
        self.0
            .split(['_', '-'])
            .filter(|part| !part.is_empty())
            .map(capitalize)
            .collect()
    }

    /// `source_port` -> `sourcePort`
    #[must_use]
    pub fn to_camel_case(&self) -> String {
        let pascal = self.to_pascal_case();
        let mut chars = pascal.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }
}

impl fmt::Display for FrameworkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FrameworkIdentifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Pascal-case a Go type expression for use in a function name.
///
/// `*apisdk.Widget` -> `ApisdkWidget`
#[must_use]
pub fn type_suffix(type_expr: &str) -> String {
    type_expr
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|part| !part.is_empty())
        .map(|part| FrameworkIdentifier::new(part).to_pascal_case())
        .collect()
}
