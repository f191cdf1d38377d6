//! Import references carried by custom facets.

use serde::{Deserialize, Serialize};

/// A Go import path with an optional alias.
///
/// Ordering is by path, then alias (`None` sorts first), which is the order
/// imports are emitted in generated files.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Import {
    /// Full import path, e.g. `github.com/example/types`
    pub path: String,

    /// Optional package alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl Import {
    /// Create an import without an alias
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
        }
    }

    /// Create an aliased import
    pub fn aliased(path: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: Some(alias.into()),
        }
    }

    /// Whether the import carries a usable path
    #[must_use]
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }
}
