//! Associated external type bindings.

use crate::identifier::type_suffix;
use crate::imports::{BASE_TYPES_IMPORT, Imports};
use schemagen_spec::AssociatedExternalType;

/// External (API SDK) type bound to a nested object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocExtType(AssociatedExternalType);

impl AssocExtType {
    /// Wrap the specification binding
    #[must_use]
    pub fn new(associated_external_type: &AssociatedExternalType) -> Self {
        Self(associated_external_type.clone())
    }

    /// Type as written, e.g. `*apisdk.Widget`
    #[must_use]
    pub fn type_expr(&self) -> &str {
        &self.0.type_expr
    }

    /// Type without a leading `*`, e.g. `apisdk.Widget`
    #[must_use]
    pub fn type_reference(&self) -> &str {
        self.0
            .type_expr
            .strip_prefix('*')
            .unwrap_or(&self.0.type_expr)
    }

    /// Whether the external type is a pointer
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        self.0.type_expr.starts_with('*')
    }

    /// Suffix of the adapter names, e.g. `ApisdkWidget` in `ToApisdkWidget`
    #[must_use]
    pub fn function_suffix(&self) -> String {
        type_suffix(&self.0.type_expr)
    }

    /// The binding's import, plus `basetypes` when it has one
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        if let Some(import) = self.0.import.as_ref().filter(|i| i.has_path()) {
            imports.add(import.clone());
            imports.add_path(BASE_TYPES_IMPORT);
        }
        imports
    }
}
