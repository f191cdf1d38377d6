use crate::imports::{Imports, TYPES_IMPORT};
use schemagen_spec::CustomType;

/// Custom type override of a scalar, collection or nested collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomTypeFacet(Option<CustomType>);

impl CustomTypeFacet {
    /// Wrap the specification value
    #[must_use]
    pub fn new(custom_type: Option<&CustomType>) -> Self {
        Self(custom_type.cloned())
    }

    /// The override, if any
    #[must_use]
    pub const fn get(&self) -> Option<&CustomType> {
        self.0.as_ref()
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        self.0.as_ref().map_or_else(String::new, custom_type_schema)
    }

    /// The override's import, or the framework `types` package without one
    #[must_use]
    pub fn imports(&self) -> Imports {
        value_type_imports(self.0.as_ref())
    }
}

/// Custom type of a nested object: the generated `<Name>Type` unless overridden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTypeNestedObject<'a> {
    type_name: &'a str,
    custom_type: Option<&'a CustomType>,
}

impl<'a> CustomTypeNestedObject<'a> {
    /// `type_name` is the PascalCase name of the generated type pair
    #[must_use]
    pub const fn new(type_name: &'a str, custom_type: Option<&'a CustomType>) -> Self {
        Self {
            type_name,
            custom_type,
        }
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        self.custom_type.map_or_else(
            || {
                let name = self.type_name;
                format!(
                    "CustomType: {name}Type{{\nObjectType: types.ObjectType{{\nAttrTypes: {name}Value{{}}.AttributeTypes(ctx),\n}},\n}},\n"
                )
            },
            custom_type_schema,
        )
    }
}

fn custom_type_schema(custom_type: &CustomType) -> String {
    format!("CustomType: {},\n", custom_type.type_expr)
}

/// Imports for the value type of a node: the override's own import when it
/// declares one, otherwise the framework `types` package.
#[must_use]
pub fn value_type_imports(custom_type: Option<&CustomType>) -> Imports {
    let mut imports = Imports::new();
    match custom_type {
        Some(ct) => {
            if let Some(import) = ct.import.as_ref().filter(|i| i.has_path()) {
                imports.add(import.clone());
            }
        }
        None => imports.add_path(TYPES_IMPORT),
    }
    imports
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_spec::Import;

    fn custom(import: Option<Import>) -> CustomType {
        CustomType {
            import,
            type_expr: "mytypes.TimestampType{}".to_string(),
            value_type: "mytypes.Timestamp".to_string(),
        }
    }

    #[test]
    fn test_absent_renders_nothing_and_imports_types() {
        let facet = CustomTypeFacet::new(None);
        assert_eq!(facet.schema(), "");
        assert!(facet.imports().contains_path(TYPES_IMPORT));
        assert_eq!(facet.imports().len(), 1);
    }

    #[test]
    fn test_override_replaces_types_import() {
        let ct = custom(Some(Import::new("example.com/mytypes")));
        let facet = CustomTypeFacet::new(Some(&ct));
        assert_eq!(facet.schema(), "CustomType: mytypes.TimestampType{},\n");
        let imports = facet.imports();
        assert!(!imports.contains_path(TYPES_IMPORT));
        assert!(imports.contains_path("example.com/mytypes"));
    }

    #[test]
    fn test_override_without_import_adds_nothing() {
        let ct = custom(None);
        assert!(CustomTypeFacet::new(Some(&ct)).imports().is_empty());
    }

    #[test]
    fn test_nested_object_generated_type() {
        assert_eq!(
            CustomTypeNestedObject::new("Config", None).schema(),
            "CustomType: ConfigType{\nObjectType: types.ObjectType{\nAttrTypes: ConfigValue{}.AttributeTypes(ctx),\n},\n},\n"
        );
    }

    #[test]
    fn test_nested_object_override() {
        let ct = custom(None);
        assert_eq!(
            CustomTypeNestedObject::new("Config", Some(&ct)).schema(),
            "CustomType: mytypes.TimestampType{},\n"
        );
    }
}
