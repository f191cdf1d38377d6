use super::go_string;
use crate::imports::{ATTR_IMPORT, Imports, TYPES_IMPORT};
use schemagen_spec::ElementType;
use schemagen_spec::schema::ObjectAttributeType;

/// Element type of a list, map or set attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTypeFacet(ElementType);

impl ElementTypeFacet {
    /// Wrap the specification value
    #[must_use]
    pub const fn new(element_type: ElementType) -> Self {
        Self(element_type)
    }

    /// Framework type expression, e.g. `types.StringType`
    #[must_use]
    pub fn type_expr(&self) -> String {
        element_type_expr(&self.0)
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        format!("ElementType: {},\n", self.type_expr())
    }

    /// Imports referenced by the type expression
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        element_type_imports(&self.0, &mut imports);
        imports
    }
}

/// Attribute types of an object attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeTypesFacet(Vec<ObjectAttributeType>);

impl AttributeTypesFacet {
    /// Wrap the specification value; emission is sorted by name
    #[must_use]
    pub fn new(mut attribute_types: Vec<ObjectAttributeType>) -> Self {
        attribute_types.sort_by(|a, b| a.name.cmp(&b.name));
        Self(attribute_types)
    }

    /// `map[string]attr.Type{...}` literal
    #[must_use]
    pub fn type_expr(&self) -> String {
        attr_types_map(&self.0)
    }

    /// Schema fragment
    #[must_use]
    pub fn schema(&self) -> String {
        format!("AttributeTypes: {},\n", self.type_expr())
    }

    /// Imports referenced by the map literal
    #[must_use]
    pub fn imports(&self) -> Imports {
        let mut imports = Imports::new();
        imports.add_path(ATTR_IMPORT);
        for attribute_type in &self.0 {
            element_type_imports(&attribute_type.element_type, &mut imports);
        }
        imports
    }
}

fn element_type_expr(element_type: &ElementType) -> String {
    let (custom_type, default) = match element_type {
        ElementType::Bool(p) => (&p.custom_type, "types.BoolType".to_string()),
        ElementType::Float64(p) => (&p.custom_type, "types.Float64Type".to_string()),
        ElementType::Int64(p) => (&p.custom_type, "types.Int64Type".to_string()),
        ElementType::Number(p) => (&p.custom_type, "types.NumberType".to_string()),
        ElementType::String(p) => (&p.custom_type, "types.StringType".to_string()),
        ElementType::List(c) => (&c.custom_type, collection_expr("List", &c.element_type)),
        ElementType::Map(c) => (&c.custom_type, collection_expr("Map", &c.element_type)),
        ElementType::Set(c) => (&c.custom_type, collection_expr("Set", &c.element_type)),
        ElementType::Object(o) => (
            &o.custom_type,
            format!(
                "types.ObjectType{{\nAttrTypes: {},\n}}",
                attr_types_map(&sorted(&o.attribute_types))
            ),
        ),
    };
    custom_type
        .as_ref()
        .map_or(default, |ct| ct.type_expr.clone())
}

fn collection_expr(collection: &str, element_type: &ElementType) -> String {
    format!(
        "types.{collection}Type{{\nElemType: {},\n}}",
        element_type_expr(element_type)
    )
}

fn attr_types_map(attribute_types: &[ObjectAttributeType]) -> String {
    let mut out = String::from("map[string]attr.Type{\n");
    for attribute_type in attribute_types {
        out.push_str(&format!(
            "{}: {},\n",
            go_string(&attribute_type.name),
            element_type_expr(&attribute_type.element_type)
        ));
    }
    out.push('}');
    out
}

fn sorted(attribute_types: &[ObjectAttributeType]) -> Vec<ObjectAttributeType> {
    let mut sorted = attribute_types.to_vec();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted
}

fn element_type_imports(element_type: &ElementType, imports: &mut Imports) {
    let custom_type = match element_type {
        ElementType::Bool(p)
        | ElementType::Float64(p)
        | ElementType::Int64(p)
        | ElementType::Number(p)
        | ElementType::String(p) => &p.custom_type,
        ElementType::List(c) | ElementType::Map(c) | ElementType::Set(c) => &c.custom_type,
        ElementType::Object(o) => &o.custom_type,
    };

    if let Some(ct) = custom_type {
        if let Some(import) = ct.import.as_ref().filter(|i| i.has_path()) {
            imports.add(import.clone());
        }
        return;
    }

    imports.add_path(TYPES_IMPORT);
    match element_type {
        ElementType::List(c) | ElementType::Map(c) | ElementType::Set(c) => {
            element_type_imports(&c.element_type, imports);
        }
        ElementType::Object(o) => {
            imports.add_path(ATTR_IMPORT);
            for attribute_type in &o.attribute_types {
                element_type_imports(&attribute_type.element_type, imports);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemagen_spec::CustomType;
    use schemagen_spec::Import;
    use schemagen_spec::schema::{CollectionElement, ObjectElement, PrimitiveElement};

    fn string() -> ElementType {
        ElementType::String(PrimitiveElement::default())
    }

    #[test]
    fn test_primitive_element_schema() {
        let facet = ElementTypeFacet::new(string());
        assert_eq!(facet.schema(), "ElementType: types.StringType,\n");
        assert_eq!(facet.imports().len(), 1);
        assert!(facet.imports().contains_path(TYPES_IMPORT));
    }

    #[test]
    fn test_nested_list_element() {
        let facet = ElementTypeFacet::new(ElementType::List(CollectionElement {
            custom_type: None,
            element_type: Box::new(ElementType::Int64(PrimitiveElement::default())),
        }));
        assert_eq!(
            facet.type_expr(),
            "types.ListType{\nElemType: types.Int64Type,\n}"
        );
    }

    #[test]
    fn test_custom_element_replaces_expression() {
        let facet = ElementTypeFacet::new(ElementType::String(PrimitiveElement {
            custom_type: Some(CustomType {
                import: Some(Import::new("example.com/cidr")),
                type_expr: "cidr.Type{}".to_string(),
                value_type: "cidr.Value".to_string(),
            }),
        }));
        assert_eq!(facet.type_expr(), "cidr.Type{}");
        let imports = facet.imports();
        assert!(imports.contains_path("example.com/cidr"));
        assert!(!imports.contains_path(TYPES_IMPORT));
    }

    #[test]
    fn test_object_element_sorted_and_imports_attr() {
        let facet = ElementTypeFacet::new(ElementType::Object(ObjectElement {
            custom_type: None,
            attribute_types: vec![
                ObjectAttributeType {
                    name: "port".to_string(),
                    element_type: ElementType::Int64(PrimitiveElement::default()),
                },
                ObjectAttributeType {
                    name: "host".to_string(),
                    element_type: string(),
                },
            ],
        }));
        assert_eq!(
            facet.type_expr(),
            "types.ObjectType{\nAttrTypes: map[string]attr.Type{\n\"host\": types.StringType,\n\"port\": types.Int64Type,\n},\n}"
        );
        assert!(facet.imports().contains_path(ATTR_IMPORT));
    }

    #[test]
    fn test_attribute_types_schema() {
        let facet = AttributeTypesFacet::new(vec![ObjectAttributeType {
            name: "enabled".to_string(),
            element_type: ElementType::Bool(PrimitiveElement::default()),
        }]);
        assert_eq!(
            facet.schema(),
            "AttributeTypes: map[string]attr.Type{\n\"enabled\": types.BoolType,\n},\n"
        );
        let imports = facet.imports();
        assert!(imports.contains_path(ATTR_IMPORT));
        assert!(imports.contains_path(TYPES_IMPORT));
    }
}
